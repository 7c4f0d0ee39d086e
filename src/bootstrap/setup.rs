use env_logger::Builder;
use log::LevelFilter;

/// Initialize the logger: INFO globally, WARN for Rocket's own output so
/// request noise stays down. `RUST_LOG` still overrides both.
pub fn initialize_logger() {
    Builder::new()
        .filter(None, LevelFilter::Info)
        .filter(Some("rocket"), LevelFilter::Warn)
        .parse_default_env()
        .init();
}
