use anyhow::Result;
use dotenv::dotenv;

use thumbgallery::bootstrap::setup::initialize_logger;
use thumbgallery::build_rocket;
use thumbgallery::config::AppConfig;

#[rocket::main]
async fn main() -> Result<()> {
    dotenv().ok();
    initialize_logger();

    let config = AppConfig::from_env()?;
    build_rocket(config).launch().await?;

    Ok(())
}
