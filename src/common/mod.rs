pub mod errors;

pub const VALID_IMAGE_EXTENSIONS: &'static [&'static str] =
    &["jpg", "jpeg", "png", "gif", "webp", "bmp", "svg"];

pub const DRIVE_FOLDER_MIME: &'static str = "application/vnd.google-apps.folder";

pub const DEFAULT_IMAGE_MIME: &'static str = "image/jpeg";

/// Proxied image bytes are safe to cache publicly for one hour.
pub const IMAGE_CACHE_CONTROL: &'static str = "public, max-age=3600";

pub const PROXY_IMAGE_PREFIX: &'static str = "/proxy-image";

pub const DRIVE_PAGE_SIZE: usize = 100;

/// Upper bound on concurrent per-folder image listings.
pub const FOLDER_LIST_CONCURRENCY: usize = 4;

pub const USER_EMAIL_COOKIE: &'static str = "userEmail";

pub const USER_EMAIL_COOKIE_DAYS: i64 = 365;
