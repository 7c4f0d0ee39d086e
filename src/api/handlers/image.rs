use rocket::Responder;
use rocket::State;
use rocket::get;
use rocket::http::ContentType;

use crate::api::AppResult;
use crate::common::errors::ServiceError;
use crate::config::AppConfig;
use crate::drive::DriveState;
use crate::drive::proxy::fetch_image;

#[derive(Responder)]
pub struct ProxiedImage {
    bytes: Vec<u8>,
    content_type: ContentType,
}

/// Streams a Drive image through the backend so the browser never needs
/// provider credentials. The cache fairing adds the Cache-Control header.
#[get("/proxy-image/<id>")]
pub async fn proxy_image(
    config: &State<AppConfig>,
    drive: &State<DriveState>,
    id: &str,
) -> AppResult<ProxiedImage> {
    let client = drive.client(config.inner()).await?;

    match fetch_image(client.as_ref(), id).await {
        Ok((bytes, mime)) => {
            let content_type = ContentType::parse_flexible(&mime).unwrap_or(ContentType::JPEG);
            Ok(ProxiedImage {
                bytes,
                content_type,
            })
        }
        Err(err) => {
            if !matches!(err, ServiceError::NotFound(_)) {
                drive.invalidate().await;
            }
            Err(err.into())
        }
    }
}

pub fn generate_image_routes() -> Vec<rocket::Route> {
    routes![proxy_image]
}
