use anyhow::{Context, anyhow};
use log::info;
use rocket::Responder;
use rocket::form::{Errors, Form, FromForm};
use rocket::fs::TempFile;
use rocket::http::Header;
use rocket::post;
use tokio::task::spawn_blocking;
use uuid::Uuid;

use crate::api::fairings::guards::token::GuardApiToken;
use crate::api::{AppResult, GuardResult};
use crate::processing::remove_background;

#[derive(FromForm)]
pub struct RemovalForm<'r> {
    #[field(name = "image")]
    pub image: TempFile<'r>,
}

#[derive(Responder)]
#[response(content_type = "image/webp")]
pub struct ProcessedImage {
    bytes: Vec<u8>,
    disposition: Header<'static>,
}

#[post("/background-removal", data = "<form>")]
pub async fn background_removal(
    token: GuardResult<GuardApiToken>,
    form: Result<Form<RemovalForm<'_>>, Errors<'_>>,
) -> AppResult<ProcessedImage> {
    let _ = token?;
    let mut inner_form = match form {
        Ok(form) => form.into_inner(),
        Err(errors) => {
            let error_chain = errors
                .iter()
                .map(|e| anyhow!(e.to_string()))
                .reduce(|acc, e| acc.context(e.to_string()));

            return match error_chain {
                Some(chain) => Err(chain.context("Failed to parse form").into()),
                None => Err(anyhow!("Failed to parse form with unknown error").into()),
            };
        }
    };

    let original_name = inner_form
        .image
        .name()
        .map(|name| name.to_string())
        .unwrap_or_else(|| "image".to_string());

    // The upload may be buffered in memory; spill it to disk to read it back.
    let spill_path = std::env::temp_dir().join(format!("removal-{}.tmp", Uuid::new_v4()));
    inner_form
        .image
        .move_copy_to(&spill_path)
        .await
        .context("Failed to store uploaded image")?;
    let bytes = tokio::fs::read(&spill_path)
        .await
        .context("Failed to read uploaded image")?;
    let _ = tokio::fs::remove_file(&spill_path).await;

    info!("Processing image '{original_name}' ({} bytes)", bytes.len());

    let processed = spawn_blocking(move || remove_background(&bytes))
        .await
        .context("Background removal task panicked")??;

    Ok(ProcessedImage {
        bytes: processed,
        disposition: Header::new(
            "Content-Disposition",
            format!("attachment; filename=\"processed_{original_name}.webp\""),
        ),
    })
}

pub fn generate_removal_routes() -> Vec<rocket::Route> {
    routes![background_removal]
}
