use rocket::State;
use rocket::get;
use rocket::serde::json::Json;

use crate::api::AppResult;
use crate::common::errors::ServiceError;
use crate::config::AppConfig;
use crate::drive::DriveState;
use crate::drive::listing::{FolderRecord, list_folders};

#[get("/folders")]
pub async fn folders(
    config: &State<AppConfig>,
    drive: &State<DriveState>,
) -> AppResult<Json<Vec<FolderRecord>>> {
    let parent_id = config.parent_folder_id()?;
    let client = drive.client(config.inner()).await?;

    match list_folders(client.as_ref(), parent_id).await {
        Ok(records) => Ok(Json(records)),
        Err(err) => {
            // A rejected call may mean the cached token expired; drop the
            // handle so the next request re-runs credential resolution.
            if !matches!(err, ServiceError::NotFound(_)) {
                drive.invalidate().await;
            }
            Err(err.into())
        }
    }
}

pub fn generate_folder_routes() -> Vec<rocket::Route> {
    routes![folders]
}
