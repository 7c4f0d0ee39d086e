use chrono::{DateTime, Utc};
use futures::StreamExt;
use futures::stream;
use log::warn;
use serde::Serialize;

use crate::common::errors::ServiceError;
use crate::common::{
    DRIVE_FOLDER_MIME, FOLDER_LIST_CONCURRENCY, PROXY_IMAGE_PREFIX, VALID_IMAGE_EXTENSIONS,
};
use crate::drive::client::{DriveFile, DriveRead};

/// One project folder with proxy paths for every image inside it. Built fresh
/// on each listing request, never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderRecord {
    pub id: String,
    pub name: String,
    pub last_modified: DateTime<Utc>,
    pub images: Vec<String>,
}

/// Enumerate the child folders of `parent_id` and the images inside each one.
///
/// Children are fetched with a small concurrency bound; the final sort by
/// `last_modified` descending restores a deterministic order. A child whose
/// image listing fails contributes an empty list instead of aborting the
/// whole call, so one bad folder cannot take down the gallery.
pub async fn list_folders(
    client: &dyn DriveRead,
    parent_id: &str,
) -> Result<Vec<FolderRecord>, ServiceError> {
    let query = format!(
        "'{parent_id}' in parents and mimeType='{DRIVE_FOLDER_MIME}' and trashed=false"
    );
    let children = client.list_children(&query, "modifiedTime desc").await?;

    let mut records: Vec<FolderRecord> = stream::iter(children)
        .map(|folder| async move {
            let images = match list_folder_images(client, &folder.id).await {
                Ok(images) => images,
                Err(err) => {
                    warn!(
                        "Listing images for folder '{}' ({}) failed: {err}",
                        folder.name, folder.id
                    );
                    Vec::new()
                }
            };

            FolderRecord {
                last_modified: folder.modified_time.unwrap_or_else(Utc::now),
                id: folder.id,
                name: if folder.name.is_empty() {
                    "Untitled".to_string()
                } else {
                    folder.name
                },
                images,
            }
        })
        .buffer_unordered(FOLDER_LIST_CONCURRENCY)
        .collect()
        .await;

    records.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
    Ok(records)
}

/// Image references for a single folder, ordered by file name ascending, each
/// one exposed only as a proxy path so access always flows through the
/// authenticated backend.
async fn list_folder_images(
    client: &dyn DriveRead,
    folder_id: &str,
) -> Result<Vec<String>, ServiceError> {
    let name_clauses = VALID_IMAGE_EXTENSIONS
        .iter()
        .map(|ext| format!("name contains '.{ext}'"))
        .collect::<Vec<_>>()
        .join(" or ");
    let query = format!(
        "'{folder_id}' in parents and (mimeType contains 'image/' or {name_clauses}) and trashed=false"
    );

    let mut files = client.list_children(&query, "name").await?;
    files.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(files
        .iter()
        .filter(|file| is_image(file))
        .map(|file| format!("{PROXY_IMAGE_PREFIX}/{}", file.id))
        .collect())
}

/// The provider-side query is only a coarse filter; this is the authoritative
/// check. An entry counts as an image when its MIME type starts with `image/`
/// or its name carries a known image extension, and sub-folders never count.
pub(crate) fn is_image(file: &DriveFile) -> bool {
    if let Some(mime) = file.mime_type.as_deref() {
        if mime == DRIVE_FOLDER_MIME {
            return false;
        }
        if mime.starts_with("image/") {
            return true;
        }
    }

    let name = file.name.to_ascii_lowercase();
    VALID_IMAGE_EXTENSIONS
        .iter()
        .any(|ext| name.ends_with(&format!(".{ext}")))
}
