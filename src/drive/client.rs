use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::common::DRIVE_PAGE_SIZE;
use crate::common::errors::ServiceError;

pub const DRIVE_FILES_URL: &'static str = "https://www.googleapis.com/drive/v3/files";

const LIST_FIELDS: &'static str = "files(id, name, mimeType, modifiedTime)";

/// File entry as reported by the Drive `files.list` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub modified_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileMetadata {
    #[serde(default)]
    mime_type: Option<String>,
}

/// Read operations the listing and proxy services need from the provider.
/// Split out as a trait so those services can be exercised against stubs.
#[async_trait]
pub trait DriveRead: Send + Sync {
    async fn list_children(
        &self,
        query: &str,
        order_by: &str,
    ) -> Result<Vec<DriveFile>, ServiceError>;

    async fn fetch_media(&self, id: &str) -> Result<Vec<u8>, ServiceError>;

    async fn fetch_mime(&self, id: &str) -> Result<Option<String>, ServiceError>;
}

/// Authenticated Drive v3 REST client. Construction goes through
/// `drive::auth::resolve`, so a `DriveClient` always carries a token that was
/// accepted by the provider at least once.
pub struct DriveClient {
    http: reqwest::Client,
    access_token: String,
}

impl DriveClient {
    pub fn new(http: reqwest::Client, access_token: String) -> Self {
        DriveClient { http, access_token }
    }

    fn ensure_success(
        response: &reqwest::Response,
        what: &str,
        id: &str,
    ) -> Result<(), ServiceError> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ServiceError::not_found(format!("{what}: no file '{id}'")));
        }
        if !status.is_success() {
            return Err(ServiceError::provider(format!(
                "{what} rejected with status {status}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DriveRead for DriveClient {
    async fn list_children(
        &self,
        query: &str,
        order_by: &str,
    ) -> Result<Vec<DriveFile>, ServiceError> {
        let page_size = DRIVE_PAGE_SIZE.to_string();
        let response = self
            .http
            .get(DRIVE_FILES_URL)
            .bearer_auth(&self.access_token)
            .query(&[
                ("q", query),
                ("fields", LIST_FIELDS),
                ("orderBy", order_by),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await
            .map_err(|err| ServiceError::provider(format!("listing request failed: {err}")))?;

        Self::ensure_success(&response, "listing", query)?;

        let list: DriveFileList = response
            .json()
            .await
            .map_err(|err| ServiceError::provider(format!("malformed listing response: {err}")))?;
        Ok(list.files)
    }

    async fn fetch_media(&self, id: &str) -> Result<Vec<u8>, ServiceError> {
        let response = self
            .http
            .get(format!("{DRIVE_FILES_URL}/{id}"))
            .bearer_auth(&self.access_token)
            .query(&[("alt", "media")])
            .send()
            .await
            .map_err(|err| ServiceError::provider(format!("media request failed: {err}")))?;

        Self::ensure_success(&response, "media fetch", id)?;

        let bytes = response
            .bytes()
            .await
            .map_err(|err| ServiceError::provider(format!("media body read failed: {err}")))?;
        Ok(bytes.to_vec())
    }

    async fn fetch_mime(&self, id: &str) -> Result<Option<String>, ServiceError> {
        let response = self
            .http
            .get(format!("{DRIVE_FILES_URL}/{id}"))
            .bearer_auth(&self.access_token)
            .query(&[("fields", "mimeType")])
            .send()
            .await
            .map_err(|err| ServiceError::provider(format!("metadata request failed: {err}")))?;

        Self::ensure_success(&response, "metadata fetch", id)?;

        let metadata: FileMetadata = response
            .json()
            .await
            .map_err(|err| ServiceError::provider(format!("malformed metadata response: {err}")))?;
        Ok(metadata.mime_type)
    }
}
