use crate::common::DEFAULT_IMAGE_MIME;
use crate::common::errors::ServiceError;
use crate::drive::client::DriveRead;

/// Fetch raw image bytes and the resolved MIME type for a Drive file.
///
/// Two round trips: `alt=media` for the content, then a metadata read for the
/// MIME type. Drive occasionally omits the type, in which case JPEG is
/// assumed.
pub async fn fetch_image(
    client: &dyn DriveRead,
    id: &str,
) -> Result<(Vec<u8>, String), ServiceError> {
    let bytes = client.fetch_media(id).await?;
    let mime = client
        .fetch_mime(id)
        .await?
        .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string());
    Ok((bytes, mime))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drive::client::DriveFile;
    use async_trait::async_trait;

    struct StubDrive {
        mime: Option<String>,
        missing: bool,
    }

    #[async_trait]
    impl DriveRead for StubDrive {
        async fn list_children(
            &self,
            _query: &str,
            _order_by: &str,
        ) -> Result<Vec<DriveFile>, ServiceError> {
            unimplemented!("not used by proxy tests")
        }

        async fn fetch_media(&self, id: &str) -> Result<Vec<u8>, ServiceError> {
            if self.missing {
                return Err(ServiceError::not_found(format!("no file '{id}'")));
            }
            Ok(vec![0xFF, 0xD8, 0xFF])
        }

        async fn fetch_mime(&self, _id: &str) -> Result<Option<String>, ServiceError> {
            Ok(self.mime.clone())
        }
    }

    #[tokio::test]
    async fn missing_mime_defaults_to_jpeg() {
        let stub = StubDrive {
            mime: None,
            missing: false,
        };

        let (bytes, mime) = fetch_image(&stub, "some-id").await.unwrap();
        assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF]);
        assert_eq!(mime, "image/jpeg");
    }

    #[tokio::test]
    async fn reported_mime_is_passed_through() {
        let stub = StubDrive {
            mime: Some("image/png".to_string()),
            missing: false,
        };

        let (_, mime) = fetch_image(&stub, "some-id").await.unwrap();
        assert_eq!(mime, "image/png");
    }

    #[tokio::test]
    async fn unknown_id_surfaces_as_not_found() {
        let stub = StubDrive {
            mime: None,
            missing: true,
        };

        let result = fetch_image(&stub, "gone").await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }
}
