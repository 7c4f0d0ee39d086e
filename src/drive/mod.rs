pub mod auth;
pub mod client;
pub mod listing;
pub mod proxy;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::common::errors::ServiceError;
use crate::config::AppConfig;
use client::DriveClient;

/// Process-lifetime cache of the authenticated Drive client.
///
/// The handle is handed out explicitly per request and dropped whenever a
/// provider call fails, so the next request re-runs credential resolution
/// instead of trusting a stale token.
#[derive(Default)]
pub struct DriveState {
    cached: RwLock<Option<Arc<DriveClient>>>,
}

impl DriveState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn client(&self, config: &AppConfig) -> Result<Arc<DriveClient>, ServiceError> {
        if let Some(client) = self.cached.read().await.as_ref() {
            return Ok(Arc::clone(client));
        }

        let client = Arc::new(auth::resolve(config).await?);
        *self.cached.write().await = Some(Arc::clone(&client));
        Ok(client)
    }

    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }
}
