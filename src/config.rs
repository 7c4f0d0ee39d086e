use log::info;
use serde::Deserialize;

use crate::common::errors::ServiceError;

/// Environment-backed application configuration.
///
/// Every field is optional on purpose: a missing credential or folder id is a
/// request-time `ServiceError::Config`, never a startup crash. Loaded once via
/// `envy` after `dotenv` has populated the process environment, then kept in
/// Rocket managed state.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    pub google_service_account_email: Option<String>,
    pub google_service_account_private_key: Option<String>,
    pub google_service_account_project_id: Option<String>,

    /// Full service-account JSON blob, as an alternative to the discrete vars.
    pub google_service_account_json: Option<String>,

    /// Path to an ambient service-account JSON file.
    pub google_application_credentials: Option<String>,

    pub google_drive_parent_folder_id: Option<String>,

    /// Static bearer token shared with the n8n workflow.
    pub n8n_api_token: Option<String>,

    pub n8n_webhook_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let config: AppConfig = envy::from_env()?;
        if config.google_drive_parent_folder_id.is_none() {
            info!("Google Drive parent folder id not configured; /folders will report an error");
        }
        Ok(config)
    }

    pub fn parent_folder_id(&self) -> Result<&str, ServiceError> {
        self.google_drive_parent_folder_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ServiceError::config("Google Drive parent folder id is not configured"))
    }

    pub fn api_token(&self) -> Result<&str, ServiceError> {
        self.n8n_api_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ServiceError::config("API token is not configured"))
    }

    pub fn webhook_url(&self) -> Result<&str, ServiceError> {
        self.n8n_webhook_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ServiceError::config("Webhook URL is not configured"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parent_folder_is_a_config_error() {
        let config = AppConfig::default();
        assert!(matches!(
            config.parent_folder_id(),
            Err(ServiceError::Config(_))
        ));
    }

    #[test]
    fn empty_token_is_treated_as_unconfigured() {
        let config = AppConfig {
            n8n_api_token: Some(String::new()),
            ..AppConfig::default()
        };
        assert!(config.api_token().is_err());
    }
}
