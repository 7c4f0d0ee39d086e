use thiserror::Error;

/// Failure taxonomy shared by the Drive services and the request handlers.
///
/// Services never panic across their boundary; every remote or configuration
/// problem surfaces as one of these variants and is mapped to an HTTP status
/// by the `AppError` responder.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("provider request failed: {0}")]
    Provider(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl ServiceError {
    pub fn config(message: impl Into<String>) -> Self {
        ServiceError::Config(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        ServiceError::Auth(message.into())
    }

    pub fn provider(message: impl Into<String>) -> Self {
        ServiceError::Provider(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }
}
