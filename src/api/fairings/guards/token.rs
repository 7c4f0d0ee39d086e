use anyhow::anyhow;
use rocket::Request;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};

use crate::api::GuardError;
use crate::config::AppConfig;

/// Guards routes behind the static workflow token.
///
/// The check is plain string equality against the configured token, not a
/// signature scheme; the n8n workflow sends the same literal value.
pub struct GuardApiToken;

#[rocket::async_trait]
impl<'r> FromRequest<'r> for GuardApiToken {
    type Error = GuardError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let Some(config) = req.rocket().state::<AppConfig>() else {
            return Outcome::Error((
                Status::InternalServerError,
                GuardError {
                    status: Status::InternalServerError,
                    error: anyhow!("Application configuration is not available"),
                },
            ));
        };

        let expected = match config.api_token() {
            Ok(token) => token,
            Err(err) => {
                return Outcome::Error((
                    Status::InternalServerError,
                    GuardError {
                        status: Status::InternalServerError,
                        error: anyhow::Error::from(err),
                    },
                ));
            }
        };

        match req.headers().get_one("Authorization") {
            Some(header) if header == expected => Outcome::Success(GuardApiToken),
            Some(_) => Outcome::Error((
                Status::Unauthorized,
                anyhow!("Authorization header does not match the configured token").into(),
            )),
            None => Outcome::Error((
                Status::Unauthorized,
                anyhow!("Request is missing the Authorization header").into(),
            )),
        }
    }
}
