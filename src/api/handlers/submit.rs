use log::info;
use rocket::State;
use rocket::http::{Cookie, CookieJar, SameSite, Status};
use rocket::serde::json::Json;
use rocket::time::Duration;
use rocket::{get, post};
use serde::{Deserialize, Serialize};

use crate::api::AppResult;
use crate::common::errors::ServiceError;
use crate::common::{USER_EMAIL_COOKIE, USER_EMAIL_COOKIE_DAYS};
use crate::config::AppConfig;

/// Video metadata relayed to the n8n workflow. Either a transcript (concept
/// generation) or a concept description (specific concept) accompanies the
/// title.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailRequest {
    pub video_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept_description: Option<String>,
    pub email: String,
}

#[post("/submit", format = "json", data = "<request>")]
pub async fn submit(
    config: &State<AppConfig>,
    jar: &CookieJar<'_>,
    request: Json<ThumbnailRequest>,
) -> AppResult<Status> {
    let webhook_url = config.webhook_url()?;
    let token = config.api_token()?;
    let request = request.into_inner();

    let response = reqwest::Client::new()
        .post(webhook_url)
        .header("Authorization", format!("Bearer {token}"))
        .json(&request)
        .send()
        .await
        .map_err(|err| ServiceError::provider(format!("webhook request failed: {err}")))?;

    if !response.status().is_success() {
        return Err(ServiceError::provider(format!(
            "webhook responded with status {}",
            response.status()
        ))
        .into());
    }

    info!("Forwarded thumbnail request for '{}'", request.video_title);

    // Remember the address so the form can be pre-filled next time.
    let cookie = Cookie::build((USER_EMAIL_COOKIE, request.email))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(Duration::days(USER_EMAIL_COOKIE_DAYS));
    jar.add(cookie);

    Ok(Status::Ok)
}

#[derive(Debug, Serialize)]
pub struct SavedEmail {
    pub email: Option<String>,
}

#[get("/saved-email")]
pub fn saved_email(jar: &CookieJar<'_>) -> Json<SavedEmail> {
    Json(SavedEmail {
        email: jar
            .get(USER_EMAIL_COOKIE)
            .map(|cookie| cookie.value().to_string()),
    })
}

pub fn generate_submit_routes() -> Vec<rocket::Route> {
    routes![submit, saved_email]
}
