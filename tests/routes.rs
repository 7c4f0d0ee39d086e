use rocket::http::{ContentType, Cookie, Header, Status};
use rocket::local::blocking::Client;

use thumbgallery::build_rocket;
use thumbgallery::config::AppConfig;

fn client_with(config: AppConfig) -> Client {
    Client::tracked(build_rocket(config)).expect("valid rocket instance")
}

fn multipart_image_body(boundary: &str) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"image\"; filename=\"tile.png\"\r\n",
    );
    body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
    body.extend_from_slice(b"not really a png");
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[test]
fn folders_without_parent_id_is_a_config_error() {
    let client = client_with(AppConfig::default());

    let response = client.get("/folders").dispatch();
    assert_eq!(response.status(), Status::InternalServerError);

    let body: serde_json::Value = response.into_json().expect("json error body");
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("parent folder id")
    );
}

#[test]
fn proxy_image_without_credentials_is_a_config_error() {
    let config = AppConfig {
        google_drive_parent_folder_id: Some("parent".to_string()),
        ..AppConfig::default()
    };
    let client = client_with(config);

    let response = client.get("/proxy-image/some-id").dispatch();
    assert_eq!(response.status(), Status::InternalServerError);

    let body: serde_json::Value = response.into_json().expect("json error body");
    assert!(body["error"].as_str().unwrap().contains("credentials"));
}

#[test]
fn background_removal_requires_the_exact_token() {
    let config = AppConfig {
        n8n_api_token: Some("secret-token".to_string()),
        ..AppConfig::default()
    };
    let client = client_with(config);
    let boundary = "X-ROUTE-TEST-BOUNDARY";

    // No Authorization header at all.
    let response = client
        .post("/background-removal")
        .header(Header::new(
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .body(multipart_image_body(boundary))
        .dispatch();
    assert_eq!(response.status(), Status::Unauthorized);

    // Wrong token. Equality is exact, a Bearer prefix does not help.
    let response = client
        .post("/background-removal")
        .header(Header::new("Authorization", "Bearer secret-token"))
        .header(Header::new(
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .body(multipart_image_body(boundary))
        .dispatch();
    assert_eq!(response.status(), Status::Unauthorized);
}

#[test]
fn background_removal_rejects_undecodable_uploads() {
    let config = AppConfig {
        n8n_api_token: Some("secret-token".to_string()),
        ..AppConfig::default()
    };
    let client = client_with(config);
    let boundary = "X-ROUTE-TEST-BOUNDARY";

    let response = client
        .post("/background-removal")
        .header(Header::new("Authorization", "secret-token"))
        .header(Header::new(
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .body(multipart_image_body(boundary))
        .dispatch();

    // The token matches, but the payload is not an image.
    assert_eq!(response.status(), Status::InternalServerError);
}

#[test]
fn background_removal_without_configured_token_is_a_server_error() {
    let client = client_with(AppConfig::default());
    let boundary = "X-ROUTE-TEST-BOUNDARY";

    let response = client
        .post("/background-removal")
        .header(Header::new("Authorization", "anything"))
        .header(Header::new(
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .body(multipart_image_body(boundary))
        .dispatch();

    assert_eq!(response.status(), Status::InternalServerError);
}

#[test]
fn submit_without_webhook_config_is_a_server_error() {
    let client = client_with(AppConfig::default());

    let response = client
        .post("/submit")
        .header(ContentType::JSON)
        .body(r#"{"videoTitle":"My Video","email":"user@example.com"}"#)
        .dispatch();

    assert_eq!(response.status(), Status::InternalServerError);
}

#[test]
fn saved_email_reads_the_cookie() {
    let client = client_with(AppConfig::default());

    let response = client.get("/saved-email").dispatch();
    assert_eq!(response.status(), Status::Ok);
    let body: serde_json::Value = response.into_json().unwrap();
    assert!(body["email"].is_null());

    let response = client
        .get("/saved-email")
        .cookie(Cookie::new("userEmail", "user@example.com"))
        .dispatch();
    let body: serde_json::Value = response.into_json().unwrap();
    assert_eq!(body["email"], "user@example.com");
}
