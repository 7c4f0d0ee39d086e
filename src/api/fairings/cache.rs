use rocket::fairing::AdHoc;
use rocket::http::Status;

use crate::common::{IMAGE_CACHE_CONTROL, PROXY_IMAGE_PREFIX};

/// Attach `Cache-Control` to successful proxied-image responses so browsers
/// keep the bytes for an hour instead of hitting Drive again.
pub fn cache_control_fairing() -> AdHoc {
    AdHoc::on_response("Proxy Image Cache Control", |req, res| {
        Box::pin(async move {
            if req.uri().path().starts_with(PROXY_IMAGE_PREFIX) && res.status() == Status::Ok {
                res.set_raw_header("Cache-Control", IMAGE_CACHE_CONTROL);
            }
        })
    })
}
