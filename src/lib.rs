#[macro_use]
extern crate rocket;

pub mod api;
pub mod bootstrap;
pub mod common;
pub mod config;
pub mod drive;
pub mod gallery;
pub mod processing;

use api::fairings::cache::cache_control_fairing;
use api::handlers::folders::generate_folder_routes;
use api::handlers::image::generate_image_routes;
use api::handlers::removal::generate_removal_routes;
use api::handlers::submit::generate_submit_routes;
use config::AppConfig;
use drive::DriveState;

pub fn build_rocket(config: AppConfig) -> rocket::Rocket<rocket::Build> {
    rocket::build()
        .attach(cache_control_fairing())
        .manage(config)
        .manage(DriveState::new())
        .mount("/", generate_folder_routes())
        .mount("/", generate_image_routes())
        .mount("/", generate_removal_routes())
        .mount("/", generate_submit_routes())
}
