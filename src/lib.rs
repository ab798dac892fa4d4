#[macro_use]
extern crate diesel;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate rocket;

pub mod article;
pub mod comment;
pub mod db;
pub mod endpoints;
pub mod logging;
pub mod params;
pub mod projection;
pub mod query;
pub mod resolver;
pub mod topic;
pub mod types;
pub mod users;
pub mod utils;

use rocket::http::Status;
use rocket::request::Request;
use rocket::{Build, Rocket};

use crate::types::ApiError;

#[catch(404)]
fn not_found(_req: &Request) -> ApiError {
    ApiError::PathNotFound
}

#[catch(500)]
fn internal_error(_req: &Request) -> ApiError {
    ApiError::Internal
}

#[catch(default)]
fn fallback(status: Status, _req: &Request) -> ApiError {
    match status.code {
        400 | 422 => ApiError::BadRequest,
        404 => ApiError::PathNotFound,
        _ => ApiError::Internal,
    }
}

/// Assembles the server around an already-built pool.
pub fn rocket(pool: db::Pool) -> Rocket<Build> {
    rocket::build()
        .manage(pool)
        .mount("/api", routes![endpoints::index, endpoints::healthcheck])
        .mount("/api", routes![topic::list, users::list])
        .mount(
            "/api",
            routes![article::list, article::get, article::update_votes],
        )
        .mount("/api", routes![comment::list, comment::add, comment::remove])
        .register("/", catchers![not_found, internal_error, fallback])
}
