//! HTTP API definitions.

pub mod user;
pub mod users;

use axum::{routing::get, Extension, Router};

use crate::{Error, Service};

pub use self::user::User;

/// Builds the [`Router`] serving the users lookup API over the provided
/// [`Service`].
#[must_use]
pub fn router(service: Service) -> Router {
    Router::new()
        .route("/users", get(users::list))
        .route("/users/search", get(users::search))
        .route("/users/uuidBySlack", get(users::uuid_by_slack))
        .route("/users/uuidBy/:field", get(users::uuid_by_field))
        .route("/users/:uuid", get(users::by_id))
        .fallback(fallback)
        .layer(Extension(service))
}

/// Renders requests matching no route as a general [`Error`].
#[expect(
    clippy::unused_async,
    reason = "`async` is required to match signature"
)]
async fn fallback(uri: http::Uri) -> Error {
    Error::general(&format!("No route found for `{}`", uri.path()))
}
