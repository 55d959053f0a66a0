//! HTTP surface of the tutorial content service.

use application::TutorialApp;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod error;
pub mod routes;

pub use auth::{Caller, USER_ID_HEADER};
pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub tutorial_app: Arc<TutorialApp>,
}

/// Build the full router with its middleware stack.
///
/// OPTIONS requests reach the resource's own handlers; no CORS layer sits
/// in front of them.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::content::routes())
        .merge(routes::system_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
