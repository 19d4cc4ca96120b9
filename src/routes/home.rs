use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Home Router Module
///
/// The single anonymous landing route. Declared policy: empty requirement
/// list (AllowAnonymous).
pub fn home_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::home))
}
