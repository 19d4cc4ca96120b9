use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Administrators Router Module
///
/// Login plus administrator management. Login is the one anonymous entry
/// point (it is how credentials are obtained); everything else demands the
/// Adm role:
///
/// - POST /administradores/login   anonymous
/// - GET  /administradores         authenticated + role Adm
/// - POST /administradores         authenticated + role Adm
/// - GET  /administradores/{id}    authenticated + role Adm
pub fn administrator_routes() -> Router<AppState> {
    Router::new()
        .route("/administradores/login", post(handlers::login))
        .route(
            "/administradores",
            get(handlers::list_administrators).post(handlers::create_administrator),
        )
        .route("/administradores/{id}", get(handlers::show_administrator))
}
