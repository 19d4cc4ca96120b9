use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Vehicles Router Module
///
/// The vehicle registry surface. Access differs per method on the same path,
/// so the declared requirement lists sit in the handlers (see
/// `authz::declared_policies` for the full table):
///
/// - GET    /Veiculos        authenticated
/// - POST   /Veiculos        authenticated + role in {Adm, Editor}
/// - GET    /Veiculos/{id}   authenticated + role Adm
/// - PUT    /Veiculos/{id}   authenticated
/// - DELETE /Veiculos/{id}   authenticated + role Adm
pub fn vehicle_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/Veiculos",
            get(handlers::list_vehicles).post(handlers::create_vehicle),
        )
        .route(
            "/Veiculos/{id}",
            get(handlers::show_vehicle)
                .put(handlers::update_vehicle)
                .delete(handlers::delete_vehicle),
        )
}
