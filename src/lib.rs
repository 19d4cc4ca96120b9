use axum::{Router, extract::FromRef, http::HeaderName};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod authz;
pub mod config;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod validation;

// Module for routing glue (home, vehicles, administrators).
pub mod routes;
use routes::{administrators, home, vehicles};

// --- Public Re-exports ---

// Makes core state types easily accessible to the application entry point
// (main.rs) and to the integration tests.
pub use auth::{TokenIssuer, TokenValidator};
pub use authz::AuthorizationGate;
pub use config::AppConfig;
pub use repository::{PostgresRepository, RepositoryState};

/// ApiDoc
///
/// Auto-generates the OpenAPI documentation (Swagger JSON) for the
/// application, aggregating every `#[utoipa::path]` handler and
/// `ToSchema`-decorated wire type. Served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::home,
        handlers::list_vehicles, handlers::show_vehicle, handlers::create_vehicle,
        handlers::update_vehicle, handlers::delete_vehicle,
        handlers::login, handlers::show_administrator, handlers::list_administrators,
        handlers::create_administrator
    ),
    components(
        schemas(
            models::Vehicle, models::VehiclePayload, models::AdministratorPayload,
            models::AdministratorView, models::LoginPayload, models::LoggedAdministrator,
            models::HomeView, models::Role, validation::ValidationErrors,
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "veiculos-api", description = "Vehicle registry API")
    )
)]
struct ApiDoc;

/// BearerSecurity
///
/// Registers the bearer-token scheme with the generated document so the
/// Swagger UI shows the Authorize box and protected operations reference it
/// via `security(("bearer_auth" = []))`.
struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// AppState
///
/// The single, thread-safe, immutable container holding all application
/// services: the persistence seam, the token issuer, the authorization gate,
/// and the loaded configuration. Shared across all incoming requests.
#[derive(Clone)]
pub struct AppState {
    /// Persistence seam (Postgres in production, mocks in tests).
    pub repo: RepositoryState,
    /// Signs fresh credentials at login.
    pub issuer: TokenIssuer,
    /// Evaluates each route's declared access requirements.
    pub gate: AuthorizationGate,
    /// The loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// Allow handlers and extractors to selectively pull components from the
// shared AppState.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for TokenIssuer {
    fn from_ref(app_state: &AppState) -> TokenIssuer {
        app_state.issuer.clone()
    }
}

impl FromRef<AppState> for AuthorizationGate {
    fn from_ref(app_state: &AppState) -> AuthorizationGate {
        app_state.gate.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the routing structure, applies the observability and CORS
/// layers, and registers the application state. Also runs the declared-policy
/// reachability check: a route whose stacked role sets intersect to nothing
/// is flagged at startup rather than discovered as a mystery 403 in traffic.
pub fn create_router(state: AppState) -> Router {
    authz::check_declared_policies();

    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Documentation: serve the auto-generated Swagger UI.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(home::home_routes())
        .merge(vehicles::vehicle_routes())
        .merge(administrators::administrator_routes())
        .with_state(state);

    // 3. Observability and Correlation Layers (applied outermost)
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID generation: a unique UUID per incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Request tracing: wraps the request/response lifecycle in
                // a span carrying the generated request ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID propagation back to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS layer
        .layer(cors)
}

/// trace_span_logger
///
/// Customizes the `TraceLayer` span: every log line for a single request is
/// correlated by the `x-request-id` header alongside method and URI.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
