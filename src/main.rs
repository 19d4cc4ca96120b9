use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use veiculos_api::{
    AppState, AuthorizationGate, TokenIssuer, TokenValidator,
    config::{AppConfig, Env},
    create_router,
    repository::{PostgresRepository, RepositoryState},
};

use sqlx::postgres::PgPoolOptions;

/// main
///
/// Asynchronous entry point: configuration, logging, database, application
/// state, HTTP server — in that order, failing fast on anything missing.
#[tokio::main]
async fn main() {
    // 1. Configuration & environment loading (fail-fast).
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging filter: RUST_LOG wins, otherwise sensible local defaults.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "veiculos_api=debug,tower_http=info,axum=trace".into());

    // 3. Log format per environment: pretty for humans, JSON for aggregators.
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    if config.jwt_fallback {
        tracing::warn!(
            "JWT_SECRET is not set; tokens are signed with the weak built-in fallback key. \
             Never run this configuration outside throwaway local setups."
        );
    }

    // 4. Database initialization (Postgres).
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.db_url)
        .await
        .expect("FATAL: Failed to connect to Postgres. Check DATABASE_URL.");

    let repo = Arc::new(PostgresRepository::new(pool)) as RepositoryState;

    // 5. Token components: the signing key is injected here, once, and the
    // issuer/validator own it from then on.
    let issuer = TokenIssuer::new(&config.jwt_secret);
    let gate = AuthorizationGate::new(TokenValidator::new(&config.jwt_secret));

    // 6. Unified state assembly.
    let app_state = AppState {
        repo,
        issuer,
        gate,
        config,
    };

    // 7. Router and server startup.
    let app = create_router(app_state);

    let listener = TcpListener::bind("0.0.0.0:3000").await.unwrap();

    tracing::info!("Listening on 0.0.0.0:3000");
    tracing::info!("API documentation (Swagger UI) available at: http://localhost:3000/swagger-ui");

    axum::serve(listener, app).await.unwrap();
}
