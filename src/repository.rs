use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Administrator, Role, Vehicle, VehiclePayload};

/// Listing endpoints return fixed-size pages.
const PAGE_SIZE: i64 = 10;

/// Pages are 1-based on the wire; anything below 1 clamps to the first page.
fn page_offset(pagina: i32) -> i64 {
    i64::from(pagina.max(1) - 1) * PAGE_SIZE
}

/// Repository Trait
///
/// Abstract contract for all persistence operations, so handlers interact
/// with the data layer without knowing the concrete implementation
/// (Postgres, mock, etc.).
///
/// `Send + Sync + async_trait` make the trait object (`Arc<dyn Repository>`)
/// shareable across Axum's asynchronous task boundaries.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Vehicles ---
    async fn list_vehicles(&self, pagina: i32) -> Vec<Vehicle>;
    async fn get_vehicle(&self, id: i32) -> Option<Vehicle>;
    // Returns the stored row (with its assigned id), or None on a store error.
    async fn create_vehicle(&self, payload: VehiclePayload) -> Option<Vehicle>;
    // Full-field update; None if the id does not exist.
    async fn update_vehicle(&self, id: i32, payload: VehiclePayload) -> Option<Vehicle>;
    // True if a row was removed.
    async fn delete_vehicle(&self, id: i32) -> bool;

    // --- Administrators ---
    // Credential check at the store: both email and password must match.
    async fn login_administrator(&self, email: &str, password: &str) -> Option<Administrator>;
    async fn get_administrator(&self, id: i32) -> Option<Administrator>;
    // `pagina` is optional on this endpoint; absent means the first page.
    async fn list_administrators(&self, pagina: Option<i32>) -> Vec<Administrator>;
    async fn create_administrator(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Option<Administrator>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the
/// application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// The `Repository` implementation backed by PostgreSQL.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn list_vehicles(&self, pagina: i32) -> Vec<Vehicle> {
        sqlx::query_as::<_, Vehicle>(
            "SELECT id, name, brand, year FROM vehicles ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(PAGE_SIZE)
        .bind(page_offset(pagina))
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("list_vehicles error: {:?}", e);
            vec![]
        })
    }

    async fn get_vehicle(&self, id: i32) -> Option<Vehicle> {
        sqlx::query_as::<_, Vehicle>("SELECT id, name, brand, year FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get_vehicle error: {:?}", e);
                None
            })
    }

    async fn create_vehicle(&self, payload: VehiclePayload) -> Option<Vehicle> {
        match sqlx::query_as::<_, Vehicle>(
            "INSERT INTO vehicles (name, brand, year) VALUES ($1, $2, $3) \
             RETURNING id, name, brand, year",
        )
        .bind(&payload.name)
        .bind(&payload.brand)
        .bind(payload.year)
        .fetch_one(&self.pool)
        .await
        {
            Ok(vehicle) => Some(vehicle),
            Err(e) => {
                tracing::error!("create_vehicle error: {:?}", e);
                None
            }
        }
    }

    async fn update_vehicle(&self, id: i32, payload: VehiclePayload) -> Option<Vehicle> {
        sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET name = $2, brand = $3, year = $4 WHERE id = $1 \
             RETURNING id, name, brand, year",
        )
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.brand)
        .bind(payload.year)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("update_vehicle error: {:?}", e);
            None
        })
    }

    async fn delete_vehicle(&self, id: i32) -> bool {
        match sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
        {
            Ok(result) => result.rows_affected() > 0,
            Err(e) => {
                tracing::error!("delete_vehicle error: {:?}", e);
                false
            }
        }
    }

    /// Matches the stored credential pair exactly; a miss on either column
    /// yields None and the caller answers 401 without detail.
    async fn login_administrator(&self, email: &str, password: &str) -> Option<Administrator> {
        sqlx::query_as::<_, Administrator>(
            "SELECT id, email, password, role FROM administrators \
             WHERE email = $1 AND password = $2",
        )
        .bind(email)
        .bind(password)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("login_administrator error: {:?}", e);
            None
        })
    }

    async fn get_administrator(&self, id: i32) -> Option<Administrator> {
        sqlx::query_as::<_, Administrator>(
            "SELECT id, email, password, role FROM administrators WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("get_administrator error: {:?}", e);
            None
        })
    }

    async fn list_administrators(&self, pagina: Option<i32>) -> Vec<Administrator> {
        sqlx::query_as::<_, Administrator>(
            "SELECT id, email, password, role FROM administrators ORDER BY id \
             LIMIT $1 OFFSET $2",
        )
        .bind(PAGE_SIZE)
        .bind(page_offset(pagina.unwrap_or(1)))
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("list_administrators error: {:?}", e);
            vec![]
        })
    }

    async fn create_administrator(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Option<Administrator> {
        match sqlx::query_as::<_, Administrator>(
            "INSERT INTO administrators (email, password, role) VALUES ($1, $2, $3) \
             RETURNING id, email, password, role",
        )
        .bind(email)
        .bind(password)
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await
        {
            Ok(administrator) => Some(administrator),
            Err(e) => {
                tracing::error!("create_administrator error: {:?}", e);
                None
            }
        }
    }
}
