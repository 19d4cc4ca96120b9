use crate::{
    AppState,
    auth::BearerToken,
    authz::access,
    models::{
        AdministratorPayload, AdministratorView, HomeView, LoggedAdministrator, LoginPayload,
        Role, Vehicle, VehiclePayload,
    },
    validation::{ValidationErrors, validate_administrator, validate_vehicle},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

// --- Query structs ---

/// Page selector for GET /Veiculos. `pagina` is mandatory on this endpoint;
/// omitting it is a 400 at the extractor.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct VehiclePageQuery {
    pub pagina: i32,
}

/// Page selector for GET /administradores, where the parameter may be
/// omitted (first page).
#[derive(Deserialize, utoipa::IntoParams)]
pub struct AdministratorPageQuery {
    pub pagina: Option<i32>,
}

// --- Home ---

/// home
///
/// [Anonymous] Welcome payload with a pointer at the API documentation.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Home payload", body = HomeView))
)]
pub async fn home() -> Json<HomeView> {
    Json(HomeView::default())
}

// --- Vehicles ---

/// list_vehicles
///
/// [Authenticated] Pages through the vehicle registry, 10 per page.
#[utoipa::path(
    get,
    path = "/Veiculos",
    params(VehiclePageQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Page of vehicles", body = [Vehicle]),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn list_vehicles(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    Query(query): Query<VehiclePageQuery>,
) -> Result<Json<Vec<Vehicle>>, Response> {
    state
        .gate
        .authorize(token.as_deref(), access::AUTHENTICATED)
        .map_err(IntoResponse::into_response)?;

    Ok(Json(state.repo.list_vehicles(query.pagina).await))
}

/// show_vehicle
///
/// [Adm] Single-vehicle lookup.
#[utoipa::path(
    get,
    path = "/Veiculos/{id}",
    params(("id" = i32, Path, description = "Vehicle ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Found", body = Vehicle),
        (status = 404, description = "Not Found"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Insufficient role")
    )
)]
pub async fn show_vehicle(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vehicle>, Response> {
    state
        .gate
        .authorize(token.as_deref(), access::ADM_ONLY)
        .map_err(IntoResponse::into_response)?;

    match state.repo.get_vehicle(id).await {
        Some(vehicle) => Ok(Json(vehicle)),
        None => Err(StatusCode::NOT_FOUND.into_response()),
    }
}

/// create_vehicle
///
/// [Adm or Editor] Adds a vehicle to the registry. The payload runs through
/// the validation pipeline before anything touches the store; a rejected
/// payload returns every violated rule at once.
#[utoipa::path(
    post,
    path = "/Veiculos",
    request_body = VehiclePayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Created", body = Vehicle),
        (status = 400, description = "Validation failed", body = ValidationErrors),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Insufficient role")
    )
)]
pub async fn create_vehicle(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    Json(payload): Json<VehiclePayload>,
) -> Result<impl IntoResponse, Response> {
    state
        .gate
        .authorize(token.as_deref(), access::ADM_OR_EDITOR)
        .map_err(IntoResponse::into_response)?;

    let errors = validate_vehicle(&payload);
    if !errors.is_empty() {
        return Err((StatusCode::BAD_REQUEST, Json(errors)).into_response());
    }

    match state.repo.create_vehicle(payload).await {
        Some(vehicle) => Ok((
            StatusCode::CREATED,
            [(header::LOCATION, format!("/Veiculos/{}", vehicle.id))],
            Json(vehicle),
        )),
        None => Err(StatusCode::INTERNAL_SERVER_ERROR.into_response()),
    }
}

/// update_vehicle
///
/// [Authenticated] Full-field update. Lookup first (404 beats validation),
/// then the validation pipeline, then the write.
#[utoipa::path(
    put,
    path = "/Veiculos/{id}",
    params(("id" = i32, Path, description = "Vehicle ID")),
    request_body = VehiclePayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated", body = Vehicle),
        (status = 400, description = "Validation failed", body = ValidationErrors),
        (status = 404, description = "Not Found"),
        (status = 401, description = "Unauthenticated")
    )
)]
pub async fn update_vehicle(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<VehiclePayload>,
) -> Result<Json<Vehicle>, Response> {
    state
        .gate
        .authorize(token.as_deref(), access::AUTHENTICATED)
        .map_err(IntoResponse::into_response)?;

    if state.repo.get_vehicle(id).await.is_none() {
        return Err(StatusCode::NOT_FOUND.into_response());
    }

    let errors = validate_vehicle(&payload);
    if !errors.is_empty() {
        return Err((StatusCode::BAD_REQUEST, Json(errors)).into_response());
    }

    match state.repo.update_vehicle(id, payload).await {
        Some(vehicle) => Ok(Json(vehicle)),
        // The row vanished between lookup and write.
        None => Err(StatusCode::NOT_FOUND.into_response()),
    }
}

/// delete_vehicle
///
/// [Adm] Removes a vehicle from the registry.
#[utoipa::path(
    delete,
    path = "/Veiculos/{id}",
    params(("id" = i32, Path, description = "Vehicle ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Insufficient role")
    )
)]
pub async fn delete_vehicle(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, Response> {
    state
        .gate
        .authorize(token.as_deref(), access::ADM_ONLY)
        .map_err(IntoResponse::into_response)?;

    if state.repo.delete_vehicle(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(StatusCode::NOT_FOUND.into_response())
    }
}

// --- Administrators ---

/// login
///
/// [Anonymous] Credential check against the store; a hit issues a fresh
/// 24-hour bearer token whose role claim mirrors the stored role. Misses are
/// a bare 401 with no token and no detail.
#[utoipa::path(
    post,
    path = "/administradores/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Authenticated", body = LoggedAdministrator),
        (status = 401, description = "Unknown email or wrong password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<LoggedAdministrator>, StatusCode> {
    match state
        .repo
        .login_administrator(&payload.email, &payload.password)
        .await
    {
        Some(administrator) => {
            match state.issuer.issue(&administrator.email, administrator.role) {
                Ok(token) => Ok(Json(LoggedAdministrator {
                    email: administrator.email,
                    role: administrator.role,
                    token,
                })),
                Err(e) => {
                    tracing::error!("token issuance failed: {e}");
                    Err(StatusCode::INTERNAL_SERVER_ERROR)
                }
            }
        }
        None => Err(StatusCode::UNAUTHORIZED),
    }
}

/// show_administrator
///
/// [Adm] Single administrator, password never leaves the store layer.
#[utoipa::path(
    get,
    path = "/administradores/{id}",
    params(("id" = i32, Path, description = "Administrator ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Found", body = AdministratorView),
        (status = 404, description = "Not Found"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Insufficient role")
    )
)]
pub async fn show_administrator(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AdministratorView>, Response> {
    state
        .gate
        .authorize(token.as_deref(), access::ADM_ONLY)
        .map_err(IntoResponse::into_response)?;

    match state.repo.get_administrator(id).await {
        Some(administrator) => Ok(Json(AdministratorView::from(administrator))),
        None => Err(StatusCode::NOT_FOUND.into_response()),
    }
}

/// list_administrators
///
/// [Adm] Pages through administrators, mapped to the password-free view.
#[utoipa::path(
    get,
    path = "/administradores",
    params(AdministratorPageQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Page of administrators", body = [AdministratorView]),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Insufficient role")
    )
)]
pub async fn list_administrators(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    Query(query): Query<AdministratorPageQuery>,
) -> Result<Json<Vec<AdministratorView>>, Response> {
    state
        .gate
        .authorize(token.as_deref(), access::ADM_ONLY)
        .map_err(IntoResponse::into_response)?;

    let administrators = state
        .repo
        .list_administrators(query.pagina)
        .await
        .into_iter()
        .map(AdministratorView::from)
        .collect();

    Ok(Json(administrators))
}

/// create_administrator
///
/// [Adm] Registers a new administrator. Validation runs before the store is
/// touched; a missing role after validation cannot happen, but the historical
/// default of Editor is kept as the fallback.
#[utoipa::path(
    post,
    path = "/administradores",
    request_body = AdministratorPayload,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Created", body = AdministratorView),
        (status = 400, description = "Validation failed", body = ValidationErrors),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Insufficient role")
    )
)]
pub async fn create_administrator(
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    Json(payload): Json<AdministratorPayload>,
) -> Result<impl IntoResponse, Response> {
    state
        .gate
        .authorize(token.as_deref(), access::ADM_ONLY)
        .map_err(IntoResponse::into_response)?;

    let errors = validate_administrator(&payload);
    if !errors.is_empty() {
        return Err((StatusCode::BAD_REQUEST, Json(errors)).into_response());
    }

    let role = payload.role.unwrap_or(Role::Editor);
    match state
        .repo
        .create_administrator(&payload.email, &payload.password, role)
        .await
    {
        Some(administrator) => Ok((
            StatusCode::CREATED,
            [(
                header::LOCATION,
                format!("/administradores/{}", administrator.id),
            )],
            Json(AdministratorView::from(administrator)),
        )),
        None => Err(StatusCode::INTERNAL_SERVER_ERROR.into_response()),
    }
}
