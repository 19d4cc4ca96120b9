use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use ts_rs::TS;
use utoipa::ToSchema;

// --- Roles ---

/// Role
///
/// Closed set of administrator roles. Role strings enter the system from three
/// boundaries (token claims, database rows, request payloads) and every one of
/// them parses into this enum; unknown values are rejected at the boundary
/// instead of flowing through as free-form strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub enum Role {
    Adm,
    Editor,
}

#[derive(Debug, Error)]
#[error("unknown role '{0}', expected one of: Adm, Editor")]
pub struct RoleParseError(String);

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Adm => "Adm",
            Role::Editor => "Editor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Adm" => Ok(Role::Adm),
            "Editor" => Ok(Role::Editor),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

// Used by `#[sqlx(try_from = "String")]` when decoding the TEXT role column.
impl TryFrom<String> for Role {
    type Error = RoleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// --- Entities (mapped to database rows) ---

/// Vehicle
///
/// A vehicle record from the `vehicles` table. Doubles as the API view; every
/// field is public information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS, FromRow, Default)]
#[ts(export)]
pub struct Vehicle {
    pub id: i32,
    pub name: String,
    pub brand: String,
    pub year: i32,
}

/// Administrator
///
/// An administrator record from the `administrators` table. Never serialized
/// to the API; responses go through [`AdministratorView`] so the password
/// column stays inside the persistence layer.
#[derive(Debug, Clone, FromRow)]
pub struct Administrator {
    pub id: i32,
    pub email: String,
    pub password: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
}

// --- Request payloads (input schemas) ---

/// VehiclePayload
///
/// Input body for POST /Veiculos and PUT /Veiculos/{id}. Inspected by the
/// validation pipeline before any write.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, TS, Default)]
#[ts(export)]
pub struct VehiclePayload {
    pub name: String,
    pub brand: String,
    pub year: i32,
}

/// AdministratorPayload
///
/// Input body for POST /administradores. `role` is optional at the wire level
/// so that its absence produces a validation message rather than a
/// deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, TS, Default)]
#[ts(export)]
pub struct AdministratorPayload {
    pub email: String,
    pub password: String,
    pub role: Option<Role>,
}

/// LoginPayload
///
/// Input body for POST /administradores/login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, TS, Default)]
#[ts(export)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

// --- Response views (output schemas) ---

/// AdministratorView
///
/// Outward shape of an administrator: the entity minus the password column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct AdministratorView {
    pub id: i32,
    pub email: String,
    pub role: Role,
}

impl From<Administrator> for AdministratorView {
    fn from(administrator: Administrator) -> Self {
        Self {
            id: administrator.id,
            email: administrator.email,
            role: administrator.role,
        }
    }
}

/// LoggedAdministrator
///
/// Login response: the authenticated identity plus the freshly issued bearer
/// token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct LoggedAdministrator {
    pub email: String,
    pub role: Role,
    pub token: String,
}

/// HomeView
///
/// Payload served by the anonymous GET / route.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct HomeView {
    pub message: String,
    pub docs: String,
}

impl Default for HomeView {
    fn default() -> Self {
        Self {
            message: "Bem vindo a API de veículos".to_string(),
            docs: "/swagger-ui".to_string(),
        }
    }
}
