use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::models::{AdministratorPayload, VehiclePayload};

/// Oldest accepted vehicle year. The boundary itself is accepted.
pub const MIN_VEHICLE_YEAR: i32 = 1950;

/// ValidationErrors
///
/// Ordered accumulation of payload-rule violations. Serialized verbatim as
/// the 400 response body; an empty list means the payload may proceed to the
/// store. The message text is the contract the API has always exposed and is
/// kept byte-for-byte.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, TS)]
#[ts(export)]
pub struct ValidationErrors {
    pub messages: Vec<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn push(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// validate_vehicle
///
/// Rules run in fixed order and all applicable messages are collected — no
/// short-circuit within one payload: name, then brand, then year.
pub fn validate_vehicle(payload: &VehiclePayload) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if payload.name.is_empty() {
        errors.push("O nome não pode ser vazio");
    }
    if payload.brand.is_empty() {
        errors.push("A Marca não pode ficar em branco");
    }
    if payload.year < MIN_VEHICLE_YEAR {
        errors.push("Veículo muito antigo, aceita somente anos superiores a 1950");
    }

    errors
}

/// validate_administrator
///
/// Same contract as [`validate_vehicle`], over the administrator payload:
/// email, then password, then role presence.
pub fn validate_administrator(payload: &AdministratorPayload) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if payload.email.is_empty() {
        errors.push("Email não pode ser vazio");
    }
    if payload.password.is_empty() {
        errors.push("Senha não pode ser vazia");
    }
    if payload.role.is_none() {
        errors.push("Perfil não pode ser vazio");
    }

    errors
}
