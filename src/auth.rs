use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Role;

/// How long an issued credential stays valid. Fixed window, no refresh flow.
pub const TOKEN_VALIDITY_SECS: i64 = 24 * 60 * 60;

/// Claims
///
/// Payload structure carried inside the signed bearer token. Claim names are
/// part of the wire contract: `Email` and `Perfil` are what clients of the
/// previous generation of this API already decode, and `role` mirrors `Perfil`
/// under the generic name so role checks work via either.
///
/// `Email` and `Perfil` are optional here so that their absence surfaces as a
/// [`AuthError::Malformed`] credential rather than an opaque decode failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "Email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "Perfil", skip_serializing_if = "Option::is_none")]
    pub perfil: Option<Role>,
    #[serde(rename = "role", skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Issued At (iat): timestamp the credential was created.
    pub iat: i64,
    /// Expiration Time (exp): always `iat + TOKEN_VALIDITY_SECS`.
    pub exp: i64,
}

/// Principal
///
/// The identity resolved from a validated credential, scoped to a single
/// request. Rebuilt from the claims on every request; never cached and never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub email: String,
    pub role: Role,
}

/// Why a presented credential was rejected. The authorization gate collapses
/// all three into a 401; the distinction exists for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("credential could not be parsed or is missing required claims")]
    Malformed,
    #[error("credential signature does not verify")]
    BadSignature,
    #[error("credential has expired")]
    Expired,
}

/// Why issuance failed. `MissingKey` corresponds to running with an empty
/// signing key, the one condition under which issuance cannot proceed.
#[derive(Debug, Error)]
pub enum IssueError {
    #[error("signing key is not configured")]
    MissingKey,
    #[error("failed to sign credential: {0}")]
    Sign(#[from] jsonwebtoken::errors::Error),
}

/// TokenIssuer
///
/// Builds signed, time-bounded credentials from an authenticated
/// administrator's email and role. The signing key is injected once at
/// startup; issuance itself is pure computation.
#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
    key_is_empty: bool,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Self {
        Self {
            key: EncodingKey::from_secret(secret.as_bytes()),
            key_is_empty: secret.is_empty(),
        }
    }

    /// Issues a credential valid from now until now + 24h.
    pub fn issue(&self, email: &str, role: Role) -> Result<String, IssueError> {
        self.issue_at(email, role, Utc::now().timestamp())
    }

    /// Issues a credential anchored at an explicit issue time. `issue` is the
    /// production entry point; this one exists so expiry behavior can be
    /// pinned down deterministically.
    pub fn issue_at(&self, email: &str, role: Role, iat: i64) -> Result<String, IssueError> {
        if self.key_is_empty {
            return Err(IssueError::MissingKey);
        }

        let claims = Claims {
            email: Some(email.to_string()),
            perfil: Some(role),
            role: Some(role),
            iat,
            exp: iat + TOKEN_VALIDITY_SECS,
        };

        Ok(encode(&Header::default(), &claims, &self.key)?)
    }
}

/// TokenValidator
///
/// Verifies a presented credential's signature and expiry and extracts the
/// [`Principal`]. A pure function of (credential, current time, key): no
/// mutation, no I/O.
#[derive(Clone)]
pub struct TokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(secret: &str) -> Self {
        // The library's exp check accepts the boundary instant and applies
        // leeway; expiry here must reject exactly at iat + 24h, so the check
        // is disabled and done by hand in validate_at. A token without an exp
        // claim still fails to decode into Claims.
        let mut validation = Validation::default();
        validation.validate_exp = false;

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn validate(&self, token: &str) -> Result<Principal, AuthError> {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// Validates against an explicit clock reading. A credential is accepted
    /// for any `now` with `iat <= now < exp`; `now == exp` is already
    /// rejected.
    pub fn validate_at(&self, token: &str, now: i64) -> Result<Principal, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => AuthError::BadSignature,
                ErrorKind::ExpiredSignature => AuthError::Expired,
                // Bad base64, bad JSON, wrong segment count, unknown role
                // strings: all of these are structurally unusable credentials.
                _ => AuthError::Malformed,
            }
        })?;

        if data.claims.exp <= now {
            return Err(AuthError::Expired);
        }

        let email = data
            .claims
            .email
            .filter(|email| !email.is_empty())
            .ok_or(AuthError::Malformed)?;
        // Prefer the named claim, fall back to the generic mirror.
        let role = data
            .claims
            .perfil
            .or(data.claims.role)
            .ok_or(AuthError::Malformed)?;

        Ok(Principal { email, role })
    }
}

/// BearerToken
///
/// Extracts the raw credential from the `Authorization: Bearer <token>`
/// header, if present. Deliberately infallible: whether a missing credential
/// is acceptable depends on the route's declared access requirements, which
/// the authorization gate evaluates — not on header parsing.
pub struct BearerToken(pub Option<String>);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_string);

        Ok(Self(token))
    }
}
