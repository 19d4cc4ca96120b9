use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    auth::{Principal, TokenValidator},
    models::Role,
};

/// AccessRequirement
///
/// One declared precondition an operation demands. Every route attaches an
/// ordered list of these (see [`access`]); the gate evaluates the whole list
/// conjunctively against a single principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRequirement {
    /// A valid credential must be presented.
    Authenticated,
    /// The principal's role must be a member of this set. Stacking several of
    /// these on one route means the role must be in every one of them.
    RoleIn(&'static [Role]),
}

/// AccessDenied
///
/// Terminal authorization outcome for a request. Unauthenticated covers
/// missing, malformed, badly signed, and expired credentials alike; which of
/// those occurred is not surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessDenied {
    #[error("missing, invalid, or expired credential")]
    Unauthenticated,
    #[error("credential is valid but the role is not allowed")]
    Forbidden,
}

impl IntoResponse for AccessDenied {
    fn into_response(self) -> Response {
        match self {
            AccessDenied::Unauthenticated => StatusCode::UNAUTHORIZED.into_response(),
            AccessDenied::Forbidden => StatusCode::FORBIDDEN.into_response(),
        }
    }
}

/// AuthorizationGate
///
/// Evaluates a route's declared access requirements against the presented
/// credential. Stateless apart from the injected validator; no I/O, no
/// panics, no mutation.
#[derive(Clone)]
pub struct AuthorizationGate {
    validator: TokenValidator,
}

impl AuthorizationGate {
    pub fn new(validator: TokenValidator) -> Self {
        Self { validator }
    }

    /// authorize
    ///
    /// An empty requirement list is the anonymous case: the credential (even
    /// a garbage one) is never inspected and no principal is produced.
    /// Otherwise the credential must be present and valid, and the resolved
    /// principal's role must satisfy every `RoleIn` entry independently —
    /// stacked sets compose by intersection, not union.
    pub fn authorize(
        &self,
        bearer: Option<&str>,
        requirements: &[AccessRequirement],
    ) -> Result<Option<Principal>, AccessDenied> {
        if requirements.is_empty() {
            return Ok(None);
        }

        let token = bearer.ok_or(AccessDenied::Unauthenticated)?;
        let principal = self
            .validator
            .validate(token)
            .map_err(|_| AccessDenied::Unauthenticated)?;

        for requirement in requirements {
            if let AccessRequirement::RoleIn(allowed) = requirement {
                if !allowed.contains(&principal.role) {
                    return Err(AccessDenied::Forbidden);
                }
            }
        }

        Ok(Some(principal))
    }
}

/// Declared access policies, one per route shape. Handlers pass these to the
/// gate verbatim; nothing else decides who gets in.
pub mod access {
    use super::AccessRequirement;
    use crate::models::Role;

    pub const ANONYMOUS: &[AccessRequirement] = &[];

    pub const AUTHENTICATED: &[AccessRequirement] = &[AccessRequirement::Authenticated];

    pub const ADM_ONLY: &[AccessRequirement] = &[
        AccessRequirement::Authenticated,
        AccessRequirement::RoleIn(&[Role::Adm]),
    ];

    pub const ADM_OR_EDITOR: &[AccessRequirement] = &[
        AccessRequirement::Authenticated,
        AccessRequirement::RoleIn(&[Role::Adm, Role::Editor]),
    ];
}

/// Registry of every operation's declared policy, used by the startup
/// reachability check and kept next to the policies themselves so route
/// modules stay pure glue.
pub fn declared_policies() -> &'static [(&'static str, &'static [AccessRequirement])] {
    &[
        ("GET /", access::ANONYMOUS),
        ("GET /Veiculos", access::AUTHENTICATED),
        ("GET /Veiculos/{id}", access::ADM_ONLY),
        ("PUT /Veiculos/{id}", access::AUTHENTICATED),
        ("DELETE /Veiculos/{id}", access::ADM_ONLY),
        ("POST /Veiculos", access::ADM_OR_EDITOR),
        ("POST /administradores/login", access::ANONYMOUS),
        ("GET /administradores/{id}", access::ADM_ONLY),
        ("GET /administradores", access::ADM_ONLY),
        ("POST /administradores", access::ADM_ONLY),
    ]
}

/// Intersection of all `RoleIn` sets in a requirement list. `None` means the
/// list carries no role constraint at all.
pub fn effective_roles(requirements: &[AccessRequirement]) -> Option<Vec<Role>> {
    let mut effective: Option<Vec<Role>> = None;

    for requirement in requirements {
        if let AccessRequirement::RoleIn(allowed) = requirement {
            effective = Some(match effective {
                None => allowed.to_vec(),
                Some(current) => current
                    .into_iter()
                    .filter(|role| allowed.contains(role))
                    .collect(),
            });
        }
    }

    effective
}

/// A requirement list whose role sets intersect to nothing can never be
/// satisfied by any principal — the route is unreachable by construction.
pub fn is_satisfiable(requirements: &[AccessRequirement]) -> bool {
    match effective_roles(requirements) {
        Some(roles) => !roles.is_empty(),
        None => true,
    }
}

/// Startup check over the policy registry: an unreachable route is a
/// configuration mistake, not a runtime condition, so it is flagged loudly
/// when the router is built.
pub fn check_declared_policies() {
    for (route, policy) in declared_policies() {
        if !is_satisfiable(policy) {
            tracing::warn!(
                route = %route,
                "declared role requirements intersect to the empty set; no principal can ever be authorized"
            );
        }
    }
}
