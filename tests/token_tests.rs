use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;
use veiculos_api::auth::{
    AuthError, IssueError, TOKEN_VALIDITY_SECS, TokenIssuer, TokenValidator,
};
use veiculos_api::models::Role;

// --- Helpers ---

const TEST_SECRET: &str = "test-secret-value-1234567890";
const ISSUED_AT: i64 = 1_700_000_000;

fn issuer() -> TokenIssuer {
    TokenIssuer::new(TEST_SECRET)
}

fn validator() -> TokenValidator {
    TokenValidator::new(TEST_SECRET)
}

/// Signs an arbitrary claim set with the test key, bypassing the issuer, so
/// malformed-claim cases can be constructed.
fn raw_token(claims: serde_json::Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

// --- Tests ---

#[test]
fn issued_token_round_trips_to_principal() {
    let token = issuer().issue("adm@example.com", Role::Adm).unwrap();

    let principal = validator().validate(&token).unwrap();
    assert_eq!(principal.email, "adm@example.com");
    assert_eq!(principal.role, Role::Adm);
}

#[test]
fn token_is_accepted_throughout_the_validity_window() {
    let token = issuer()
        .issue_at("editor@example.com", Role::Editor, ISSUED_AT)
        .unwrap();
    let validator = validator();

    assert!(validator.validate_at(&token, ISSUED_AT).is_ok());
    assert!(validator.validate_at(&token, ISSUED_AT + 1).is_ok());
    assert!(
        validator
            .validate_at(&token, ISSUED_AT + TOKEN_VALIDITY_SECS - 1)
            .is_ok()
    );
}

#[test]
fn token_is_rejected_from_the_expiry_instant_onward() {
    let token = issuer()
        .issue_at("editor@example.com", Role::Editor, ISSUED_AT)
        .unwrap();
    let validator = validator();

    // The boundary instant itself is already expired.
    assert_eq!(
        validator.validate_at(&token, ISSUED_AT + TOKEN_VALIDITY_SECS),
        Err(AuthError::Expired)
    );
    assert_eq!(
        validator.validate_at(&token, ISSUED_AT + TOKEN_VALIDITY_SECS + 3600),
        Err(AuthError::Expired)
    );
}

#[test]
fn tampered_signature_fails_with_bad_signature() {
    let token = issuer().issue("adm@example.com", Role::Adm).unwrap();

    let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
    assert_eq!(parts.len(), 3);

    // Flip one character in the middle of the signature segment.
    let mut signature: Vec<char> = parts[2].chars().collect();
    signature[10] = if signature[10] == 'A' { 'B' } else { 'A' };
    parts[2] = signature.into_iter().collect();

    let tampered = parts.join(".");
    assert_eq!(
        validator().validate(&tampered),
        Err(AuthError::BadSignature)
    );
}

#[test]
fn token_signed_with_another_key_fails_with_bad_signature() {
    let foreign = TokenIssuer::new("a-completely-different-secret")
        .issue("adm@example.com", Role::Adm)
        .unwrap();

    assert_eq!(validator().validate(&foreign), Err(AuthError::BadSignature));
}

#[test]
fn garbage_credentials_are_malformed() {
    let validator = validator();

    assert_eq!(
        validator.validate("not-a-token"),
        Err(AuthError::Malformed)
    );
    assert_eq!(validator.validate("a.b.c"), Err(AuthError::Malformed));
    assert_eq!(validator.validate(""), Err(AuthError::Malformed));
}

#[test]
fn missing_email_claim_is_malformed() {
    let token = raw_token(json!({
        "Perfil": "Adm",
        "role": "Adm",
        "iat": ISSUED_AT,
        "exp": ISSUED_AT + TOKEN_VALIDITY_SECS,
    }));

    assert_eq!(
        validator().validate_at(&token, ISSUED_AT + 1),
        Err(AuthError::Malformed)
    );
}

#[test]
fn missing_role_claims_are_malformed() {
    let token = raw_token(json!({
        "Email": "adm@example.com",
        "iat": ISSUED_AT,
        "exp": ISSUED_AT + TOKEN_VALIDITY_SECS,
    }));

    assert_eq!(
        validator().validate_at(&token, ISSUED_AT + 1),
        Err(AuthError::Malformed)
    );
}

#[test]
fn generic_role_mirror_alone_is_sufficient() {
    // Role checks must work via either claim name; here only the generic
    // mirror is present.
    let token = raw_token(json!({
        "Email": "editor@example.com",
        "role": "Editor",
        "iat": ISSUED_AT,
        "exp": ISSUED_AT + TOKEN_VALIDITY_SECS,
    }));

    let principal = validator().validate_at(&token, ISSUED_AT + 1).unwrap();
    assert_eq!(principal.role, Role::Editor);
}

#[test]
fn unknown_role_string_is_malformed() {
    let token = raw_token(json!({
        "Email": "root@example.com",
        "Perfil": "Root",
        "iat": ISSUED_AT,
        "exp": ISSUED_AT + TOKEN_VALIDITY_SECS,
    }));

    assert_eq!(
        validator().validate_at(&token, ISSUED_AT + 1),
        Err(AuthError::Malformed)
    );
}

#[test]
fn empty_signing_key_cannot_issue() {
    let result = TokenIssuer::new("").issue("adm@example.com", Role::Adm);
    assert!(matches!(result, Err(IssueError::MissingKey)));
}
