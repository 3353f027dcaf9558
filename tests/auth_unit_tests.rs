// tests/auth_unit_tests.rs

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{EncodingKey, Header, encode};
use quiz_backend::error::AppError;
use quiz_backend::generator::build_prompt;
use quiz_backend::utils::hash::{hash_password, verify_password};
use quiz_backend::utils::jwt::{Claims, sign_jwt, verify_jwt};

const SECRET: &str = "test_secret_for_unit_tests";

#[test]
fn hash_then_verify_roundtrip() {
    let hash = hash_password("password123").expect("hashing failed");

    assert!(verify_password("password123", &hash).unwrap());
    assert!(!verify_password("wrong_password", &hash).unwrap());
}

#[test]
fn hashes_are_salted_per_call() {
    let first = hash_password("password123").unwrap();
    let second = hash_password("password123").unwrap();

    // Fresh salt per call means distinct PHC strings for the same input.
    assert_ne!(first, second);
    assert!(verify_password("password123", &second).unwrap());
}

#[test]
fn verify_rejects_malformed_stored_hash() {
    assert!(verify_password("password123", "not-a-phc-string").is_err());
}

#[test]
fn signed_token_validates_and_carries_username() {
    let token = sign_jwt("alice", SECRET, 7200).expect("signing failed");

    let claims = verify_jwt(&token, SECRET).expect("validation failed");
    assert_eq!(claims.sub, "alice");

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;
    assert!(claims.exp > now);
    assert!(claims.exp <= now + 7200 + 5);
}

fn token_expiring_at(exp: usize) -> String {
    let claims = Claims {
        sub: "alice".to_string(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

#[test]
fn expired_token_fails_with_token_expired() {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    let err = verify_jwt(&token_expiring_at(now - 300), SECRET).unwrap_err();
    assert!(matches!(err, AppError::TokenExpired));
}

#[test]
fn expiry_is_strict_with_no_grace_window() {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    // Just past expiry must already fail: no leeway.
    for past in [1, 5, 30, 59] {
        let err = verify_jwt(&token_expiring_at(now - past), SECRET).unwrap_err();
        assert!(
            matches!(err, AppError::TokenExpired),
            "token {}s past expiry validated",
            past
        );
    }

    // Comfortably before expiry still validates.
    let claims = verify_jwt(&token_expiring_at(now + 300), SECRET).unwrap();
    assert_eq!(claims.sub, "alice");
}

#[test]
fn tampered_token_fails_with_token_invalid() {
    let token = sign_jwt("alice", SECRET, 7200).unwrap();

    let err = verify_jwt(&token, "some_other_secret").unwrap_err();
    assert!(matches!(err, AppError::TokenInvalid));

    let err = verify_jwt("definitely.not.ajwt", SECRET).unwrap_err();
    assert!(matches!(err, AppError::TokenInvalid));
}

#[test]
fn prompt_embeds_parameters_and_output_contract() {
    let prompt = build_prompt("C Programming", "Pointers", "hard");

    assert!(prompt.contains("Topic: C Programming"));
    assert!(prompt.contains("Subtopic: Pointers"));
    assert!(prompt.contains("Difficulty: hard"));

    // Few-shot priming: both worked examples present.
    assert_eq!(prompt.matches("Answer: B").count(), 2);

    // Output format contract.
    assert!(prompt.contains("Question: ..."));
    assert!(prompt.contains("Answer: (A/B/C/D)"));
    assert!(prompt.contains("Hint: ..."));
}
