// src/handlers/auth.rs

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{CreateUserRequest, LoginRequest, User},
    utils::{
        hash::{hash_password, verify_password},
        jwt::{Claims, sign_jwt},
    },
};

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it.
/// Returns 201 Created; a duplicate username returns 409.
pub async fn signup(
    State(pool): State<PgPool>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, AppError> {
    let payload: CreateUserRequest = serde_json::from_value(body)
        .map_err(|_| AppError::BadRequest("Username and password are required".to_string()))?;

    if payload.validate().is_err() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    let hashed_password = hash_password(&payload.password)?;

    sqlx::query("INSERT INTO users (username, password) VALUES ($1, $2)")
        .bind(&payload.username)
        .bind(&hashed_password)
        .execute(&pool)
        .await
        .map_err(|e| {
            // Postgres error code for unique violation is 23505
            if e.to_string().contains("unique constraint") || e.to_string().contains("23505") {
                AppError::Conflict(format!("Username '{}' already exists", payload.username))
            } else {
                tracing::error!("Failed to register user: {:?}", e);
                AppError::from(e)
            }
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully!" })),
    ))
}

/// Authenticates a user and returns a JWT token.
///
/// Verifies the username and password against the database.
/// If valid, signs a JWT token embedding the username, expiring 2 hours
/// after issuance. Unknown user and wrong password produce the same
/// response body.
pub async fn login(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, AppError> {
    let payload: LoginRequest = serde_json::from_value(body)
        .map_err(|_| AppError::BadRequest("Username and password are required".to_string()))?;

    if payload.validate().is_err() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    let user: Option<User> =
        sqlx::query_as("SELECT username, password, created_at FROM users WHERE username = $1")
            .bind(&payload.username)
            .fetch_optional(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Login DB error: {:?}", e);
                AppError::InternalServerError(e.to_string())
            })?;

    let user = user.ok_or(AppError::AuthError(
        "Invalid username or password".to_string(),
    ))?;

    let is_valid = verify_password(&payload.password, &user.password)?;

    if !is_valid {
        return Err(AppError::AuthError(
            "Invalid username or password".to_string(),
        ));
    }

    let token = sign_jwt(&user.username, &config.jwt_secret, config.jwt_expiration)?;

    Ok(Json(json!({
        "success": true,
        "message": "Login successful",
        "token": token
    })))
}

/// Confirms that the presented token is valid and returns its subject.
///
/// The auth middleware has already rejected missing/expired/invalid tokens
/// before this handler runs.
pub async fn verify_token(
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(json!({
        "message": "Token is valid",
        "user_id": claims.sub
    })))
}
