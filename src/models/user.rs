// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    /// Unique username, also the primary key.
    pub username: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for creating a new user (Signup).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 50, message = "Username and password are required"))]
    pub username: String,
    #[validate(length(min = 1, max = 128, message = "Username and password are required"))]
    pub password: String,
}

/// DTO for user login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50, message = "Username and password are required"))]
    pub username: String,
    #[validate(length(min = 1, max = 128, message = "Username and password are required"))]
    pub password: String,
}
