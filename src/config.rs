// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds. Defaults to 2 hours.
    pub jwt_expiration: u64,
    /// Base URL of the text-generation service.
    pub generator_url: String,
    /// Model name sent with every generation request.
    pub generator_model: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(7200);

        let generator_url =
            env::var("GENERATOR_URL").unwrap_or_else(|_| "http://localhost:11434".to_string());

        let generator_model = env::var("GENERATOR_MODEL").unwrap_or_else(|_| "llama3".to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            generator_url,
            generator_model,
            rust_log,
        }
    }
}
