// src/routes.rs

use axum::{
    Router, http::Method, middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, progress, quiz},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Public routes: signup, login, quiz generation, progress save.
/// * Token-gated routes: progress read, token verification.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (pool, config, generator client).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    // Protected routes reject at the middleware before any handler runs.
    let protected_routes = Router::new()
        .route("/progress/{username}", get(progress::get_progress))
        .route("/verify-token", get(auth::verify_token))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/quiz", post(quiz::generate_mcq))
        .route("/progress", post(progress::save_progress))
        .merge(protected_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
