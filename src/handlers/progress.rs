// src/handlers/progress.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::progress::{ProgressRecord, ProgressRow, SaveProgressRequest, merge},
    utils::jwt::Claims,
};

/// Merges one session's counters into the user's cumulative record.
///
/// The find/merge/upsert runs in a single transaction with a row lock, so
/// concurrent saves for the same username serialize instead of losing
/// updates. A malformed body (not a map of subtopic counter maps, or a
/// missing username) is rejected with 400 before anything is written.
pub async fn save_progress(
    State(pool): State<PgPool>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, AppError> {
    let payload: SaveProgressRequest = serde_json::from_value(body)
        .map_err(|_| AppError::BadRequest("Missing or invalid data".to_string()))?;

    if payload.username.is_empty() {
        return Err(AppError::BadRequest("Missing or invalid data".to_string()));
    }

    let mut tx = pool.begin().await?;

    let existing: Option<ProgressRow> = sqlx::query_as(
        "SELECT username, subtopics, score, total_questions \
         FROM progress WHERE username = $1 FOR UPDATE",
    )
    .bind(&payload.username)
    .fetch_optional(&mut *tx)
    .await?;

    let merged = merge(
        existing.map(ProgressRecord::from),
        &payload.username,
        &payload.subtopics,
    );

    sqlx::query(
        "INSERT INTO progress (username, subtopics, score, total_questions) \
         VALUES ($1, $2, $3, $4) \
         ON CONFLICT (username) DO UPDATE SET \
            subtopics = EXCLUDED.subtopics, \
            score = EXCLUDED.score, \
            total_questions = EXCLUDED.total_questions",
    )
    .bind(&merged.username)
    .bind(sqlx::types::Json(&merged.subtopics))
    .bind(merged.score as i64)
    .bind(merged.total_questions as i64)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!("Failed to upsert progress record: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    tx.commit().await?;

    Ok(Json(json!({ "message": "Progress saved!" })))
}

/// Returns the cumulative record for the path username.
///
/// The token's subject must match the path username; a valid token for a
/// different user gets 403. A user with no saved progress gets a zeroed
/// record rather than 404.
pub async fn get_progress(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if claims.sub != username {
        return Err(AppError::Forbidden("Unauthorized access".to_string()));
    }

    let row: Option<ProgressRow> = sqlx::query_as(
        "SELECT username, subtopics, score, total_questions FROM progress WHERE username = $1",
    )
    .bind(&username)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch progress record: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let record = row
        .map(ProgressRecord::from)
        .unwrap_or_else(|| ProgressRecord::empty(&username));

    Ok(Json(record))
}
