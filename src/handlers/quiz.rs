// src/handlers/quiz.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::{error::AppError, generator::GeneratorClient};

/// DTO for requesting one generated MCQ.
#[derive(Debug, Deserialize, Validate)]
pub struct QuizRequest {
    #[validate(length(min = 1, max = 100))]
    pub topic: String,
    #[validate(length(min = 1, max = 100))]
    pub subtopic: String,
    #[validate(length(min = 1, max = 50))]
    pub difficulty: String,
}

/// Proxies one MCQ generation call to the external service.
///
/// Blocks until the service responds; the generated text is returned
/// unparsed. Generator failures surface as 500.
pub async fn generate_mcq(
    State(generator): State<GeneratorClient>,
    Json(body): Json<serde_json::Value>,
) -> Result<impl IntoResponse, AppError> {
    let payload: QuizRequest = serde_json::from_value(body).map_err(|_| {
        AppError::BadRequest("Topic, subtopic and difficulty are required".to_string())
    })?;

    if payload.validate().is_err() {
        return Err(AppError::BadRequest(
            "Topic, subtopic and difficulty are required".to_string(),
        ));
    }

    let mcq_text = generator
        .generate(&payload.topic, &payload.subtopic, &payload.difficulty)
        .await?;

    Ok(Json(json!({ "mcq": mcq_text })))
}
