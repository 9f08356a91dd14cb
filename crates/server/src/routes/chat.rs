//! Health chat handler

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use symptom_core::{ChatMessage, ChatReply};

use crate::error::AppError;
use crate::pipeline::AnalysisPipeline;

/// POST /api/chat - Answer a free-text health question
pub async fn send(
    State(pipeline): State<AnalysisPipeline>,
    payload: Result<Json<ChatMessage>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(message) = payload?;
    message.validate()?;

    tracing::info!(
        chars = message.message.chars().count(),
        has_context = message.context.is_some(),
        "Chat request"
    );

    Ok(Json(pipeline.chat(message).await))
}
