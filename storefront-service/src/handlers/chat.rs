//! Chat relay handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use service_core::error::AppError;
use validator::Validate;

use crate::{
    dtos::{ChatHistoryEntry, ChatRequest, ChatResponse, DeleteHistoryResponse, HistoryQuery},
    AppState,
};

/// Relay a user message to the AI provider and return its reply.
pub async fn send_message(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    payload.validate()?;

    let exchange = state
        .chat
        .process_message(payload.session_id, &payload.message)
        .await?;

    Ok(Json(ChatResponse::from(exchange)))
}

/// A session's messages, oldest first; `?limit=` keeps only the most
/// recent N.
pub async fn session_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<ChatHistoryEntry>>, AppError> {
    let messages = state.chat.session_history(&session_id, query.limit).await?;

    Ok(Json(
        messages.into_iter().map(ChatHistoryEntry::from).collect(),
    ))
}

/// Delete a session's history.
pub async fn clear_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<DeleteHistoryResponse>, AppError> {
    let deleted = state.chat.clear_session(&session_id).await?;

    tracing::info!(session_id = %session_id, deleted = deleted, "Cleared chat session");

    Ok(Json(DeleteHistoryResponse { deleted }))
}
