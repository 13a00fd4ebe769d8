use actix_web::{get, post, web};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::errors::ApiError;
use crate::models::{ChatMessage, Role};
use crate::prompts::Prompts;
use crate::types::{ChatHistoryQuery, ChatTurnResponse, ErrorResponse, SendChatMessageRequest};
use crate::AppState;

/// Messages of context sent along with each new user message.
const CONTEXT_WINDOW: i64 = 20;
const DEFAULT_HISTORY_LIMIT: i64 = 50;

const CHAT_FAILED: &str = "Failed to process chat message";

#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "chat",
    request_body = SendChatMessageRequest,
    responses(
        (status = 200, description = "The stored user message and the assistant's reply", body = ChatTurnResponse),
        (status = 400, description = "Message missing or empty", body = ErrorResponse),
        (status = 500, description = "Store or completion service failed", body = ErrorResponse)
    )
)]
#[post("/chat")]
pub async fn send_message(
    app_state: web::Data<Arc<AppState>>,
    web::Json(request): web::Json<SendChatMessageRequest>,
) -> Result<web::Json<ChatTurnResponse>, ApiError> {
    let message = match request.message {
        Some(Value::String(message)) if !message.is_empty() => message,
        _ => return Err(ApiError::bad_request("Message is required")),
    };

    let store = &app_state.store;

    let user_message = store
        .create_chat_message(&message, Role::User, None)
        .await
        .map_err(|e| {
            error!("Failed to save user message: {:?}", e);
            ApiError::internal(CHAT_FAILED)
        })?;

    let history = store
        .recent_chat_messages(CONTEXT_WINDOW)
        .await
        .map_err(|e| {
            error!("Failed to load chat history: {:?}", e);
            ApiError::internal(CHAT_FAILED)
        })?;
    debug!("Sending {} messages of context", history.len());

    // The user message stays stored even if the completion fails
    let completion = app_state
        .completions
        .complete(&history, Prompts::FINANCIAL_ASSISTANT)
        .await
        .map_err(|e| {
            error!(
                "Completion failed, user message {} left unanswered: {:?}",
                user_message.id, e
            );
            ApiError::internal(CHAT_FAILED)
        })?;

    let metadata = completion.metadata_json().map_err(|e| {
        error!("Failed to serialize completion metadata: {:?}", e);
        ApiError::internal(CHAT_FAILED)
    })?;

    let assistant_message = store
        .create_chat_message(&completion.content, Role::Assistant, Some(&metadata))
        .await
        .map_err(|e| {
            error!("Failed to save assistant message: {:?}", e);
            ApiError::internal(CHAT_FAILED)
        })?;

    info!(
        "Chat turn stored: user {} -> assistant {}",
        user_message.id, assistant_message.id
    );

    Ok(web::Json(ChatTurnResponse {
        user_message,
        assistant_message,
    }))
}

#[utoipa::path(
    get,
    path = "/api/chat",
    tag = "chat",
    params(ChatHistoryQuery),
    responses(
        (status = 200, description = "Messages in chronological order", body = Vec<ChatMessage>),
        (status = 400, description = "Invalid limit", body = ErrorResponse),
        (status = 500, description = "Store read failed", body = ErrorResponse)
    )
)]
#[get("/chat")]
pub async fn chat_history(
    app_state: web::Data<Arc<AppState>>,
    query: web::Query<ChatHistoryQuery>,
) -> Result<web::Json<Vec<ChatMessage>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    if limit < 0 {
        return Err(ApiError::bad_request("limit must not be negative"));
    }

    let messages = app_state
        .store
        .oldest_chat_messages(limit)
        .await
        .map_err(|e| {
            error!("Get chat history error: {:?}", e);
            ApiError::internal("Failed to fetch chat history")
        })?;

    Ok(web::Json(messages))
}
