use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::ChatMessage;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendChatMessageRequest {
    /// Only a non-empty string is accepted; anything else is a 400
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub message: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurnResponse {
    pub user_message: ChatMessage,
    pub assistant_message: ChatMessage,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChatHistoryQuery {
    /// Maximum number of messages to return, oldest first
    pub limit: Option<i64>,
}
