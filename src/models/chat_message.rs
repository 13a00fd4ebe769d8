use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{query_as, FromRow, PgPool, Type};
use tracing::debug;
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "chat_role", rename_all = "lowercase")] // SQL value name
#[serde(rename_all = "lowercase")] // JSON value name
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: i32,
    pub content: String,
    pub role: Role,
    /// Serialized JSON: model name and token usage for assistant replies
    pub metadata: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub async fn create(
        pool: &PgPool,
        content: &str,
        role: Role,
        metadata: Option<&str>,
    ) -> Result<Self> {
        let message = query_as::<_, ChatMessage>(
            r#"
            INSERT INTO chat_messages (content, role, metadata)
            VALUES ($1, $2, $3)
            RETURNING id, content, role, metadata, created_at
            "#,
        )
        .bind(content)
        .bind(role)
        .bind(metadata)
        .fetch_one(pool)
        .await?;

        debug!("Chat message created: {} ({:?})", message.id, message.role);
        Ok(message)
    }

    /// The first `limit` messages in chronological order.
    pub async fn find_oldest(pool: &PgPool, limit: i64) -> Result<Vec<Self>> {
        let messages = query_as::<_, ChatMessage>(
            r#"
            SELECT id, content, role, metadata, created_at FROM chat_messages
            ORDER BY created_at ASC, id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(messages)
    }

    /// The last `limit` messages, returned oldest-first.
    pub async fn find_recent(pool: &PgPool, limit: i64) -> Result<Vec<Self>> {
        let messages = query_as::<_, ChatMessage>(
            r#"
            SELECT id, content, role, metadata, created_at FROM (
                SELECT id, content, role, metadata, created_at FROM chat_messages
                ORDER BY created_at DESC, id DESC
                LIMIT $1
            ) recent
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(messages)
    }
}
