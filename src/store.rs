use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Category, ChatMessage, Expense, Role};
use crate::types::CreateExpenseRequest;

/// Persistence used by the handlers: create/findMany per entity.
#[async_trait]
pub trait Store: Send + Sync {
    async fn create_expense(&self, new_expense: &CreateExpenseRequest) -> Result<Expense>;

    async fn list_expenses(&self) -> Result<Vec<Expense>>;

    async fn list_categories(&self) -> Result<Vec<Category>>;

    async fn create_chat_message(
        &self,
        content: &str,
        role: Role,
        metadata: Option<&str>,
    ) -> Result<ChatMessage>;

    /// First `limit` messages, oldest first.
    async fn oldest_chat_messages(&self, limit: i64) -> Result<Vec<ChatMessage>>;

    /// Last `limit` messages, oldest first.
    async fn recent_chat_messages(&self, limit: i64) -> Result<Vec<ChatMessage>>;
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_expense(&self, new_expense: &CreateExpenseRequest) -> Result<Expense> {
        Expense::create(&self.pool, new_expense).await
    }

    async fn list_expenses(&self) -> Result<Vec<Expense>> {
        Expense::find_many(&self.pool).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        Category::find_many(&self.pool).await
    }

    async fn create_chat_message(
        &self,
        content: &str,
        role: Role,
        metadata: Option<&str>,
    ) -> Result<ChatMessage> {
        ChatMessage::create(&self.pool, content, role, metadata).await
    }

    async fn oldest_chat_messages(&self, limit: i64) -> Result<Vec<ChatMessage>> {
        ChatMessage::find_oldest(&self.pool, limit).await
    }

    async fn recent_chat_messages(&self, limit: i64) -> Result<Vec<ChatMessage>> {
        ChatMessage::find_recent(&self.pool, limit).await
    }
}
