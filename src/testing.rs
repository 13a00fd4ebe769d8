//! In-memory stand-ins for the store and the two external services.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use chrono::Utc;

use crate::completion::{Completion, CompletionService, TokenUsage};
use crate::models::category::DEFAULT_CATEGORIES;
use crate::models::{Category, ChatMessage, Expense, Role};
use crate::plaid::LinkTokenService;
use crate::store::Store;
use crate::types::CreateExpenseRequest;
use crate::AppState;

#[derive(Default)]
struct Tables {
    categories: Vec<Category>,
    expenses: Vec<Expense>,
    chat_messages: Vec<ChatMessage>,
}

/// Mirrors the Postgres schema closely enough for handler tests, including the
/// expense -> category foreign key.
pub struct MemoryStore {
    tables: Mutex<Tables>,
    broken: bool,
}

impl MemoryStore {
    pub fn seeded() -> Self {
        let categories = DEFAULT_CATEGORIES
            .iter()
            .enumerate()
            .map(|(i, (name, icon, color))| Category {
                id: i as i32 + 1,
                name: name.to_string(),
                icon: icon.to_string(),
                color: color.to_string(),
                is_custom: false,
            })
            .collect();

        MemoryStore {
            tables: Mutex::new(Tables {
                categories,
                ..Default::default()
            }),
            broken: false,
        }
    }

    /// Every operation fails, as if the database were unreachable.
    pub fn broken() -> Self {
        MemoryStore {
            broken: true,
            ..Self::seeded()
        }
    }

    pub fn chat_messages(&self) -> Vec<ChatMessage> {
        self.tables.lock().unwrap().chat_messages.clone()
    }

    fn check(&self) -> Result<()> {
        if self.broken {
            bail!("connection refused");
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_expense(&self, new_expense: &CreateExpenseRequest) -> Result<Expense> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();

        if !tables
            .categories
            .iter()
            .any(|category| category.id == new_expense.category_id)
        {
            bail!("violates foreign key constraint expenses_category_id_fkey");
        }

        let expense = Expense {
            id: tables.expenses.len() as i32 + 1,
            amount: new_expense.amount,
            date: new_expense.date,
            category_id: new_expense.category_id,
            description: new_expense.description.clone(),
            notes: new_expense.notes.clone(),
            payment_method: new_expense.payment_method.clone(),
            is_recurring: new_expense.is_recurring,
            recurring_period: new_expense.recurring_period.clone(),
            tags: new_expense.tags.clone(),
            transactions: new_expense.transactions.clone(),
            created_at: Utc::now(),
        };
        tables.expenses.push(expense.clone());
        Ok(expense)
    }

    async fn list_expenses(&self) -> Result<Vec<Expense>> {
        self.check()?;
        Ok(self.tables.lock().unwrap().expenses.clone())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.check()?;
        Ok(self.tables.lock().unwrap().categories.clone())
    }

    async fn create_chat_message(
        &self,
        content: &str,
        role: Role,
        metadata: Option<&str>,
    ) -> Result<ChatMessage> {
        self.check()?;
        let mut tables = self.tables.lock().unwrap();

        let message = ChatMessage {
            id: tables.chat_messages.len() as i32 + 1,
            content: content.to_string(),
            role,
            metadata: metadata.map(str::to_string),
            created_at: Utc::now(),
        };
        tables.chat_messages.push(message.clone());
        Ok(message)
    }

    async fn oldest_chat_messages(&self, limit: i64) -> Result<Vec<ChatMessage>> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .chat_messages
            .iter()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn recent_chat_messages(&self, limit: i64) -> Result<Vec<ChatMessage>> {
        self.check()?;
        let tables = self.tables.lock().unwrap();
        let skip = tables
            .chat_messages
            .len()
            .saturating_sub(limit.max(0) as usize);
        Ok(tables.chat_messages[skip..].to_vec())
    }
}

/// Replies with a fixed answer and remembers what it was asked.
pub struct StubCompletions {
    reply: Option<String>,
    pub requests: Mutex<Vec<(Vec<ChatMessage>, String)>>,
}

impl StubCompletions {
    pub fn replying(reply: &str) -> Self {
        StubCompletions {
            reply: Some(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        StubCompletions {
            reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CompletionService for StubCompletions {
    async fn complete(&self, history: &[ChatMessage], system_prompt: &str) -> Result<Completion> {
        self.requests
            .lock()
            .unwrap()
            .push((history.to_vec(), system_prompt.to_string()));

        let content = self
            .reply
            .clone()
            .ok_or_else(|| anyhow!("completion service unavailable"))?;

        Ok(Completion {
            content,
            model: "stub-model".to_string(),
            usage: TokenUsage {
                input_tokens: 12,
                output_tokens: 34,
            },
        })
    }
}

pub struct StubLinkTokens(pub Option<String>);

#[async_trait]
impl LinkTokenService for StubLinkTokens {
    async fn create_link_token(&self) -> Result<String> {
        self.0
            .clone()
            .ok_or_else(|| anyhow!("INVALID_API_KEYS: invalid client_id or secret provided"))
    }
}

pub fn app_state(
    store: Arc<MemoryStore>,
    completions: Arc<StubCompletions>,
    link_tokens: StubLinkTokens,
) -> Arc<AppState> {
    Arc::new(AppState {
        store,
        completions,
        link_tokens: Arc::new(link_tokens),
    })
}
