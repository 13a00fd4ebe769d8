use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{query_as, FromRow, PgPool};
use tracing::debug;
use utoipa::ToSchema;

use crate::types::CreateExpenseRequest;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i32,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 42.5)]
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub category_id: i32,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub payment_method: Option<String>,
    pub is_recurring: bool,
    pub recurring_period: Option<String>,
    pub tags: Option<String>,
    /// Linked bank-transaction data, stored as-is
    #[schema(value_type = Option<Object>)]
    pub transactions: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub async fn create(pool: &PgPool, new_expense: &CreateExpenseRequest) -> Result<Self> {
        let expense = query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (
                amount, date, category_id, description, notes, payment_method,
                is_recurring, recurring_period, tags, transactions
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(new_expense.amount)
        .bind(new_expense.date)
        .bind(new_expense.category_id)
        .bind(&new_expense.description)
        .bind(&new_expense.notes)
        .bind(&new_expense.payment_method)
        .bind(new_expense.is_recurring)
        .bind(&new_expense.recurring_period)
        .bind(&new_expense.tags)
        .bind(&new_expense.transactions)
        .fetch_one(pool)
        .await?;

        debug!("Expense created: {:?}", expense);
        Ok(expense)
    }

    pub async fn find_many(pool: &PgPool) -> Result<Vec<Self>> {
        let expenses = query_as::<_, Expense>(
            r#"
            SELECT * FROM expenses
            ORDER BY id ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(expenses)
    }
}
