use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::{query, query_as, FromRow, PgPool};
use tracing::{debug, info};
use utoipa::ToSchema;

/// Categories seeded on first start: (name, icon, color).
pub const DEFAULT_CATEGORIES: [(&str, &str, &str); 9] = [
    ("Housing", "🏠", "#FF6B6B"),
    ("Food", "🍔", "#4ECDC4"),
    ("Transport", "🚗", "#45B7D1"),
    ("Utilities", "💡", "#FFA07A"),
    ("Entertainment", "🎬", "#98D8C8"),
    ("Healthcare", "🏥", "#F7DC6F"),
    ("Education", "📚", "#BB8FCE"),
    ("Shopping", "🛍️", "#85C1E2"),
    ("Other", "📦", "#D5DBDB"),
];

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub is_custom: bool,
}

impl Category {
    pub async fn find_many(pool: &PgPool) -> Result<Vec<Self>> {
        let categories = query_as::<_, Category>(
            r#"
            SELECT id, name, icon, color, is_custom FROM categories
            ORDER BY id ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        debug!("Fetched {} categories", categories.len());
        Ok(categories)
    }

    /// Inserts any missing default category, keyed by name. Safe to run on every start.
    pub async fn seed_defaults(pool: &PgPool) -> Result<u64> {
        let mut inserted = 0;

        for (name, icon, color) in DEFAULT_CATEGORIES {
            inserted += query(
                r#"
                INSERT INTO categories (name, icon, color, is_custom)
                VALUES ($1, $2, $3, FALSE)
                ON CONFLICT (name) DO NOTHING
                "#,
            )
            .bind(name)
            .bind(icon)
            .bind(color)
            .execute(pool)
            .await?
            .rows_affected();
        }

        info!("Seeded {} default categories", inserted);
        Ok(inserted)
    }
}
