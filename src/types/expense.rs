use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::models::Expense;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 42.5)]
    pub amount: Decimal,
    /// RFC 3339 timestamp or a plain `YYYY-MM-DD` date
    #[serde(deserialize_with = "deserialize_expense_date")]
    #[schema(value_type = String, example = "2024-01-01")]
    pub date: DateTime<Utc>,
    pub category_id: i32,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub payment_method: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    pub recurring_period: Option<String>,
    pub tags: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub transactions: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpenseResponse {
    pub expense: Expense,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpensesResponse {
    pub expenses: Vec<Expense>,
}

fn deserialize_expense_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_expense_date(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "invalid date `{}`, expected RFC 3339 or YYYY-MM-DD",
            raw
        ))
    })
}

pub fn parse_expense_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn plain_dates_are_midnight_utc() {
        assert_eq!(
            parse_expense_date("2024-01-01"),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn timestamps_keep_their_instant() {
        assert_eq!(
            parse_expense_date("2024-03-05T10:30:00.000Z"),
            Some(Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap())
        );
        assert_eq!(
            parse_expense_date("2024-03-05T12:30:00+02:00"),
            Some(Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap())
        );
    }

    #[test]
    fn garbage_dates_are_rejected() {
        assert_eq!(parse_expense_date("yesterday"), None);
        assert_eq!(parse_expense_date("2024-13-01"), None);
    }

    #[test]
    fn request_accepts_the_create_form_payload() {
        let request: CreateExpenseRequest = serde_json::from_value(json!({
            "amount": 42.50,
            "date": "2024-01-01T00:00:00.000Z",
            "categoryId": 1,
            "paymentMethod": "credit_card",
            "isRecurring": true,
            "recurringPeriod": "monthly",
            "tags": "groceries, weekly"
        }))
        .unwrap();

        assert_eq!(request.amount, Decimal::new(4250, 2));
        assert_eq!(request.category_id, 1);
        assert_eq!(request.payment_method.as_deref(), Some("credit_card"));
        assert!(request.is_recurring);
        assert_eq!(request.recurring_period.as_deref(), Some("monthly"));
        assert!(request.description.is_none());
        assert!(request.transactions.is_none());
    }

    #[test]
    fn recurring_defaults_to_false() {
        let request: CreateExpenseRequest = serde_json::from_value(json!({
            "amount": 5,
            "date": "2024-01-01",
            "categoryId": 2
        }))
        .unwrap();

        assert!(!request.is_recurring);
        assert_eq!(request.amount, Decimal::new(5, 0));
    }

    #[test]
    fn missing_category_is_rejected() {
        let result = serde_json::from_value::<CreateExpenseRequest>(json!({
            "amount": 5,
            "date": "2024-01-01"
        }));
        assert!(result.is_err());
    }
}
