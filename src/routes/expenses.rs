use actix_web::{get, post, web};
use std::sync::Arc;
use tracing::{error, info};

use crate::errors::ApiError;
use crate::models::Category;
use crate::types::{CreateExpenseRequest, ErrorResponse, ExpenseResponse, ExpensesResponse};
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/expenses",
    tag = "expenses",
    request_body = CreateExpenseRequest,
    responses(
        (status = 200, description = "The created expense", body = ExpenseResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 500, description = "Store rejected the expense", body = ErrorResponse)
    )
)]
#[post("/expenses")]
pub async fn create_expense(
    app_state: web::Data<Arc<AppState>>,
    web::Json(new_expense): web::Json<CreateExpenseRequest>,
) -> Result<web::Json<ExpenseResponse>, ApiError> {
    let expense = app_state
        .store
        .create_expense(&new_expense)
        .await
        .map_err(|e| {
            error!("Create expense error: {:?}", e);
            ApiError::internal("Failed to create expense")
        })?;

    info!(
        "Expense {} created in category {}",
        expense.id, expense.category_id
    );
    Ok(web::Json(ExpenseResponse { expense }))
}

#[utoipa::path(
    get,
    path = "/api/expenses",
    tag = "expenses",
    responses(
        (status = 200, description = "Every expense", body = ExpensesResponse),
        (status = 500, description = "Store read failed", body = ErrorResponse)
    )
)]
#[get("/expenses")]
pub async fn list_expenses(
    app_state: web::Data<Arc<AppState>>,
) -> Result<web::Json<ExpensesResponse>, ApiError> {
    let expenses = app_state.store.list_expenses().await.map_err(|e| {
        error!("Error fetching expenses: {:?}", e);
        ApiError::internal("Failed to fetch expenses")
    })?;

    Ok(web::Json(ExpensesResponse { expenses }))
}

#[utoipa::path(
    get,
    path = "/api/expenses/categories",
    tag = "expenses",
    responses(
        (status = 200, description = "Every category", body = Vec<Category>),
        (status = 500, description = "Store read failed", body = ErrorResponse)
    )
)]
#[get("/expenses/categories")]
pub async fn list_categories(
    app_state: web::Data<Arc<AppState>>,
) -> Result<web::Json<Vec<Category>>, ApiError> {
    let categories = app_state.store.list_categories().await.map_err(|e| {
        error!("Get expense categories error: {:?}", e);
        ApiError::internal("Failed to fetch expense categories")
    })?;

    Ok(web::Json(categories))
}
