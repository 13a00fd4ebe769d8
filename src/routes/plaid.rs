use actix_web::{post, web};
use std::sync::Arc;
use tracing::error;

use crate::errors::ApiError;
use crate::types::{ErrorResponse, LinkTokenResponse};
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/plaidLink/create",
    tag = "bank link",
    responses(
        (status = 200, description = "Short-lived Plaid Link token", body = LinkTokenResponse),
        (status = 500, description = "Plaid request failed", body = ErrorResponse)
    )
)]
#[post("/plaidLink/create")]
pub async fn create_link_token(
    app_state: web::Data<Arc<AppState>>,
) -> Result<web::Json<LinkTokenResponse>, ApiError> {
    let token = app_state
        .link_tokens
        .create_link_token()
        .await
        .map_err(|e| {
            error!("Failed to create plaid link token: {:?}", e);
            ApiError::internal("Failed to create plaid link token")
        })?;

    Ok(web::Json(LinkTokenResponse { token }))
}
