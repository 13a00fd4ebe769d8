use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{get, web, HttpRequest};
use tracing::warn;

use crate::errors::ApiError;

pub mod chat;
pub mod expenses;
pub mod plaid;

#[get("/health")]
async fn health() -> &'static str {
    "ok"
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected JSON body for {}: {}", req.path(), err);
    ApiError::bad_request("Invalid request body").into()
}

fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected query string for {}: {}", req.path(), err);
    ApiError::bad_request("Invalid query string").into()
}

/// Registers the `/api` handlers; mount inside `web::scope("/api")`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Bodies are parsed as JSON whatever their Content-Type.
    let json_config = web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(json_error_handler);

    cfg.app_data(json_config)
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(expenses::create_expense)
        .service(expenses::list_expenses)
        .service(expenses::list_categories)
        .service(chat::send_message)
        .service(chat::chat_history)
        .service(plaid::create_link_token);
}

pub fn configure_root(cfg: &mut web::ServiceConfig) {
    cfg.service(health);
}
