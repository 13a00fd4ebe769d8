use utoipa::OpenApi;

use crate::models::{Category, ChatMessage, Expense, Role};
use crate::routes;
use crate::types::{
    ChatTurnResponse, CreateExpenseRequest, ErrorResponse, ExpenseResponse, ExpensesResponse,
    LinkTokenResponse, SendChatMessageRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::expenses::create_expense,
        routes::expenses::list_expenses,
        routes::expenses::list_categories,
        routes::chat::send_message,
        routes::chat::chat_history,
        routes::plaid::create_link_token,
    ),
    components(schemas(
        Category,
        Expense,
        ChatMessage,
        Role,
        CreateExpenseRequest,
        ExpenseResponse,
        ExpensesResponse,
        SendChatMessageRequest,
        ChatTurnResponse,
        LinkTokenResponse,
        ErrorResponse,
    )),
    tags(
        (name = "expenses", description = "Expenses and their categories"),
        (name = "chat", description = "Financial assistant conversation"),
        (name = "bank link", description = "Plaid Link token issuance"),
    )
)]
pub struct ApiDoc;
