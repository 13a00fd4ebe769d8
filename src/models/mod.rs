pub mod category;
pub mod chat_message;
pub mod expense;

pub use category::Category;
pub use chat_message::{ChatMessage, Role};
pub use expense::Expense;
