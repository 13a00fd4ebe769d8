mod chat;
mod error;
mod expense;
mod plaid;

pub use chat::*;
pub use error::*;
pub use expense::*;
pub use plaid::*;
