//! Transaction management for the budgeting application.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The `TransactionStore` trait and its SQLite implementation
//! - The ownership guard, search engine and form validation
//! - The `TransactionService` that combines them into use cases
//! - View handlers for transaction-related web pages

mod add_page;
mod core;
mod delete_endpoint;
mod edit_page;
mod form;
mod guard;
mod home_page;
mod search;
mod service;
mod sqlite_store;
mod state;
mod store;
mod table;
mod view_page;

#[cfg(test)]
pub(crate) mod test_utils;

pub use add_page::{create_transaction, get_add_transaction_page};
pub use core::{Category, Transaction, TransactionId};
pub use delete_endpoint::delete_transaction;
pub use edit_page::{get_edit_transaction_page, update_transaction};
pub use form::ValidationError;
pub use home_page::get_home_page;
pub use search::TransactionRow;
pub use service::TransactionService;
pub use sqlite_store::{SQLiteTransactionStore, create_transaction_table};
pub use state::TransactionState;
pub use store::TransactionStore;
pub use view_page::{get_transactions_page, search_transactions};
