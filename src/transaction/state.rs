//! The state shared by the transaction route handlers.

use axum::extract::FromRef;

use crate::{
    AppState,
    transaction::{SQLiteTransactionStore, TransactionService, TransactionStore},
};

/// The state needed to list, search, create, edit and delete transactions.
#[derive(Debug, Clone)]
pub struct TransactionState<S>
where
    S: TransactionStore + Send + Sync,
{
    /// The use cases for managing transactions.
    pub transaction_service: TransactionService<S>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionState<SQLiteTransactionStore> {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_service: state.transaction_service.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}
