//! Defines the endpoint for deleting a transaction.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    Error, endpoints,
    internal_server_error::InternalServerError,
    transaction::{TransactionState, TransactionStore, core::parse_transaction_id},
    user::UserID,
};

/// A route handler for deleting one of the caller's transactions.
///
/// Redirects to the transactions page once the transaction is gone.
pub async fn delete_transaction<S>(
    State(state): State<TransactionState<S>>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<String>,
) -> Result<Response, Error>
where
    S: TransactionStore + Send + Sync,
{
    let transaction_id = parse_transaction_id(&transaction_id)?;

    match state.transaction_service.delete(user_id, transaction_id) {
        Ok(()) => {
            tracing::info!("user {user_id} deleted transaction {transaction_id}");
            Ok(Redirect::to(endpoints::TRANSACTIONS_VIEW).into_response())
        }
        Err(error) if error.is_storage_fault() => {
            Ok(InternalServerError::new("Error deleting transaction!").into_response())
        }
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Extension,
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };

    use crate::{
        Error, endpoints,
        test_utils::assert_redirect,
        transaction::{
            Category, Transaction, TransactionService, TransactionState, TransactionStore,
            test_utils::{FailingStore, get_test_db},
        },
    };

    use super::delete_transaction;

    fn state_for<S: TransactionStore + Send + Sync>(store: S) -> TransactionState<S> {
        TransactionState {
            transaction_service: TransactionService::new(store),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn deletes_own_transaction() {
        let db = get_test_db();
        let transaction = db
            .store
            .create(Transaction::build(db.alice, "Coffee", -4.5, Category::Expense))
            .unwrap();

        let response = delete_transaction(
            State(state_for(db.store.clone())),
            Extension(db.alice),
            Path(transaction.id.to_string()),
        )
        .await
        .into_response();

        assert_redirect(&response, endpoints::TRANSACTIONS_VIEW);
        assert_eq!(db.store.get(transaction.id), Err(Error::NotFound));
    }

    #[tokio::test]
    async fn cannot_delete_foreign_transaction() {
        let db = get_test_db();
        let transaction = db
            .store
            .create(Transaction::build(db.alice, "Coffee", -4.5, Category::Expense))
            .unwrap();

        let response = delete_transaction(
            State(state_for(db.store.clone())),
            Extension(db.bob),
            Path(transaction.id.to_string()),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(db.store.get(transaction.id), Ok(transaction));
    }

    #[tokio::test]
    async fn deleting_missing_transaction_is_not_found() {
        let db = get_test_db();

        for id in ["999", "abc"] {
            let response = delete_transaction(
                State(state_for(db.store.clone())),
                Extension(db.alice),
                Path(id.to_owned()),
            )
            .await
            .into_response();

            assert_eq!(response.status(), StatusCode::NOT_FOUND, "for ID {id}");
        }
    }

    #[tokio::test]
    async fn storage_fault_returns_error_page() {
        let db = get_test_db();

        let response = delete_transaction(
            State(state_for(FailingStore)),
            Extension(db.alice),
            Path("1".to_owned()),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
