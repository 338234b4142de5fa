//! Single-owner access control for transactions.

use crate::{Error, transaction::Transaction, user::UserID};

/// Check that `user_id` owns `transaction`.
///
/// Must be called on every transaction fetched by ID before it is shown in an
/// edit form, changed or deleted. The owner always comes from the stored
/// record, never from the request.
///
/// # Errors
/// Returns [Error::Forbidden] if the transaction belongs to another user.
pub fn authorize(transaction: &Transaction, user_id: UserID) -> Result<(), Error> {
    if transaction.owner_id == user_id {
        Ok(())
    } else {
        tracing::warn!(
            "user {user_id} tried to access transaction {} owned by user {}",
            transaction.id,
            transaction.owner_id
        );
        Err(Error::Forbidden)
    }
}
