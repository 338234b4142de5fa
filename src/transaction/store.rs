//! Defines the transaction store trait.

use crate::{
    Error,
    transaction::core::{Transaction, TransactionBuilder, TransactionFields, TransactionId},
    user::UserID,
};

/// Handles the persistence of transactions.
///
/// Implementers do not check ownership, that is the job of the
/// [guard](crate::transaction::guard). Any failure of the underlying storage
/// should be returned as [Error::SqlError] or [Error::DatabaseLockError].
pub trait TransactionStore {
    /// Create a new transaction in the store and assign it an ID.
    fn create(&self, builder: TransactionBuilder) -> Result<Transaction, Error>;

    /// Retrieve a transaction from the store.
    ///
    /// Returns [Error::NotFound] if `id` does not refer to a stored transaction.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Retrieve every transaction belonging to `owner_id` in no particular order.
    fn get_by_owner(&self, owner_id: UserID) -> Result<Vec<Transaction>, Error>;

    /// Retrieve every transaction in the store regardless of owner.
    fn get_all(&self) -> Result<Vec<Transaction>, Error>;

    /// Replace the user editable fields of the transaction `id`.
    ///
    /// Returns [Error::NotFound] if `id` does not refer to a stored transaction.
    fn update(&self, id: TransactionId, fields: TransactionFields) -> Result<Transaction, Error>;

    /// Remove the transaction `id` from the store.
    ///
    /// Returns the number of transactions removed, so deleting a missing ID is
    /// not an error.
    fn delete(&self, id: TransactionId) -> Result<usize, Error>;
}
