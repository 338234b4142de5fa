//! The use cases for managing transactions.
//!
//! The service is the only place that combines validation, the ownership check
//! and the store. Route handlers turn its results into pages and redirects.

use crate::{
    Error,
    transaction::{
        Transaction, TransactionStore,
        core::TransactionId,
        form::TransactionForm,
        guard::authorize,
        search::{TransactionRow, filter_transactions, sort_by_date_desc},
    },
    user::UserID,
};

/// Orchestrates validation, authorization and persistence of transactions.
///
/// The store is injected at construction time and shared by every request.
#[derive(Debug, Clone)]
pub struct TransactionService<S> {
    store: S,
}

impl<S: TransactionStore> TransactionService<S> {
    /// Create a service that persists transactions in `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// List the transactions for the home page, newest first.
    ///
    /// A logged in caller sees only their own transactions. Without a caller
    /// every user's transactions are listed.
    // TODO: Decide whether anonymous visitors should see an empty list instead.
    pub fn list(&self, caller: Option<UserID>) -> Result<Vec<Transaction>, Error> {
        let mut transactions = match caller {
            Some(user_id) => self.store.get_by_owner(user_id)?,
            None => self.store.get_all()?,
        };

        sort_by_date_desc(&mut transactions);

        Ok(transactions)
    }

    /// List the caller's transactions formatted for display, newest first.
    pub fn view(&self, caller: UserID) -> Result<Vec<TransactionRow>, Error> {
        self.search(caller, None)
    }

    /// List the caller's transactions that match `query`, closest match first.
    ///
    /// An absent or blank query lists the same rows as [TransactionService::view].
    pub fn search(
        &self,
        caller: UserID,
        query: Option<&str>,
    ) -> Result<Vec<TransactionRow>, Error> {
        let transactions = self.store.get_by_owner(caller)?;

        Ok(filter_transactions(transactions, query))
    }

    /// Create a transaction owned by `caller` from the submitted `form`.
    ///
    /// # Errors
    /// Returns [Error::Validation] without touching the store if the form is
    /// incomplete or invalid, or a storage fault if the store fails.
    pub fn add(&self, caller: UserID, form: &TransactionForm) -> Result<Transaction, Error> {
        let fields = form.validate()?;
        let builder =
            Transaction::build(caller, &fields.description, fields.amount, fields.category)
                .date(fields.date);

        self.store.create(builder).inspect_err(|error| {
            tracing::error!("could not create transaction for user {caller}: {error}")
        })
    }

    /// Fetch the transaction `id` so that `caller` can edit it.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no such transaction, or
    /// [Error::Forbidden] if it belongs to another user.
    pub fn get_for_edit(&self, caller: UserID, id: TransactionId) -> Result<Transaction, Error> {
        self.get_owned(caller, id)
    }

    /// Replace the description, amount, category and date of the transaction
    /// `id` with the submitted `form`.
    ///
    /// The form is validated first, the transaction is then re-fetched and
    /// its ownership checked before anything is written.
    ///
    /// # Errors
    /// Returns [Error::Validation], [Error::NotFound], [Error::Forbidden] or a
    /// storage fault. Nothing is changed unless the update succeeds.
    pub fn edit(
        &self,
        caller: UserID,
        id: TransactionId,
        form: &TransactionForm,
    ) -> Result<Transaction, Error> {
        let fields = form.validate()?;
        self.get_owned(caller, id)?;

        self.store.update(id, fields).inspect_err(|error| {
            tracing::error!("could not update transaction {id}: {error}")
        })
    }

    /// Permanently delete the transaction `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if there is no such transaction, including
    /// when it disappears between the check and the delete, or
    /// [Error::Forbidden] if it belongs to another user.
    pub fn delete(&self, caller: UserID, id: TransactionId) -> Result<(), Error> {
        self.get_owned(caller, id)?;

        match self.store.delete(id) {
            Ok(0) => Err(Error::NotFound),
            Ok(_) => Ok(()),
            Err(error) => {
                tracing::error!("could not delete transaction {id}: {error}");
                Err(error)
            }
        }
    }

    fn get_owned(&self, caller: UserID, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = self.store.get(id)?;
        authorize(&transaction, caller)?;

        Ok(transaction)
    }
}
