//! Implements a SQLite backed transaction store.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row, params};
use time::OffsetDateTime;

use crate::{
    Error,
    transaction::{
        TransactionStore,
        core::{Transaction, TransactionBuilder, TransactionFields, TransactionId},
    },
    user::UserID,
};

/// Stores transactions in a SQLite database.
///
/// The transaction table references the user table, so both must be set up
/// with [crate::db::initialize] first.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, user_id, description, amount, category, date, created_at, updated_at \
    FROM \"transaction\"";

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] if there is an SQL
    /// error, e.g. the owner does not refer to a valid user.
    fn create(&self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let now = OffsetDateTime::now_utc();
        let TransactionBuilder { owner_id, fields } = builder;

        let transaction = self
            .lock()?
            .prepare(
                "INSERT INTO \"transaction\" \
                (user_id, description, amount, category, date, created_at, updated_at) \
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6) \
                RETURNING id, user_id, description, amount, category, date, created_at, updated_at",
            )?
            .query_row(
                params![
                    owner_id,
                    fields.description,
                    fields.amount,
                    fields.category,
                    fields.date,
                    now
                ],
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = self
            .lock()?
            .prepare(&format!("{SELECT_COLUMNS} WHERE id = :id"))?
            .query_row(&[(":id", &id)], map_transaction_row)?;

        Ok(transaction)
    }

    fn get_by_owner(&self, owner_id: UserID) -> Result<Vec<Transaction>, Error> {
        self.lock()?
            .prepare(&format!("{SELECT_COLUMNS} WHERE user_id = :user_id"))?
            .query_map(&[(":user_id", &owner_id)], map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        self.lock()?
            .prepare(SELECT_COLUMNS)?
            .query_map([], map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Overwrite the description, amount, category and date of a transaction.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn update(&self, id: TransactionId, fields: TransactionFields) -> Result<Transaction, Error> {
        let transaction = self
            .lock()?
            .prepare(
                "UPDATE \"transaction\" \
                SET description = ?1, amount = ?2, category = ?3, date = ?4, updated_at = ?5 \
                WHERE id = ?6 \
                RETURNING id, user_id, description, amount, category, date, created_at, updated_at",
            )?
            .query_row(
                params![
                    fields.description,
                    fields.amount,
                    fields.category,
                    fields.date,
                    OffsetDateTime::now_utc(),
                    id,
                ],
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    fn delete(&self, id: TransactionId) -> Result<usize, Error> {
        self.lock()?
            .execute("DELETE FROM \"transaction\" WHERE id = :id", &[(":id", &id)])
            .map_err(Error::from)
    }
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                description TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL CHECK (category IN ('Income', 'Expense')),
                date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_user_id ON \"transaction\"(user_id);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        description: row.get(2)?,
        amount: row.get(3)?,
        category: row.get(4)?,
        date: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}
