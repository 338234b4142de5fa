//! Defines the core data model for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{Error, user::UserID};

/// Alias for the integer type used for transaction IDs in the database.
pub type TransactionId = i64;

/// Whether a transaction is money coming in or going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// Money that was earned, e.g. salary.
    Income,
    /// Money that was spent, e.g. groceries.
    Expense,
}

impl Category {
    /// The name of the category as it is stored and displayed.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Expense => "Expense",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The string was not the name of a [Category].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCategory(pub String);

impl FromStr for Category {
    type Err = InvalidCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Income" => Ok(Category::Income),
            "Expense" => Ok(Category::Expense),
            other => Err(InvalidCategory(other.to_owned())),
        }
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(|InvalidCategory(name)| {
            FromSqlError::Other(format!("invalid category \"{name}\"").into())
        })
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The user that created the transaction.
    pub owner_id: UserID,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// Whether the transaction is an income or an expense.
    pub category: Category,
    /// When the transaction happened.
    pub date: Date,
    /// When the transaction was first stored.
    pub created_at: OffsetDateTime,
    /// When the transaction was last changed.
    pub updated_at: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction for `owner_id`.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        owner_id: UserID,
        description: &str,
        amount: f64,
        category: Category,
    ) -> TransactionBuilder {
        TransactionBuilder {
            owner_id,
            fields: TransactionFields {
                description: description.trim().to_owned(),
                amount,
                category,
                date: OffsetDateTime::now_utc().date(),
            },
        }
    }
}

/// The four fields of a transaction that a user may set.
///
/// Creating and editing a transaction always sets all four together.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFields {
    /// Trimmed, non-empty text detailing the transaction.
    pub description: String,
    /// The value of the transaction.
    pub amount: f64,
    /// Whether the transaction is an income or an expense.
    pub category: Category,
    /// When the transaction happened.
    pub date: Date,
}

/// A builder for creating [Transaction] instances.
///
/// The date defaults to today (UTC) if not specified.
///
/// # Examples
///
/// ```ignore
/// use time::macros::date;
///
/// let builder = Transaction::build(UserID::new(1), "Coffee", -4.5, Category::Expense)
///     .date(date!(2024 - 05 - 01));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    /// The user that the transaction will belong to.
    pub owner_id: UserID,
    /// The user editable fields.
    pub fields: TransactionFields,
}

impl TransactionBuilder {
    /// Set the date of the transaction.
    pub fn date(mut self, date: Date) -> Self {
        self.fields.date = date;
        self
    }
}

/// Parse a transaction ID taken from a URL path.
///
/// An ID that is not a number cannot refer to a stored transaction, so it is
/// reported as [Error::NotFound].
pub fn parse_transaction_id(raw_id: &str) -> Result<TransactionId, Error> {
    raw_id.parse().map_err(|_| {
        tracing::debug!("could not parse transaction ID {raw_id:?}");
        Error::NotFound
    })
}
