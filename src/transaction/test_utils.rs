use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use scraper::{ElementRef, Selector};

use crate::{
    Error, PasswordHash,
    db::initialize,
    transaction::{
        SQLiteTransactionStore, Transaction, TransactionStore,
        core::{TransactionBuilder, TransactionFields, TransactionId},
    },
    user::{UserID, create_user},
};

/// A store where every operation fails as if the database were unavailable.
#[derive(Debug, Clone)]
pub struct FailingStore;

impl TransactionStore for FailingStore {
    fn create(&self, _builder: TransactionBuilder) -> Result<Transaction, Error> {
        Err(Error::DatabaseLockError)
    }

    fn get(&self, _id: TransactionId) -> Result<Transaction, Error> {
        Err(Error::DatabaseLockError)
    }

    fn get_by_owner(&self, _owner_id: UserID) -> Result<Vec<Transaction>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn update(&self, _id: TransactionId, _fields: TransactionFields) -> Result<Transaction, Error> {
        Err(Error::DatabaseLockError)
    }

    fn delete(&self, _id: TransactionId) -> Result<usize, Error> {
        Err(Error::DatabaseLockError)
    }
}

/// An in-memory database with the users "alice" and "bob".
pub struct TestDb {
    pub connection: Arc<Mutex<Connection>>,
    pub store: SQLiteTransactionStore,
    pub alice: UserID,
    pub bob: UserID,
}

pub fn get_test_db() -> TestDb {
    let conn = Connection::open_in_memory().expect("could not open in-memory SQLite database");
    initialize(&conn).expect("could not initialize test database");
    let alice = create_user("alice", PasswordHash::new_unchecked("hunter2"), &conn)
        .expect("could not create test user")
        .id;
    let bob = create_user("bob", PasswordHash::new_unchecked("hunter3"), &conn)
        .expect("could not create test user")
        .id;
    let connection = Arc::new(Mutex::new(conn));

    TestDb {
        store: SQLiteTransactionStore::new(connection.clone()),
        connection,
        alice,
        bob,
    }
}

#[track_caller]
pub fn assert_category_inputs(form: &ElementRef, checked_category: Option<&str>) {
    let selector = Selector::parse("input[type=radio][name=category]").unwrap();
    let inputs = form.select(&selector).collect::<Vec<_>>();
    assert_eq!(
        inputs.len(),
        2,
        "want 2 category inputs, got {}",
        inputs.len()
    );

    let mut values = inputs
        .iter()
        .filter_map(|input| input.value().attr("value"))
        .collect::<Vec<_>>();
    values.sort_unstable();
    assert_eq!(
        values,
        vec!["Expense", "Income"],
        "want category values to be Expense/Income, got {values:?}"
    );

    for input in &inputs {
        let required = input.value().attr("required");
        assert!(
            required.is_some(),
            "want category input to be required, got {required:?}"
        );
    }

    let checked = inputs
        .iter()
        .filter(|input| input.value().attr("checked").is_some())
        .filter_map(|input| input.value().attr("value"))
        .collect::<Vec<_>>();
    let want_checked = checked_category.into_iter().collect::<Vec<_>>();
    assert_eq!(
        checked, want_checked,
        "want checked category {want_checked:?}, got {checked:?}"
    );
}
