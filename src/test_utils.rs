//! Shared helpers for the view model tests.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use rusqlite::Connection;
use rust_decimal::Decimal;
use time::{Date, PrimitiveDateTime, macros::datetime};
use tokio::{sync::watch, time::timeout};

use crate::{
    db::initialize,
    stores::sqlite::{SQLiteTaskStore, SQLiteTransactionStore},
    task::NewTask,
    transaction::{NewTransaction, TransactionType},
};

/// An in-memory database with both tables, shared by the returned stores.
pub fn get_test_stores() -> (Arc<Mutex<Connection>>, SQLiteTaskStore, SQLiteTransactionStore) {
    let connection = Connection::open_in_memory().expect("could not open in-memory database");
    initialize(&connection).expect("could not initialize test database");
    let connection = Arc::new(Mutex::new(connection));

    (
        connection.clone(),
        SQLiteTaskStore::new(connection.clone()),
        SQLiteTransactionStore::new(connection),
    )
}

/// Break every query against `table` so that subscriptions report errors.
pub fn drop_table(connection: &Mutex<Connection>, table: &str) {
    connection
        .lock()
        .expect("could not lock test database")
        .execute_batch(&format!("DROP TABLE {table};"))
        .expect("could not drop table");
}

/// Wait up to a second for the observed state to satisfy `predicate`.
pub async fn wait_for<T: Clone>(
    receiver: &mut watch::Receiver<T>,
    predicate: impl FnMut(&T) -> bool,
) -> T {
    timeout(Duration::from_secs(1), receiver.wait_for(predicate))
        .await
        .expect("timed out waiting for state")
        .expect("state holder was dropped")
        .clone()
}

/// Give background subscriptions a moment to deliver pending results.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(20)).await;
}

pub fn new_task(title: &str, amount: Decimal, due_date: Date) -> NewTask {
    NewTask {
        title: title.to_owned(),
        description: None,
        amount,
        due_date,
        category: "Bills".to_owned(),
        is_recurring: false,
        recurring_period: None,
        is_completed: false,
        created_at: datetime!(2024-01-01 9:00),
    }
}

pub fn new_transaction(
    title: &str,
    amount: Decimal,
    transaction_type: TransactionType,
    category: &str,
    date: PrimitiveDateTime,
) -> NewTransaction {
    NewTransaction {
        title: title.to_owned(),
        description: None,
        amount,
        transaction_type,
        category: category.to_owned(),
        date,
        created_at: datetime!(2024-01-01 9:00),
    }
}
