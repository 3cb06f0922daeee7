//! Implements a SQLite backed transaction store.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    database_id::TransactionId,
    live_query::{ChangeNotifier, LiveQuery},
    stores::{TransactionStore, sqlite::lock_connection},
    transaction::{
        NewTransaction, Totals, Transaction, TransactionFilter, create_transaction,
        delete_transaction, get_totals, get_transaction, get_transactions, update_transaction,
    },
};

/// Stores transactions in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
    notifier: ChangeNotifier,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    ///
    /// The transaction table must already exist, see [crate::db::initialize].
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self {
            connection,
            notifier: ChangeNotifier::new(),
        }
    }

    fn live<T>(
        &self,
        query: impl Fn(&Connection) -> Result<T, Error> + Send + Sync + 'static,
    ) -> LiveQuery<T> {
        let connection = self.connection.clone();

        self.notifier.live_query(move || {
            let connection = lock_connection(&connection)?;
            query(&connection)
        })
    }

    fn write<T>(
        &self,
        operation: impl FnOnce(&Connection) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let result = {
            let connection = lock_connection(&self.connection)?;
            operation(&connection)?
        };

        self.notifier.notify();

        Ok(result)
    }
}

impl TransactionStore for SQLiteTransactionStore {
    fn transactions(&self, filter: TransactionFilter) -> LiveQuery<Vec<Transaction>> {
        self.live(move |connection| get_transactions(&filter, connection))
    }

    fn totals(&self) -> LiveQuery<Totals> {
        self.live(get_totals)
    }

    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        let connection = lock_connection(&self.connection)?;

        get_transaction(id, &connection)
    }

    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    fn insert(&self, transaction: NewTransaction) -> Result<Transaction, Error> {
        let transaction = self.write(|connection| create_transaction(transaction, connection))?;
        tracing::debug!(
            "Created transaction {} \"{}\" for {}",
            transaction.id,
            transaction.title,
            transaction.amount
        );

        Ok(transaction)
    }

    /// # Errors
    /// Returns an [Error::UpdateMissingTransaction] if the transaction is not in the database.
    fn update(&self, transaction: &Transaction) -> Result<(), Error> {
        self.write(|connection| update_transaction(transaction, connection))?;
        tracing::debug!("Updated transaction {}", transaction.id);

        Ok(())
    }

    /// # Errors
    /// Returns an [Error::DeleteMissingTransaction] if the transaction is not in the database.
    fn delete(&self, id: TransactionId) -> Result<(), Error> {
        self.write(|connection| delete_transaction(id, connection))?;
        tracing::debug!("Deleted transaction {id}");

        Ok(())
    }
}
