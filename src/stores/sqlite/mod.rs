//! Contains the SQLite store implementations and a convenience function for
//! creating an [AppState] that uses them.

pub mod task;
pub mod transaction;

pub use task::SQLiteTaskStore;
pub use transaction::SQLiteTransactionStore;

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::{AppConfig, AppState, Error, db::initialize, timezone::local_offset_or_error};

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SQLAppState = AppState<SQLiteTaskStore, SQLiteTransactionStore>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the domain
/// models to the database.
///
/// # Errors
/// Returns an error if the database cannot be initialized or the configured
/// timezone is not a canonical timezone name.
pub fn create_app_state(
    db_connection: Connection,
    config: &AppConfig,
) -> Result<SQLAppState, Error> {
    initialize(&db_connection)?;
    let local_offset = local_offset_or_error(&config.local_timezone)?;

    let connection = Arc::new(Mutex::new(db_connection));

    Ok(AppState::new(
        SQLiteTaskStore::new(connection.clone()),
        SQLiteTransactionStore::new(connection),
        local_offset,
    ))
}

/// Lock the shared connection, mapping a poisoned lock to [Error::DatabaseLockError].
fn lock_connection(connection: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>, Error> {
    connection.lock().map_err(|error| {
        tracing::error!("Could not acquire database lock: {error}");
        Error::DatabaseLockError
    })
}
