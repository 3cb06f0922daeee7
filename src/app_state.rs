//! Implements the structs that hold the app's configuration and shared state.

use std::path::PathBuf;

use time::UtcOffset;

use crate::{
    database_id::TaskId,
    db::DATABASE_NAME,
    stores::{TaskStore, TransactionStore},
    task::{AddTaskViewModel, EditTaskViewModel, TaskDetailsViewModel, TaskListViewModel},
    transaction::{AddTransactionViewModel, TransactionListViewModel},
};

/// Settings needed to open the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// File path to the SQLite database.
    pub db_path: PathBuf,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl AppConfig {
    pub fn new(db_path: impl Into<PathBuf>, local_timezone: &str) -> Self {
        Self {
            db_path: db_path.into(),
            local_timezone: local_timezone.to_owned(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(DATABASE_NAME, "UTC")
    }
}

/// The state shared by every screen: the stores and the local UTC offset.
///
/// Screens get their state holders from the factory methods, which hand each
/// one a clone of the store it needs.
#[derive(Debug, Clone)]
pub struct AppState<T, R> {
    /// The store for financial tasks.
    pub task_store: T,

    /// The store for transactions.
    pub transaction_store: R,

    /// The UTC offset used for "now" and "today".
    pub local_offset: UtcOffset,
}

impl<T, R> AppState<T, R>
where
    T: TaskStore + Clone,
    R: TransactionStore + Clone,
{
    pub fn new(task_store: T, transaction_store: R, local_offset: UtcOffset) -> Self {
        Self {
            task_store,
            transaction_store,
            local_offset,
        }
    }

    /// Must be called inside a Tokio runtime.
    pub fn task_list_view_model(&self) -> TaskListViewModel<T> {
        TaskListViewModel::new(self.task_store.clone())
    }

    /// Must be called inside a Tokio runtime.
    pub fn task_details_view_model(&self, task_id: TaskId) -> TaskDetailsViewModel<T> {
        TaskDetailsViewModel::new(self.task_store.clone(), task_id)
    }

    pub fn add_task_view_model(&self) -> AddTaskViewModel<T> {
        AddTaskViewModel::new(self.task_store.clone(), self.local_offset)
    }

    /// Must be called inside a Tokio runtime.
    pub fn edit_task_view_model(&self, task_id: TaskId) -> EditTaskViewModel<T> {
        EditTaskViewModel::new(self.task_store.clone(), task_id)
    }

    /// Must be called inside a Tokio runtime.
    pub fn transaction_list_view_model(&self) -> TransactionListViewModel<R> {
        TransactionListViewModel::new(self.transaction_store.clone())
    }

    pub fn add_transaction_view_model(&self) -> AddTransactionViewModel<R> {
        AddTransactionViewModel::new(self.transaction_store.clone(), self.local_offset)
    }
}
