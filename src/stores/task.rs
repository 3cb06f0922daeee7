//! Defines the task store trait.

use time::Date;

use crate::{
    Error,
    database_id::TaskId,
    live_query::LiveQuery,
    task::{FinancialTask, NewTask},
};

/// Handles the creation, retrieval and modification of financial tasks.
///
/// Implementers do not validate their inputs, callers must pass valid tasks.
/// Storage errors are returned unmodified.
pub trait TaskStore {
    /// Every task, soonest due date first, re-delivered whenever a task changes.
    fn all_tasks(&self) -> LiveQuery<Vec<FinancialTask>>;

    /// The tasks due between `start` and `end` (both inclusive), soonest first.
    fn tasks_in_date_range(&self, start: Date, end: Date) -> LiveQuery<Vec<FinancialTask>>;

    /// Retrieve a single task.
    fn get(&self, id: TaskId) -> Result<FinancialTask, Error>;

    /// Create a new task in the store and return it with its assigned ID.
    fn insert(&self, task: NewTask) -> Result<FinancialTask, Error>;

    /// Replace the stored task that has the same ID as `task`.
    fn update(&self, task: &FinancialTask) -> Result<(), Error>;

    /// Remove a task from the store.
    fn delete(&self, id: TaskId) -> Result<(), Error>;

    /// Change only the completion flag of a task.
    fn set_completed(&self, id: TaskId, is_completed: bool) -> Result<(), Error>;
}
