//! Implements a SQLite backed task store.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use time::Date;

use crate::{
    Error,
    database_id::TaskId,
    live_query::{ChangeNotifier, LiveQuery},
    stores::{TaskStore, sqlite::lock_connection},
    task::{
        FinancialTask, NewTask, create_task, delete_task, get_all_tasks, get_task,
        get_tasks_in_date_range, set_task_completed, update_task,
    },
};

/// Stores financial tasks in a SQLite database.
///
/// Clones share the same connection and change notifications, so a write
/// through one clone updates the live queries created by every other clone.
#[derive(Debug, Clone)]
pub struct SQLiteTaskStore {
    connection: Arc<Mutex<Connection>>,
    notifier: ChangeNotifier,
}

impl SQLiteTaskStore {
    /// Create a new store for the SQLite `connection`.
    ///
    /// The task table must already exist, see [crate::db::initialize].
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

impl TaskStore for SQLiteTaskStore {
    fn all_tasks(&self) -> LiveQuery<Vec<FinancialTask>> {
        self.live(get_all_tasks)
    }

    fn tasks_in_date_range(&self, start: Date, end: Date) -> LiveQuery<Vec<FinancialTask>> {
        self.live(move |connection| get_tasks_in_date_range(start, end, connection))
    }

    fn get(&self, id: TaskId) -> Result<FinancialTask, Error> {
        let connection = lock_connection(&self.connection)?;

        get_task(id, &connection)
    }

    /// Create a new task in the database.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    fn insert(&self, task: NewTask) -> Result<FinancialTask, Error> {
        let task = self.write(|connection| create_task(task, connection))?;
        tracing::debug!("Created task {} \"{}\"", task.id, task.title);

        Ok(task)
    }

    /// # Errors
    /// Returns an [Error::UpdateMissingTask] if the task is not in the database.
    fn update(&self, task: &FinancialTask) -> Result<(), Error> {
        self.write(|connection| update_task(task, connection))?;
        tracing::debug!("Updated task {}", task.id);

        Ok(())
    }

    /// # Errors
    /// Returns an [Error::DeleteMissingTask] if the task is not in the database.
    fn delete(&self, id: TaskId) -> Result<(), Error> {
        self.write(|connection| delete_task(id, connection))?;
        tracing::debug!("Deleted task {id}");

        Ok(())
    }

    fn set_completed(&self, id: TaskId, is_completed: bool) -> Result<(), Error> {
        self.write(|connection| set_task_completed(id, is_completed, connection))?;
        tracing::debug!("Set task {id} completed to {is_completed}");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use rust_decimal_macros::dec;
    use time::{
        Date,
        macros::{date, datetime},
    };

    use crate::{
        Error,
        db::initialize,
        stores::TaskStore,
        task::{FinancialTask, NewTask},
    };

    use super::SQLiteTaskStore;

    fn get_store() -> SQLiteTaskStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SQLiteTaskStore::new(Arc::new(Mutex::new(connection)))
    }

    fn new_task(title: &str, due_date: Date) -> NewTask {
        NewTask {
            title: title.to_owned(),
            description: None,
            amount: dec!(1200),
            due_date,
            category: "Housing".to_owned(),
            is_recurring: false,
            recurring_period: None,
            is_completed: false,
            created_at: datetime!(2024-01-15 10:00),
        }
    }

    #[tokio::test]
    async fn all_tasks_is_updated_after_insert() {
        let store = get_store();
        let mut tasks = store.all_tasks();
        assert_eq!(tasks.next().await, Some(Ok(vec![])));

        let rent = store.insert(new_task("Rent", date!(2024 - 02 - 01))).unwrap();

        assert_eq!(tasks.next().await, Some(Ok(vec![rent])));
    }

    #[tokio::test]
    async fn new_task_is_placed_by_due_date() {
        let store = get_store();
        let phone = store.insert(new_task("Phone", date!(2024 - 01 - 20))).unwrap();
        let insurance = store.insert(new_task("Insurance", date!(2024 - 03 - 01))).unwrap();
        let mut tasks = store.all_tasks();
        tasks.next().await;

        let rent = store.insert(new_task("Rent", date!(2024 - 02 - 01))).unwrap();

        assert_eq!(tasks.next().await, Some(Ok(vec![phone, rent, insurance])));
    }

    #[tokio::test]
    async fn date_range_query_is_live() {
        let store = get_store();
        let mut february = store.tasks_in_date_range(date!(2024 - 02 - 01), date!(2024 - 02 - 29));
        assert_eq!(february.next().await, Some(Ok(vec![])));

        store.insert(new_task("January", date!(2024 - 01 - 31))).unwrap();
        assert_eq!(february.next().await, Some(Ok(vec![])));

        let rent = store.insert(new_task("Rent", date!(2024 - 02 - 01))).unwrap();
        assert_eq!(february.next().await, Some(Ok(vec![rent])));
    }

    #[tokio::test]
    async fn toggling_completion_twice_restores_task() {
        let store = get_store();
        let task = store.insert(new_task("Rent", date!(2024 - 02 - 01))).unwrap();

        store.set_completed(task.id, !task.is_completed).unwrap();
        let toggled = store.get(task.id).unwrap();
        store.set_completed(task.id, !toggled.is_completed).unwrap();

        assert_eq!(
            toggled,
            FinancialTask {
                is_completed: true,
                ..task.clone()
            }
        );
        assert_eq!(store.get(task.id), Ok(task));
    }

    #[tokio::test]
    async fn clones_share_notifications() {
        let store = get_store();
        let other = store.clone();
        let mut tasks = store.all_tasks();
        tasks.next().await;

        let rent = other.insert(new_task("Rent", date!(2024 - 02 - 01))).unwrap();

        assert_eq!(tasks.next().await, Some(Ok(vec![rent])));
    }

    #[tokio::test]
    async fn failed_write_does_not_notify() {
        let store = get_store();
        let mut tasks = store.all_tasks();
        tasks.next().await;

        let result = store.delete(99);

        assert_eq!(result, Err(Error::DeleteMissingTask));
        assert!(!tasks_changed(&mut tasks).await);
    }

    async fn tasks_changed(tasks: &mut crate::live_query::LiveQuery<Vec<FinancialTask>>) -> bool {
        tokio::time::timeout(std::time::Duration::from_millis(20), tasks.next())
            .await
            .is_ok()
    }
}
