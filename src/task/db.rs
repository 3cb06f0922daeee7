//! Database operations for financial tasks.

use rusqlite::{Connection, Row, params};
use time::Date;

use crate::{
    Error,
    database_id::TaskId,
    db::{SqlDateTime, SqlDecimal},
    task::{FinancialTask, NewTask},
};

const TASK_COLUMNS: &str = "id, title, description, amount, due_date, category, \
    is_recurring, recurring_period, is_completed, created_at";

/// Create a task and return it with its generated ID.
pub fn create_task(task: NewTask, connection: &Connection) -> Result<FinancialTask, Error> {
    connection.execute(
        "INSERT INTO financial_tasks \
        (title, description, amount, due_date, category, is_recurring, recurring_period, \
        is_completed, created_at) \
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
        params![
            task.title,
            task.description,
            SqlDecimal(task.amount),
            task.due_date,
            task.category,
            task.is_recurring,
            task.recurring_period,
            task.is_completed,
            SqlDateTime(task.created_at),
        ],
    )?;

    let id = connection.last_insert_rowid();

    Ok(task.with_id(id))
}

/// Retrieve a single task by ID.
///
/// # Errors
/// Returns [Error::NotFound] if `task_id` does not refer to a task.
pub fn get_task(task_id: TaskId, connection: &Connection) -> Result<FinancialTask, Error> {
    connection
        .prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM financial_tasks WHERE id = :id;"
        ))?
        .query_row(&[(":id", &task_id)], map_task_row)
        .map_err(|error| error.into())
}

/// Retrieve all tasks ordered by due date, soonest first.
pub fn get_all_tasks(connection: &Connection) -> Result<Vec<FinancialTask>, Error> {
    connection
        .prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM financial_tasks ORDER BY due_date ASC, id ASC;"
        ))?
        .query_map([], map_task_row)?
        .map(|maybe_task| maybe_task.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the tasks due between `start` and `end` (both inclusive), soonest first.
pub fn get_tasks_in_date_range(
    start: Date,
    end: Date,
    connection: &Connection,
) -> Result<Vec<FinancialTask>, Error> {
    connection
        .prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM financial_tasks \
            WHERE due_date BETWEEN ?1 AND ?2 \
            ORDER BY due_date ASC, id ASC;"
        ))?
        .query_map((start, end), map_task_row)?
        .map(|maybe_task| maybe_task.map_err(|error| error.into()))
        .collect()
}

/// Replace every field of the stored task with the same ID as `task`.
///
/// # Errors
/// Returns [Error::UpdateMissingTask] if the task does not exist.
pub fn update_task(task: &FinancialTask, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE financial_tasks SET \
            title = ?1, \
            description = ?2, \
            amount = ?3, \
            due_date = ?4, \
            category = ?5, \
            is_recurring = ?6, \
            recurring_period = ?7, \
            is_completed = ?8, \
            created_at = ?9 \
        WHERE id = ?10;",
        params![
            task.title,
            task.description,
            SqlDecimal(task.amount),
            task.due_date,
            task.category,
            task.is_recurring,
            task.recurring_period,
            task.is_completed,
            SqlDateTime(task.created_at),
            task.id,
        ],
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingTask);
    }

    Ok(())
}

/// Set only the completion flag of a task.
///
/// # Errors
/// Returns [Error::UpdateMissingTask] if the task does not exist.
pub fn set_task_completed(
    task_id: TaskId,
    is_completed: bool,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE financial_tasks SET is_completed = ?1 WHERE id = ?2",
        (is_completed, task_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingTask);
    }

    Ok(())
}

/// Delete a task by ID. Returns an error if the task doesn't exist.
pub fn delete_task(task_id: TaskId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM financial_tasks WHERE id = ?1", [task_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTask);
    }

    Ok(())
}

/// Initialize the task table and indexes.
pub fn create_task_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS financial_tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            amount TEXT NOT NULL,
            due_date TEXT NOT NULL,
            category TEXT NOT NULL,
            is_recurring INTEGER NOT NULL,
            recurring_period TEXT,
            is_completed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_financial_tasks_due_date ON financial_tasks(due_date);",
    )?;

    Ok(())
}

fn map_task_row(row: &Row) -> Result<FinancialTask, rusqlite::Error> {
    let SqlDecimal(amount) = row.get(3)?;
    let SqlDateTime(created_at) = row.get(9)?;

    Ok(FinancialTask {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        amount,
        due_date: row.get(4)?,
        category: row.get(5)?,
        is_recurring: row.get(6)?,
        recurring_period: row.get(7)?,
        is_completed: row.get(8)?,
        created_at,
    })
}
