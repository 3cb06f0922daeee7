//! Financial tasks: bills and other obligations with a due date.
//!
//! This module contains the task model, its database functions and the
//! state holders for the task screens.

mod create;
mod db;
mod details;
mod domain;
mod edit;
mod form;
mod list;

pub use create::{AddTaskUiState, AddTaskViewModel};
pub use db::{
    create_task, create_task_table, delete_task, get_all_tasks, get_task, get_tasks_in_date_range,
    set_task_completed, update_task,
};
pub use details::{TaskDetailsUiState, TaskDetailsViewModel};
pub use domain::{FinancialTask, NewTask, RecurringPeriod};
pub use edit::{EditTaskUiState, EditTaskViewModel};
pub use form::TaskForm;
pub use list::{TaskListViewModel, TasksUiState};
