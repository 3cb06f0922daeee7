//! The app's screens and the routes that lead to them.
//!
//! For routes that take a parameter, e.g., '/tasks/{task_id}', use [format_route].

use crate::database_id::TaskId;

/// The list of all tasks. This is the start destination.
pub const TASK_LIST_ROUTE: &str = "/tasks";
/// A single task.
pub const TASK_DETAILS_ROUTE: &str = "/tasks/{task_id}";
/// The form for creating a task.
pub const ADD_TASK_ROUTE: &str = "/tasks/new";
/// The form for editing an existing task.
pub const EDIT_TASK_ROUTE: &str = "/tasks/{task_id}/edit";
/// The list of transactions with totals and filters.
pub const TRANSACTIONS_ROUTE: &str = "/transactions";
/// The form for recording a transaction.
pub const ADD_TRANSACTION_ROUTE: &str = "/transactions/new";

/// A screen the user can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    TaskList,
    TaskDetails(TaskId),
    AddTask,
    EditTask(TaskId),
    Transactions,
    AddTransaction,
}

impl Screen {
    /// The screen shown when the app starts.
    pub const START: Screen = Screen::TaskList;

    /// The concrete path for this screen, e.g. `/tasks/3/edit`.
    pub fn route(self) -> String {
        match self {
            Screen::TaskList => TASK_LIST_ROUTE.to_owned(),
            Screen::TaskDetails(task_id) => format_route(TASK_DETAILS_ROUTE, task_id),
            Screen::AddTask => ADD_TASK_ROUTE.to_owned(),
            Screen::EditTask(task_id) => format_route(EDIT_TASK_ROUTE, task_id),
            Screen::Transactions => TRANSACTIONS_ROUTE.to_owned(),
            Screen::AddTransaction => ADD_TRANSACTION_ROUTE.to_owned(),
        }
    }

    /// Parse a path produced by [Screen::route].
    ///
    /// Returns `None` for unknown paths and for task IDs that are not integers.
    pub fn from_route(path: &str) -> Option<Screen> {
        let segments: Vec<&str> = path.trim_end_matches('/').split('/').collect();

        match segments.as_slice() {
            ["", "tasks"] => Some(Screen::TaskList),
            ["", "tasks", "new"] => Some(Screen::AddTask),
            ["", "tasks", task_id] => task_id.parse().ok().map(Screen::TaskDetails),
            ["", "tasks", task_id, "edit"] => task_id.parse().ok().map(Screen::EditTask),
            ["", "transactions"] => Some(Screen::Transactions),
            ["", "transactions", "new"] => Some(Screen::AddTransaction),
            _ => None,
        }
    }
}

/// Replace the first parameter in `route` with `id`.
///
/// A parameter is a name wrapped in curly braces, e.g. '{task_id}'. If no
/// parameter is found the original `route` is returned.
pub fn format_route(route: &str, id: TaskId) -> String {
    let Some(param_start) = route.find('{') else {
        return route.to_owned();
    };

    let param_end = route[param_start..]
        .find('}')
        .map_or(route.len(), |offset| param_start + offset + 1);

    format!("{}{}{}", &route[..param_start], id, &route[param_end..])
}
