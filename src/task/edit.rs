//! State holder for the edit task screen.

use tokio::sync::watch;

use crate::{
    database_id::TaskId,
    stores::TaskStore,
    task::{FinancialTask, TaskForm},
    view_state::{Subscription, ViewState},
};

/// The state of the edit task screen.
#[derive(Debug, Clone, PartialEq)]
pub struct EditTaskUiState {
    pub is_loading: bool,
    pub error: Option<String>,
    pub is_success: bool,
    /// The stored task the form was opened for.
    pub task: Option<FinancialTask>,
}

impl Default for EditTaskUiState {
    fn default() -> Self {
        Self {
            is_loading: true,
            error: None,
            is_success: false,
            task: None,
        }
    }
}

/// Loads an existing task and saves the user's changes to it.
#[derive(Debug)]
pub struct EditTaskViewModel<S> {
    store: S,
    state: ViewState<EditTaskUiState>,
    _subscription: Subscription,
}

impl<S: TaskStore> EditTaskViewModel<S> {
    /// Create the view model and start watching the task with `task_id`.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(store: S, task_id: TaskId) -> Self {
        let state = ViewState::new(EditTaskUiState::default());
        let mut subscription = Subscription::default();

        let mut tasks = store.all_tasks();
        let task_state = state.clone();
        subscription.replace(tokio::spawn(async move {
            while let Some(result) = tasks.next().await {
                task_state.update(|state| {
                    state.is_loading = false;

                    match result {
                        Ok(tasks) => match tasks.into_iter().find(|task| task.id == task_id) {
                            Some(task) => {
                                state.task = Some(task);
                                state.error = None;
                            }
                            None => {
                                state.task = None;
                                state.error = Some("Task not found".to_owned());
                            }
                        },
                        Err(error) => {
                            tracing::error!("Could not load task {task_id}: {error}");
                            state.error = Some(format!("Failed to load task: {error}"));
                        }
                    }
                });
            }
        }));

        Self {
            store,
            state,
            _subscription: subscription,
        }
    }

    pub fn state(&self) -> EditTaskUiState {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<EditTaskUiState> {
        self.state.subscribe()
    }

    /// Validate `form` and save it over the loaded task.
    ///
    /// Does nothing until the task has loaded.
    pub fn update_task(&self, form: TaskForm) {
        let Some(task) = self.state.get().task else {
            return;
        };

        let updated = match form.validate() {
            Ok(valid) => valid.apply_to(&task),
            Err(error) => {
                self.state.update(|state| {
                    state.error = Some(error.to_string());
                    state.is_success = false;
                });
                return;
            }
        };

        self.state.update(|state| state.is_loading = true);

        match self.store.update(&updated) {
            Ok(()) => self.state.update(|state| {
                state.is_loading = false;
                state.error = None;
                state.is_success = true;
            }),
            Err(error) => {
                tracing::error!("Could not update task {}: {error}", task.id);
                self.state.update(|state| {
                    state.is_loading = false;
                    state.error = Some(format!("Failed to update task: {error}"));
                    state.is_success = false;
                });
            }
        }
    }

    /// Clear the error and success flags.
    pub fn reset_state(&self) {
        self.state.update(|state| {
            state.error = None;
            state.is_success = false;
        });
    }
}
