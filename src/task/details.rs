//! State holder for the screen that shows a single task.

use tokio::sync::watch;

use crate::{
    database_id::TaskId,
    stores::TaskStore,
    task::FinancialTask,
    view_state::{Subscription, ViewState},
};

/// The state of the task details screen.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDetailsUiState {
    pub is_loading: bool,
    pub error: Option<String>,
    pub task: Option<FinancialTask>,
    /// Set once the task was deleted from this screen, the screen should close.
    pub is_deleted: bool,
}

impl Default for TaskDetailsUiState {
    fn default() -> Self {
        Self {
            is_loading: true,
            error: None,
            task: None,
            is_deleted: false,
        }
    }
}

/// Shows one task and lets the user complete or delete it.
#[derive(Debug)]
pub struct TaskDetailsViewModel<S> {
    store: S,
    state: ViewState<TaskDetailsUiState>,
    _subscription: Subscription,
}

impl<S: TaskStore> TaskDetailsViewModel<S> {
    /// Create the view model and start watching the task with `task_id`.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(store: S, task_id: TaskId) -> Self {
        let state = ViewState::new(TaskDetailsUiState::default());
        let mut subscription = Subscription::default();

        let mut tasks = store.all_tasks();
        let task_state = state.clone();
        subscription.replace(tokio::spawn(async move {
            while let Some(result) = tasks.next().await {
                task_state.update(|state| {
                    state.is_loading = false;

                    match result {
                        Ok(tasks) => {
                            state.task = tasks.into_iter().find(|task| task.id == task_id);
                            state.error = match (&state.task, state.is_deleted) {
                                (None, false) => Some("Task not found".to_owned()),
                                _ => None,
                            };
                        }
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

    pub fn state(&self) -> TaskDetailsUiState {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<TaskDetailsUiState> {
        self.state.subscribe()
    }

    /// Flip the completion flag of the shown task.
    pub fn toggle_completion(&self) {
        let Some(task) = self.state.get().task else {
            return;
        };

        if let Err(error) = self.store.set_completed(task.id, !task.is_completed) {
            tracing::error!("Could not update task {}: {error}", task.id);
            self.state
                .update(|state| state.error = Some(format!("Failed to update task: {error}")));
        }
    }

    /// Delete the shown task.
    pub fn delete(&self) {
        let Some(task) = self.state.get().task else {
            return;
        };

        // Set first so the refreshed list does not report the task as missing.
        self.state.update(|state| state.is_deleted = true);

        if let Err(error) = self.store.delete(task.id) {
            tracing::error!("Could not delete task {}: {error}", task.id);
            self.state.update(|state| {
                state.is_deleted = false;
                state.error = Some(format!("Failed to delete task: {error}"));
            });
        }
    }
}
