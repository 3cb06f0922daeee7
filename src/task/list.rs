//! State holder for the task list screen.

use tokio::sync::watch;

use crate::{
    database_id::TaskId,
    stores::TaskStore,
    task::FinancialTask,
    view_state::{LoadState, Subscription, ViewState},
};

/// The state of the task list screen.
pub type TasksUiState = LoadState<Vec<FinancialTask>>;

/// Shows every task, soonest due date first.
///
/// Must be created inside a Tokio runtime because it subscribes to the store
/// in a background task.
#[derive(Debug)]
pub struct TaskListViewModel<S> {
    store: S,
    state: ViewState<TasksUiState>,
    subscription: Subscription,
}

impl<S: TaskStore> TaskListViewModel<S> {
    /// Create the view model and start loading tasks.
    pub fn new(store: S) -> Self {
        let mut view_model = Self {
            store,
            state: ViewState::new(LoadState::Loading),
            subscription: Subscription::default(),
        };

        view_model.load_tasks();

        view_model
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> TasksUiState {
        self.state.get()
    }

    /// Observe the state.
    pub fn subscribe(&self) -> watch::Receiver<TasksUiState> {
        self.state.subscribe()
    }

    /// Show the loading state and subscribe to the task list again, replacing
    /// any existing subscription.
    pub fn load_tasks(&mut self) {
        self.state.set(LoadState::Loading);

        let mut tasks = self.store.all_tasks();
        let state = self.state.clone();

        self.subscription.replace(tokio::spawn(async move {
            while let Some(result) = tasks.next().await {
                match result {
                    Ok(tasks) => state.set(LoadState::Success(tasks)),
                    Err(error) => {
                        tracing::error!("Could not load tasks: {error}");
                        state.set(LoadState::Error(format!("Failed to load tasks: {error}")));
                    }
                }
            }
        }));
    }

    /// Try loading the tasks again after an error.
    pub fn retry(&mut self) {
        self.load_tasks();
    }

    /// Mark a task as done or not done.
    ///
    /// The list updates through the subscription. On failure the screen shows
    /// an error.
    pub fn complete_task(&self, task_id: TaskId, is_completed: bool) {
        if let Err(error) = self.store.set_completed(task_id, is_completed) {
            tracing::error!("Could not update task {task_id}: {error}");
            self.state
                .set(LoadState::Error(format!("Failed to update task: {error}")));
        }
    }
}
