//! State holder for the add task screen.

use time::UtcOffset;
use tokio::sync::watch;

use crate::{stores::TaskStore, task::TaskForm, timezone::now_local, view_state::ViewState};

/// The state of the add task screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddTaskUiState {
    pub is_loading: bool,
    /// The first validation failure or the storage error, ready to display.
    pub error: Option<String>,
    pub is_success: bool,
}

/// Validates user input and creates new tasks.
#[derive(Debug)]
pub struct AddTaskViewModel<S> {
    store: S,
    local_offset: UtcOffset,
    state: ViewState<AddTaskUiState>,
}

impl<S: TaskStore> AddTaskViewModel<S> {
    /// `local_offset` is used to timestamp new tasks.
    pub fn new(store: S, local_offset: UtcOffset) -> Self {
        Self {
            store,
            local_offset,
            state: ViewState::new(AddTaskUiState::default()),
        }
    }

    pub fn state(&self) -> AddTaskUiState {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<AddTaskUiState> {
        self.state.subscribe()
    }

    /// Validate `form` and store it as a new, incomplete task.
    ///
    /// Nothing is written if the form is invalid.
    pub fn create_task(&self, form: TaskForm) {
        self.state.set(AddTaskUiState {
            is_loading: true,
            ..AddTaskUiState::default()
        });

        let task = match form.validate() {
            Ok(task) => task.into_new_task(now_local(self.local_offset)),
            Err(error) => {
                self.state.set(AddTaskUiState {
                    error: Some(error.to_string()),
                    ..AddTaskUiState::default()
                });
                return;
            }
        };

        match self.store.insert(task) {
            Ok(_) => self.state.set(AddTaskUiState {
                is_success: true,
                ..AddTaskUiState::default()
            }),
            Err(error) => {
                tracing::error!("Could not create task: {error}");
                self.state.set(AddTaskUiState {
                    error: Some(format!("Failed to create task: {error}")),
                    ..AddTaskUiState::default()
                });
            }
        }
    }

    /// Clear the error and success flags, e.g. after the screen has reacted to them.
    pub fn reset_state(&self) {
        self.state.set(AddTaskUiState::default());
    }
}
