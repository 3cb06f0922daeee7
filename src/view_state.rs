//! Building blocks for the per-screen state holders.
//!
//! Every screen keeps one state record in a [ViewState]. The screen reads it
//! through [ViewState::get] or a [watch::Receiver] and changes it only through
//! the view model's action methods. Background work that feeds the state runs
//! in a [Subscription], which is replaced rather than stacked when the screen
//! asks for different data.

use std::sync::Arc;

use tokio::{sync::watch, task::JoinHandle};

/// The state of a screen that shows data loaded from a store.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    /// Waiting for the first result.
    Loading,
    /// The data was loaded. It may be empty.
    Success(T),
    /// The data could not be loaded. The message is shown to the user.
    Error(String),
}

impl<T> LoadState<T> {
    /// The loaded data, if there is any.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }
}

impl<T> LoadState<Vec<T>> {
    /// Whether the data loaded successfully but there was nothing to show.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Success(items) if items.is_empty())
    }
}

/// A shared, observable state record for one screen.
#[derive(Debug)]
pub struct ViewState<T> {
    sender: Arc<watch::Sender<T>>,
}

impl<T> Clone for ViewState<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Clone> ViewState<T> {
    pub fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(initial);

        Self {
            sender: Arc::new(sender),
        }
    }

    /// A snapshot of the current state.
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Replace the whole state.
    pub fn set(&self, state: T) {
        self.sender.send_replace(state);
    }

    /// Change part of the state in place.
    pub fn update(&self, modify: impl FnOnce(&mut T)) {
        self.sender.send_modify(modify);
    }

    /// Observe the state. The receiver sees every later change.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }
}

/// A background task that feeds a [ViewState].
///
/// Starting a new task aborts the previous one, and dropping the
/// subscription aborts whatever is running.
#[derive(Debug, Default)]
pub struct Subscription {
    handle: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Abort the current task, if any, and track `handle` instead.
    pub fn replace(&mut self, handle: JoinHandle<()>) {
        if let Some(previous) = self.handle.replace(handle) {
            previous.abort();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
