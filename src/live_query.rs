//! Query results that are delivered again whenever the underlying rows change.
//!
//! A store owns one [ChangeNotifier] and bumps it after every successful
//! write. Each [LiveQuery] holds a receiver for that notifier and re-runs its
//! query once per change, so a subscriber always sees the latest rows without
//! polling.

use std::sync::Arc;

use tokio::sync::watch;

use crate::Error;

type Query<T> = Box<dyn Fn() -> Result<T, Error> + Send + Sync>;

/// Publishes a new revision each time the data behind a store changes.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    sender: Arc<watch::Sender<u64>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(0);

        Self {
            sender: Arc::new(sender),
        }
    }

    /// Tell every subscriber that the data has changed.
    pub fn notify(&self) {
        self.sender.send_modify(|revision| *revision = revision.wrapping_add(1));
    }

    /// Create a [LiveQuery] that re-runs `query` after every [ChangeNotifier::notify].
    pub fn live_query<T>(
        &self,
        query: impl Fn() -> Result<T, Error> + Send + Sync + 'static,
    ) -> LiveQuery<T> {
        LiveQuery::new(self.sender.subscribe(), query)
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// A query whose result is re-delivered whenever its store changes.
///
/// The first call to [LiveQuery::next] yields the current result without
/// waiting. Dropping the query ends the subscription.
pub struct LiveQuery<T> {
    receiver: watch::Receiver<u64>,
    query: Query<T>,
}

impl<T> LiveQuery<T> {
    fn new(
        mut receiver: watch::Receiver<u64>,
        query: impl Fn() -> Result<T, Error> + Send + Sync + 'static,
    ) -> Self {
        receiver.mark_changed();

        Self {
            receiver,
            query: Box::new(query),
        }
    }

    /// Wait for the next change and return the fresh query result.
    ///
    /// Returns `None` once the store that created this query has been dropped.
    /// A failed query is returned as `Some(Err(_))` and later changes are still
    /// delivered.
    pub async fn next(&mut self) -> Option<Result<T, Error>> {
        if self.receiver.changed().await.is_err() {
            tracing::warn!("live query source closed, ending subscription");
            return None;
        }

        Some((self.query)())
    }

    /// Run the query once, without waiting for a change.
    pub fn current(&self) -> Result<T, Error> {
        (self.query)()
    }

    /// Transform every result of this query with `f`.
    pub fn map<U>(self, f: impl Fn(T) -> U + Send + Sync + 'static) -> LiveQuery<U>
    where
        T: 'static,
        U: 'static,
    {
        let query = self.query;

        LiveQuery {
            receiver: self.receiver,
            query: Box::new(move || query().map(&f)),
        }
    }
}

impl<T> std::fmt::Debug for LiveQuery<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveQuery")
            .field("revision", &*self.receiver.borrow())
            .finish_non_exhaustive()
    }
}
