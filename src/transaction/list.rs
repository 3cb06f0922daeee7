//! State holder for the transaction list screen.
//!
//! The screen shows the filtered transactions together with the balance and
//! income and expense totals. The list and the totals come from two live
//! queries that are merged into one state record by a single background task.

use rust_decimal::Decimal;
use time::Date;
use tokio::sync::watch;

use crate::{
    Error,
    database_id::TransactionId,
    live_query::LiveQuery,
    stores::TransactionStore,
    transaction::{Totals, Transaction, TransactionFilter, TransactionType},
    view_state::{Subscription, ViewState},
};

/// The state of the transaction list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionListUiState {
    pub transactions: Vec<Transaction>,
    pub balance: Decimal,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub is_loading: bool,
    /// A dismissible message about a failed load or delete.
    pub error: Option<String>,
    pub filter: TransactionFilter,
}

impl Default for TransactionListUiState {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            balance: Decimal::ZERO,
            total_income: Decimal::ZERO,
            total_expenses: Decimal::ZERO,
            is_loading: true,
            error: None,
            filter: TransactionFilter::All,
        }
    }
}

/// Lists transactions, with one active filter, and the overall totals.
#[derive(Debug)]
pub struct TransactionListViewModel<R> {
    store: R,
    state: ViewState<TransactionListUiState>,
    subscription: Subscription,
}

impl<R: TransactionStore> TransactionListViewModel<R> {
    /// Create the view model and start loading every transaction.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new(store: R) -> Self {
        let mut view_model = Self {
            store,
            state: ViewState::new(TransactionListUiState::default()),
            subscription: Subscription::default(),
        };

        view_model.apply_filter(TransactionFilter::All);

        view_model
    }

    pub fn state(&self) -> TransactionListUiState {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<TransactionListUiState> {
        self.state.subscribe()
    }

    /// Show only transactions between `start` and `end`, both days inclusive.
    pub fn set_date_range(&mut self, start: Date, end: Date) {
        self.apply_filter(TransactionFilter::DateRange { start, end });
    }

    /// Show only income or only expenses, or everything for `None`.
    pub fn set_transaction_type(&mut self, transaction_type: Option<TransactionType>) {
        self.apply_filter(transaction_type.map_or(TransactionFilter::All, TransactionFilter::Type));
    }

    /// Show only one category, or everything for `None`.
    pub fn set_category(&mut self, category: Option<String>) {
        self.apply_filter(category.map_or(TransactionFilter::All, TransactionFilter::Category));
    }

    pub fn clear_filters(&mut self) {
        self.apply_filter(TransactionFilter::All);
    }

    /// Delete a transaction. The list and totals refresh on their own.
    pub fn delete_transaction(&self, id: TransactionId) {
        if let Err(error) = self.store.delete(id) {
            tracing::error!("Could not delete transaction {id}: {error}");
            self.state.update(|state| {
                state.error = Some(format!("Could not delete transaction: {error}"));
            });
        }
    }

    pub fn dismiss_error(&self) {
        self.state.update(|state| state.error = None);
    }

    fn apply_filter(&mut self, filter: TransactionFilter) {
        self.state.update(|state| {
            state.filter = filter.clone();
            state.is_loading = true;
        });

        let streams = Streams {
            transactions: self.store.transactions(filter),
            totals: self.store.totals(),
        };

        self.subscription.replace(tokio::spawn(streams.publish_to(self.state.clone())));
    }
}

struct Streams {
    transactions: LiveQuery<Vec<Transaction>>,
    totals: LiveQuery<Totals>,
}

impl Streams {
    /// Merge the streams into `state` until both have ended.
    ///
    /// Nothing is published until each stream has produced its first value.
    /// The three aggregates always come from the same [Totals] snapshot.
    async fn publish_to(mut self, state: ViewState<TransactionListUiState>) {
        let mut latest_transactions = None;
        let mut latest_totals = None;

        loop {
            let result: Result<(), Error> = tokio::select! {
                Some(result) = self.transactions.next() => {
                    result.map(|rows| latest_transactions = Some(rows))
                }
                Some(result) = self.totals.next() => {
                    result.map(|totals| latest_totals = Some(totals))
                }
                else => break,
            };

            if let Err(error) = result {
                tracing::error!("Could not load transactions: {error}");
                state.update(|state| {
                    state.error = Some(format!("Could not load transactions: {error}"));
                    state.is_loading = false;
                });
                continue;
            }

            if let (Some(transactions), Some(totals)) = (&latest_transactions, latest_totals) {
                state.update(|state| {
                    state.transactions = transactions.clone();
                    state.balance = totals.balance;
                    state.total_income = totals.total_income;
                    state.total_expenses = totals.total_expenses;
                    state.is_loading = false;
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use time::macros::{date, datetime};

    use crate::{
        stores::TransactionStore,
        test_utils::{drop_table, get_test_stores, new_transaction, wait_for},
        transaction::{TransactionFilter, TransactionType},
    };

    use super::TransactionListViewModel;

    fn seed(store: &impl TransactionStore) {
        store
            .insert(new_transaction(
                "Salary",
                dec!(3000),
                TransactionType::Income,
                "Work",
                datetime!(2024-01-01 0:00),
            ))
            .unwrap();
        store
            .insert(new_transaction(
                "Coffee",
                dec!(4.50),
                TransactionType::Expense,
                "Food",
                datetime!(2024-01-15 8:30),
            ))
            .unwrap();
        store
            .insert(new_transaction(
                "Rent",
                dec!(1200),
                TransactionType::Expense,
                "Housing",
                datetime!(2024-02-01 0:00),
            ))
            .unwrap();
    }

    fn titles(transactions: &[crate::transaction::Transaction]) -> Vec<&str> {
        transactions
            .iter()
            .map(|transaction| transaction.title.as_str())
            .collect()
    }

    #[tokio::test]
    async fn empty_store_shows_zero_totals() {
        let (_, _, store) = get_test_stores();

        let view_model = TransactionListViewModel::new(store);
        let got = wait_for(&mut view_model.subscribe(), |state| !state.is_loading).await;

        assert!(got.transactions.is_empty());
        assert_eq!(got.balance, dec!(0));
        assert_eq!(got.total_income, dec!(0));
        assert_eq!(got.total_expenses, dec!(0));
        assert_eq!(got.error, None);
    }

    #[tokio::test]
    async fn shows_transactions_and_totals() {
        let (_, _, store) = get_test_stores();
        seed(&store);

        let view_model = TransactionListViewModel::new(store);
        let got = wait_for(&mut view_model.subscribe(), |state| !state.is_loading).await;

        assert_eq!(titles(&got.transactions), ["Rent", "Coffee", "Salary"]);
        assert_eq!(got.total_income, dec!(3000));
        assert_eq!(got.total_expenses, dec!(1204.50));
        assert_eq!(got.balance, dec!(1795.50));
    }

    #[tokio::test]
    async fn new_transactions_update_list_and_totals() {
        let (_, _, store) = get_test_stores();
        let view_model = TransactionListViewModel::new(store.clone());
        let mut state = view_model.subscribe();
        wait_for(&mut state, |state| !state.is_loading).await;

        store
            .insert(new_transaction(
                "Coffee",
                dec!(4.50),
                TransactionType::Expense,
                "Food",
                datetime!(2024-01-15 8:30),
            ))
            .unwrap();

        let got = wait_for(&mut state, |state| {
            state.transactions.len() == 1 && state.total_expenses == dec!(4.50)
        })
        .await;
        assert_eq!(got.balance, dec!(-4.50));
    }

    #[tokio::test]
    async fn filters_replace_each_other() {
        let (_, _, store) = get_test_stores();
        seed(&store);
        let mut view_model = TransactionListViewModel::new(store);
        let mut state = view_model.subscribe();
        wait_for(&mut state, |state| !state.is_loading).await;

        view_model.set_transaction_type(Some(TransactionType::Expense));
        let got = wait_for(&mut state, |state| {
            !state.is_loading && state.filter == TransactionFilter::Type(TransactionType::Expense)
        })
        .await;
        assert_eq!(titles(&got.transactions), ["Rent", "Coffee"]);
        assert_eq!(got.total_income, dec!(3000), "totals are never filtered");

        view_model.set_category(Some("Food".to_owned()));
        let got = wait_for(&mut state, |state| {
            !state.is_loading && state.filter == TransactionFilter::Category("Food".to_owned())
        })
        .await;
        assert_eq!(titles(&got.transactions), ["Coffee"]);

        view_model.set_date_range(date!(2024 - 01 - 01), date!(2024 - 01 - 15));
        let got = wait_for(&mut state, |state| {
            !state.is_loading && matches!(state.filter, TransactionFilter::DateRange { .. })
        })
        .await;
        assert_eq!(titles(&got.transactions), ["Coffee", "Salary"]);

        view_model.clear_filters();
        let got = wait_for(&mut state, |state| {
            !state.is_loading && state.filter == TransactionFilter::All
        })
        .await;
        assert_eq!(got.transactions.len(), 3);
    }

    #[tokio::test]
    async fn clearing_type_or_category_shows_everything() {
        let (_, _, store) = get_test_stores();
        seed(&store);
        let mut view_model = TransactionListViewModel::new(store);
        let mut state = view_model.subscribe();

        view_model.set_category(Some("Food".to_owned()));
        wait_for(&mut state, |state| {
            !state.is_loading && state.transactions.len() == 1
        })
        .await;

        view_model.set_category(None);
        let got = wait_for(&mut state, |state| {
            !state.is_loading && state.transactions.len() == 3
        })
        .await;
        assert_eq!(got.filter, TransactionFilter::All);

        view_model.set_transaction_type(Some(TransactionType::Income));
        wait_for(&mut state, |state| {
            !state.is_loading && state.transactions.len() == 1
        })
        .await;

        view_model.set_transaction_type(None);
        let got = wait_for(&mut state, |state| {
            !state.is_loading && state.transactions.len() == 3
        })
        .await;
        assert_eq!(got.filter, TransactionFilter::All);
    }

    #[tokio::test]
    async fn delete_updates_list_and_totals() {
        let (_, _, store) = get_test_stores();
        seed(&store);
        let view_model = TransactionListViewModel::new(store);
        let mut state = view_model.subscribe();
        let loaded = wait_for(&mut state, |state| !state.is_loading).await;
        let rent = loaded.transactions[0].id;

        view_model.delete_transaction(rent);

        let got = wait_for(&mut state, |state| state.transactions.len() == 2).await;
        assert_eq!(titles(&got.transactions), ["Coffee", "Salary"]);
        assert_eq!(got.total_expenses, dec!(4.50));
        assert_eq!(got.balance, dec!(2995.50));
    }

    #[tokio::test]
    async fn failed_delete_shows_dismissible_error() {
        let (_, _, store) = get_test_stores();
        let view_model = TransactionListViewModel::new(store);
        wait_for(&mut view_model.subscribe(), |state| !state.is_loading).await;

        view_model.delete_transaction(99);

        assert!(
            view_model
                .state()
                .error
                .is_some_and(|error| error.starts_with("Could not delete transaction"))
        );

        view_model.dismiss_error();

        assert_eq!(view_model.state().error, None);
    }

    #[tokio::test]
    async fn load_failure_shows_error() {
        let (connection, _, store) = get_test_stores();
        drop_table(&connection, "transactions");

        let view_model = TransactionListViewModel::new(store);
        let got = wait_for(&mut view_model.subscribe(), |state| state.error.is_some()).await;

        assert!(!got.is_loading);
        assert!(
            got.error
                .is_some_and(|error| error.starts_with("Could not load transactions"))
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn balance_matches_totals_while_writes_happen() {
        let (_, _, store) = get_test_stores();
        let view_model = TransactionListViewModel::new(store.clone());
        let state = view_model.subscribe();

        let writer = std::thread::spawn(move || {
            for i in 0..300 {
                let transaction_type = if i % 2 == 0 {
                    TransactionType::Income
                } else {
                    TransactionType::Expense
                };
                store
                    .insert(new_transaction(
                        "Item",
                        dec!(1.5),
                        transaction_type,
                        "Misc",
                        datetime!(2024-01-10 0:00),
                    ))
                    .unwrap();
            }
        });

        while !writer.is_finished() {
            let published = state.borrow().clone();
            assert_eq!(
                published.balance,
                published.total_income - published.total_expenses,
                "balance {} does not match income {} and expenses {}",
                published.balance,
                published.total_income,
                published.total_expenses
            );
            tokio::task::yield_now().await;
        }
        writer.join().unwrap();

        let mut state = state;
        let got = wait_for(&mut state, |state| state.transactions.len() == 300).await;
        assert_eq!(got.total_income, dec!(225));
        assert_eq!(got.total_expenses, dec!(225));
        assert_eq!(got.balance, dec!(0));
    }
}
