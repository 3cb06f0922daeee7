//! Defines the transaction store trait.

use rust_decimal::Decimal;
use time::Date;

use crate::{
    Error,
    database_id::TransactionId,
    live_query::LiveQuery,
    transaction::{NewTransaction, Totals, Transaction, TransactionFilter, TransactionType},
};

/// Handles the creation, retrieval and modification of transactions.
pub trait TransactionStore {
    /// The transactions selected by `filter`, most recent first.
    fn transactions(&self, filter: TransactionFilter) -> LiveQuery<Vec<Transaction>>;

    /// The income, expense and balance totals over all transactions.
    fn totals(&self) -> LiveQuery<Totals>;

    /// Retrieve a single transaction.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Create a new transaction in the store and return it with its assigned ID.
    fn insert(&self, transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Replace the stored transaction that has the same ID as `transaction`.
    fn update(&self, transaction: &Transaction) -> Result<(), Error>;

    /// Remove a transaction from the store.
    fn delete(&self, id: TransactionId) -> Result<(), Error>;

    /// Every transaction, most recent first.
    fn all_transactions(&self) -> LiveQuery<Vec<Transaction>> {
        self.transactions(TransactionFilter::All)
    }

    /// Transactions that happened between `start` and `end`, both days inclusive.
    fn transactions_in_date_range(&self, start: Date, end: Date) -> LiveQuery<Vec<Transaction>> {
        self.transactions(TransactionFilter::DateRange { start, end })
    }

    /// Only income or only expenses.
    fn transactions_by_type(
        &self,
        transaction_type: TransactionType,
    ) -> LiveQuery<Vec<Transaction>> {
        self.transactions(TransactionFilter::Type(transaction_type))
    }

    /// Transactions with exactly the category `category`.
    fn transactions_by_category(&self, category: &str) -> LiveQuery<Vec<Transaction>> {
        self.transactions(TransactionFilter::Category(category.to_owned()))
    }

    /// Total income minus total expenses, zero when there are no transactions.
    fn balance(&self) -> LiveQuery<Decimal> {
        self.totals().map(|totals| totals.balance)
    }

    /// The sum of all income, zero when there is none.
    fn total_income(&self) -> LiveQuery<Decimal> {
        self.totals().map(|totals| totals.total_income)
    }

    /// The sum of all expenses, zero when there are none.
    fn total_expenses(&self) -> LiveQuery<Decimal> {
        self.totals().map(|totals| totals.total_expenses)
    }
}
