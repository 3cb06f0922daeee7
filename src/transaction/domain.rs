//! Core transaction domain types.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime};

use crate::{Error, database_id::TransactionId, db::unknown_variant};

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// The name used for the type in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INCOME" => Ok(Self::Income),
            "EXPENSE" => Ok(Self::Expense),
            other => Err(Error::UnknownVariant(other.to_owned())),
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;

        text.parse().map_err(|_| unknown_variant(text))
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A short, non-empty name for the transaction.
    pub title: String,
    /// Optional notes about the transaction.
    pub description: Option<String>,
    /// The amount of money spent or earned. Never negative, the direction of
    /// the money comes from `transaction_type`.
    pub amount: Decimal,
    /// Whether the money was earned or spent.
    pub transaction_type: TransactionType,
    /// A free-text label used to group transactions, e.g. "Food".
    pub category: String,
    /// When the transaction happened.
    pub date: PrimitiveDateTime,
    /// When the transaction was recorded.
    pub created_at: PrimitiveDateTime,
}

impl Transaction {
    /// The amount with the sign of its effect on the balance.
    pub fn signed_amount(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// The fields needed to create a [Transaction]. The ID is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub title: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub category: String,
    pub date: PrimitiveDateTime,
    pub created_at: PrimitiveDateTime,
}

impl NewTransaction {
    /// Attach a storage-assigned `id` to the transaction.
    pub fn with_id(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            title: self.title,
            description: self.description,
            amount: self.amount,
            transaction_type: self.transaction_type,
            category: self.category,
            date: self.date,
            created_at: self.created_at,
        }
    }
}

/// Selects which transactions a query returns.
///
/// Only one dimension can be filtered on at a time, picking a new filter
/// replaces the previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TransactionFilter {
    /// Every transaction.
    #[default]
    All,
    /// Transactions that happened between two days, both inclusive.
    DateRange { start: Date, end: Date },
    /// Only income or only expenses.
    Type(TransactionType),
    /// Transactions with exactly this category.
    Category(String),
}

/// The aggregate amounts over all transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Total income minus total expenses.
    pub balance: Decimal,
    /// The sum of all income.
    pub total_income: Decimal,
    /// The sum of all expenses.
    pub total_expenses: Decimal,
}

impl Totals {
    /// Sum the amounts of `transactions` by type.
    pub fn from_amounts(
        transactions: impl IntoIterator<Item = (Decimal, TransactionType)>,
    ) -> Self {
        let (total_income, total_expenses) = transactions.into_iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(income, expenses), (amount, transaction_type)| match transaction_type {
                TransactionType::Income => (income + amount, expenses),
                TransactionType::Expense => (income, expenses + amount),
            },
        );

        Self {
            balance: total_income - total_expenses,
            total_income,
            total_expenses,
        }
    }
}
