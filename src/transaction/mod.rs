//! Money coming in and going out.
//!
//! This module contains the transaction model, its database functions and the
//! state holders for the transaction screens.

mod create;
mod db;
mod domain;
mod form;
mod list;

pub use create::{AddTransactionUiState, AddTransactionViewModel};
pub use db::{
    create_transaction, create_transaction_table, delete_transaction, get_totals,
    get_transaction, get_transactions, update_transaction,
};
pub use domain::{NewTransaction, Totals, Transaction, TransactionFilter, TransactionType};
pub use list::{TransactionListUiState, TransactionListViewModel};
