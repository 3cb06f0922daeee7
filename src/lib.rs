//! WealthWise is a personal finance app for tracking bills and other
//! financial tasks alongside income and expense transactions.
//!
//! This library provides the data layer and the per-screen state holders:
//! SQLite backed stores whose queries are re-delivered on every change, and
//! view models that turn those queries and the user's actions into observable
//! UI state.

mod app_state;
mod database_id;
mod db;
mod error;
mod timezone;

pub mod live_query;
pub mod navigation;
pub mod stores;
pub mod task;
pub mod transaction;
pub mod view_state;

#[cfg(test)]
mod test_utils;

pub use app_state::{AppConfig, AppState};
pub use database_id::{DatabaseId, TaskId, TransactionId};
pub use db::{DATABASE_NAME, initialize as initialize_db};
pub use error::{Error, ValidationError};
pub use live_query::LiveQuery;
pub use timezone::{get_local_offset, now_local};
