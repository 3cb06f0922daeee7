//! Contains traits and implementations for objects that store the domain
//! [tasks](crate::task) and [transactions](crate::transaction).

mod task;
mod transaction;

pub mod sqlite;

pub use task::TaskStore;
pub use transaction::TransactionStore;
