//! Schema initialization and the column encodings shared by the task and
//! transaction tables.
//!
//! Amounts are stored as exact decimal text and date-times as fixed-width
//! ISO-8601 text so that comparing the stored strings gives the same order as
//! comparing the values.

use std::str::FromStr;

use rusqlite::{
    Connection, Transaction as SqlTransaction,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use rust_decimal::Decimal;
use time::{PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, task::create_task_table, transaction::create_transaction_table};

/// The default file name for the application database.
pub const DATABASE_NAME: &str = "wealthwise.db";

const DATE_TIME_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Create the tables for the domain models if they do not exist yet.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_task_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// A [Decimal] stored as its exact plain-text representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SqlDecimal(pub Decimal);

impl ToSql for SqlDecimal {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.to_string()))
    }
}

impl FromSql for SqlDecimal {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;

        Decimal::from_str(text)
            .map(SqlDecimal)
            .map_err(|_| FromSqlError::Other(Box::new(Error::InvalidAmount(text.to_owned()))))
    }
}

/// A [PrimitiveDateTime] stored as `YYYY-MM-DDTHH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SqlDateTime(pub PrimitiveDateTime);

impl ToSql for SqlDateTime {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0
            .format(DATE_TIME_FORMAT)
            .map(ToSqlOutput::from)
            .map_err(|error| rusqlite::Error::ToSqlConversionFailure(Box::new(error)))
    }
}

impl FromSql for SqlDateTime {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;

        PrimitiveDateTime::parse(text, DATE_TIME_FORMAT)
            .map(SqlDateTime)
            .map_err(|_| FromSqlError::Other(Box::new(Error::InvalidTimestamp(text.to_owned()))))
    }
}

/// Convert an enum name read from the database into an SQL conversion error.
pub(crate) fn unknown_variant(text: &str) -> FromSqlError {
    FromSqlError::Other(Box::new(Error::UnknownVariant(text.to_owned())))
}
