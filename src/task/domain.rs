//! Core financial task domain types.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime};

use crate::{Error, database_id::TaskId, db::unknown_variant};

/// How often a recurring task is expected to repeat.
///
/// This is informational only, no new tasks are created when a period elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecurringPeriod {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurringPeriod {
    /// All periods in the order they should be offered to the user.
    pub const ALL: [RecurringPeriod; 4] = [
        RecurringPeriod::Daily,
        RecurringPeriod::Weekly,
        RecurringPeriod::Monthly,
        RecurringPeriod::Yearly,
    ];

    /// The name used for the period in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }
}

impl FromStr for RecurringPeriod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DAILY" => Ok(Self::Daily),
            "WEEKLY" => Ok(Self::Weekly),
            "MONTHLY" => Ok(Self::Monthly),
            "YEARLY" => Ok(Self::Yearly),
            other => Err(Error::UnknownVariant(other.to_owned())),
        }
    }
}

impl Display for RecurringPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        };

        write!(f, "{label}")
    }
}

impl ToSql for RecurringPeriod {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for RecurringPeriod {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;

        text.parse().map_err(|_| unknown_variant(text))
    }
}

/// A bill or other financial obligation with a due date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialTask {
    /// The ID of the task.
    pub id: TaskId,
    /// A short, non-empty name for the task.
    pub title: String,
    /// Optional notes about the task.
    pub description: Option<String>,
    /// The amount of money the task involves.
    pub amount: Decimal,
    /// The day the task is due.
    pub due_date: Date,
    /// A free-text label used to group tasks, e.g. "Housing".
    pub category: String,
    /// Whether the task repeats.
    pub is_recurring: bool,
    /// How often the task repeats. Set if and only if `is_recurring` is true.
    pub recurring_period: Option<RecurringPeriod>,
    /// Whether the task has been dealt with.
    pub is_completed: bool,
    /// When the task was first recorded.
    pub created_at: PrimitiveDateTime,
}

/// The fields needed to create a [FinancialTask]. The ID is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub due_date: Date,
    pub category: String,
    pub is_recurring: bool,
    pub recurring_period: Option<RecurringPeriod>,
    pub is_completed: bool,
    pub created_at: PrimitiveDateTime,
}

impl NewTask {
    /// Attach a storage-assigned `id` to the task.
    pub fn with_id(self, id: TaskId) -> FinancialTask {
        FinancialTask {
            id,
            title: self.title,
            description: self.description,
            amount: self.amount,
            due_date: self.due_date,
            category: self.category,
            is_recurring: self.is_recurring,
            recurring_period: self.recurring_period,
            is_completed: self.is_completed,
            created_at: self.created_at,
        }
    }
}
