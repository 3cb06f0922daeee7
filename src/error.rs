//! Defines the app level error type and the user-facing validation errors.

/// The errors that may occur when reading or writing application data.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// A stored amount could not be parsed as a decimal number.
    #[error("\"{0}\" is not a valid decimal amount")]
    InvalidAmount(String),

    /// A stored date or date-time could not be parsed as ISO-8601.
    #[error("\"{0}\" is not a valid ISO-8601 timestamp")]
    InvalidTimestamp(String),

    /// A stored enum name did not match any known variant.
    #[error("\"{0}\" is not a known variant")]
    UnknownVariant(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to update a task that does not exist
    #[error("tried to update a task that is not in the database")]
    UpdateMissingTask,

    /// Tried to delete a task that does not exist
    #[error("tried to delete a task that is not in the database")]
    DeleteMissingTask,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// A user-correctable problem with form input.
///
/// The display string is the message shown next to the offending field, so
/// these errors are stored in UI state rather than returned to callers.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A task was submitted without a title.
    #[error("Title cannot be empty")]
    EmptyTitle,

    /// A task amount could not be parsed as a decimal.
    #[error("Invalid amount format")]
    InvalidAmountFormat,

    /// A task was submitted without a category.
    #[error("Category cannot be empty")]
    EmptyCategory,

    /// A recurring task was submitted without a recurrence period.
    #[error("Recurring period must be selected for recurring tasks")]
    MissingRecurringPeriod,

    /// A required transaction field was left blank.
    #[error("This field is required")]
    RequiredField,

    /// A transaction amount could not be parsed as a decimal.
    #[error("Invalid amount")]
    InvalidAmount,

    /// A transaction amount was zero or negative.
    #[error("Amount must be greater than zero")]
    AmountNotPositive,
}
