//! Field checks for the add transaction screen.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::ValidationError;

/// Check that a required text field is not blank.
pub(crate) fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::RequiredField)
    } else {
        Ok(())
    }
}

/// Parse a transaction amount, which must be a positive decimal.
pub(crate) fn validate_amount(value: &str) -> Result<Decimal, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::RequiredField);
    }

    let amount = Decimal::from_str(value).map_err(|_| ValidationError::InvalidAmount)?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::AmountNotPositive);
    }

    Ok(amount)
}

/// The error message for `result`, if it failed.
pub(crate) fn error_message<T>(result: &Result<T, ValidationError>) -> Option<String> {
    result.as_ref().err().map(ToString::to_string)
}
