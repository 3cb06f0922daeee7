//! Raw input from the add and edit task screens, and its validation.

use std::str::FromStr;

use rust_decimal::Decimal;
use time::{Date, PrimitiveDateTime};

use crate::{
    error::ValidationError,
    task::{FinancialTask, NewTask, RecurringPeriod},
};

/// The task fields exactly as the user entered them.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub description: Option<String>,
    pub amount: String,
    pub due_date: Date,
    pub category: String,
    pub is_recurring: bool,
    pub recurring_period: Option<RecurringPeriod>,
}

/// Task fields that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidTask {
    title: String,
    description: Option<String>,
    amount: Decimal,
    due_date: Date,
    category: String,
    recurring_period: Option<RecurringPeriod>,
}

impl TaskForm {
    /// Check the form and convert the text fields.
    ///
    /// The checks run in the order the fields appear on screen and the first
    /// failure is returned. A blank description is treated as no description.
    ///
    /// # Errors
    /// Returns a [ValidationError] describing the first invalid field.
    pub(crate) fn validate(&self) -> Result<ValidTask, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        let amount = Decimal::from_str(self.amount.trim())
            .map_err(|_| ValidationError::InvalidAmountFormat)?;

        let category = self.category.trim();
        if category.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }

        let recurring_period = match (self.is_recurring, self.recurring_period) {
            (true, None) => return Err(ValidationError::MissingRecurringPeriod),
            (true, period) => period,
            (false, _) => None,
        };

        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|description| !description.is_empty())
            .map(str::to_owned);

        Ok(ValidTask {
            title: title.to_owned(),
            description,
            amount,
            due_date: self.due_date,
            category: category.to_owned(),
            recurring_period,
        })
    }
}

impl ValidTask {
    /// A new, incomplete task recorded at `created_at`.
    pub(crate) fn into_new_task(self, created_at: PrimitiveDateTime) -> NewTask {
        NewTask {
            is_recurring: self.recurring_period.is_some(),
            title: self.title,
            description: self.description,
            amount: self.amount,
            due_date: self.due_date,
            category: self.category,
            recurring_period: self.recurring_period,
            is_completed: false,
            created_at,
        }
    }

    /// `task` with its editable fields replaced.
    ///
    /// The ID, completion flag and creation time are kept.
    pub(crate) fn apply_to(self, task: &FinancialTask) -> FinancialTask {
        FinancialTask {
            id: task.id,
            is_recurring: self.recurring_period.is_some(),
            title: self.title,
            description: self.description,
            amount: self.amount,
            due_date: self.due_date,
            category: self.category,
            recurring_period: self.recurring_period,
            is_completed: task.is_completed,
            created_at: task.created_at,
        }
    }
}
