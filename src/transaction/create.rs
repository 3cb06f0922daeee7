//! State holder for the add transaction screen.

use time::{Date, UtcOffset};
use tokio::sync::watch;

use crate::{
    stores::TransactionStore,
    timezone::now_local,
    transaction::{
        NewTransaction, TransactionType,
        form::{error_message, validate_amount, validate_required},
    },
    view_state::ViewState,
};

/// The contents of the add transaction form and its per-field errors.
#[derive(Debug, Clone, PartialEq)]
pub struct AddTransactionUiState {
    pub title: String,
    pub description: String,
    pub amount: String,
    pub transaction_type: TransactionType,
    pub category: String,
    pub date: Date,
    pub title_error: Option<String>,
    pub amount_error: Option<String>,
    pub category_error: Option<String>,
    pub is_loading: bool,
    /// Set once the transaction was stored, the screen should close.
    pub is_saved: bool,
}

impl AddTransactionUiState {
    /// An empty expense dated `today`.
    pub fn new(today: Date) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            amount: String::new(),
            transaction_type: TransactionType::Expense,
            category: String::new(),
            date: today,
            title_error: None,
            amount_error: None,
            category_error: None,
            is_loading: false,
            is_saved: false,
        }
    }

    fn has_errors(&self) -> bool {
        self.title_error.is_some() || self.amount_error.is_some() || self.category_error.is_some()
    }
}

/// Collects and validates the fields of a new transaction, then stores it.
#[derive(Debug)]
pub struct AddTransactionViewModel<R> {
    store: R,
    local_offset: UtcOffset,
    state: ViewState<AddTransactionUiState>,
}

impl<R: TransactionStore> AddTransactionViewModel<R> {
    /// The form starts dated today in the timezone given by `local_offset`.
    pub fn new(store: R, local_offset: UtcOffset) -> Self {
        let today = now_local(local_offset).date();

        Self {
            store,
            local_offset,
            state: ViewState::new(AddTransactionUiState::new(today)),
        }
    }

    pub fn state(&self) -> AddTransactionUiState {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<AddTransactionUiState> {
        self.state.subscribe()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.state.update(|state| {
            state.title_error = error_message(&validate_required(&title));
            state.title = title;
        });
    }

    pub fn set_description(&self, description: impl Into<String>) {
        let description = description.into();
        self.state.update(|state| state.description = description);
    }

    pub fn set_amount(&self, amount: impl Into<String>) {
        let amount = amount.into();
        self.state.update(|state| {
            state.amount_error = error_message(&validate_amount(&amount));
            state.amount = amount;
        });
    }

    pub fn set_type(&self, transaction_type: TransactionType) {
        self.state
            .update(|state| state.transaction_type = transaction_type);
    }

    pub fn set_category(&self, category: impl Into<String>) {
        let category = category.into();
        self.state.update(|state| {
            state.category_error = error_message(&validate_required(&category));
            state.category = category;
        });
    }

    pub fn set_date(&self, date: Date) {
        self.state.update(|state| state.date = date);
    }

    /// Check every field and store the transaction if they are all valid.
    ///
    /// The transaction is dated at the start of the selected day. On failure
    /// nothing is written and the errors are shown next to their fields.
    pub fn save(&self) {
        let form = self.state.get();
        let amount = validate_amount(&form.amount);

        let mut checked = form.clone();
        checked.title_error = error_message(&validate_required(&form.title));
        checked.amount_error = error_message(&amount);
        checked.category_error = error_message(&validate_required(&form.category));

        let Ok(amount) = amount else {
            self.state.set(checked);
            return;
        };
        if checked.has_errors() {
            self.state.set(checked);
            return;
        }

        checked.is_loading = true;
        self.state.set(checked);

        let description = form.description.trim();
        let transaction = NewTransaction {
            title: form.title.trim().to_owned(),
            description: (!description.is_empty()).then(|| description.to_owned()),
            amount,
            transaction_type: form.transaction_type,
            category: form.category.trim().to_owned(),
            date: form.date.midnight(),
            created_at: now_local(self.local_offset),
        };

        match self.store.insert(transaction) {
            Ok(_) => self.state.update(|state| {
                state.is_loading = false;
                state.is_saved = true;
            }),
            Err(error) => {
                tracing::error!("Could not save transaction: {error}");
                self.state.update(|state| {
                    state.is_loading = false;
                    state.amount_error = Some(format!("Could not save transaction: {error}"));
                });
            }
        }
    }
}
