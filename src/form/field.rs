//! Per-field state and its reducer.

use secrecy::{ExposeSecret, SecretString};

use super::validators::FieldError;

/// Display state of one form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldStatus {
    #[default]
    Pristine,
    Error(FieldError),
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldAction {
    Fail(FieldError),
    Pass,
    Clear,
}

impl FieldStatus {
    /// Pure transition; every action fully determines the next state.
    pub fn reduce(self, action: FieldAction) -> Self {
        match action {
            FieldAction::Fail(err) => FieldStatus::Error(err),
            FieldAction::Pass => FieldStatus::Success,
            FieldAction::Clear => FieldStatus::Pristine,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FieldStatus::Error(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FieldStatus::Success)
    }

    pub fn error(&self) -> Option<&FieldError> {
        match self {
            FieldStatus::Error(err) => Some(err),
            _ => None,
        }
    }
}

/// Converts a validator result into the matching action.
impl From<Result<(), FieldError>> for FieldAction {
    fn from(result: Result<(), FieldError>) -> Self {
        match result {
            Ok(()) => FieldAction::Pass,
            Err(err) => FieldAction::Fail(err),
        }
    }
}

/// A plain text field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub value: String,
    pub status: FieldStatus,
}

impl TextField {
    pub fn apply(&mut self, action: FieldAction) {
        self.status = std::mem::take(&mut self.status).reduce(action);
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }
}

/// A password field; the value never leaves its secret wrapper.
#[derive(Debug)]
pub struct SecretField {
    pub value: SecretString,
    pub status: FieldStatus,
}

impl Default for SecretField {
    fn default() -> Self {
        Self {
            value: SecretString::new(String::new().into()),
            status: FieldStatus::Pristine,
        }
    }
}

impl SecretField {
    pub fn apply(&mut self, action: FieldAction) {
        self.status = std::mem::take(&mut self.status).reduce(action);
    }

    pub fn is_empty(&self) -> bool {
        self.value.expose_secret().is_empty()
    }
}
