//! Form controllers for the register and login pages.
//!
//! Each controller owns explicit per-field state that only changes through
//! [`FieldStatus::reduce`]. Rendering is a separate projection, see
//! [`render`].

mod field;
mod login;
mod register;
pub mod render;
mod validators;

pub use field::{FieldAction, FieldStatus, SecretField, TextField};
pub use login::{LoginField, LoginForm, MemoryStore, RememberStore, REMEMBERED_EMAIL_KEY};
pub use register::{RegisterField, RegisterForm};
pub use validators::{
    format_phone_input, validate_confirm_password, validate_email, validate_login_password,
    validate_new_password, validate_nickname, validate_phone, FieldError,
};

use std::time::Duration;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::duplicate::CheckKind;

/// How long the loading indicator shows before the form is submitted.
pub const SUBMIT_DELAY: Duration = Duration::from_millis(500);

/// Availability state of the email or nickname field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckState {
    #[default]
    Unchecked,
    /// A request is in flight; only the response carrying this token counts.
    Pending(u64),
    Available(String),
    Taken(String),
    Failed(String),
}

impl CheckState {
    pub fn is_available(&self) -> bool {
        matches!(self, CheckState::Available(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, CheckState::Pending(_))
    }
}

/// Identifies one duplicate-check request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckTicket {
    pub kind: CheckKind,
    /// Trimmed value sent to the backend.
    pub value: String,
    pub token: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlock<F> {
    /// Invalid fields in display order; the first one should get focus.
    InvalidFields(Vec<F>),
    EmailNotChecked,
    NicknameNotChecked,
    /// A previous submit was accepted and is still in progress.
    AlreadySubmitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision<F> {
    /// Show the loading indicator, then submit after `delay`.
    Proceed { delay: Duration },
    Blocked(SubmitBlock<F>),
}

impl<F> SubmitDecision<F> {
    pub fn is_proceed(&self) -> bool {
        matches!(self, SubmitDecision::Proceed { .. })
    }
}

/// Waits `delay`, then runs `submit` unless `token` was cancelled.
///
/// Returns whether `submit` ran.
#[cfg(feature = "async")]
pub async fn deferred_submit<F>(delay: Duration, token: CancellationToken, submit: F) -> bool
where
    F: FnOnce(),
{
    tokio::time::sleep(delay).await;

    if token.is_cancelled() {
        #[cfg(feature = "tracing")]
        tracing::debug!("Deferred submit cancelled");
        return false;
    }

    submit();
    true
}
