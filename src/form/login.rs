//! Login form: email/password presence checks and remember-me.

use std::collections::HashMap;

use secrecy::SecretString;

use super::field::{FieldAction, FieldStatus, SecretField, TextField};
use super::validators::{validate_email, validate_login_password};
use super::{SubmitBlock, SubmitDecision, SUBMIT_DELAY};

/// Storage key holding the remembered login email.
pub const REMEMBERED_EMAIL_KEY: &str = "procoreRememberedEmail";

/// Small string key/value store, the way browser local storage is used.
pub trait RememberStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-process [`RememberStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl RememberStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug, Default)]
pub struct LoginForm {
    email: TextField,
    password: SecretField,
    remember: bool,
    submitting: bool,
}

impl LoginForm {
    /// Builds the form, pre-filling a remembered email if there is one.
    pub fn restore<S: RememberStore + ?Sized>(store: &S) -> Self {
        let mut form = Self::default();
        if let Some(email) = store.get(REMEMBERED_EMAIL_KEY).filter(|e| !e.is_empty()) {
            form.email.value = email;
            form.remember = true;
        }
        form
    }

    pub fn input_email(&mut self, value: impl Into<String>) {
        self.email.value = value.into();
        self.email.apply(FieldAction::Clear);
    }

    pub fn input_password(&mut self, value: SecretString) {
        self.password.value = value;
        self.password.apply(FieldAction::Clear);
    }

    /// Unchecking forgets the stored email immediately.
    pub fn set_remember<S: RememberStore + ?Sized>(&mut self, checked: bool, store: &mut S) {
        self.remember = checked;
        if !checked {
            store.remove(REMEMBERED_EMAIL_KEY);
        }
    }

    pub fn blur(&mut self, field: LoginField) -> bool {
        self.validate_field(field)
    }

    pub fn validate_field(&mut self, field: LoginField) -> bool {
        match field {
            LoginField::Email => {
                let result = validate_email(&self.email.value);
                let valid = result.is_ok();
                self.email.apply(result.into());
                valid
            }
            LoginField::Password => {
                let result = validate_login_password(&self.password.value);
                let valid = result.is_ok();
                self.password.apply(result.into());
                valid
            }
        }
    }

    /// Validates both fields and updates the remembered email.
    pub fn submit<S: RememberStore + ?Sized>(&mut self, store: &mut S) -> SubmitDecision<LoginField> {
        if self.submitting {
            return SubmitDecision::Blocked(SubmitBlock::AlreadySubmitting);
        }

        let invalid: Vec<_> = [LoginField::Email, LoginField::Password]
            .into_iter()
            .filter(|&field| !self.validate_field(field))
            .collect();

        if !invalid.is_empty() {
            return SubmitDecision::Blocked(SubmitBlock::InvalidFields(invalid));
        }

        if self.remember {
            store.set(REMEMBERED_EMAIL_KEY, &self.email.value);
        } else {
            store.remove(REMEMBERED_EMAIL_KEY);
        }

        self.submitting = true;

        #[cfg(feature = "tracing")]
        tracing::debug!("Login submit accepted (remember: {})", self.remember);

        SubmitDecision::Proceed { delay: SUBMIT_DELAY }
    }

    pub fn email(&self) -> &str {
        &self.email.value
    }

    pub fn remember(&self) -> bool {
        self.remember
    }

    pub fn status(&self, field: LoginField) -> &FieldStatus {
        match field {
            LoginField::Email => &self.email.status,
            LoginField::Password => &self.password.status,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }
}
