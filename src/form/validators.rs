//! Field validators for the register and login forms, plus the phone
//! input mask.

use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::types::StrengthResult;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static NICKNAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9가-힣_]+$").unwrap());
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{3}-[0-9]{4}-[0-9]{4}$").unwrap());

pub const NICKNAME_MIN: usize = 2;
pub const NICKNAME_MAX: usize = 10;

/// Longest phone number, in digits, the input mask keeps.
pub const PHONE_DIGITS: usize = 11;

/// Why a field is invalid. The `Display` text is what the form shows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Please enter your email.")]
    EmailRequired,
    #[error("Please enter a valid email address.")]
    EmailFormat,
    #[error("This email is already in use.")]
    EmailTaken,
    #[error("Please enter a password.")]
    PasswordRequired,
    #[error("Password is too weak. Current strength: {0} (at least \"Fair\" required)")]
    PasswordTooWeak(&'static str),
    #[error("Please confirm your password.")]
    ConfirmRequired,
    #[error("Passwords do not match.")]
    ConfirmMismatch,
    #[error("Please enter a nickname.")]
    NicknameRequired,
    #[error("Nickname must be between 2 and 10 characters.")]
    NicknameLength,
    #[error("Nickname may only contain letters, numbers, Hangul and underscores.")]
    NicknameChars,
    #[error("This nickname is already in use.")]
    NicknameTaken,
    #[error("Please enter a valid phone number. (e.g. 010-1234-5678)")]
    PhoneFormat,
}

pub fn validate_email(email: &str) -> Result<(), FieldError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(FieldError::EmailRequired);
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err(FieldError::EmailFormat);
    }
    Ok(())
}

pub fn validate_nickname(nickname: &str) -> Result<(), FieldError> {
    let nickname = nickname.trim();
    if nickname.is_empty() {
        return Err(FieldError::NicknameRequired);
    }
    let len = nickname.chars().count();
    if !(NICKNAME_MIN..=NICKNAME_MAX).contains(&len) {
        return Err(FieldError::NicknameLength);
    }
    if !NICKNAME_REGEX.is_match(nickname) {
        return Err(FieldError::NicknameChars);
    }
    Ok(())
}

/// Phone is optional; an empty value is valid.
pub fn validate_phone(phone: &str) -> Result<(), FieldError> {
    let phone = phone.trim();
    if !phone.is_empty() && !PHONE_REGEX.is_match(phone) {
        return Err(FieldError::PhoneFormat);
    }
    Ok(())
}

/// Registration password: present and at least "fair".
pub fn validate_new_password(password: &SecretString, strength: &StrengthResult) -> Result<(), FieldError> {
    if password.expose_secret().is_empty() {
        return Err(FieldError::PasswordRequired);
    }
    if !strength.is_acceptable() {
        return Err(FieldError::PasswordTooWeak(strength.text));
    }
    Ok(())
}

/// Login password: present.
pub fn validate_login_password(password: &SecretString) -> Result<(), FieldError> {
    if password.expose_secret().is_empty() {
        return Err(FieldError::PasswordRequired);
    }
    Ok(())
}

pub fn validate_confirm_password(password: &SecretString, confirm: &SecretString) -> Result<(), FieldError> {
    if confirm.expose_secret().is_empty() {
        return Err(FieldError::ConfirmRequired);
    }
    if password.expose_secret() != confirm.expose_secret() {
        return Err(FieldError::ConfirmMismatch);
    }
    Ok(())
}

/// Masks raw phone input as `###-####-####` while the user types.
///
/// Non-digits are dropped and at most [`PHONE_DIGITS`] digits are kept.
pub fn format_phone_input(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let len = digits.len();

    if len >= PHONE_DIGITS {
        format!("{}-{}-{}", &digits[..3], &digits[3..7], &digits[7..PHONE_DIGITS])
    } else if len >= 7 {
        format!("{}-{}{}", &digits[..3], &digits[3..7], &digits[7..])
    } else if len >= 3 {
        format!("{}-{}", &digits[..3], &digits[3..])
    } else {
        digits
    }
}
