//! Length section - minimum length rule and the "too short to judge" cutoff.

use super::SectionResult;
use crate::types::Weakness;

/// Minimum length for the `length` rule.
pub const MIN_LENGTH: usize = 8;

/// Anything shorter is classified common without further analysis.
pub const MIN_COMMON_LENGTH: usize = 4;

/// Checks if the password meets minimum length requirements.
pub fn length_rule(password: &str) -> bool {
    password.chars().count() >= MIN_LENGTH
}

pub fn too_short_section(password: &str) -> SectionResult {
    (password.chars().count() < MIN_COMMON_LENGTH).then_some(Weakness::TooShort)
}
