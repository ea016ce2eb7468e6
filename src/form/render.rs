//! Render projection: pure functions from form state to view models.
//!
//! Nothing here mutates state, so projecting the same state twice yields
//! the same view.

use super::{CheckState, FieldStatus};
use crate::evaluator::MAX_SCORE;
use crate::types::{Rule, RuleSet, StrengthLevel, StrengthResult};

pub const PASS_COLOR: &str = "#16a34a";
pub const FAIL_COLOR: &str = "#dc2626";

pub const PASS_ICON: char = '✓';
pub const PENDING_ICON: char = '○';

pub const CHECK_BUTTON_LABEL: &str = "Check availability";
pub const CHECK_BUTTON_BUSY_LABEL: &str = "Checking...";

pub fn level_color(level: StrengthLevel) -> &'static str {
    match level {
        StrengthLevel::None => "#e5e7eb",
        StrengthLevel::VeryWeak => "#dc2626",
        StrengthLevel::Weak => "#ea580c",
        StrengthLevel::Fair => "#ca8a04",
        StrengthLevel::Good => "#16a34a",
        StrengthLevel::Excellent => "#059669",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    /// Classes on the field's `.form-group` wrapper.
    pub group_class: String,
    pub error_text: String,
}

pub fn field_view(status: &FieldStatus) -> FieldView {
    match status {
        FieldStatus::Pristine => FieldView {
            group_class: "form-group".to_string(),
            error_text: String::new(),
        },
        FieldStatus::Error(err) => FieldView {
            group_class: "form-group error".to_string(),
            error_text: err.to_string(),
        },
        FieldStatus::Success => FieldView {
            group_class: "form-group success".to_string(),
            error_text: String::new(),
        },
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrengthView {
    /// Width of the strength bar fill, 0–100.
    pub fill_percent: f64,
    pub fill_class: String,
    pub color: &'static str,
    pub text: &'static str,
    /// e.g. `4.5/5`
    pub score_text: String,
}

pub fn strength_view(strength: &StrengthResult) -> StrengthView {
    StrengthView {
        fill_percent: strength.score / MAX_SCORE * 100.0,
        fill_class: format!("strength-fill {}", strength.level.as_str()),
        color: level_color(strength.level),
        text: strength.text,
        score_text: format!("{}/{}", strength.score, MAX_SCORE),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementView {
    pub rule: Rule,
    pub label: &'static str,
    pub passed: bool,
    pub icon: char,
    pub color: &'static str,
}

/// One row per rule, in display order.
pub fn requirement_views(rules: &RuleSet) -> Vec<RequirementView> {
    rules
        .iter()
        .map(|(rule, passed)| RequirementView {
            rule,
            label: rule.label(),
            passed,
            icon: if passed { PASS_ICON } else { PENDING_ICON },
            color: if passed { PASS_COLOR } else { FAIL_COLOR },
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckView {
    pub text: String,
    pub color: Option<&'static str>,
    pub button_disabled: bool,
    pub button_label: &'static str,
}

pub fn check_view(state: &CheckState) -> CheckView {
    let (text, color) = match state {
        CheckState::Unchecked | CheckState::Pending(_) => (String::new(), None),
        CheckState::Available(msg) => (msg.clone(), Some(PASS_COLOR)),
        CheckState::Taken(msg) | CheckState::Failed(msg) => (msg.clone(), Some(FAIL_COLOR)),
    };
    let pending = state.is_pending();
    CheckView {
        text,
        color,
        button_disabled: pending,
        button_label: if pending {
            CHECK_BUTTON_BUSY_LABEL
        } else {
            CHECK_BUTTON_LABEL
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitView {
    pub disabled: bool,
    pub loading: bool,
}

pub fn submit_view(submitting: bool) -> SubmitView {
    SubmitView {
        disabled: submitting,
        loading: submitting,
    }
}
