//! Password rule evaluation and registration form gating
//!
//! This library evaluates candidate passwords against a fixed rule set,
//! detects common or patterned passwords, scores strength on a 0–5 scale,
//! and drives the register/login form state that decides when a form may
//! be submitted. Email and nickname availability is checked against the
//! backend's duplicate-check endpoints.
//!
//! # Features
//!
//! - `async` (default): debounced evaluation, background duplicate checks
//!   and deferred submit with cancellation support
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_GATE_DENYLIST_PATH`: extra deny-list file, one password per line
//! - `PWD_GATE_BASE_URL`: duplicate-check backend
//!   (default: `http://localhost:8080`)
//! - `PWD_GATE_TIMEOUT_MS`: duplicate-check request timeout
//!
//! # Example
//!
//! ```rust
//! use pwd_gate::{evaluate_rules, is_common_password, score_strength, StrengthLevel};
//! use secrecy::SecretString;
//!
//! let password = SecretString::new("Zebra#Kite42".to_string().into());
//!
//! let rules = evaluate_rules(&password);
//! let strength = score_strength(&password, &rules);
//!
//! assert!(!is_common_password(&password));
//! assert_eq!(strength.level, StrengthLevel::Excellent);
//! ```

mod denylist;
mod evaluator;
mod sections;
mod types;

pub mod config;
pub mod duplicate;
pub mod form;

// Public API
pub use denylist::{DenyList, DenyListError, BUILTIN_ENTRIES};
pub use evaluator::{
    common_weakness, evaluate_password, evaluate_rules, is_common_password, score_strength,
    PasswordPolicy, MAX_SCORE,
};
pub use types::{
    PasswordReport, Rule, RuleSet, StrengthLevel, StrengthResult, Weakness, ACCEPTABLE_SCORE,
};

#[cfg(feature = "async")]
pub use evaluator::{evaluate_password_tx, EVALUATION_DEBOUNCE};
