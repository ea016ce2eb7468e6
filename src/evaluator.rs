//! Password evaluator - rule evaluation, common-password detection and
//! strength scoring.

use once_cell::sync::Lazy;
use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::denylist::DenyList;
use crate::sections::{
    deny_list_section, length_rule, personal_info_section, repeating_section, sequential_section,
    too_short_section, CharClasses, SectionResult,
};
use crate::types::{PasswordReport, RuleSet, StrengthResult, Weakness};

/// Upper bound of the normalized score.
pub const MAX_SCORE: f64 = 5.0;

/// Delay before a debounced evaluation runs.
#[cfg(feature = "async")]
pub const EVALUATION_DEBOUNCE: std::time::Duration = std::time::Duration::from_millis(300);

static BUILTIN_POLICY: Lazy<PasswordPolicy> = Lazy::new(PasswordPolicy::default);

/// Rule evaluation bound to a particular deny-list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordPolicy {
    deny_list: DenyList,
}

impl PasswordPolicy {
    pub fn new(deny_list: DenyList) -> Self {
        Self { deny_list }
    }

    pub fn deny_list(&self) -> &DenyList {
        &self.deny_list
    }

    /// Returns the first reason the password counts as common, if any.
    pub fn common_weakness(&self, password: &SecretString) -> Option<Weakness> {
        let pwd = password.expose_secret();

        // Orchestrator: first section to object wins
        let sections: [(&str, &dyn Fn(&str) -> SectionResult); 5] = [
            ("length", &too_short_section),
            ("denylist", &|p: &str| deny_list_section(p, &self.deny_list)),
            ("sequential", &sequential_section),
            ("repeating", &repeating_section),
            ("personal", &personal_info_section),
        ];

        for (_section_name, section_fn) in sections {
            if let Some(weakness) = section_fn(pwd) {
                #[cfg(feature = "tracing")]
                tracing::trace!("Password flagged as common by section: {}", _section_name);
                return Some(weakness);
            }
        }
        None
    }

    pub fn is_common_password(&self, password: &SecretString) -> bool {
        self.common_weakness(password).is_some()
    }

    pub fn evaluate_rules(&self, password: &SecretString) -> RuleSet {
        let pwd = password.expose_secret();
        let classes = CharClasses::of(pwd);
        RuleSet {
            length: length_rule(pwd),
            lowercase: classes.lower,
            uppercase: classes.upper,
            numbers: classes.digit,
            special: classes.special,
            no_common: !self.is_common_password(password),
        }
    }

    /// Rules, strength and weakness for one password.
    pub fn evaluate(&self, password: &SecretString) -> PasswordReport {
        let weakness = self.common_weakness(password);
        let pwd = password.expose_secret();
        let classes = CharClasses::of(pwd);
        let rules = RuleSet {
            length: length_rule(pwd),
            lowercase: classes.lower,
            uppercase: classes.upper,
            numbers: classes.digit,
            special: classes.special,
            no_common: weakness.is_none(),
        };
        PasswordReport {
            rules,
            strength: score_strength(password, &rules),
            weakness,
        }
    }
}

/// Pass/fail for every rule, using the built-in deny-list.
pub fn evaluate_rules(password: &SecretString) -> RuleSet {
    BUILTIN_POLICY.evaluate_rules(password)
}

/// True when the password is deny-listed, follows a trivial pattern, or is
/// shorter than four characters. Uses the built-in deny-list.
pub fn is_common_password(password: &SecretString) -> bool {
    BUILTIN_POLICY.is_common_password(password)
}

pub fn common_weakness(password: &SecretString) -> Option<Weakness> {
    BUILTIN_POLICY.common_weakness(password)
}

pub fn evaluate_password(password: &SecretString) -> PasswordReport {
    BUILTIN_POLICY.evaluate(password)
}

/// Scores a password from its rule results plus length, script and
/// entropy bonuses.
///
/// The raw score is rounded to one decimal and then clamped to
/// [`MAX_SCORE`]. An empty password scores zero with level `none`
/// without looking at `rules`.
pub fn score_strength(password: &SecretString, rules: &RuleSet) -> StrengthResult {
    let pwd = password.expose_secret();
    if pwd.is_empty() {
        return StrengthResult::none();
    }

    let len = pwd.chars().count();
    let classes = CharClasses::of(pwd);

    let mut raw = rules.passed_count() as f64;

    // Length bonus: +1 at 12, another +1 at 16
    if len >= 12 {
        raw += 1.0;
    }
    if len >= 16 {
        raw += 1.0;
    }

    if classes.local_script {
        raw += 0.5;
    }

    // Entropy bonus: 4 of 5 classes and more than 10 chars
    if classes.count() >= 4 && len > 10 {
        raw += 0.5;
    }

    let score = ((raw * 10.0).round() / 10.0).min(MAX_SCORE);
    StrengthResult::from_score(score)
}

/// Debounced evaluation that sends the report via channel.
///
/// Nothing is sent when `token` is cancelled before the debounce elapses,
/// which is how a newer keystroke supersedes this one.
#[cfg(feature = "async")]
pub async fn evaluate_password_tx(
    password: &SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<PasswordReport>,
) {
    tokio::time::sleep(EVALUATION_DEBOUNCE).await;

    if token.is_cancelled() {
        #[cfg(feature = "tracing")]
        tracing::debug!("Password evaluation superseded before it ran");
        return;
    }

    let report = evaluate_password(password);

    if let Err(_e) = tx.send(report).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password evaluation result: {}", _e);
    }
}
