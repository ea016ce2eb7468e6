//! Evaluation result types shared by the engine, the form controller and the
//! render projection.

use std::fmt;

/// A single boolean predicate over a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Length,
    Lowercase,
    Uppercase,
    Numbers,
    Special,
    NoCommon,
}

impl Rule {
    /// All rules in display order.
    pub const ALL: [Rule; 6] = [
        Rule::Length,
        Rule::Lowercase,
        Rule::Uppercase,
        Rule::Numbers,
        Rule::Special,
        Rule::NoCommon,
    ];

    /// Stable key used by the requirement list markup (`data-rule`).
    pub fn key(&self) -> &'static str {
        match self {
            Rule::Length => "length",
            Rule::Lowercase => "lowercase",
            Rule::Uppercase => "uppercase",
            Rule::Numbers => "numbers",
            Rule::Special => "special",
            Rule::NoCommon => "noCommon",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rule::Length => "At least 8 characters",
            Rule::Lowercase => "Lowercase letter",
            Rule::Uppercase => "Uppercase letter",
            Rule::Numbers => "Number",
            Rule::Special => "Special character (!@#$%^&*)",
            Rule::NoCommon => "Not a common password",
        }
    }
}

/// Pass/fail result for every [`Rule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleSet {
    pub length: bool,
    pub lowercase: bool,
    pub uppercase: bool,
    pub numbers: bool,
    pub special: bool,
    pub no_common: bool,
}

impl RuleSet {
    pub fn get(&self, rule: Rule) -> bool {
        match rule {
            Rule::Length => self.length,
            Rule::Lowercase => self.lowercase,
            Rule::Uppercase => self.uppercase,
            Rule::Numbers => self.numbers,
            Rule::Special => self.special,
            Rule::NoCommon => self.no_common,
        }
    }

    /// Iterates `(rule, passed)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Rule, bool)> + '_ {
        Rule::ALL.into_iter().map(move |rule| (rule, self.get(rule)))
    }

    pub fn passed_count(&self) -> usize {
        self.iter().filter(|(_, passed)| *passed).count()
    }

    pub fn all_passed(&self) -> bool {
        self.passed_count() == Rule::ALL.len()
    }
}

/// Strength bucket derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StrengthLevel {
    None,
    VeryWeak,
    Weak,
    Fair,
    Good,
    Excellent,
}

impl StrengthLevel {
    /// Step function over a score in `[0, 5]`.
    pub fn from_score(score: f64) -> Self {
        if score < 2.0 {
            StrengthLevel::VeryWeak
        } else if score < 3.0 {
            StrengthLevel::Weak
        } else if score < 4.0 {
            StrengthLevel::Fair
        } else if score < 5.0 {
            StrengthLevel::Good
        } else {
            StrengthLevel::Excellent
        }
    }

    /// CSS class suffix.
    pub fn as_str(&self) -> &'static str {
        match self {
            StrengthLevel::None => "none",
            StrengthLevel::VeryWeak => "very-weak",
            StrengthLevel::Weak => "weak",
            StrengthLevel::Fair => "fair",
            StrengthLevel::Good => "good",
            StrengthLevel::Excellent => "excellent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StrengthLevel::None => "Enter a password",
            StrengthLevel::VeryWeak => "Very weak",
            StrengthLevel::Weak => "Weak",
            StrengthLevel::Fair => "Fair",
            StrengthLevel::Good => "Good",
            StrengthLevel::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum score the registration form accepts ("fair" or better).
pub const ACCEPTABLE_SCORE: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthResult {
    /// Normalized score in `[0, 5]`, one decimal place.
    pub score: f64,
    pub level: StrengthLevel,
    pub text: &'static str,
}

impl StrengthResult {
    pub fn none() -> Self {
        Self {
            score: 0.0,
            level: StrengthLevel::None,
            text: StrengthLevel::None.label(),
        }
    }

    pub fn from_score(score: f64) -> Self {
        let level = StrengthLevel::from_score(score);
        Self {
            score,
            level,
            text: level.label(),
        }
    }

    pub fn is_acceptable(&self) -> bool {
        self.score >= ACCEPTABLE_SCORE
    }
}

/// Reason a password is classified as common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weakness {
    TooShort,
    DenyListed,
    DenyListVariant,
    Sequential,
    RepeatedChars,
    RepeatedBlock,
    PersonalInfo,
}

impl fmt::Display for Weakness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Weakness::TooShort => "Password is too short",
            Weakness::DenyListed => "Password is a commonly used password",
            Weakness::DenyListVariant => "Password is a trivial variant of a common password",
            Weakness::Sequential => "Password contains sequential patterns",
            Weakness::RepeatedChars => "Password contains repetitive characters",
            Weakness::RepeatedBlock => "Password repeats the same block",
            Weakness::PersonalInfo => "Password looks like a date or year",
        };
        f.write_str(msg)
    }
}

/// Everything computed for one password on one input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PasswordReport {
    pub rules: RuleSet,
    pub strength: StrengthResult,
    pub weakness: Option<Weakness>,
}
