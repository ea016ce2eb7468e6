//! Character variety section - lowercase, uppercase, digits, specials and
//! local-script (Hangul) characters.

/// Characters accepted by the `special` rule.
pub const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

pub fn is_special(c: char) -> bool {
    SPECIAL_CHARS.contains(c)
}

/// Hangul syllables block.
pub fn is_local_script(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

/// Which character classes a password draws from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharClasses {
    pub lower: bool,
    pub upper: bool,
    pub digit: bool,
    pub special: bool,
    pub local_script: bool,
}

impl CharClasses {
    pub fn of(password: &str) -> Self {
        password.chars().fold(Self::default(), |mut classes, c| {
            classes.lower |= c.is_ascii_lowercase();
            classes.upper |= c.is_ascii_uppercase();
            classes.digit |= c.is_ascii_digit();
            classes.special |= is_special(c);
            classes.local_script |= is_local_script(c);
            classes
        })
    }

    /// Number of classes present, out of five.
    pub fn count(&self) -> usize {
        [
            self.lower,
            self.upper,
            self.digit,
            self.special,
            self.local_script,
        ]
        .iter()
        .filter(|&&b| b)
        .count()
    }
}
