//! Personal information section - dates, years and long digit runs.

use once_cell::sync::Lazy;
use regex::Regex;

use super::SectionResult;
use crate::types::Weakness;

// ASCII classes on purpose: `\d` is Unicode-aware in the regex crate.
static BIRTH_DATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]{4}(0[1-9]|1[012])(0[1-9]|[12][0-9]|3[01])").unwrap()
});
static DIGIT_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{6}").unwrap());
static YEAR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(19|20)[0-9]{2}").unwrap());

pub fn personal_info_section(password: &str) -> SectionResult {
    let patterns: [&Regex; 3] = [&BIRTH_DATE_REGEX, &DIGIT_RUN_REGEX, &YEAR_REGEX];
    patterns
        .iter()
        .any(|re| re.is_match(password))
        .then_some(Weakness::PersonalInfo)
}
