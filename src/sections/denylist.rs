//! Deny-list section - exact matches and trivial variants of weak passwords.

use super::SectionResult;
use crate::denylist::DenyList;
use crate::types::Weakness;

/// Checks the password against `list`, case-insensitively.
///
/// # Returns
/// - `Some(DenyListed)` on an exact match
/// - `Some(DenyListVariant)` when an entry is embedded with little padding
/// - `None` otherwise
pub fn deny_list_section(password: &str, list: &DenyList) -> SectionResult {
    let lowered = password.to_lowercase();
    if list.contains_exact(&lowered) {
        return Some(Weakness::DenyListed);
    }
    if list.contains_variant(&lowered) {
        return Some(Weakness::DenyListVariant);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deny_list_section_common_password() {
        let list = DenyList::builtin();
        assert_eq!(deny_list_section("PassWord", &list), Some(Weakness::DenyListed));
    }

    #[test]
    fn test_deny_list_section_variant() {
        let list = DenyList::builtin();
        assert_eq!(deny_list_section("Sunshine99", &list), Some(Weakness::DenyListVariant));
    }

    #[test]
    fn test_deny_list_section_strong_password() {
        let list = DenyList::builtin();
        assert_eq!(deny_list_section("CorrectHorseBatteryStaple!", &list), None);
    }

    #[test]
    fn test_deny_list_section_long_padding_passes() {
        let list = DenyList::builtin();
        // embeds "sunshine" but is far longer than the slack allows
        assert_eq!(deny_list_section("Sunshine-on-the-Rhine", &list), None);
    }
}
