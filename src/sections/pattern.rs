//! Pattern analysis section - detects keyboard/alphabet walks and
//! repeated characters or blocks.

use super::SectionResult;
use crate::types::Weakness;

/// Sequences walked forwards or backwards.
const SEQUENCES: [&str; 3] = [
    "abcdefghijklmnopqrstuvwxyz",
    "0123456789",
    "qwertyuiopasdfghjklzxcvbnm",
];

const SEQUENCE_WINDOW: usize = 4;

/// Flags any 4-character window of [`SEQUENCES`], in either direction,
/// found case-insensitively in the password.
pub fn sequential_section(password: &str) -> SectionResult {
    let lowered = password.to_lowercase();

    for sequence in SEQUENCES {
        let chars: Vec<char> = sequence.chars().collect();
        for window in chars.windows(SEQUENCE_WINDOW) {
            let forward: String = window.iter().collect();
            let reverse: String = window.iter().rev().collect();
            if lowered.contains(&forward) || lowered.contains(&reverse) {
                return Some(Weakness::Sequential);
            }
        }
    }

    None
}

/// Flags three identical characters in a row, or a password that opens
/// with the same block repeated (e.g. `abcabc`, `123123`).
pub fn repeating_section(password: &str) -> SectionResult {
    let chars: Vec<char> = password.chars().collect();

    if chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2]) {
        return Some(Weakness::RepeatedChars);
    }

    let n = chars.len();
    for block_len in 2..=n / 2 {
        let block = &chars[..block_len];
        let repeats = n / block_len;
        let covered = block_len * repeats;
        let opens_with_repeats = chars[..covered]
            .chunks(block_len)
            .all(|chunk| chunk == block);
        if opens_with_repeats && covered >= 4 {
            return Some(Weakness::RepeatedBlock);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_section_repetitive_chars() {
        assert_eq!(repeating_section("aaaaBBBB1111"), Some(Weakness::RepeatedChars));
        assert_eq!(repeating_section("aaabbbccc"), Some(Weakness::RepeatedChars));
    }

    #[test]
    fn test_pattern_section_repeated_block() {
        assert_eq!(repeating_section("abcabc"), Some(Weakness::RepeatedBlock));
        assert_eq!(repeating_section("123123"), Some(Weakness::RepeatedBlock));
        // "ab" x2 covers the first four of five characters
        assert_eq!(repeating_section("ababz"), Some(Weakness::RepeatedBlock));
    }

    #[test]
    fn test_pattern_section_block_must_lead() {
        assert_eq!(repeating_section("xabcabc"), None);
        assert_eq!(repeating_section("123123xyz"), None);
    }

    #[test]
    fn test_pattern_section_sequential_numbers() {
        assert_eq!(sequential_section("test1234"), Some(Weakness::Sequential));
    }

    #[test]
    fn test_pattern_section_sequential_letters_any_case() {
        assert_eq!(sequential_section("ABCDTest"), Some(Weakness::Sequential));
    }

    #[test]
    fn test_pattern_section_reverse_and_keyboard() {
        assert_eq!(sequential_section("x9876y"), Some(Weakness::Sequential));
        assert_eq!(sequential_section("myQwErpass"), Some(Weakness::Sequential));
        assert_eq!(sequential_section("lkjh!"), Some(Weakness::Sequential));
    }

    #[test]
    fn test_pattern_section_three_in_a_row_is_not_a_walk() {
        assert_eq!(sequential_section("abc-123"), None);
    }

    #[test]
    fn test_pattern_section_strong_password() {
        let pwd = "Tr0ub4dor&3!xQ";
        assert_eq!(sequential_section(pwd), None);
        assert_eq!(repeating_section(pwd), None);
    }

    #[test]
    fn test_pattern_section_too_short() {
        assert_eq!(repeating_section("ab"), None);
        assert_eq!(sequential_section("ab"), None);
    }
}
