//! Deny-list of known weak passwords.
//!
//! The built-in list is always present. Deployments can extend it from a
//! newline-delimited file, see [`DenyList::from_path`].

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Passwords rejected outright, and as the base of trivial variants.
pub const BUILTIN_ENTRIES: [&str; 25] = [
    "password",
    "12345678",
    "qwerty123",
    "abc12345",
    "password123",
    "1q2w3e4r",
    "admin123",
    "welcome123",
    "letmein123",
    "monkey123",
    "dragon123",
    "111111",
    "123123",
    "sunshine",
    "master123",
    "shadow123",
    "ashley123",
    "football123",
    "jesus123",
    "michael123",
    "ninja123",
    "mustang123",
    "password1",
    "123456789",
    "princess123",
];

/// Extra characters tolerated around a deny-listed entry before the
/// password stops counting as a variant of it.
pub const VARIANT_SLACK: usize = 3;

#[derive(Error, Debug)]
pub enum DenyListError {
    #[error("Deny-list file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read deny-list file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Deny-list file is empty")]
    EmptyFile,
}

/// Lowercased set of weak passwords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenyList {
    entries: BTreeSet<String>,
}

impl Default for DenyList {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DenyList {
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_ENTRIES.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Built-in entries plus every non-blank line of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File does not exist
    /// - File cannot be read
    /// - File has no entries
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DenyListError> {
        let path = path.as_ref();

        if !path.exists() {
            #[cfg(feature = "tracing")]
            tracing::error!("Deny-list loading FAILED: file not found {:?}", path);
            return Err(DenyListError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;

        if content.trim().is_empty() {
            #[cfg(feature = "tracing")]
            tracing::error!("Deny-list loading FAILED: empty file {:?}", path);
            return Err(DenyListError::EmptyFile);
        }

        let mut list = Self::builtin();
        list.extend(content.lines());

        #[cfg(feature = "tracing")]
        tracing::info!("Deny-list loaded: {} entries from {:?}", list.len(), path);

        Ok(list)
    }

    /// Adds entries, trimmed and lowercased; blank entries are skipped.
    pub fn extend<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.entries.extend(
            entries
                .into_iter()
                .map(|e| e.as_ref().trim().to_lowercase())
                .filter(|e| !e.is_empty()),
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact, case-insensitive membership. `lowered` must already be lowercase.
    pub fn contains_exact(&self, lowered: &str) -> bool {
        self.entries.contains(lowered)
    }

    /// True when `lowered` embeds an entry and is at most
    /// [`VARIANT_SLACK`] characters longer than it.
    pub fn contains_variant(&self, lowered: &str) -> bool {
        let len = lowered.chars().count();
        self.entries
            .iter()
            .any(|entry| lowered.contains(entry.as_str()) && len <= entry.chars().count() + VARIANT_SLACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn setup_with_tempfile(passwords: &[&str]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        for pwd in passwords {
            writeln!(temp_file, "{}", pwd).expect("Failed to write");
        }
        temp_file
    }

    #[test]
    fn test_builtin_has_all_entries() {
        let list = DenyList::builtin();
        assert_eq!(list.len(), BUILTIN_ENTRIES.len());
        assert!(list.contains_exact("password"));
        assert!(list.contains_exact("princess123"));
        assert!(!list.contains_exact("PASSWORD"));
    }

    #[test]
    fn test_variant_slack() {
        let list = DenyList::builtin();
        // "sunshine" + 3
        assert!(list.contains_variant("sunshine!!!"));
        // "sunshine" + 4
        assert!(!list.contains_variant("sunshine!!!!"));
        assert!(list.contains_variant("xpassword"));
    }

    #[test]
    fn test_from_path_file_not_found() {
        let result = DenyList::from_path("/nonexistent/path/denylist.txt");
        assert!(matches!(result, Err(DenyListError::FileNotFound(_))));
    }

    #[test]
    fn test_from_path_empty_file() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        write!(temp_file, "  \n\n").expect("Failed to write empty content");

        let result = DenyList::from_path(temp_file.path());
        assert!(matches!(result, Err(DenyListError::EmptyFile)));
    }

    #[test]
    fn test_from_path_extends_builtin() {
        let temp_file = setup_with_tempfile(&["  Corporate2024 ", "", "hunter2"]);

        let list = DenyList::from_path(temp_file.path()).expect("should load");
        assert_eq!(list.len(), BUILTIN_ENTRIES.len() + 2);
        assert!(list.contains_exact("corporate2024"));
        assert!(list.contains_exact("hunter2"));
        assert!(list.contains_exact("password"));
    }

    #[test]
    fn test_duplicate_entries_collapse() {
        let mut list = DenyList::builtin();
        list.extend(["PASSWORD", "password"]);
        assert_eq!(list.len(), BUILTIN_ENTRIES.len());
    }
}
