//! Password evaluation sections
//!
//! Each section inspects one aspect of a password. Rule sections answer a
//! yes/no question; weakness sections report why a password counts as common.

mod denylist;
mod length;
mod pattern;
mod personal;
mod variety;

pub use denylist::deny_list_section;
pub use length::{length_rule, too_short_section};
pub use pattern::{repeating_section, sequential_section};
pub use personal::personal_info_section;
pub use variety::CharClasses;

use crate::types::Weakness;

/// Result type for weakness sections.
/// - `Some(weakness)` - Section found a weak pattern
/// - `None` - Section passed
pub type SectionResult = Option<Weakness>;
