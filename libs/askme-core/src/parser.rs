//! Tag marker parsing for item content files.
//!
//! # Format
//! ```markdown
//! # What does `Vec::drain` return?
//! Tags: rust, collections
//!
//! An iterator over the removed range.
//! ```
//!
//! Only lines starting with the exact marker `Tags: ` are read. The rest of
//! the file is opaque to the scheduler.

use std::collections::BTreeSet;

/// Line prefix that declares an item's tags.
pub const TAGS_MARKER: &str = "Tags: ";

/// Collect the tags declared in item content.
///
/// Every marker line contributes; repeated lines accumulate rather than
/// replace each other.
pub fn parse_tags(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .filter_map(|line| line.strip_prefix(TAGS_MARKER))
        .flat_map(|list| list.split(','))
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}
