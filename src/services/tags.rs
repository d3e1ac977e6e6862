//! Tag name normalization.
//!
//! Tags may be authored with or without a leading `#`. Both spellings denote the
//! same tag, so a [`TagSet`] stores each name in both forms and lookups succeed
//! whichever spelling the caller uses.

use std::collections::HashSet;

/// Optional marker character some tag names carry
pub const TAG_MARKER: char = '#';

/// Strips a single leading marker, if present
pub fn strip_marker(name: &str) -> &str {
    name.strip_prefix(TAG_MARKER).unwrap_or(name)
}

/// Normalized, comparable set of tag names for one catalog item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    names: HashSet<String>,
}

impl TagSet {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();

        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }

            let bare = strip_marker(name).trim();
            if !bare.is_empty() {
                set.insert(bare.to_string());
            }
            set.insert(name.to_string());
        }

        Self { names: set }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn contains_any(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.contains(name))
    }

    /// Case-insensitive substring match against any tag name
    pub fn any_contains(&self, fragment: &str) -> bool {
        let fragment = fragment.to_lowercase();
        self.names
            .iter()
            .any(|name| name.to_lowercase().contains(&fragment))
    }
}
