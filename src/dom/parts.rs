//! PartSet: ordered style-hook tags exposed to host styling.

use std::fmt;

/// An ordered, duplicate-free set of style-hook tags (CSS `::part` names).
///
/// Insertion order is preserved so the serialized `part` attribute is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartSet {
    tags: Vec<String>,
}

impl PartSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `tag` is present.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Add a tag. Returns `false` if it was already present.
    pub fn insert(&mut self, tag: &str) -> bool {
        if self.contains(tag) {
            return false;
        }
        self.tags.push(tag.to_owned());
        true
    }

    /// Remove a tag. Returns `false` if it was not present.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Toggle a tag, or force it on/off with `force`.
    ///
    /// Returns whether the tag is present afterwards.
    pub fn toggle(&mut self, tag: &str, force: Option<bool>) -> bool {
        let present = force.unwrap_or(!self.contains(tag));
        if present {
            self.insert(tag);
        } else {
            self.remove(tag);
        }
        present
    }

    /// Iterate over tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether there are no tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for PartSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for tag in iter {
            set.insert(tag.as_ref());
        }
        set
    }
}

impl fmt::Display for PartSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tags.join(" "))
    }
}
