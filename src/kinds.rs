//! The block kind registry and the per-event attribute bag.
//!
//! Every recognition rule and every tag mapping resolves to exactly one
//! [`BlockKind`], which is what the dispatch tables key on. `Invalid` exists
//! so rules can explicitly drop a match; it is never handed to a writer.

use serde::{Deserialize, Serialize};

/// Identifies which semantic construct a piece of content represents.
///
/// The four toggle variants let directive lines (e.g. `:hide-uri-scheme:`)
/// travel through the same rule table as renderable constructs; writers
/// route them to their toggle operations rather than a render capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Invalid,

    // inline spans
    Bold,
    Italic,
    Monospace,
    Superscript,
    Subscript,
    Underline,
    StrikeThrough,
    Small,
    Overline,
    Link,
    LineBreak,

    // blocks
    Section,
    Image,
    Literal,
    LiteralBlock,
    CodeBlock,
    Listing,
    ListingBlock,
    Admonition,
    Table,
    TableCell,
    Include,
    Callout,

    // rendering toggles
    HideUriScheme,
    ShowUriScheme,
    HideSectionNumbers,
    ShowSectionNumbers,
}

/// Open attribute bag attached to a single conversion event.
///
/// Keys keep their insertion order, which the image capability relies on when
/// forwarding unrecognized attributes. Every event gets its own `Flags`
/// value; nothing is shared between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags(Vec<(String, String)>);

impl Flags {
    pub fn new() -> Self {
        Flags(Vec::new())
    }

    /// Inserts a key, replacing the value in place if the key is present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes a key, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(index).1)
    }

    /// Key/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Flags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut flags = Flags::new();
        for (k, v) in iter {
            flags.insert(k, v);
        }
        flags
    }
}
