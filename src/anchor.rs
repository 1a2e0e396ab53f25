//! Heading anchor generation.
//!
//! Turns heading text into URL-fragment-safe identifiers and keeps them
//! unique within one document.

use std::collections::HashSet;

/// Identifier used when a heading has no letters or digits at all.
const FALLBACK_ID: &str = "section";

/// Converts arbitrary text into an anchor name.
///
/// Letters and digits are kept (lower-cased); every run of anything else
/// becomes a single `-`. Leading and trailing separators are dropped.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Hands out unique heading identifiers for a single document.
#[derive(Debug, Default)]
pub struct AnchorSet {
    used: HashSet<String>,
}

impl AnchorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks an explicit `{#id}` as taken so generated ids avoid it.
    pub fn reserve(&mut self, id: &str) {
        self.used.insert(id.to_string());
    }

    /// Returns a fresh identifier derived from `text`.
    ///
    /// Collisions get `-1`, `-2`, … appended.
    pub fn unique(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base = FALLBACK_ID.to_string();
        }

        if self.used.insert(base.clone()) {
            return base;
        }

        let mut n = 1usize;
        loop {
            let candidate = format!("{base}-{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
#[path = "anchor_tests.rs"]
mod tests;
