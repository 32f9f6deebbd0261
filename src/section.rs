//! Section representation for tree-sitter parsed documents.
//!
//! A section is a heading plus the body that follows it, up to the next heading of the same or
//! shallower level. Every section carries an anchor id derived from its title, which is what
//! navigation links point at.

use std::collections::HashMap;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Anchor identifier of a page section, unique within a page.
pub struct SectionId(String);

impl SectionId {
    #[must_use]
    /// Wraps an already-unique anchor.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    /// The anchor text without a leading `#`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    /// The fragment form used by link targets, e.g. `#about`.
    pub fn href(&self) -> String {
        format!("#{}", self.0)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Clone, Debug)]
/// Hierarchical document division with precise coordinates for extraction.
pub struct Section {
    /// Unique anchor derived from the title.
    pub id: SectionId,
    /// Section heading text without markup symbols.
    pub title: String,
    /// Nesting depth in the document hierarchy (1 for top-level).
    pub level: usize,
    /// Line holding the heading.
    pub line_start: usize,
    /// Line where the next section of the same or shallower level begins, or file end.
    pub line_end: usize,
    /// Byte offset where section content begins (after the heading).
    pub byte_start: usize,
    /// Byte offset where section content ends.
    pub byte_end: usize,
    /// Source file containing this section.
    pub file_path: String,
}

#[must_use]
/// Lowercases a heading and keeps alphanumerics, joining words with single hyphens.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_hyphen = true;
        }
    }
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    }
}

#[derive(Default)]
/// Hands out unique anchors, suffixing repeats with `-1`, `-2`, ...
pub struct AnchorSet {
    seen: HashMap<String, usize>,
}

impl AnchorSet {
    /// Returns a unique id for `title` within this set.
    pub fn assign(&mut self, title: &str) -> SectionId {
        let base = slugify(title);
        let count = self.seen.entry(base.clone()).or_insert(0);
        let id = if *count == 0 {
            base
        } else {
            format!("{base}-{count}")
        };
        *count += 1;
        SectionId(id)
    }
}
