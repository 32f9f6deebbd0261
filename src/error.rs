//! Crate-level error type.
//!
//! Navigation itself never fails: an absent header or section is skipped. The errors here cover
//! loading a page from disk and the few collaborators that touch the filesystem.

use crate::theme::PreferencesError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced while loading or presenting a portfolio page.
#[derive(Debug, Error)]
pub enum FolioError {
    /// Reading the document or driving the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The tree-sitter grammar could not be loaded into the parser.
    #[error("failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    /// The heading query did not compile against the grammar.
    #[error("invalid heading query: {0}")]
    Query(#[from] tree_sitter::QueryError),
    /// The parser gave up on the document.
    #[error("could not parse {}", .0.display())]
    Parse(PathBuf),
    /// The document has no headings at the configured section level.
    #[error("no level-{level} sections found in {}", path.display())]
    NoSections {
        /// Document that was parsed.
        path: PathBuf,
        /// Heading level that marks a page section.
        level: usize,
    },
    /// The log subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
    /// The theme preference store could not be read or written.
    #[error(transparent)]
    Preferences(#[from] PreferencesError),
}
