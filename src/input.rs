//! Locating documents on disk and splitting them into sections.
//!
//! Headings are found with the format's tree-sitter query. A heading's section runs until the next
//! heading of the same or shallower level, so nested headings sit inside their parent's range.

use crate::error::FolioError;
use crate::formats::Format;
use crate::section::{AnchorSet, Section};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// Expands the given paths into the documents to load.
///
/// Files are kept as given. Directories contribute their direct children whose extension is one of
/// `extensions`, in name order.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = fs::read_dir(&path)?
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|p| p.is_file() && has_extension(p, extensions))
                .collect();
            found.sort();
            documents.extend(found);
        } else if path.is_file() {
            documents.push(path);
        }
    }
    Ok(documents)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
}

/// Reads `path` and returns every heading section in document order.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn extract_sections(path: &Path, format: &impl Format) -> Result<Vec<Section>, FolioError> {
    let source = fs::read_to_string(path)?;
    parse_sections(&source, path, format)
}

struct Heading {
    title: String,
    level: usize,
    row: usize,
    start_byte: usize,
    end_byte: usize,
}

/// Splits already-loaded `source` into heading sections.
///
/// # Errors
///
/// Returns an error if the grammar or query cannot be loaded, or the parser fails.
pub fn parse_sections(
    source: &str,
    path: &Path,
    format: &impl Format,
) -> Result<Vec<Section>, FolioError> {
    let language = format.language();
    let mut parser = Parser::new();
    parser.set_language(&language)?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| FolioError::Parse(path.to_path_buf()))?;
    let query = Query::new(&language, format.section_query())?;

    let bytes = source.as_bytes();
    let mut headings = Vec::new();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), bytes);
    while let Some(found) = matches.next() {
        for capture in found.captures {
            if let Some(heading) = read_heading(capture.node, bytes, format) {
                headings.push(heading);
            }
        }
    }
    headings.sort_by_key(|h| h.start_byte);

    let total_lines = source.lines().count();
    let file_path = path.to_string_lossy().to_string();
    let mut anchors = AnchorSet::default();

    let sections = headings
        .iter()
        .enumerate()
        .map(|(i, heading)| {
            let next = headings[i + 1..].iter().find(|h| h.level <= heading.level);
            Section {
                id: anchors.assign(&heading.title),
                title: heading.title.clone(),
                level: heading.level,
                line_start: heading.row,
                line_end: next.map_or(total_lines, |h| h.row),
                byte_start: heading.end_byte.min(source.len()),
                byte_end: next.map_or(source.len(), |h| h.start_byte),
                file_path: file_path.clone(),
            }
        })
        .collect();

    Ok(sections)
}

fn read_heading(node: Node<'_>, bytes: &[u8], format: &impl Format) -> Option<Heading> {
    let mut level = None;
    let mut title = String::new();
    let mut walker = node.walk();
    for child in node.children(&mut walker) {
        if let Some(found) = format.marker_level(child.kind()) {
            level = Some(found);
        } else if child.kind() == format.title_kind() {
            title = child.utf8_text(bytes).ok()?.trim().to_string();
        }
    }
    Some(Heading {
        title,
        level: level?,
        row: node.start_position().row,
        start_byte: node.start_byte(),
        end_byte: node.end_byte(),
    })
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
