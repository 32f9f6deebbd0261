//! The portfolio page: a title, a hero block and the navigable sections.
//!
//! Only headings at the configured section level become page sections with navigation links.
//! Every other heading stays inside the body of the page section it follows; the first level-1
//! heading before any section names the page.

use crate::error::FolioError;
use crate::formats::Format;
use crate::input;
use crate::section::SectionId;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static IMAGE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*!\[([^\]]*)\]\(([^)\s]+)\)\s*$").expect("image regex should compile")
});

#[derive(Clone, Debug, PartialEq, Eq)]
/// An image placed on its own line, loaded lazily once scrolled into view.
pub struct ImageRef {
    /// Alternative text shown while the image is pending.
    pub alt: String,
    /// Deferred source, the `data-src` of the image.
    pub data_src: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One line of body content.
pub enum Block {
    /// Markdown text, wrapped to the viewport width at layout time.
    Text(String),
    /// A standalone image line.
    Image(ImageRef),
}

#[derive(Clone, Debug)]
/// A navigable region of the page with its own link in the header.
pub struct PageSection {
    /// Anchor the navigation link targets.
    pub id: SectionId,
    /// Heading text, also used as the link label.
    pub title: String,
    /// Body content between this heading and the next page section.
    pub blocks: Vec<Block>,
}

#[derive(Clone, Debug)]
/// A parsed portfolio page.
pub struct Page {
    /// Page title from the first level-1 heading, or the file stem.
    pub title: String,
    /// Content before the first page section.
    pub hero: Vec<Block>,
    /// Page sections in document order.
    pub sections: Vec<PageSection>,
}

impl Page {
    /// Loads and splits the page at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or has no page sections.
    pub fn load(path: &Path, format: &impl Format, section_level: usize) -> Result<Self, FolioError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_source(&source, path, format, section_level)
    }

    /// Splits `source` into title, hero and sections.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or no heading sits at `section_level`.
    pub fn from_source(
        source: &str,
        path: &Path,
        format: &impl Format,
        section_level: usize,
    ) -> Result<Self, FolioError> {
        let headings = input::parse_sections(source, path, format)?;
        let lines: Vec<&str> = source.lines().collect();

        let page_sections: Vec<_> = headings
            .iter()
            .filter(|s| s.level == section_level)
            .collect();
        let Some(first) = page_sections.first() else {
            return Err(FolioError::NoSections {
                path: path.to_path_buf(),
                level: section_level,
            });
        };

        let title_heading = headings
            .iter()
            .find(|s| s.level == 1 && s.level < section_level && s.line_start < first.line_start);
        let title = title_heading.map_or_else(
            || {
                path.file_stem()
                    .map_or_else(String::new, |stem| stem.to_string_lossy().to_string())
            },
            |s| s.title.clone(),
        );

        let hero_start = title_heading.map_or(0, |s| s.line_start + 1);
        let hero = blocks_from_lines(lines.get(hero_start..first.line_start).unwrap_or(&[]));

        // A page section runs to the next page section, so shallower headings that follow it
        // (a closing `# Appendix`, say) stay in its body rather than falling between sections.
        let sections = page_sections
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let end = page_sections
                    .get(i + 1)
                    .map_or(lines.len(), |next| next.line_start)
                    .min(lines.len());
                PageSection {
                    id: s.id.clone(),
                    title: s.title.clone(),
                    blocks: blocks_from_lines(lines.get(s.line_start + 1..end).unwrap_or(&[])),
                }
            })
            .collect();

        Ok(Self {
            title,
            hero,
            sections,
        })
    }

    /// Every image on the page, hero first, with the index of its owning section.
    pub fn images(&self) -> impl Iterator<Item = (Option<usize>, &ImageRef)> {
        let hero = self.hero.iter().filter_map(image_of).map(|img| (None, img));
        let sections = self.sections.iter().enumerate().flat_map(|(i, section)| {
            section
                .blocks
                .iter()
                .filter_map(image_of)
                .map(move |img| (Some(i), img))
        });
        hero.chain(sections)
    }
}

fn image_of(block: &Block) -> Option<&ImageRef> {
    match block {
        Block::Image(image) => Some(image),
        Block::Text(_) => None,
    }
}

/// Trims blank lines from both ends and classifies image-only lines.
fn blocks_from_lines(lines: &[&str]) -> Vec<Block> {
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    let (Some(start), Some(end)) = (start, end) else {
        return Vec::new();
    };
    lines[start..=end]
        .iter()
        .map(|line| match IMAGE_LINE.captures(line) {
            Some(caps) => Block::Image(ImageRef {
                alt: caps[1].to_string(),
                data_src: caps[2].to_string(),
            }),
            None => Block::Text((*line).to_string()),
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/page.rs"]
mod tests;
