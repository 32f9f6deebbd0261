//! Page geometry: where every section sits, measured in layout units.
//!
//! The page is laid out as a column of terminal rows. One row is `row_height` units tall, so the
//! navigation constants (activation pre-roll, scroll-to-top threshold) read the same as they would
//! in pixels on a web page. The fixed header overlays the top of the viewport, and the document
//! starts with a padding block of the header's height so nothing begins hidden beneath it.

use crate::config::Config;
use crate::page::{Block, Page};
use crate::section::SectionId;

/// Rows occupied by the fixed header (bordered bar with one line of links).
pub const HEADER_ROWS: u16 = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Live geometry of one page section.
pub struct SectionGeometry {
    /// Section the geometry belongs to.
    pub id: SectionId,
    /// Document offset of the section's first row.
    pub top: u32,
    /// Height of the section, up to the next section's top.
    pub extent: u32,
}

/// Geometry provider consulted by navigation on every pass.
pub trait LayoutSurface {
    /// Height of the fixed header, or `None` when the surface has no header.
    fn header_height(&self) -> Option<u32>;
    /// All sections in document order.
    fn sections(&self) -> Vec<SectionGeometry>;
    /// Geometry of a single section, if present.
    fn section(&self, id: &SectionId) -> Option<SectionGeometry> {
        self.sections().into_iter().find(|s| &s.id == id)
    }
    /// Total document height.
    fn document_height(&self) -> u32;
    /// Height of the visible viewport.
    fn viewport_height(&self) -> u32;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What a laid-out row displays, used for styling and reveal tracking.
pub enum RowKind {
    /// Blank space reserved beneath the fixed header.
    HeaderPadding,
    /// Hero content before the first section.
    Hero,
    /// A section heading.
    Heading,
    /// Wrapped body text.
    Body,
    /// An image placeholder; the index is the page-wide image index.
    Image(usize),
    /// Spacing between blocks.
    Gap,
}

#[derive(Clone, Debug)]
/// One rendered row of the page.
pub struct Row {
    /// Text to draw.
    pub text: String,
    /// Row classification.
    pub kind: RowKind,
    /// Index of the owning page section, `None` for hero and padding.
    pub section: Option<usize>,
}

#[derive(Clone, Copy, Debug)]
/// Knobs that shape the layout, taken from the configuration.
pub struct LayoutOptions {
    /// Units per terminal row.
    pub row_height: u32,
    /// Whether a fixed header is shown.
    pub show_header: bool,
    /// Upper bound on the text column width.
    pub wrap_width: usize,
}

impl From<&Config> for LayoutOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            row_height: cfg.row_height.max(1),
            show_header: cfg.show_header,
            wrap_width: cfg.wrap_width.max(1),
        }
    }
}

#[derive(Clone, Debug)]
/// Row-based layout of a page for a given viewport size.
pub struct PageLayout {
    rows: Vec<Row>,
    section_spans: Vec<(SectionId, usize, usize)>,
    hero_span: (usize, usize),
    options: LayoutOptions,
    viewport_rows: u16,
}

impl PageLayout {
    #[must_use]
    /// Lays out `page` for a viewport `width` columns wide and `height` rows tall.
    pub fn new(page: &Page, width: u16, height: u16, options: LayoutOptions) -> Self {
        let text_width = usize::from(width).clamp(1, options.wrap_width);
        let mut rows = Vec::new();
        let mut image_index = 0;

        if options.show_header {
            for _ in 0..HEADER_ROWS {
                rows.push(row(String::new(), RowKind::HeaderPadding, None));
            }
        }

        let hero_start = rows.len();
        push_blocks(&mut rows, &page.hero, text_width, None, RowKind::Hero, &mut image_index);
        if rows.len() > hero_start {
            rows.push(row(String::new(), RowKind::Gap, None));
        }
        let hero_span = (hero_start, rows.len() - hero_start);

        let mut section_spans = Vec::with_capacity(page.sections.len());
        for (i, section) in page.sections.iter().enumerate() {
            let start = rows.len();
            rows.push(row(section.title.clone(), RowKind::Heading, Some(i)));
            rows.push(row(String::new(), RowKind::Gap, Some(i)));
            push_blocks(
                &mut rows,
                &section.blocks,
                text_width,
                Some(i),
                RowKind::Body,
                &mut image_index,
            );
            rows.push(row(String::new(), RowKind::Gap, Some(i)));
            section_spans.push((section.id.clone(), start, rows.len() - start));
        }

        Self {
            rows,
            section_spans,
            hero_span,
            options,
            viewport_rows: height.max(1),
        }
    }

    #[must_use]
    /// All laid-out rows, top to bottom.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    /// Units per row.
    pub fn row_height(&self) -> u32 {
        self.options.row_height
    }

    #[must_use]
    /// Row index containing the document offset.
    pub fn row_at(&self, offset: u32) -> usize {
        (offset / self.options.row_height) as usize
    }

    #[must_use]
    /// Visible viewport height in rows.
    pub fn viewport_rows(&self) -> u16 {
        self.viewport_rows
    }

    #[must_use]
    /// Document offset and height of the hero block.
    pub fn hero_geometry(&self) -> (u32, u32) {
        (self.units(self.hero_span.0), self.units(self.hero_span.1))
    }

    #[must_use]
    /// Document offset of the row holding image `index`, if laid out.
    pub fn image_top(&self, index: usize) -> Option<u32> {
        self.rows
            .iter()
            .position(|r| r.kind == RowKind::Image(index))
            .map(|pos| self.units(pos))
    }

    fn units(&self, rows: usize) -> u32 {
        u32::try_from(rows)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.options.row_height)
    }
}

impl LayoutSurface for PageLayout {
    fn header_height(&self) -> Option<u32> {
        self.options
            .show_header
            .then(|| u32::from(HEADER_ROWS) * self.options.row_height)
    }

    fn sections(&self) -> Vec<SectionGeometry> {
        self.section_spans
            .iter()
            .map(|(id, start, len)| SectionGeometry {
                id: id.clone(),
                top: self.units(*start),
                extent: self.units(*len),
            })
            .collect()
    }

    fn document_height(&self) -> u32 {
        self.units(self.rows.len())
    }

    fn viewport_height(&self) -> u32 {
        u32::from(self.viewport_rows) * self.options.row_height
    }
}

fn row(text: String, kind: RowKind, section: Option<usize>) -> Row {
    Row {
        text,
        kind,
        section,
    }
}

fn push_blocks(
    rows: &mut Vec<Row>,
    blocks: &[Block],
    width: usize,
    section: Option<usize>,
    text_kind: RowKind,
    image_index: &mut usize,
) {
    for block in blocks {
        match block {
            Block::Text(text) if text.trim().is_empty() => {
                rows.push(row(String::new(), RowKind::Gap, section));
            }
            Block::Text(text) => {
                for line in textwrap::wrap(text, width) {
                    rows.push(row(line.into_owned(), text_kind, section));
                }
            }
            Block::Image(image) => {
                rows.push(row(image.alt.clone(), RowKind::Image(*image_index), section));
                *image_index += 1;
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/layout.rs"]
mod tests;
