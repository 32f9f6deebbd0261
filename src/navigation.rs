//! Scroll-driven active-link tracking and programmatic navigation.
//!
//! The section "in view" is a pure function of the scroll offset and the live section geometry:
//! each section owns an *active band* that starts a fixed pre-roll before its top reaches the
//! header, and the offset picks the band it falls into. The resulting [`NavigationState`] is
//! passed into and returned from every operation, and [`NavLinks`] applies it to the links.
//!
//! ```text
//!   top - header - preroll                top - header - preroll + extent
//!   |<------------------- active band ------------------->|
//! ```
//!
//! An absent header or section never fails an operation: the state comes back unchanged.

use crate::layout::{LayoutSurface, SectionGeometry};
use crate::page::Page;
use crate::scroll::SmoothScroll;
use crate::section::SectionId;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Units before a section's top reaches the header at which its link lights up.
pub const ACTIVATION_PREROLL: u32 = 100;

/// Scroll offset beyond which the scroll-to-top control is shown.
pub const SCROLL_TOP_THRESHOLD: u32 = 300;

#[derive(Debug, Error, PartialEq, Eq)]
/// Layout problems that make classification ambiguous.
pub enum NavigationError {
    /// A section's band starts before the previous one ends.
    #[error("active band of `{later}` overlaps the band of `{earlier}`")]
    OverlappingBands {
        /// Section appearing first in the document.
        earlier: SectionId,
        /// Section whose band starts too early.
        later: SectionId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Half-open interval of scroll offsets during which a section counts as current.
pub struct ActiveBand {
    /// First offset inside the band.
    pub start: i64,
    /// First offset past the band.
    pub end: i64,
}

impl ActiveBand {
    #[must_use]
    /// Whether `offset` falls inside the band.
    pub fn contains(&self, offset: u32) -> bool {
        let offset = i64::from(offset);
        offset >= self.start && offset < self.end
    }
}

#[must_use]
/// Band for `section` given the header height and activation pre-roll.
pub fn active_band(section: &SectionGeometry, header_offset: u32, preroll: u32) -> ActiveBand {
    let start = i64::from(section.top) - i64::from(header_offset) - i64::from(preroll);
    ActiveBand {
        start,
        end: start + i64::from(section.extent),
    }
}

#[must_use]
/// The section whose band contains `offset`; the last match in document order wins.
pub fn classify(
    offset: u32,
    sections: &[SectionGeometry],
    header_offset: u32,
    preroll: u32,
) -> Option<SectionId> {
    sections
        .iter()
        .rev()
        .find(|s| active_band(s, header_offset, preroll).contains(offset))
        .map(|s| s.id.clone())
}

/// Checks that bands are non-overlapping and increase down the page.
///
/// # Errors
///
/// Returns the first pair of sections whose bands overlap.
pub fn check_bands(
    sections: &[SectionGeometry],
    header_offset: u32,
    preroll: u32,
) -> Result<(), NavigationError> {
    for pair in sections.windows(2) {
        let earlier = active_band(&pair[0], header_offset, preroll);
        let later = active_band(&pair[1], header_offset, preroll);
        if later.start < earlier.end {
            return Err(NavigationError::OverlappingBands {
                earlier: pair[0].id.clone(),
                later: pair[1].id.clone(),
            });
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Which section, if any, the navigation currently marks active.
pub struct NavigationState {
    /// Section whose link is active; `None` when scrolled outside every band.
    pub active_section_id: Option<SectionId>,
}

impl NavigationState {
    #[must_use]
    /// State with `id` active.
    pub fn active(id: SectionId) -> Self {
        Self {
            active_section_id: Some(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A header link pointing at one section.
pub struct NavLink {
    /// Section the link scrolls to.
    pub target: SectionId,
    /// Link text.
    pub label: String,
    /// Whether the link carries the active marker.
    pub active: bool,
}

#[derive(Debug, Clone, Default)]
/// Registry of navigation links in header order.
pub struct NavLinks {
    links: Vec<NavLink>,
}

impl NavLinks {
    #[must_use]
    /// One inactive link per page section.
    pub fn from_page(page: &Page) -> Self {
        Self {
            links: page
                .sections
                .iter()
                .map(|s| NavLink {
                    target: s.id.clone(),
                    label: s.title.clone(),
                    active: false,
                })
                .collect(),
        }
    }

    #[must_use]
    /// Registry over explicit links.
    pub fn new(links: Vec<NavLink>) -> Self {
        Self { links }
    }

    /// Marks exactly the link matching `state` active and clears the rest.
    pub fn apply(&mut self, state: &NavigationState) {
        for link in &mut self.links {
            link.active = state.active_section_id.as_ref() == Some(&link.target);
        }
    }

    #[must_use]
    /// The active link, if any.
    pub fn active(&self) -> Option<&NavLink> {
        self.links.iter().find(|l| l.active)
    }

    /// Links in header order.
    pub fn iter(&self) -> impl Iterator<Item = &NavLink> {
        self.links.iter()
    }

    #[must_use]
    /// Link at `index`.
    pub fn get(&self, index: usize) -> Option<&NavLink> {
        self.links.get(index)
    }

    #[must_use]
    /// Position of the link targeting `id`.
    pub fn position(&self, id: &SectionId) -> Option<usize> {
        self.links.iter().position(|l| &l.target == id)
    }

    #[must_use]
    /// Number of links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[must_use]
    /// Whether there are no links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// The "back to top" control; shown only once the page is scrolled far enough.
pub struct ScrollTopControl {
    /// Whether the control is displayed.
    pub visible: bool,
}

#[derive(Debug, Clone, Copy)]
/// Keeps the navigation in step with the scroll position and drives programmatic scrolls.
pub struct NavigationTracker {
    preroll: u32,
    scroll_top_threshold: u32,
}

impl Default for NavigationTracker {
    fn default() -> Self {
        Self::new(ACTIVATION_PREROLL, SCROLL_TOP_THRESHOLD)
    }
}

impl NavigationTracker {
    #[must_use]
    /// Tracker with explicit pre-roll and scroll-to-top threshold.
    pub fn new(preroll: u32, scroll_top_threshold: u32) -> Self {
        Self {
            preroll,
            scroll_top_threshold,
        }
    }

    #[must_use]
    /// Activation pre-roll in units.
    pub fn preroll(&self) -> u32 {
        self.preroll
    }

    #[must_use]
    /// Works out which section is current at `offset`.
    ///
    /// Without a header the previous state is returned untouched.
    pub fn classify_active_section(
        &self,
        state: NavigationState,
        offset: u32,
        surface: &impl LayoutSurface,
    ) -> NavigationState {
        let Some(header) = surface.header_height() else {
            debug!("no header on the surface, skipping classification");
            return state;
        };
        NavigationState {
            active_section_id: classify(offset, &surface.sections(), header, self.preroll),
        }
    }

    #[must_use]
    /// Smoothly scrolls so `target` sits just below the header, activating it immediately.
    ///
    /// A missing header or section leaves both the scroll position and `state` alone.
    pub fn scroll_to_section(
        &self,
        state: NavigationState,
        target: &SectionId,
        surface: &impl LayoutSurface,
        scroller: &mut impl SmoothScroll,
        now: Duration,
    ) -> NavigationState {
        let Some(header) = surface.header_height() else {
            debug!(%target, "no header on the surface, skipping scroll");
            return state;
        };
        let Some(section) = surface.section(target) else {
            debug!(%target, "section not found, skipping scroll");
            return state;
        };
        scroller.smooth_scroll_to(section.top.saturating_sub(header), now);
        NavigationState::active(section.id)
    }

    /// Smoothly scrolls back to the top of the page.
    pub fn scroll_to_top(&self, scroller: &mut impl SmoothScroll, now: Duration) {
        scroller.smooth_scroll_to(0, now);
    }

    #[must_use]
    /// Whether the scroll-to-top control should show at `offset`.
    pub fn scroll_to_top_visible(&self, offset: u32) -> bool {
        offset > self.scroll_top_threshold
    }

    /// Checks the surface's bands, see [`check_bands`]. A surface without a header passes.
    ///
    /// # Errors
    ///
    /// Returns the first overlapping pair.
    pub fn check_surface(&self, surface: &impl LayoutSurface) -> Result<(), NavigationError> {
        match surface.header_height() {
            Some(header) => check_bands(&surface.sections(), header, self.preroll),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "tests/navigation.rs"]
mod tests;
