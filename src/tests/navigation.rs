use super::*;
use crate::layout::{LayoutSurface, SectionGeometry};
use crate::scroll::SmoothScroll;
use proptest::prelude::*;
use std::time::Duration;

const HEADER: u32 = 60;

struct FakeSurface {
    header: Option<u32>,
    sections: Vec<SectionGeometry>,
}

impl LayoutSurface for FakeSurface {
    fn header_height(&self) -> Option<u32> {
        self.header
    }

    fn sections(&self) -> Vec<SectionGeometry> {
        self.sections.clone()
    }

    fn document_height(&self) -> u32 {
        self.sections.last().map_or(0, |s| s.top + s.extent)
    }

    fn viewport_height(&self) -> u32 {
        400
    }
}

#[derive(Default)]
struct RecordingScroller {
    targets: Vec<u32>,
}

impl SmoothScroll for RecordingScroller {
    fn smooth_scroll_to(&mut self, target: u32, _now: Duration) {
        self.targets.push(target);
    }
}

fn geometry(id: &str, top: u32, extent: u32) -> SectionGeometry {
    SectionGeometry {
        id: SectionId::from(id),
        top,
        extent,
    }
}

/// Bands with header 60 and pre-roll 100:
/// about [240, 640), projects [640, 1240), contact [1240, 1540).
fn page_sections() -> Vec<SectionGeometry> {
    vec![
        geometry("about", 400, 400),
        geometry("projects", 800, 600),
        geometry("contact", 1400, 300),
    ]
}

fn surface() -> FakeSurface {
    FakeSurface {
        header: Some(HEADER),
        sections: page_sections(),
    }
}

fn links() -> NavLinks {
    NavLinks::new(
        ["about", "projects", "contact"]
            .iter()
            .map(|id| NavLink {
                target: SectionId::from(*id),
                label: (*id).to_string(),
                active: false,
            })
            .collect(),
    )
}

fn active_at(offset: u32) -> Option<String> {
    classify(offset, &page_sections(), HEADER, ACTIVATION_PREROLL).map(|id| id.to_string())
}

#[test]
fn test_band_subtracts_header_and_preroll() {
    let band = active_band(&geometry("about", 400, 400), HEADER, ACTIVATION_PREROLL);
    assert_eq!(band, ActiveBand { start: 240, end: 640 });
    assert!(band.contains(240));
    assert!(!band.contains(640));
}

#[test]
fn test_band_start_can_be_negative() {
    let band = active_band(&geometry("hero", 0, 300), HEADER, ACTIVATION_PREROLL);
    assert_eq!(band.start, -160);
    assert!(band.contains(0));
}

#[test]
fn test_nothing_active_above_first_band() {
    assert_eq!(active_at(0), None);
    assert_eq!(active_at(239), None);
}

#[test]
fn test_band_edges_are_half_open() {
    assert_eq!(active_at(240).as_deref(), Some("about"));
    assert_eq!(active_at(639).as_deref(), Some("about"));
    assert_eq!(active_at(640).as_deref(), Some("projects"));
    assert_eq!(active_at(1239).as_deref(), Some("projects"));
    assert_eq!(active_at(1240).as_deref(), Some("contact"));
    assert_eq!(active_at(1539).as_deref(), Some("contact"));
    assert_eq!(active_at(1540), None);
}

#[test]
fn test_overlapping_bands_prefer_later_section() {
    let sections = vec![geometry("a", 400, 500), geometry("b", 800, 300)];
    let current = classify(700, &sections, HEADER, ACTIVATION_PREROLL);
    assert_eq!(current, Some(SectionId::from("b")));
    assert_eq!(
        check_bands(&sections, HEADER, ACTIVATION_PREROLL),
        Err(NavigationError::OverlappingBands {
            earlier: SectionId::from("a"),
            later: SectionId::from("b"),
        })
    );
}

#[test]
fn test_contiguous_bands_pass_the_check() {
    assert_eq!(check_bands(&page_sections(), HEADER, ACTIVATION_PREROLL), Ok(()));
    assert_eq!(check_bands(&[], HEADER, ACTIVATION_PREROLL), Ok(()));
}

#[test]
fn test_classification_is_idempotent() {
    let tracker = NavigationTracker::default();
    let surface = surface();
    let once = tracker.classify_active_section(NavigationState::default(), 700, &surface);
    let twice = tracker.classify_active_section(once.clone(), 700, &surface);
    assert_eq!(once, twice);
    assert_eq!(once.active_section_id, Some(SectionId::from("projects")));
}

#[test]
fn test_classification_clears_state_outside_bands() {
    let tracker = NavigationTracker::default();
    let state = NavigationState::active(SectionId::from("contact"));
    let next = tracker.classify_active_section(state, 10, &surface());
    assert_eq!(next, NavigationState::default());
}

#[test]
fn test_scroll_top_threshold_is_exclusive() {
    let tracker = NavigationTracker::default();
    assert!(!tracker.scroll_to_top_visible(0));
    assert!(!tracker.scroll_to_top_visible(299));
    assert!(!tracker.scroll_to_top_visible(300));
    assert!(tracker.scroll_to_top_visible(301));
}

#[test]
fn test_scroll_to_section_activates_before_any_scroll_pass() {
    let tracker = NavigationTracker::default();
    let mut scroller = RecordingScroller::default();
    let mut links = links();

    let state = tracker.scroll_to_section(
        NavigationState::default(),
        &SectionId::from("projects"),
        &surface(),
        &mut scroller,
        Duration::ZERO,
    );
    links.apply(&state);

    assert_eq!(scroller.targets, vec![800 - HEADER]);
    assert_eq!(links.active().map(|l| l.label.as_str()), Some("projects"));
}

#[test]
fn test_scroll_to_section_target_saturates_at_zero() {
    let tracker = NavigationTracker::default();
    let mut scroller = RecordingScroller::default();
    let surface = FakeSurface {
        header: Some(HEADER),
        sections: vec![geometry("intro", 20, 200)],
    };
    let _ = tracker.scroll_to_section(
        NavigationState::default(),
        &SectionId::from("intro"),
        &surface,
        &mut scroller,
        Duration::ZERO,
    );
    assert_eq!(scroller.targets, vec![0]);
}

#[test]
fn test_missing_header_is_a_no_op() {
    let tracker = NavigationTracker::default();
    let mut scroller = RecordingScroller::default();
    let headless = FakeSurface {
        header: None,
        sections: page_sections(),
    };
    let state = NavigationState::active(SectionId::from("about"));

    let classified = tracker.classify_active_section(state.clone(), 700, &headless);
    let scrolled = tracker.scroll_to_section(
        state.clone(),
        &SectionId::from("contact"),
        &headless,
        &mut scroller,
        Duration::ZERO,
    );

    assert_eq!(classified, state);
    assert_eq!(scrolled, state);
    assert!(scroller.targets.is_empty());
    assert_eq!(tracker.check_surface(&headless), Ok(()));
}

#[test]
fn test_missing_section_is_a_no_op() {
    let tracker = NavigationTracker::default();
    let mut scroller = RecordingScroller::default();
    let state = tracker.scroll_to_section(
        NavigationState::default(),
        &SectionId::from("blog"),
        &surface(),
        &mut scroller,
        Duration::ZERO,
    );
    assert_eq!(state, NavigationState::default());
    assert!(scroller.targets.is_empty());
}

#[test]
fn test_scroll_to_top_targets_zero() {
    let mut scroller = RecordingScroller::default();
    NavigationTracker::default().scroll_to_top(&mut scroller, Duration::from_millis(5));
    assert_eq!(scroller.targets, vec![0]);
}

#[test]
fn test_apply_switches_the_single_active_link() {
    let mut links = links();
    links.apply(&NavigationState::active(SectionId::from("about")));
    links.apply(&NavigationState::active(SectionId::from("contact")));
    let active: Vec<_> = links.iter().filter(|l| l.active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].label, "contact");

    links.apply(&NavigationState::default());
    assert!(links.active().is_none());
}

#[test]
fn test_dense_sample_keeps_at_most_one_link_active() {
    let tracker = NavigationTracker::default();
    let surface = surface();
    let mut links = links();
    let mut state = NavigationState::default();
    for offset in (0..1700).step_by(7) {
        state = tracker.classify_active_section(state, offset, &surface);
        links.apply(&state);
        assert!(links.iter().filter(|l| l.active).count() <= 1);
    }
}

proptest! {
    #[test]
    fn prop_offset_inside_one_band_activates_only_that_link(offset in 0u32..2000) {
        let tracker = NavigationTracker::default();
        let surface = surface();
        let mut links = links();
        let state = tracker.classify_active_section(NavigationState::default(), offset, &surface);
        links.apply(&state);

        let containing: Vec<_> = page_sections()
            .into_iter()
            .filter(|s| active_band(s, HEADER, ACTIVATION_PREROLL).contains(offset))
            .collect();
        let active: Vec<_> = links.iter().filter(|l| l.active).collect();

        prop_assert!(active.len() <= 1);
        match containing.as_slice() {
            [only] => {
                prop_assert_eq!(active.len(), 1);
                prop_assert_eq!(&active[0].target, &only.id);
            }
            [] => prop_assert!(active.is_empty()),
            _ => prop_assert!(false, "fixture bands must not overlap"),
        }
    }

    #[test]
    fn prop_classify_is_pure(offset in 0u32..2000) {
        let first = classify(offset, &page_sections(), HEADER, ACTIVATION_PREROLL);
        let second = classify(offset, &page_sections(), HEADER, ACTIVATION_PREROLL);
        prop_assert_eq!(first, second);
    }
}
