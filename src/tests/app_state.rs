use super::{AppState, Hit, HitRegion, View, FRAME_INTERVAL, IDLE_INTERVAL};
use crate::config::Config;
use crate::navigation::NavigationState;
use crate::page::{Block, Page, PageSection};
use crate::section::SectionId;
use crate::theme::{Theme, ThemeStore};
use ratatui::layout::Rect;
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn section(id: &str) -> PageSection {
    PageSection {
        id: SectionId::from(id),
        title: id.to_string(),
        blocks: (0..17).map(|i| Block::Text(format!("line {i}"))).collect(),
    }
}

/// Three sections of 20 rows each below a one-line hero.
///
/// With 20 units per row: about starts at 100, projects at 500, contact at 900, and the document
/// is 1300 tall. A 21-row terminal leaves a 400-unit viewport above the footer.
fn page() -> Page {
    Page {
        title: "Jane".to_string(),
        hero: vec![Block::Text("Hello.".to_string())],
        sections: vec![section("about"), section("projects"), section("contact")],
    }
}

fn app_with(cfg: &Config, width: u16) -> AppState {
    AppState::new(page(), cfg, Theme::Light, ThemeStore::ephemeral(), (width, 21), ms(0))
}

/// An app whose load-time reset has already run.
fn settled_app() -> AppState {
    let mut app = app_with(&Config::default(), 100);
    app.tick(ms(100));
    app
}

fn active(app: &AppState) -> Option<&str> {
    app.nav.active_section_id.as_ref().map(SectionId::as_str)
}

#[test]
fn test_first_pass_marks_the_first_section() {
    let app = app_with(&Config::default(), 100);
    assert_eq!(active(&app), Some("about"));
    assert_eq!(app.links.active().map(|l| l.label.as_str()), Some("about"));
    assert!(!app.scroll_top.visible);
    assert_eq!(app.next_deadline(), Some(ms(100)));
}

#[test]
fn test_scroll_burst_is_classified_once_settled() {
    let mut app = settled_app();
    for t in 101..=120 {
        app.scroll_rows(1, ms(t));
    }
    assert_eq!(app.viewport.offset(), 400);

    app.tick(ms(125));
    assert_eq!(active(&app), Some("about"));
    assert!(!app.scroll_top.visible);

    app.tick(ms(130));
    assert_eq!(active(&app), Some("projects"));
    assert!(app.scroll_top.visible);
}

#[test]
fn test_load_timer_resets_scroll_to_top() {
    let mut app = app_with(&Config::default(), 100);
    app.scroll_rows(30, ms(50));
    app.tick(ms(60));
    assert_eq!(active(&app), Some("projects"));

    app.tick(ms(100));
    assert_eq!(app.viewport.offset(), 0);
    app.tick(ms(110));
    assert_eq!(active(&app), Some("about"));
}

#[test]
fn test_link_activation_is_optimistic() {
    let mut app = settled_app();
    app.toggle_menu();
    app.activate_link(2, ms(200));

    assert_eq!(active(&app), Some("contact"));
    assert!(app.links.get(2).is_some_and(|l| l.active));
    assert!(app.is_animating());
    assert!(!app.menu.is_open());
    assert_eq!(app.focused_link, 2);

    app.tick(ms(600));
    assert_eq!(app.viewport.offset(), 840);
    app.tick(ms(610));
    assert_eq!(active(&app), Some("contact"));
}

#[test]
fn test_passes_run_between_animation_frames() {
    let mut app = settled_app();
    app.activate_link(2, ms(200));

    let mut seen_mid_flight = Vec::new();
    let mut control_shown_mid_flight = false;
    let mut t = 200;
    while app.is_animating() {
        t += 16;
        app.tick(ms(t));
        if app.is_animating() {
            seen_mid_flight.push(active(&app).map(str::to_string));
            control_shown_mid_flight |= app.scroll_top.visible;
        }
    }

    // On its way to the third section the offset crosses the first two bands.
    assert!(seen_mid_flight.contains(&Some("about".to_string())));
    assert!(seen_mid_flight.contains(&Some("projects".to_string())));
    assert!(control_shown_mid_flight);

    app.tick(ms(t + 10));
    assert_eq!(app.viewport.offset(), 840);
    assert_eq!(active(&app), Some("contact"));
}

#[test]
fn test_poll_timeout_respects_frames_and_deadlines() {
    let mut app = settled_app();
    assert_eq!(app.poll_timeout(ms(100)), IDLE_INTERVAL);

    app.scroll_rows(1, ms(200));
    assert_eq!(app.poll_timeout(ms(204)), ms(6));

    app.tick(ms(210));
    app.activate_link(2, ms(300));
    assert_eq!(app.poll_timeout(ms(300)), FRAME_INTERVAL);
    app.tick(ms(316));
    assert_eq!(app.poll_timeout(ms(320)), ms(6));
}

#[test]
fn test_scroll_to_top_control() {
    let mut app = settled_app();
    app.scroll_rows(15, ms(200));
    app.tick(ms(210));
    assert_eq!(app.viewport.offset(), 300);
    assert!(!app.scroll_top.visible);

    app.scroll_rows(1, ms(220));
    app.tick(ms(230));
    assert!(app.scroll_top.visible);

    app.hits.push(HitRegion {
        area: Rect::new(80, 19, 10, 1),
        hit: Hit::ScrollTop,
        in_menu: false,
    });
    app.click_at(82, 19, ms(240));
    assert!(app.is_animating());
    app.tick(ms(640));
    assert_eq!(app.viewport.offset(), 0);
    app.tick(ms(650));
    assert!(!app.scroll_top.visible);
    assert_eq!(active(&app), Some("about"));
}

#[test]
fn test_open_menu_locks_scrolling() {
    let mut app = settled_app();
    app.toggle_menu();
    app.scroll_rows(5, ms(200));
    app.scroll_to_edge(false, ms(200));
    assert_eq!(app.viewport.offset(), 0);

    assert!(app.escape());
    assert!(!app.menu.is_open());
    assert_eq!(app.message.as_deref(), Some("Menu closed"));
    assert!(!app.escape());
}

#[test]
fn test_clicks_dispatch_through_hit_regions() {
    let mut app = settled_app();
    app.hits = vec![
        HitRegion {
            area: Rect::new(0, 1, 10, 1),
            hit: Hit::Link(1),
            in_menu: false,
        },
        HitRegion {
            area: Rect::new(90, 1, 6, 1),
            hit: Hit::MenuButton,
            in_menu: false,
        },
        HitRegion {
            area: Rect::new(70, 3, 30, 5),
            hit: Hit::MenuPanel,
            in_menu: true,
        },
    ];

    app.click_at(3, 1, ms(200));
    assert_eq!(active(&app), Some("projects"));

    app.click_at(91, 1, ms(300));
    assert!(app.menu.is_open());
    app.click_at(75, 4, ms(300));
    assert!(app.menu.is_open());
    app.click_at(40, 15, ms(300));
    assert!(!app.menu.is_open());

    app.hover_at(3, 1);
    assert_eq!(app.menu.hovered(), Some(1));
    app.hover_at(40, 15);
    assert_eq!(app.menu.hovered(), None);
}

#[test]
fn test_success_notice_is_dismissed_later() {
    let mut app = settled_app();
    app.open_form();
    assert_eq!(app.current_view, View::Form);
    for (i, value) in ["Ada", "ada@example.com", "Hello"].iter().enumerate() {
        for c in value.chars() {
            app.form.input(c);
        }
        if i < 2 {
            app.form_enter(ms(1000));
        }
    }
    app.form_enter(ms(1000));
    assert!(app.form.success().is_some());

    app.tick(ms(5999));
    assert!(app.form.success().is_some());
    app.tick(ms(6000));
    assert_eq!(app.form.success(), None);

    assert!(app.escape());
    assert_eq!(app.current_view, View::Page);
}

#[test]
fn test_theme_toggle_is_remembered() {
    let mut app = settled_app();
    app.toggle_theme();
    assert_eq!(app.theme, Theme::Dark);
    assert_eq!(app.theme_store.saved_theme(), Some(Theme::Dark));
}

#[test]
fn test_without_header_navigation_is_inert() {
    let cfg = Config {
        show_header: false,
        ..Config::default()
    };
    let mut app = app_with(&cfg, 100);
    assert_eq!(app.nav, NavigationState::default());

    app.activate_link(1, ms(10));
    assert!(!app.is_animating());
    assert_eq!(app.nav, NavigationState::default());
}

#[test]
fn test_narrow_terminal_collapses_links() {
    assert!(app_with(&Config::default(), 60).links_collapsed());
    assert!(!app_with(&Config::default(), 100).links_collapsed());
}
