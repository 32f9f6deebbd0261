use super::{ClickTarget, MenuState};

#[test]
fn test_toggle_tracks_aria_and_body_lock() {
    let mut menu = MenuState::default();
    assert!(!menu.aria_expanded());
    assert!(menu.toggle());
    assert!(menu.is_open() && menu.aria_expanded() && menu.body_locked());
    assert!(!menu.toggle());
    assert!(!menu.body_locked());
}

#[test]
fn test_only_outside_clicks_close() {
    let mut menu = MenuState::default();
    menu.toggle();
    menu.click(ClickTarget::MenuPanel);
    assert!(menu.is_open());
    menu.click(ClickTarget::MenuButton);
    assert!(menu.is_open());
    menu.click(ClickTarget::Outside);
    assert!(!menu.is_open());
}

#[test]
fn test_escape_closes_and_returns_focus_only_when_open() {
    let mut menu = MenuState::default();
    assert!(!menu.escape());
    menu.toggle();
    assert!(menu.escape());
    assert!(!menu.is_open());
}

#[test]
fn test_hover_underline() {
    let mut menu = MenuState::default();
    menu.hover(2);
    assert_eq!(menu.hovered(), Some(2));
    menu.unhover();
    assert_eq!(menu.hovered(), None);
}
