use super::{initial_theme, prefers_dark, Theme, ThemeStore};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_toggle_and_icon() {
    assert_eq!(Theme::Light.toggled(), Theme::Dark);
    assert_eq!(Theme::Dark.toggled(), Theme::Light);
    assert_eq!(Theme::Dark.icon(), "☀");
    assert_eq!(Theme::Light.icon(), "☾");
    assert_ne!(Theme::Light.palette(), Theme::Dark.palette());
}

#[test]
fn test_saved_theme_beats_system_preference() {
    assert_eq!(initial_theme(Some(Theme::Light), Some(true)), Theme::Light);
    assert_eq!(initial_theme(None, Some(true)), Theme::Dark);
    assert_eq!(initial_theme(None, Some(false)), Theme::Light);
    assert_eq!(initial_theme(None, None), Theme::Light);
}

#[test]
fn test_colorfgbg_background_hint() {
    assert_eq!(prefers_dark(Some("15;0")), Some(true));
    assert_eq!(prefers_dark(Some("0;15")), Some(false));
    assert_eq!(prefers_dark(Some("15;default;0")), Some(true));
    assert_eq!(prefers_dark(Some("garbage")), None);
    assert_eq!(prefers_dark(None), None);
}

#[test]
fn test_store_round_trips_through_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("preferences.json");

    let mut store = ThemeStore::at(path.clone()).unwrap();
    assert_eq!(store.saved_theme(), None);
    store.save_theme(Theme::Dark).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("\"dark\""));
    let reopened = ThemeStore::at(path).unwrap();
    assert_eq!(reopened.saved_theme(), Some(Theme::Dark));
}

#[test]
fn test_empty_file_reads_as_no_preference() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    fs::write(&path, "  \n").unwrap();
    assert_eq!(ThemeStore::at(path).unwrap().saved_theme(), None);
}

#[test]
fn test_corrupt_file_reads_empty_and_is_overwritten() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    fs::write(&path, "{not json").unwrap();

    let mut store = ThemeStore::at(path.clone()).unwrap();
    assert_eq!(store.saved_theme(), None);
    assert_eq!(store.path(), path.as_path());

    store.save_theme(Theme::Dark).unwrap();
    let reopened = ThemeStore::at(path).unwrap();
    assert_eq!(reopened.saved_theme(), Some(Theme::Dark));
}

#[test]
fn test_unreadable_path_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(ThemeStore::at(dir.path().to_path_buf()).is_err());
}

#[test]
fn test_ephemeral_store_does_not_touch_disk() {
    let mut store = ThemeStore::ephemeral();
    store.save_theme(Theme::Dark).unwrap();
    assert_eq!(store.saved_theme(), Some(Theme::Dark));
    assert_eq!(store.path().as_os_str(), "");
}
