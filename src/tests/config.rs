use super::Config;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let config = Config::load_from(&dir.path().join("folio.toml"));
    assert_eq!(config, Config::default());
    assert_eq!(config.activation_preroll, 100);
    assert_eq!(config.scroll_top_threshold, 300);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("folio.toml");
    fs::write(&path, "row_height = 10\nshow_header = false\n").unwrap();

    let config = Config::load_from(&path);
    assert_eq!(config.row_height, 10);
    assert!(!config.show_header);
    assert_eq!(config.section_level, 2);
    assert_eq!(config.file_extensions, vec!["md".to_string()]);
}

#[test]
fn test_invalid_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("folio.toml");
    fs::write(&path, "row_height = \"tall\"\n[[[").unwrap();
    assert_eq!(Config::load_from(&path), Config::default());
}

#[test]
fn test_durations() {
    let config = Config::default();
    assert_eq!(config.debounce(), Duration::from_millis(10));
    assert_eq!(config.smooth_scroll(), Duration::from_millis(400));
    assert_eq!(config.success_message(), Duration::from_secs(5));
}
