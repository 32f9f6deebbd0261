use super::init_tracing;
use crate::error::FolioError;
use tempfile::tempdir;

#[test]
fn test_unwritable_log_path_is_an_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("folio.log");
    assert!(matches!(init_tracing(&path), Err(FolioError::Io(_))));
}

#[test]
fn test_second_subscriber_is_reported() {
    let dir = tempdir().unwrap();
    let first = init_tracing(&dir.path().join("first.log"));
    assert!(first.is_ok());
    let second = init_tracing(&dir.path().join("second.log"));
    assert!(matches!(second, Err(FolioError::Logging(_))));
}
