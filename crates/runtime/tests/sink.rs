//! Tests for the filesystem sink.

use deckcrew_runtime::{FileSink, Sink};
use tempfile::tempdir;

#[tokio::test]
async fn file_sink_creates_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("output").join("deck").join("presentation.md");

    FileSink
        .write(&path.to_string_lossy(), "# Slide 1")
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Slide 1");
}

#[tokio::test]
async fn file_sink_overwrites_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("presentation.md");
    let path = path.to_string_lossy();

    FileSink.write(&path, "old").await.unwrap();
    FileSink.write(&path, "new").await.unwrap();

    assert_eq!(std::fs::read_to_string(path.as_ref()).unwrap(), "new");
}

#[tokio::test]
async fn file_sink_surfaces_io_errors() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "a file, not a directory").unwrap();

    let path = blocker.join("presentation.md");
    assert!(FileSink.write(&path.to_string_lossy(), "x").await.is_err());
}
