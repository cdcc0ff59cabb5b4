use std::fs;

use strongroom_client::{ensure_download_dir, AtomicFileWriter};

#[test]
fn writer_creates_the_directory_and_file() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("downloads");
    let writer = AtomicFileWriter::new(nested.clone());

    let path = writer.write("a.txt", b"first").unwrap();
    assert_eq!(path, nested.join("a.txt"));
    assert_eq!(fs::read(&path).unwrap(), b"first");
}

#[test]
fn repeated_writes_replace_the_previous_copy() {
    let dir = tempfile::tempdir().unwrap();
    let writer = AtomicFileWriter::new(dir.path().to_path_buf());

    writer.write("a.txt", b"first").unwrap();
    let path = writer.write("a.txt", b"second").unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"second");
    // Temp files from the atomic rename do not linger.
    let entries = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn ensure_download_dir_rejects_a_file_path() {
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("not_a_dir");
    fs::write(&file_path, b"x").unwrap();

    assert!(ensure_download_dir(&file_path).is_err());
    assert!(ensure_download_dir(dir.path()).is_ok());
}
