use checkbits_fs::{NormalizedPath, RobustnessConfig, io};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("test.txt"));

    io::write_atomic(&path, b"hello world", RobustnessConfig::default()).unwrap();

    let content = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(content, "hello world");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("test.txt");
    fs::write(&file_path, "original").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::write_atomic(&path, b"updated", RobustnessConfig::default()).unwrap();

    let content = fs::read_to_string(&file_path).unwrap();
    assert_eq!(content, "updated");
}

#[test]
fn test_write_atomic_without_fsync() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("fast.txt"));
    let config = RobustnessConfig {
        enable_fsync: false,
        ..RobustnessConfig::default()
    };

    io::write_atomic(&path, b"fast", config).unwrap();

    assert_eq!(io::read_text(&path).unwrap(), "fast");
}

#[test]
fn test_read_bytes_existing_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("bin");
    fs::write(&file_path, [0u8, 159, 146, 150]).unwrap();

    let bytes = io::read_bytes(&NormalizedPath::new(&file_path)).unwrap();
    assert_eq!(bytes, vec![0u8, 159, 146, 150]);
}

#[test]
fn test_read_text_nonexistent_file() {
    let path = NormalizedPath::new("/nonexistent/file.txt");
    let result = io::read_text(&path);
    assert!(result.is_err());
}

#[test]
fn test_remove_if_exists() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("victim");
    fs::write(&file_path, "x").unwrap();
    let path = NormalizedPath::new(&file_path);

    assert!(io::remove_if_exists(&path).unwrap());
    assert!(!file_path.exists());
    assert!(!io::remove_if_exists(&path).unwrap());
}
