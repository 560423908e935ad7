use checkbits_fs::NormalizedPath;
use std::path::Path;

#[test]
fn test_normalize_forward_slashes() {
    let path = NormalizedPath::new("foo/bar/baz");
    assert_eq!(path.as_str(), "foo/bar/baz");
}

#[cfg(windows)]
#[test]
fn test_normalize_backslashes_to_forward() {
    let path = NormalizedPath::new("foo\\bar\\baz");
    assert_eq!(path.as_str(), "foo/bar/baz");
}

#[cfg(not(windows))]
#[test]
fn test_backslash_is_an_ordinary_character() {
    let path = NormalizedPath::new("foo/a\\b.txt");
    assert_eq!(path.as_str(), "foo/a\\b.txt");
    assert_eq!(path.file_name(), Some("a\\b.txt"));
    assert_eq!(path.under(Path::new("/data")), Path::new("/data/foo/a\\b.txt"));
}

#[test]
fn test_starts_with_compares_whole_components() {
    let path = NormalizedPath::new("photos/2019/a.jpg");
    assert!(path.starts_with(&NormalizedPath::new("photos")));
    assert!(path.starts_with(&NormalizedPath::new("photos/2019")));
    assert!(path.starts_with(&NormalizedPath::new("photos/2019/a.jpg")));
    assert!(!path.starts_with(&NormalizedPath::new("photo")));
    assert!(!path.starts_with(&NormalizedPath::new("photos/2019/a")));
}

#[test]
fn test_normalize_drops_empty_and_dot_components() {
    let path = NormalizedPath::new("./foo//bar/./baz/");
    assert_eq!(path.as_str(), "foo/bar/baz");
}

#[test]
fn test_absolute_prefix_is_kept() {
    let path = NormalizedPath::new("/srv//archive");
    assert_eq!(path.as_str(), "/srv/archive");
}

#[test]
fn test_join_paths() {
    let base = NormalizedPath::new("foo/bar");
    let joined = base.join("baz");
    assert_eq!(joined.as_str(), "foo/bar/baz");
}

#[test]
fn test_relative_strips_root() {
    let rel = NormalizedPath::relative(Path::new("/data/archive"), Path::new("/data/archive/2019/a.jpg"));
    assert_eq!(rel.unwrap().as_str(), "2019/a.jpg");
}

#[test]
fn test_relative_of_root_itself_is_none() {
    let rel = NormalizedPath::relative(Path::new("/data/archive"), Path::new("/data/archive"));
    assert!(rel.is_none());
}

#[test]
fn test_relative_outside_root_is_none() {
    let rel = NormalizedPath::relative(Path::new("/data/archive"), Path::new("/etc/passwd"));
    assert!(rel.is_none());
}

#[test]
fn test_under_resolves_against_root() {
    let rel = NormalizedPath::new("2019/a.jpg");
    let native = rel.under(Path::new("/data"));
    assert_eq!(native, Path::new("/data").join("2019").join("a.jpg"));
}

#[test]
fn test_file_name_and_extension() {
    let path = NormalizedPath::new("foo/bar/baz.txt");
    assert_eq!(path.file_name(), Some("baz.txt"));
    assert_eq!(path.extension(), Some("txt"));
    assert_eq!(NormalizedPath::new(".checkbits").extension(), None);
}

#[test]
fn test_serializes_as_plain_string() {
    let path = NormalizedPath::new("a/./b");
    let json = serde_json::to_string(&path).unwrap();
    assert_eq!(json, "\"a/b\"");

    let back: NormalizedPath = serde_json::from_str("\"a//b\"").unwrap();
    assert_eq!(back, path);
}

#[test]
fn test_exists_false_for_nonexistent() {
    let path = NormalizedPath::new("/nonexistent/path/that/does/not/exist");
    assert!(!path.exists());
}
