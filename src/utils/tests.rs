use super::*;

#[test]
fn test_safe_filename_replaces_separators() {
    assert_eq!(safe_filename("a/b\\c:d"), "a_b_c_d");
    assert_eq!(safe_filename("plain-name.webp"), "plain-name.webp");
}

#[test]
fn test_atomic_write_creates_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nested").join("out.json");
    atomic_write(&path, "{\"ok\":true}").unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"ok\":true}");
}

#[test]
fn test_atomic_write_replaces_existing() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("out.txt");
    atomic_write(&path, "first").unwrap();
    atomic_write(&path, "second").unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
}

#[test]
fn test_truncate_utf8_boundary_ascii() {
    let data = b"hello world";
    assert_eq!(truncate_at_utf8_boundary(data, 5), b"hello");
    assert_eq!(truncate_at_utf8_boundary(data, 100), data);
}

#[test]
fn test_truncate_utf8_boundary_multibyte() {
    let s = "héllo"; // é is 2 bytes
    let cut = truncate_at_utf8_boundary(s.as_bytes(), 2);
    // Never splits the 2-byte é
    assert!(std::str::from_utf8(cut).is_ok());
    assert_eq!(cut, b"h");
}
