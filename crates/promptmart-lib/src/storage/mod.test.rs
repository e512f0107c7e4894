use super::*;
use tempfile::TempDir;

#[test]
fn test_file_store_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(temp_dir.path().join("token"));

    assert_eq!(store.load(), None);

    store.save("x").unwrap();
    assert_eq!(store.load(), Some("x".to_string()));

    store.clear().unwrap();
    assert_eq!(store.load(), None);
}

#[test]
fn test_file_store_creates_parent_dirs() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(temp_dir.path().join("nested/dir/token"));

    store.save("secret").unwrap();
    assert_eq!(store.load(), Some("secret".to_string()));
}

#[test]
fn test_file_store_clear_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(temp_dir.path().join("token"));

    // Clearing an absent token is not an error
    store.clear().unwrap();
    store.clear().unwrap();
}

#[test]
fn test_file_store_trims_whitespace() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("token");
    std::fs::write(&path, "abc\n").unwrap();

    let store = FileTokenStore::new(path);
    assert_eq!(store.load(), Some("abc".to_string()));
}

#[test]
fn test_memory_store_round_trip() {
    let store = MemoryTokenStore::new();
    assert_eq!(store.load(), None);

    store.save("x").unwrap();
    assert_eq!(store.load(), Some("x".to_string()));

    store.clear().unwrap();
    assert_eq!(store.load(), None);
}

#[test]
fn test_memory_store_with_token() {
    let store = MemoryTokenStore::with_token("seed");
    assert_eq!(store.load(), Some("seed".to_string()));
}
