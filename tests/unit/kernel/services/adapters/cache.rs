use super::*;
use std::cell::Cell;
use tempfile::tempdir;

#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
struct Grammar {
    name: String,
    rules: Vec<u32>,
}

#[test]
fn test_producer_runs_once_per_key() {
    let dir = tempdir().unwrap();
    let calls = Cell::new(0);
    let produce = || {
        calls.set(calls.get() + 1);
        Grammar {
            name: "rust".to_string(),
            rules: vec![1, 2, 3],
        }
    };

    let first: Grammar = with_cache(dir.path(), "grammars", "rust", produce).unwrap();
    let second: Grammar = with_cache(dir.path(), "grammars", "rust", produce).unwrap();

    assert_eq!(calls.get(), 1);
    assert_eq!(first, second);
    assert!(dir.path().join("grammars").join("rust.dump").is_file());
}

#[test]
fn test_keys_and_namespaces_are_independent() {
    let dir = tempdir().unwrap();

    let a: u32 = with_cache(dir.path(), "ns1", "k", || 1).unwrap();
    let b: u32 = with_cache(dir.path(), "ns2", "k", || 2).unwrap();
    let c: u32 = with_cache(dir.path(), "ns1", "other", || 3).unwrap();

    assert_eq!((a, b, c), (1, 2, 3));
    assert_eq!(with_cache(dir.path(), "ns1", "k", || 99).unwrap(), 1);
}

#[test]
fn test_corrupt_blob_is_an_error() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("ns")).unwrap();
    std::fs::write(dir.path().join("ns").join("bad.dump"), b"not json").unwrap();

    let result: Result<u32, CacheError> = with_cache(dir.path(), "ns", "bad", || 1);
    assert!(matches!(result, Err(CacheError::Serde(_))));
}

#[test]
fn test_unwritable_cache_root_propagates() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("plain-file");
    std::fs::write(&file, b"x").unwrap();

    let result: Result<u32, CacheError> = with_cache(&file, "ns", "k", || 1);
    assert!(matches!(result, Err(CacheError::Io(_))));
}
