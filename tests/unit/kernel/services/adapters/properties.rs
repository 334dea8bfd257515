use super::*;
use serde_json::json;
use tempfile::tempdir;

fn props(path: PathBuf) -> Properties {
    Properties::new("zcore appdata", "0.1.0", "/zcore/appdata", path)
}

#[test]
fn test_save_then_load_round_trips_subtree_only() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("custom").join("appdata.yaml");
    let props = props(path.clone());

    let mut bus = ConfigBus::new();
    bus.set("/zcore/appdata/execution", json!(3));
    bus.set("/zcore/appdata/recent/files", json!(["a.rs", "b.rs"]));
    bus.set("/zcore/session/volatile", json!(true));
    props.save(&bus).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("0.1.0"));
    assert!(!text.contains("volatile"));

    let mut fresh = ConfigBus::new();
    assert_eq!(props.load(&mut fresh).unwrap(), 2);
    assert_eq!(fresh.get("/zcore/appdata/execution"), Some(&json!(3)));
    assert_eq!(
        fresh.get("/zcore/appdata/recent/files"),
        Some(&json!(["a.rs", "b.rs"]))
    );
    assert!(fresh.get("/zcore/session/volatile").is_none());
}

#[test]
fn test_load_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let props = props(dir.path().join("nope.yaml"));
    let mut bus = ConfigBus::new();

    assert_eq!(props.load(&mut bus).unwrap(), 0);
}

#[test]
fn test_load_keeps_data_from_other_version() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("appdata.yaml");
    std::fs::write(
        &path,
        "name: zcore appdata\nversion: 0.0.9\ndata:\n  tab_size: 4\n",
    )
    .unwrap();

    let mut bus = ConfigBus::new();
    assert_eq!(props(path).load(&mut bus).unwrap(), 1);
    assert_eq!(bus.get("/zcore/appdata/tab_size"), Some(&json!(4)));
}

#[test]
fn test_load_invalid_yaml_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("appdata.yaml");
    std::fs::write(&path, "data: [unclosed").unwrap();

    let mut bus = ConfigBus::new();
    assert!(matches!(
        props(path).load(&mut bus),
        Err(PersistError::Yaml(_))
    ));
}
