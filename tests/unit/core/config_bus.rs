use super::*;
use serde_json::json;
use std::cell::RefCell;

#[test]
fn test_set_and_get_normalizes_paths() {
    let mut bus = ConfigBus::new();
    bus.set("/zcore/appdata/tab_size", json!(2));

    assert_eq!(bus.get("zcore/appdata/tab_size"), Some(&json!(2)));
    assert_eq!(bus.get("/zcore//appdata/tab_size/"), Some(&json!(2)));
    assert!(bus.get("/zcore/appdata").is_none());
}

#[test]
fn test_last_writer_wins() {
    let mut bus = ConfigBus::new();
    assert_eq!(bus.set("/a/b", json!({"x": 1})), None);
    let previous = bus.set("/a/b", json!({"y": 2}));

    assert_eq!(previous, Some(json!({"x": 1})));
    assert_eq!(bus.get("/a/b"), Some(&json!({"y": 2})));
}

#[test]
fn test_subtree_is_relative_and_excludes_siblings() {
    let mut bus = ConfigBus::new();
    bus.set("/app/data/one", json!(1));
    bus.set("/app/data/nested/two", json!(2));
    bus.set("/app/database", json!(3));

    let entries = bus.subtree("/app/data");
    assert_eq!(
        entries,
        vec![
            ("nested/two".to_string(), json!(2)),
            ("one".to_string(), json!(1)),
        ]
    );
}

#[test]
fn test_subscribers_see_changes_under_prefix() {
    let seen: Rc<RefCell<Vec<(String, Option<Value>)>>> = Rc::new(RefCell::new(Vec::new()));
    let mut bus = ConfigBus::new();
    let sink = Rc::clone(&seen);
    bus.subscribe(
        "/app",
        Rc::new(move |path: &str, value: Option<&Value>| {
            sink.borrow_mut().push((path.to_string(), value.cloned()));
        }),
    );

    bus.set("/app/x", json!("on"));
    bus.set("/other/y", json!("ignored"));
    bus.remove("/app/x");
    bus.remove("/app/never_set");

    assert_eq!(
        *seen.borrow(),
        vec![
            ("/app/x".to_string(), Some(json!("on"))),
            ("/app/x".to_string(), None),
        ]
    );
}
