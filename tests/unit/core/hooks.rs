use super::*;

struct Recorder(&'static str);

impl HookObserver<Vec<String>> for Recorder {
    fn before(&self, cx: &mut Vec<String>) {
        cx.push(format!("enter {}", self.0));
    }

    fn after(&self, cx: &mut Vec<String>) {
        cx.push(format!("exit {}", self.0));
    }
}

#[test]
fn test_trigger_nests_block_between_observers() {
    let mut hooks: HookRegistry<Vec<String>> = HookRegistry::new();
    hooks.register("save");
    for name in ["a", "b", "c"] {
        hooks.attach("save", Rc::new(Recorder(name))).unwrap();
    }

    let mut log = Vec::new();
    let value = hooks
        .trigger(&mut log, "save", |log| {
            log.push("block".to_string());
            7
        })
        .unwrap();

    assert_eq!(value, 7);
    assert_eq!(
        log,
        vec![
            "enter a", "enter b", "enter c", "block", "exit c", "exit b", "exit a"
        ]
    );
}

#[test]
fn test_trigger_unregistered_hook_fails() {
    let hooks: HookRegistry<Vec<String>> = HookRegistry::new();
    let mut log = Vec::new();
    let mut ran = false;

    let result = hooks.trigger(&mut log, "missing", |_| ran = true);

    assert_eq!(
        result,
        Err(ConfigurationError::UnregisteredHook("missing".to_string()))
    );
    assert!(!ran);
}

#[test]
fn test_register_is_idempotent() {
    let mut hooks: HookRegistry<Vec<String>> = HookRegistry::new();
    hooks.register("open");
    hooks.attach("open", Rc::new(Recorder("x"))).unwrap();
    hooks.register("open");

    assert!(hooks.is_registered("open"));
    assert_eq!(hooks.observer_count("open"), 1);
}

#[test]
fn test_attach_requires_registration() {
    let mut hooks: HookRegistry<Vec<String>> = HookRegistry::new();
    let err = hooks.attach("nope", Rc::new(Recorder("x"))).unwrap_err();
    assert!(matches!(err, ConfigurationError::UnregisteredHook(name) if name == "nope"));
}

#[test]
fn test_interceptor_closures() {
    let mut hooks: HookRegistry<i32> = HookRegistry::new();
    hooks.register("tick");
    hooks
        .attach(
            "tick",
            Rc::new(Interceptor::new(
                |n: &mut i32| *n *= 10,
                |n: &mut i32| *n += 1,
            )),
        )
        .unwrap();

    let mut n = 1;
    hooks.trigger(&mut n, "tick", |n| *n += 2).unwrap();
    assert_eq!(n, 13);
}

#[test]
fn test_trigger_without_observers_runs_block() {
    let mut hooks: HookRegistry<Vec<String>> = HookRegistry::new();
    hooks.register("empty");
    let mut log: Vec<String> = Vec::new();
    hooks
        .trigger(&mut log, "empty", |log| log.push("only".to_string()))
        .unwrap();
    assert_eq!(log, vec!["only"]);
}
