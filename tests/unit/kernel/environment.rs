use super::*;
use std::path::PathBuf;

fn shadow() -> EnvironmentShadow {
    EnvironmentShadow::new(PathBuf::from("/opt/textmate"))
}

#[test]
fn test_baseline_without_document() {
    let env = shadow().apply(None, None);

    for name in BASELINE_VARS {
        assert!(env.touches(name), "{name} should be touched");
    }
    assert_eq!(env.get("TM_SUPPORT_PATH"), Some("/opt/textmate/Support"));
    assert_eq!(env.get("RUBYLIB"), Some("/opt/textmate/Support/lib"));
    assert_eq!(
        env.get("BASH_ENV"),
        Some("/opt/textmate/Support/lib/bash_init.sh")
    );
    assert_eq!(env.get("TM_SOFT_TABS"), Some("YES"));
    assert_eq!(env.get("TM_TAB_SIZE"), Some("2"));
    assert_eq!(env.get("TM_CURRENT_LINE"), None);
    assert_eq!(env.get("TM_BUNDLE_SUPPORT"), None);
}

#[test]
fn test_document_variables() {
    let mut doc = Document::from_text("first\nsecond line\nthird");
    doc.set_cursor_offset(9);
    doc.set_selection(Some(6..12));
    doc.set_path(Some(PathBuf::from("/work/src/lib.rs")));
    doc.set_cursor_scope(Some("source.rust meta.block".to_string()));

    let env = shadow().apply(Some(&doc), None);

    assert_eq!(env.get("TM_CURRENT_LINE"), Some("second line"));
    assert_eq!(env.get("TM_LINE_INDEX"), Some("3"));
    assert_eq!(env.get("TM_LINE_NUMBER"), Some("2"));
    assert_eq!(env.get("TM_SELECTED_TEXT"), Some("second"));
    assert_eq!(env.get("TM_DIRECTORY"), Some("/work/src"));
    assert_eq!(env.get("TM_FILEPATH"), Some("/work/src/lib.rs"));
    assert_eq!(env.get("TM_FILENAME"), Some("lib.rs"));
    assert_eq!(env.get("TM_SCOPE"), Some("source.rust meta.block"));
}

#[test]
fn test_unsaved_document_leaves_file_variables_unset() {
    let doc = Document::from_text("scratch");
    let env = shadow().apply(Some(&doc), None);

    assert_eq!(env.get("TM_CURRENT_LINE"), Some("scratch"));
    assert!(env.touches("TM_FILEPATH"));
    assert_eq!(env.get("TM_FILEPATH"), None);
    assert_eq!(env.get("TM_SELECTED_TEXT"), None);
}

#[test]
fn test_second_bundle_clears_first_bundle_variables() {
    let mut shadow = shadow();
    let a = Bundle::new("A", "/bundles/A")
        .with_shell_variable("ONLY_IN_A", "a")
        .with_shell_variable("SHARED", "from a");
    let b = Bundle::new("B", "/bundles/B").with_shell_variable("SHARED", "from b");

    let first = shadow.apply(None, Some(&a));
    assert_eq!(first.get("ONLY_IN_A"), Some("a"));
    assert_eq!(first.get("TM_BUNDLE_SUPPORT"), Some("/bundles/A/Support"));

    let second = shadow.apply(None, Some(&b));
    assert!(second.touches("ONLY_IN_A"));
    assert_eq!(second.get("ONLY_IN_A"), None);
    assert_eq!(second.get("SHARED"), Some("from b"));
    assert_eq!(second.get("TM_BUNDLE_SUPPORT"), Some("/bundles/B/Support"));

    let third = shadow.apply(None, None);
    assert_eq!(third.get("SHARED"), None);
    assert_eq!(third.get("TM_BUNDLE_SUPPORT"), None);
    assert_eq!(
        shadow.remembered().collect::<Vec<_>>(),
        vec!["ONLY_IN_A", "SHARED"]
    );
}

#[test]
fn test_export_and_configure() {
    let mut shadow = shadow();
    let bundle = Bundle::new("X", "/bundles/X")
        .with_shell_variable("ZCORE_TEST_EXPORT_ONLY_X", "1");
    shadow.apply(None, Some(&bundle)).export();
    assert_eq!(
        std::env::var("ZCORE_TEST_EXPORT_ONLY_X").as_deref(),
        Ok("1")
    );

    let env = shadow.apply(None, None);
    env.export();
    assert!(std::env::var("ZCORE_TEST_EXPORT_ONLY_X").is_err());

    let mut cmd = ProcessCommand::new("true");
    env.configure(&mut cmd);
    let removed = cmd
        .get_envs()
        .any(|(k, v)| k == "ZCORE_TEST_EXPORT_ONLY_X" && v.is_none());
    assert!(removed);
}

#[test]
fn test_settings_feed_tab_variables() {
    let mut shadow = shadow();
    shadow.set_settings(ShadowSettings {
        tab_size: 4,
        soft_tabs: false,
        ruby: "/usr/bin/ruby".to_string(),
    });
    let env = shadow.apply(None, None);

    assert_eq!(env.get("TM_TAB_SIZE"), Some("4"));
    assert_eq!(env.get("TM_SOFT_TABS"), Some("NO"));
    assert_eq!(env.get("TM_RUBY"), Some("/usr/bin/ruby"));
}
