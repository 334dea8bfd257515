use super::*;
use tempfile::tempdir;

#[test]
fn test_default_root_names_app() {
    let root = default_root();
    // 在测试环境中应该能获取到目录
    assert!(root.is_some());
    assert!(root.unwrap().to_string_lossy().contains(APP_NAME));
}

#[test]
fn test_layout_under_root() {
    let paths = AppPaths::new("/data/zcore");

    assert_eq!(paths.cache_dir(), PathBuf::from("/data/zcore/cache"));
    assert_eq!(
        paths.appdata_file(),
        PathBuf::from("/data/zcore/custom/appdata.yaml")
    );
    assert_eq!(paths.log_file(42), PathBuf::from("/data/zcore/zcore.log.42"));
}

#[test]
fn test_ensure_root_creates_directory() {
    let dir = tempdir().unwrap();
    let paths = AppPaths::new(dir.path().join("nested").join("root"));

    let root = paths.ensure_root().unwrap();
    assert!(root.is_dir());
}
