//! 应用目录管理
//!
//! 跨平台的应用根目录，类似 VS Code 的逻辑：
//! - macOS: ~/Library/Application Support/zcore
//! - Linux: ~/.local/share/zcore
//! - Windows: %APPDATA%\zcore
//!
//! 根目录下：`custom/appdata.yaml`（持久化配置）、`cache/<ns>/<key>.dump`、
//! `zcore.log.<pid>`（`--log` 时的进程日志）。

use std::path::{Path, PathBuf};

const APP_NAME: &str = "zcore";
const CACHE_DIR: &str = "cache";
const CUSTOM_DIR: &str = "custom";
const APPDATA_FILE: &str = "appdata.yaml";

/// 获取应用数据目录
pub fn default_root() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        dirs_path_macos()
    }

    #[cfg(target_os = "linux")]
    {
        dirs_path_linux()
    }

    #[cfg(target_os = "windows")]
    {
        dirs_path_windows()
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(target_os = "macos")]
fn dirs_path_macos() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join("Library/Application Support")
            .join(APP_NAME)
    })
}

#[cfg(target_os = "linux")]
fn dirs_path_linux() -> Option<PathBuf> {
    // 优先使用 XDG_DATA_HOME，否则使用 ~/.local/share
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg).join(APP_NAME))
    } else {
        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".local/share").join(APP_NAME))
    }
}

#[cfg(target_os = "windows")]
fn dirs_path_windows() -> Option<PathBuf> {
    std::env::var("APPDATA")
        .ok()
        .map(|appdata| PathBuf::from(appdata).join(APP_NAME))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    root: PathBuf,
}

impl AppPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Platform default, falling back to the temp dir when no home is known.
    pub fn platform_default() -> Self {
        Self::new(default_root().unwrap_or_else(|| std::env::temp_dir().join(APP_NAME)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(CACHE_DIR)
    }

    pub fn appdata_file(&self) -> PathBuf {
        self.root.join(CUSTOM_DIR).join(APPDATA_FILE)
    }

    pub fn log_file(&self, pid: u32) -> PathBuf {
        self.root.join(format!("{}.log.{}", APP_NAME, pid))
    }

    /// 确保根目录存在
    pub fn ensure_root(&self) -> std::io::Result<&Path> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root)?;
        }
        Ok(&self.root)
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/paths.rs"]
mod tests;
