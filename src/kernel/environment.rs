//! 外部工具环境变量影子
//!
//! 每次 `apply` 先把固定变量集和之前 bundle 声明过的变量全部置空，再根据当前
//! 聚焦文档与 bundle 重新计算。结果是显式的 `ShadowedEnv`：可以直接交给子进程，
//! 也可以在唯一的协调点写回进程环境。

use crate::kernel::services::ports::Bundle;
use crate::models::Document;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::process::Command as ProcessCommand;

/// TextMate-compatible names cleared on every pass.
pub const BASELINE_VARS: &[&str] = &[
    "RUBYLIB",
    "TM_RUBY",
    "TM_BUNDLE_SUPPORT",
    "TM_CURRENT_LINE",
    "TM_LINE_INDEX",
    "TM_LINE_NUMBER",
    "TM_SELECTED_TEXT",
    "TM_DIRECTORY",
    "TM_FILEPATH",
    "TM_FILENAME",
    "TM_SCOPE",
    "TM_SOFT_TABS",
    "TM_SUPPORT_PATH",
    "TM_TAB_SIZE",
    "BASH_ENV",
];

/// Name → value, where `None` means the variable must be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShadowedEnv {
    vars: BTreeMap<String, Option<String>>,
}

impl ShadowedEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.vars.insert(name.to_string(), Some(value.into()));
    }

    pub fn unset(&mut self, name: &str) {
        self.vars.insert(name.to_string(), None);
    }

    /// The value to set, if `name` is set by this pass.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).and_then(|v| v.as_deref())
    }

    /// Whether this pass touches `name` at all (set or cleared).
    pub fn touches(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Applies the variables to a child process without touching our own
    /// environment.
    pub fn configure(&self, cmd: &mut ProcessCommand) {
        for (name, value) in &self.vars {
            match value {
                Some(value) => {
                    cmd.env(name, value);
                }
                None => {
                    cmd.env_remove(name);
                }
            }
        }
    }

    /// Writes the variables into the process environment. Only the
    /// application's coordination thread may call this.
    pub fn export(&self) {
        for (name, value) in &self.vars {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowSettings {
    pub tab_size: u32,
    pub soft_tabs: bool,
    pub ruby: String,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            tab_size: 2,
            soft_tabs: true,
            ruby: "/usr/local/bin/ruby".to_string(),
        }
    }
}

pub struct EnvironmentShadow {
    share_dir: PathBuf,
    remembered: BTreeSet<String>,
    settings: ShadowSettings,
}

impl EnvironmentShadow {
    pub fn new(share_dir: PathBuf) -> Self {
        Self {
            share_dir,
            remembered: BTreeSet::new(),
            settings: ShadowSettings::default(),
        }
    }

    pub fn share_dir(&self) -> &Path {
        &self.share_dir
    }

    pub fn set_share_dir(&mut self, share_dir: PathBuf) {
        self.share_dir = share_dir;
    }

    pub fn settings(&self) -> &ShadowSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: ShadowSettings) {
        self.settings = settings;
    }

    /// Bundle-declared names seen so far; each is cleared on the next pass.
    pub fn remembered(&self) -> impl Iterator<Item = &str> {
        self.remembered.iter().map(String::as_str)
    }

    pub fn apply(&mut self, doc: Option<&Document>, bundle: Option<&Bundle>) -> ShadowedEnv {
        let mut env = ShadowedEnv::new();
        for name in BASELINE_VARS {
            env.unset(name);
        }
        for name in &self.remembered {
            env.unset(name);
        }

        let support = self.share_dir.join("Support");
        env.set("RUBYLIB", path_string(&support.join("lib")));
        env.set("TM_RUBY", self.settings.ruby.as_str());

        if let Some(bundle) = bundle {
            env.set("TM_BUNDLE_SUPPORT", path_string(&bundle.support_dir()));
        }

        if let Some(doc) = doc {
            shadow_document(&mut env, doc);
        }

        env.set(
            "TM_SOFT_TABS",
            if self.settings.soft_tabs { "YES" } else { "NO" },
        );
        env.set("TM_SUPPORT_PATH", path_string(&support));
        env.set(
            "BASH_ENV",
            path_string(&support.join("lib").join("bash_init.sh")),
        );
        env.set("TM_TAB_SIZE", self.settings.tab_size.to_string());

        if let Some(bundle) = bundle {
            for var in bundle.shell_variables() {
                self.remembered.insert(var.name.clone());
                env.set(&var.name, var.value.as_str());
            }
        }

        tracing::debug!(
            bundle = bundle.map(|b| b.name.as_str()),
            remembered = self.remembered.len(),
            "environment shadowed"
        );
        env
    }
}

fn shadow_document(env: &mut ShadowedEnv, doc: &Document) {
    let line = doc.current_line();
    let line = line.strip_suffix('\n').unwrap_or(&line);
    env.set("TM_CURRENT_LINE", line);
    env.set("TM_LINE_INDEX", doc.cursor_line_offset().to_string());
    env.set("TM_LINE_NUMBER", (doc.cursor_line() + 1).to_string());
    if let Some(selected) = doc.selection() {
        env.set("TM_SELECTED_TEXT", selected);
    }
    if let Some(path) = doc.path() {
        if let Some(dir) = path.parent() {
            env.set("TM_DIRECTORY", path_string(dir));
        }
        env.set("TM_FILEPATH", path_string(path));
        if let Some(name) = path.file_name() {
            env.set("TM_FILENAME", name.to_string_lossy());
        }
    }
    if let Some(scope) = doc.cursor_scope() {
        env.set("TM_SCOPE", scope);
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/environment.rs"]
mod tests;
