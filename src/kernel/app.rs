//! 应用控制器
//!
//! `App` 是显式的、生命周期明确的上下文对象：启动时构造，quit 时拆除。
//! 它持有唯一的窗口、钩子注册表、配置总线、命令可用性引擎和环境变量影子，
//! 全部在 UI 主线程上同步修改。

use crate::core::error::Result;
use crate::core::hooks::{self, CLOSE_WINDOW, OPEN_WINDOW, SHUTDOWN};
use crate::core::{AppError, Command, ConfigBus, ConfigurationError, HookRegistry};
use crate::kernel::environment::{EnvironmentShadow, ShadowSettings, ShadowedEnv};
use crate::kernel::repl::{self, Calculator, ShellEval};
use crate::kernel::sensitivity::{Focussed, SensitivityEngine, SensitivityEvent};
use crate::kernel::services::adapters::{self, AppPaths, Properties};
use crate::kernel::services::ports::Bundle;
use crate::models::{Document, Tab, TabId, Window, WindowId};
use rustc_hash::FxHashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

pub const APPDATA_PREFIX: &str = "/zcore/appdata";
pub const APPDATA_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The UI event loop, as far as the controller is concerned.
pub trait EventLoop {
    fn exit(&mut self);
}

/// Default event loop handle: records exit requests for the main loop to poll.
#[derive(Debug, Clone, Default)]
pub struct LoopHandle {
    exits: Rc<Cell<u32>>,
}

impl LoopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn should_exit(&self) -> bool {
        self.exits.get() > 0
    }

    pub fn exit_requests(&self) -> u32 {
        self.exits.get()
    }
}

impl EventLoop for LoopHandle {
    fn exit(&mut self) {
        self.exits.set(self.exits.get() + 1);
    }
}

/// Asked once per tab while a window closes; returning false keeps the tab
/// (and therefore the window) open.
pub type CloseGuard = Box<dyn FnMut(&Tab) -> bool>;

pub type CommandHandler = Rc<dyn Fn(&mut App) -> Result<()>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    Cancelled,
    NoWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    Executed,
    Disabled,
}

pub struct App {
    paths: AppPaths,
    hooks: HookRegistry<App>,
    bus: ConfigBus,
    properties: Option<Properties>,
    window: Option<Window>,
    next_window_id: u64,
    sensitivity: SensitivityEngine,
    support_search: Vec<PathBuf>,
    support_dir: Option<PathBuf>,
    shadow: EnvironmentShadow,
    bundle: Option<Bundle>,
    handlers: FxHashMap<String, CommandHandler>,
    close_guard: CloseGuard,
    event_loop: Box<dyn EventLoop>,
    quitting: bool,
}

impl App {
    pub fn new(paths: AppPaths, event_loop: Box<dyn EventLoop>) -> Self {
        Self {
            paths,
            hooks: HookRegistry::new(),
            bus: ConfigBus::new(),
            properties: None,
            window: None,
            next_window_id: 1,
            sensitivity: SensitivityEngine::new(),
            support_search: adapters::default_search_paths(),
            support_dir: None,
            shadow: EnvironmentShadow::new(PathBuf::new()),
            bundle: None,
            handlers: FxHashMap::default(),
            close_guard: Box::new(|_| true),
            event_loop,
            quitting: false,
        }
    }

    /// Registers the core hooks, loads persisted settings and bumps the
    /// execution counter.
    pub fn load(&mut self) -> Result<()> {
        self.hooks.register(OPEN_WINDOW);
        self.hooks.register(CLOSE_WINDOW);
        self.hooks.register(SHUTDOWN);

        let properties = Properties::new(
            "zcore application data",
            APPDATA_VERSION,
            APPDATA_PREFIX,
            self.paths.appdata_file(),
        );
        let loaded = properties.load(&mut self.bus)?;
        self.properties = Some(properties);

        let execution = self.get("execution").and_then(Value::as_u64).unwrap_or(0) + 1;
        self.set("execution", Value::from(execution))?;
        tracing::info!(execution, loaded, root = %self.paths.root().display(), "app loaded");
        Ok(())
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    // ==================== 钩子 ====================

    pub fn hooks(&self) -> &HookRegistry<App> {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut HookRegistry<App> {
        &mut self.hooks
    }

    /// Runs `inner` wrapped by the observers of hook `name`. Observers get
    /// the app itself, so they may call back into it (quit included).
    pub fn trigger<T>(
        &mut self,
        name: &str,
        inner: impl FnOnce(&mut App) -> T,
    ) -> std::result::Result<T, ConfigurationError> {
        let chain = self.hooks.chain(name)?;
        tracing::debug!(hook = name, observers = chain.len(), "trigger");
        Ok(hooks::run_wrapped(self, &chain, inner))
    }

    // ==================== 配置 ====================

    pub fn bus(&self) -> &ConfigBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut ConfigBus {
        &mut self.bus
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bus.get(&appdata_path(name))
    }

    /// Stores an application setting and persists the appdata subtree.
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        self.bus.set(&appdata_path(name), value);
        if let Some(properties) = &self.properties {
            properties.save(&self.bus)?;
        }
        Ok(())
    }

    pub fn with_cache<T, F>(&self, namespace: &str, key: &str, producer: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> T,
    {
        Ok(adapters::with_cache(
            &self.paths.cache_dir(),
            namespace,
            key,
            producer,
        )?)
    }

    // ==================== 窗口 ====================

    /// Opens the window. Returns `None` without triggering `open_window` when
    /// one already exists. The single window is always the focussed one;
    /// `focus` is kept for interface parity.
    pub fn new_window(&mut self, focus: bool) -> Result<Option<WindowId>> {
        if self.window.is_some() {
            return Ok(None);
        }
        tracing::info!(focus, "new window");
        let id = self.trigger(OPEN_WINDOW, |app| {
            let id = WindowId(app.next_window_id);
            app.next_window_id += 1;
            app.window = Some(Window::new(id));
            id
        })?;
        self.notify(SensitivityEvent::WindowFocussed);
        self.notify(SensitivityEvent::TabFocussed);
        Ok(Some(id))
    }

    pub fn windows(&self) -> Vec<&Window> {
        self.window.iter().collect()
    }

    pub fn focussed_window(&self) -> Option<&Window> {
        self.window.as_ref()
    }

    pub fn focussed_window_mut(&mut self) -> Option<&mut Window> {
        self.window.as_mut()
    }

    pub fn close_window(
        &mut self,
        window: Option<WindowId>,
        close_if_none_left: bool,
    ) -> Result<CloseOutcome> {
        let had_windows = self.window.is_some();
        let mut outcome = CloseOutcome::NoWindow;
        if let Some(id) = window {
            tracing::info!(window = id.0, "close window");
            outcome = self.trigger(CLOSE_WINDOW, |app| app.close_tabs_and_forget(id))?;
            self.notify(SensitivityEvent::WindowFocussed);
            self.notify(SensitivityEvent::TabFocussed);
        }
        if outcome == CloseOutcome::Cancelled {
            tracing::info!("window close cancelled by a tab");
            return Ok(outcome);
        }
        if close_if_none_left && had_windows {
            self.quit()?;
        }
        Ok(outcome)
    }

    pub fn close_all_windows(&mut self, close_if_none_left: bool) -> Result<CloseOutcome> {
        let id = self.window.as_ref().map(Window::id);
        self.close_window(id, close_if_none_left)
    }

    pub fn set_close_guard(&mut self, guard: CloseGuard) {
        self.close_guard = guard;
    }

    fn close_tabs_and_forget(&mut self, id: WindowId) -> CloseOutcome {
        let guard = &mut self.close_guard;
        let Some(window) = self.window.as_mut().filter(|w| w.id() == id) else {
            return CloseOutcome::NoWindow;
        };

        let mut vetoed = false;
        for tab_id in window.tab_ids() {
            let allow = window.tab(tab_id).map(|tab| guard(tab)).unwrap_or(true);
            if allow {
                window.remove_tab(tab_id);
            } else {
                vetoed = true;
            }
        }
        if vetoed {
            return CloseOutcome::Cancelled;
        }
        self.window = None;
        CloseOutcome::Closed
    }

    /// Shuts down once: closes the window without re-quitting, triggers the
    /// shutdown hook and stops the event loop. Later or nested calls return
    /// immediately.
    pub fn quit(&mut self) -> Result<()> {
        if self.quitting {
            tracing::debug!("quit already in progress");
            return Ok(());
        }
        self.quitting = true;

        let id = self.window.as_ref().map(Window::id);
        if id.is_some() {
            self.close_window(id, false)?;
        }
        tracing::info!("system shutdown");
        self.trigger(SHUTDOWN, |_| ())?;
        self.event_loop.exit();
        Ok(())
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    // ==================== 聚焦 ====================

    /// The current or last focussed tab.
    pub fn focussed_tab(&self) -> Option<&Tab> {
        self.window.as_ref().and_then(Window::focussed_tab)
    }

    /// The current or last focussed document.
    pub fn focussed_document(&self) -> Option<&Document> {
        self.focussed_tab().and_then(Tab::document)
    }

    pub fn focussed_document_mut(&mut self) -> Option<&mut Document> {
        self.window
            .as_mut()
            .and_then(Window::focussed_tab_mut)
            .and_then(Tab::document_mut)
    }

    /// Moves focus to `tab` and refreshes sensitivities before returning.
    pub fn focus_tab(&mut self, tab: TabId) -> bool {
        let focussed = self
            .window
            .as_mut()
            .map(|w| w.set_focussed_tab(tab))
            .unwrap_or(false);
        if focussed {
            self.notify(SensitivityEvent::TabFocussed);
        }
        focussed
    }

    pub fn close_tab(&mut self, tab: TabId) -> Option<Tab> {
        let removed = self.window.as_mut().and_then(|w| w.remove_tab(tab));
        if removed.is_some() {
            self.notify(SensitivityEvent::TabFocussed);
        }
        removed
    }

    // ==================== 命令 ====================

    pub fn sensitivity(&self) -> &SensitivityEngine {
        &self.sensitivity
    }

    pub fn sensitivity_mut(&mut self) -> &mut SensitivityEngine {
        &mut self.sensitivity
    }

    pub fn is_enabled(&self, command: &Command) -> bool {
        self.sensitivity.is_enabled(command)
    }

    pub fn register_handler(&mut self, name: &str, handler: CommandHandler) {
        self.handlers.insert(name.to_string(), handler);
    }

    pub fn execute(&mut self, command: Command) -> Result<ExecOutcome> {
        if !self.sensitivity.is_enabled(&command) {
            tracing::debug!(command = command.name(), "command disabled");
            return Ok(ExecOutcome::Disabled);
        }
        tracing::debug!(
            command = command.name(),
            repl = command.is_repl_command(),
            "execute"
        );
        match command {
            Command::NewWindow => {
                self.new_window(true)?;
            }
            Command::CloseWindow => {
                self.close_all_windows(true)?;
            }
            Command::Quit => self.quit()?,
            Command::OpenCalcRepl => {
                repl::open_repl(self, Rc::new(Calculator))?;
            }
            Command::OpenShellRepl => {
                repl::open_repl(self, Rc::new(ShellEval::sh()))?;
            }
            Command::CommitRepl => repl::commit(self)?,
            Command::Custom(name) => match self.handlers.get(&name).cloned() {
                Some(handler) => handler(self)?,
                None => {
                    tracing::warn!(command = %name, "no handler for command");
                    return Ok(ExecOutcome::Disabled);
                }
            },
        }
        Ok(ExecOutcome::Executed)
    }

    fn notify(&mut self, event: SensitivityEvent) {
        let focus = match (event, self.window.as_ref()) {
            (_, None) => Focussed::Nothing,
            (SensitivityEvent::WindowFocussed, Some(window)) => Focussed::Window(window),
            (SensitivityEvent::TabFocussed, Some(window)) => window
                .focussed_tab()
                .map(Focussed::Tab)
                .unwrap_or(Focussed::Nothing),
        };
        self.sensitivity.notify(event, &focus);
    }

    // ==================== 环境变量 ====================

    /// Replaces the support search list. The directory is located again on
    /// the next environment pass; names remembered from bundles are kept so
    /// that pass still clears them.
    pub fn set_support_search_paths(&mut self, paths: Vec<PathBuf>) {
        self.support_search = paths;
        self.support_dir = None;
    }

    pub fn support_dir(&self) -> Option<&std::path::Path> {
        self.support_dir.as_deref()
    }

    pub fn bundle(&self) -> Option<&Bundle> {
        self.bundle.as_ref()
    }

    pub fn set_bundle(&mut self, bundle: Option<Bundle>) {
        self.bundle = bundle;
    }

    /// Computes the tool environment for the focussed document and active
    /// bundle without touching the process environment.
    pub fn shadowed_environment(&mut self) -> Result<ShadowedEnv> {
        if self.support_dir.is_none() {
            let dir = adapters::locate(&self.support_search)?;
            tracing::debug!(dir = %dir.display(), "support directory located");
            self.shadow.set_share_dir(dir.clone());
            self.support_dir = Some(dir);
        }
        let settings = self.shadow_settings();
        self.shadow.set_settings(settings);
        let doc = self
            .window
            .as_ref()
            .and_then(Window::focussed_tab)
            .and_then(Tab::document);
        Ok(self.shadow.apply(doc, self.bundle.as_ref()))
    }

    /// Same as [`App::shadowed_environment`], then exports the result into
    /// the process environment.
    pub fn set_environment_variables(&mut self) -> Result<ShadowedEnv> {
        let env = self.shadowed_environment()?;
        env.export();
        Ok(env)
    }

    fn shadow_settings(&self) -> ShadowSettings {
        let defaults = ShadowSettings::default();
        ShadowSettings {
            tab_size: self
                .get("tab_size")
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(defaults.tab_size),
            soft_tabs: self
                .get("soft_tabs")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.soft_tabs),
            ruby: self
                .get("ruby")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or(defaults.ruby),
        }
    }
}

fn appdata_path(name: &str) -> String {
    format!("{}/{}", APPDATA_PREFIX, name)
}

impl From<AppError> for std::io::Error {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Io(err) => err,
            other => std::io::Error::other(other.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/app.rs"]
mod tests;
