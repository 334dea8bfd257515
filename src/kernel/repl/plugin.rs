//! REPL 插件：sensitivity、命令实现、快捷键与菜单声明

use super::binding::{EvalBinding, EvalStrategy};
use crate::core::error::Result;
use crate::core::{AppError, Command};
use crate::kernel::app::App;
use crate::kernel::sensitivity::{Focussed, Sensitivity, SensitivityEvent};
use crate::models::{Document, TabId, TabKind};
use std::rc::Rc;

pub const OPEN_REPL_TAB: &str = "open_repl_tab";
pub const WINDOW_OPEN: &str = "window_open";

pub fn sensitivities() -> Vec<Sensitivity> {
    vec![
        Sensitivity::new(
            OPEN_REPL_TAB,
            false,
            &[SensitivityEvent::TabFocussed],
            |focus| match focus {
                Focussed::Tab(tab) => match tab.kind() {
                    TabKind::Edit(doc) => doc.eval_binding().is_some(),
                    TabKind::Other => false,
                },
                _ => false,
            },
        ),
        Sensitivity::new(
            WINDOW_OPEN,
            false,
            &[SensitivityEvent::WindowFocussed],
            |focus| matches!(focus, Focussed::Window(_)),
        ),
    ]
}

/// Registers the REPL sensitivities and gates the REPL commands on them.
pub fn install(app: &mut App) {
    let engine = app.sensitivity_mut();
    for sensitivity in sensitivities() {
        engine.register(sensitivity);
    }
    engine.sensitize(Command::OpenCalcRepl, &[WINDOW_OPEN]);
    engine.sensitize(Command::OpenShellRepl, &[WINDOW_OPEN]);
    engine.sensitize(Command::CommitRepl, &[OPEN_REPL_TAB]);
}

/// Opens a REPL tab bound to `strategy`, with the cursor after the prompt,
/// and focuses it.
pub fn open_repl(app: &mut App, strategy: Rc<dyn EvalStrategy>) -> Result<TabId> {
    let binding = EvalBinding::new(strategy);
    let title = format!("{} REPL", binding.strategy_name());
    let mut doc = Document::from_text(&binding.banner());
    doc.set_cursor_offset(doc.len_chars());
    doc.set_eval_binding(Some(binding));

    let window = app.focussed_window_mut().ok_or(AppError::NoWindow)?;
    let tab = window.new_tab(title, TabKind::Edit(doc));
    app.focus_tab(tab);
    tracing::info!(tab = tab.0, "repl opened");
    Ok(tab)
}

/// Saves the focussed REPL document, which submits it to its binding, then
/// puts the cursor at the end of the buffer and scrolls it into view.
/// Evaluation errors end up in the buffer.
pub fn commit(app: &mut App) -> Result<()> {
    let wants_env = app
        .focussed_document()
        .and_then(Document::eval_binding)
        .map(EvalBinding::wants_environment)
        .ok_or(AppError::NotRepl)?;
    let env = if wants_env {
        Some(app.shadowed_environment()?)
    } else {
        None
    };

    let doc = app.focussed_document_mut().ok_or(AppError::NotRepl)?;
    if let (Some(env), Some(binding)) = (env, doc.eval_binding_mut()) {
        binding.context_mut().env = env;
    }
    doc.save()?;
    doc.set_cursor_offset(doc.len_chars());
    doc.scroll_to_line(doc.line_count());
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Osx,
    Linux,
    Windows,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub key: &'static str,
    pub command: Command,
}

pub fn keymap(platform: Platform) -> Vec<KeyBinding> {
    let (open, commit) = match platform {
        Platform::Osx => ("Cmd+Shift+M", "Cmd+M"),
        Platform::Linux | Platform::Windows => ("Ctrl+Shift+M", "Ctrl+M"),
    };
    vec![
        KeyBinding {
            key: open,
            command: Command::OpenCalcRepl,
        },
        KeyBinding {
            key: commit,
            command: Command::CommitRepl,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub path: &'static [&'static str],
    pub label: &'static str,
    pub command: Command,
}

pub fn menu() -> Vec<MenuItem> {
    const PATH: &[&str] = &["Plugins", "REPL"];
    vec![
        MenuItem {
            path: PATH,
            label: "Open Calc REPL",
            command: Command::OpenCalcRepl,
        },
        MenuItem {
            path: PATH,
            label: "Open Shell REPL",
            command: Command::OpenShellRepl,
        },
        MenuItem {
            path: PATH,
            label: "Execute",
            command: Command::CommitRepl,
        },
    ]
}
