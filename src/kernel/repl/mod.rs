//! 交互式求值（REPL）
//!
//! - binding: 文档 ↔ 求值策略的绑定与会话记录
//! - calc / shell: 内置策略
//! - plugin: sensitivity、命令、快捷键与菜单

pub mod binding;
pub mod calc;
pub mod plugin;
pub mod shell;

pub use binding::{BindingContext, EvalBinding, EvalStrategy, EvalValue, FnStrategy, PROMPT};
pub use calc::Calculator;
pub use plugin::{commit, install, keymap, menu, open_repl, KeyBinding, MenuItem, Platform};
pub use shell::ShellEval;

#[cfg(test)]
#[path = "../../../tests/unit/kernel/repl.rs"]
mod tests;
