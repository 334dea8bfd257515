//! 命令系统：语义命令定义
//!
//! - Command: 语义命令枚举（不关心具体按键或菜单）
//! - 是否可执行由 SensitivityEngine 决定
//! - 支持自定义命令扩展

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    // ==================== 窗口 ====================
    NewWindow,
    CloseWindow,
    Quit,

    // ==================== REPL ====================
    OpenCalcRepl,
    OpenShellRepl,
    CommitRepl,

    // ==================== 扩展点 ====================
    Custom(String),
}

impl Command {
    pub fn name(&self) -> &str {
        match self {
            Command::NewWindow => "newWindow",
            Command::CloseWindow => "closeWindow",
            Command::Quit => "quit",
            Command::OpenCalcRepl => "openCalcRepl",
            Command::OpenShellRepl => "openShellRepl",
            Command::CommitRepl => "commitRepl",
            Command::Custom(name) => name,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "newWindow" => Command::NewWindow,
            "closeWindow" => Command::CloseWindow,
            "quit" => Command::Quit,
            "openCalcRepl" => Command::OpenCalcRepl,
            "openShellRepl" => Command::OpenShellRepl,
            "commitRepl" => Command::CommitRepl,
            other => Command::Custom(other.to_string()),
        }
    }

    pub fn is_repl_command(&self) -> bool {
        matches!(
            self,
            Command::OpenCalcRepl | Command::OpenShellRepl | Command::CommitRepl
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/command.rs"]
mod tests;
