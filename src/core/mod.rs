//! 核心框架模块
//!
//! 提供可扩展编辑器框架的核心抽象：
//! - Command: 命令系统
//! - Hooks: 具名扩展点（before/after 拦截器）
//! - ConfigBus: 层级配置存储
//! - Error: 错误类型

pub mod command;
pub mod config_bus;
pub mod error;
pub mod hooks;

pub use command::Command;
pub use config_bus::ConfigBus;
pub use error::{
    AppError, CacheError, ConfigurationError, EvalError, PersistError, ResourceNotFoundError,
};
pub use hooks::{HookObserver, HookRegistry, Interceptor};
