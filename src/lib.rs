//! zcore - 编辑器应用核心库
//!
//! 模块结构：
//! - core: 框架抽象（Command, Hooks, ConfigBus, Error）
//! - models: 数据模型（Document, Window, Tab）
//! - kernel: 无界面应用核心（App, Sensitivity, Environment, REPL）
//! - logging: tracing 初始化

pub mod core;
pub mod kernel;
pub mod logging;
pub mod models;
