//! 错误类型
//!
//! - ConfigurationError / ResourceNotFoundError: 部署或编程缺陷，直接向上传播
//! - EvalError: 解释器执行失败，由 REPL 写回缓冲区
//! - CacheError / PersistError: 磁盘 IO 与序列化失败

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("hook is not registered: {0}")]
    UnregisteredHook(String),
}

#[derive(Debug, Error)]
#[error("can't find the support directory in any of these places: {searched:?}")]
pub struct ResourceNotFoundError {
    pub searched: Vec<PathBuf>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("syntax error at {offset}: {message}")]
    Parse { offset: usize, message: String },
    #[error("{0}")]
    Runtime(String),
    #[error("interpreter failed: {0}")]
    Process(String),
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache blob is not readable: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("properties io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("properties file is not valid yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    ResourceNotFound(#[from] ResourceNotFoundError),
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no window is open")]
    NoWindow,
    #[error("the focussed tab is not a REPL")]
    NotRepl,
}

pub type Result<T> = std::result::Result<T, AppError>;
