//! 数据模型层

pub mod document;
pub mod window;

pub use document::{slice_to_cow, Document};
pub use window::{Pane, Tab, TabId, TabKind, Window, WindowId};
