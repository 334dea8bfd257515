//! Service adapters: OS specific implementations (filesystem, paths).

pub mod cache;
pub mod paths;
pub mod properties;
pub mod support;

pub use cache::with_cache;
pub use paths::{default_root, AppPaths};
pub use properties::Properties;
pub use support::{default_search_paths, locate};
