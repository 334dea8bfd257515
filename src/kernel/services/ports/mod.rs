//! Service ports: data contracts shared with external collaborators.

pub mod bundle;

pub use bundle::{Bundle, Preference, PreferenceSettings, ShellVariable};
