use crate::core::ResourceNotFoundError;
use std::path::PathBuf;

/// Where the shared support tooling (TextMate `Support/` tree) is looked for.
pub fn default_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("/usr/local/share/textmate"),
        PathBuf::from("/usr/share/textmate"),
    ];
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("../textmate")))
    {
        paths.push(dir);
    }
    paths
}

pub fn locate(search: &[PathBuf]) -> Result<PathBuf, ResourceNotFoundError> {
    search
        .iter()
        .find(|dir| dir.is_dir())
        .cloned()
        .ok_or_else(|| ResourceNotFoundError {
            searched: search.to_vec(),
        })
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/support.rs"]
mod tests;
