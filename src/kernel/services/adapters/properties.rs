//! ConfigBus 子树的 YAML 持久化
//!
//! 文件格式：`{ name, version, data: { <相对路径>: <值> } }`

use crate::core::{ConfigBus, PersistError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
struct PropertiesFile {
    name: String,
    version: String,
    #[serde(default)]
    data: BTreeMap<String, Value>,
}

pub struct Properties {
    name: String,
    version: String,
    prefix: String,
    path: PathBuf,
}

impl Properties {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        prefix: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            prefix: prefix.into(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file into the bus below the prefix. Returns how many
    /// entries were loaded; a missing file loads nothing.
    pub fn load(&self, bus: &mut ConfigBus) -> Result<usize, PersistError> {
        if !self.path.exists() {
            return Ok(0);
        }
        let text = std::fs::read_to_string(&self.path)?;
        let file: PropertiesFile = serde_yaml::from_str(&text)?;
        if file.version != self.version {
            tracing::warn!(
                path = %self.path.display(),
                found = %file.version,
                expected = %self.version,
                "properties version mismatch"
            );
        }
        let count = file.data.len();
        for (key, value) in file.data {
            bus.set(&format!("{}/{}", self.prefix, key), value);
        }
        Ok(count)
    }

    pub fn save(&self, bus: &ConfigBus) -> Result<(), PersistError> {
        let file = PropertiesFile {
            name: self.name.clone(),
            version: self.version.clone(),
            data: bus.subtree(&self.prefix).into_iter().collect(),
        };
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_yaml::to_string(&file)?)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/properties.rs"]
mod tests;
