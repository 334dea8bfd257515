use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A loaded bundle as seen by the environment shadow. Discovery and loading
/// happen elsewhere; only the declared preferences matter here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bundle {
    pub name: String,
    pub dir: PathBuf,
    #[serde(default)]
    pub preferences: Vec<Preference>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preference {
    pub name: String,
    #[serde(default)]
    pub settings: PreferenceSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferenceSettings {
    #[serde(
        default,
        rename = "shellVariables",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub shell_variables: Vec<ShellVariable>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellVariable {
    pub name: String,
    pub value: String,
}

impl Bundle {
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            preferences: Vec::new(),
        }
    }

    pub fn support_dir(&self) -> PathBuf {
        self.dir.join("Support")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Shell variables across all preferences, in declaration order.
    pub fn shell_variables(&self) -> impl Iterator<Item = &ShellVariable> {
        self.preferences
            .iter()
            .flat_map(|pref| pref.settings.shell_variables.iter())
    }

    pub fn with_shell_variable(mut self, name: &str, value: &str) -> Self {
        let var = ShellVariable {
            name: name.to_string(),
            value: value.to_string(),
        };
        match self.preferences.first_mut() {
            Some(pref) => pref.settings.shell_variables.push(var),
            None => self.preferences.push(Preference {
                name: "Shell Variables".to_string(),
                settings: PreferenceSettings {
                    shell_variables: vec![var],
                },
            }),
        }
        self
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/bundle.rs"]
mod tests;
