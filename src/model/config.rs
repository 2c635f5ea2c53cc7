use serde::{Deserialize, Serialize};

/// Configuration from twig.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub workspace: WorkspaceInfo,
    #[serde(default)]
    pub save: SaveConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceInfo {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveConfig {
    /// Quiet period before a debounced write hits disk
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for SaveConfig {
    fn default() -> Self {
        SaveConfig {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_gets_defaults() {
        let config: WorkspaceConfig = toml::from_str(
            r#"
[workspace]
name = "home"
"#,
        )
        .unwrap();
        assert_eq!(config.workspace.name, "home");
        assert_eq!(config.save.debounce_ms, 500);
    }

    #[test]
    fn debounce_override() {
        let config: WorkspaceConfig = toml::from_str(
            r#"
[workspace]
name = "home"

[save]
debounce_ms = 50
"#,
        )
        .unwrap();
        assert_eq!(config.save.debounce_ms, 50);
    }
}
