use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::model::config::WorkspaceConfig;

/// Error type for workspace discovery and loading
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("not a twig workspace: no twig/ directory found")]
    NotAWorkspace,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse twig.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("could not serialize twig.toml: {0}")]
    ConfigSerializeError(#[from] toml::ser::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A discovered workspace: the root directory, the `twig/` data directory
/// holding the JSON stores, and the parsed config.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub data_dir: PathBuf,
    pub config: WorkspaceConfig,
}

impl Workspace {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.config.save.debounce_ms)
    }
}

/// Discover the workspace by walking up from the given directory, looking
/// for a `twig/` subdirectory with a `twig.toml`.
pub fn discover_workspace(start: &Path) -> Result<PathBuf, WorkspaceError> {
    let mut current = start.to_path_buf();
    loop {
        let data_dir = current.join("twig");
        if data_dir.is_dir() && data_dir.join("twig.toml").exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(WorkspaceError::NotAWorkspace);
        }
    }
}

/// Load the workspace config from the given root directory.
pub fn load_workspace(root: &Path) -> Result<Workspace, WorkspaceError> {
    let data_dir = root.join("twig");
    if !data_dir.is_dir() {
        return Err(WorkspaceError::NotAWorkspace);
    }

    let config_path = data_dir.join("twig.toml");
    let config_text = fs::read_to_string(&config_path).map_err(|e| WorkspaceError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    let config: WorkspaceConfig = toml::from_str(&config_text)?;

    Ok(Workspace {
        root: root.to_path_buf(),
        data_dir,
        config,
    })
}
