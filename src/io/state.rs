use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::timer::ActiveTimer;

/// Persisted UI state (written to .state.json). This lives outside the todo
/// tree on purpose: the tree library stays a pure core with no hidden state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiState {
    /// Which view is showing ("tree", "focus", "today")
    #[serde(default)]
    pub view: String,
    /// Set of expanded todo ids
    #[serde(default)]
    pub expanded: HashSet<i64>,
    #[serde(default = "default_true")]
    pub show_completed: bool,
    #[serde(default)]
    pub show_only_focus: bool,
    /// The running timer, if any
    #[serde(default)]
    pub active_timer: Option<ActiveTimer>,
}

impl Default for UiState {
    fn default() -> Self {
        UiState {
            view: String::new(),
            expanded: HashSet::new(),
            show_completed: true,
            show_only_focus: false,
            active_timer: None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Read .state.json from the data directory
pub fn read_ui_state(data_dir: &Path) -> Option<UiState> {
    let path = data_dir.join(".state.json");
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the data directory
pub fn write_ui_state(data_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let path = data_dir.join(".state.json");
    let content = serde_json::to_string_pretty(state)?;
    fs::write(&path, content)
}
