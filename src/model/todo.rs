use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Task difficulty rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn parse_label(s: &str) -> Option<Difficulty> {
        match s {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Cycle: none → easy → normal → hard → none
    pub fn cycle(current: Option<Difficulty>) -> Option<Difficulty> {
        match current {
            None => Some(Difficulty::Easy),
            Some(Difficulty::Easy) => Some(Difficulty::Normal),
            Some(Difficulty::Normal) => Some(Difficulty::Hard),
            Some(Difficulty::Hard) => None,
        }
    }
}

/// How a recurring todo repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringType {
    Daily,
    Weekdays,
    Weekly,
    Monthly,
    Custom,
}

/// A recurrence rule attached to a todo.
///
/// `days_of_week` uses 0 = Sunday .. 6 = Saturday, matching the stored
/// JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringPattern {
    #[serde(rename = "type")]
    pub kind: RecurringType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_due_date: Option<NaiveDate>,
}

/// A single todo node. Subtasks nest recursively up to the depth limit.
///
/// Field names serialize as camelCase so the on-disk JSON matches the
/// historical `todos.json` format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique across the whole tree, never reused
    pub id: i64,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    /// Set exactly when `completed` flips true, cleared when it flips back
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Rank 1..=5; at most five holders tree-wide, dense among holders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_pattern: Option<RecurringPattern>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_recurring: bool,
    /// Root of the recurring chain this instance was generated from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_recurring_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<Todo>,

    /// Transient editing flag, never persisted
    #[serde(skip)]
    pub is_editing: bool,
}

fn is_false(v: &bool) -> bool {
    !*v
}

impl Todo {
    /// Create a new incomplete todo with the given id and trimmed text.
    pub fn new(id: i64, text: &str, now: DateTime<Utc>) -> Self {
        Todo {
            id,
            text: text.trim().to_string(),
            completed: false,
            created_at: now,
            completed_at: None,
            focus_priority: None,
            due_date: None,
            difficulty: None,
            recurring_pattern: None,
            is_recurring: false,
            parent_recurring_id: None,
            subtasks: Vec::new(),
            is_editing: false,
        }
    }
}
