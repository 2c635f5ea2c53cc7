use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::model::todo::Todo;
use crate::ops::path::{count_matching, max_depth};

/// Headline numbers for the whole tree.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    pub total: usize,
    pub completed: usize,
    pub completed_today: usize,
    pub focus_count: usize,
    pub max_depth: usize,
}

/// Compute tree stats. `today` is the caller's local date.
pub fn tree_stats(todos: &[Todo], today: NaiveDate) -> TreeStats {
    TreeStats {
        total: count_matching(todos, |_| true),
        completed: count_matching(todos, |t| t.completed),
        completed_today: completed_on(todos, today),
        focus_count: count_matching(todos, |t| t.focus_priority.is_some()),
        max_depth: max_depth(todos),
    }
}

/// Todos whose completion landed on the given local date.
pub fn completed_on(todos: &[Todo], date: NaiveDate) -> usize {
    count_matching(todos, |t| {
        t.completed
            && t.completed_at
                .map(|at| at.with_timezone(&Local).date_naive() == date)
                .unwrap_or(false)
    })
}
