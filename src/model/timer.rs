use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One recorded work interval against a todo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSession {
    pub id: String,
    pub todo_id: i64,
    pub todo_text: String,
    /// Ancestor texts for nested todos, root first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub todo_path: Vec<String>,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    /// Milliseconds
    pub duration: i64,
    /// Grouping key, local date of the start
    pub date: NaiveDate,
}

/// Partial update merged into a stored session.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSessionUpdate {
    pub todo_text: Option<String>,
    pub ended_at: Option<DateTime<Utc>>,
    pub duration: Option<i64>,
}

impl TimerSession {
    pub fn apply(&mut self, updates: TimerSessionUpdate) {
        if let Some(text) = updates.todo_text {
            self.todo_text = text;
        }
        if let Some(ended) = updates.ended_at {
            self.ended_at = Some(ended);
        }
        if let Some(duration) = updates.duration {
            self.duration = duration;
        }
    }
}

/// The currently running timer, held in UI state (not in the session log).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveTimer {
    pub todo_id: i64,
    pub todo_text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub todo_path: Vec<String>,
    pub started_at: DateTime<Utc>,
}

/// Aggregated time for one todo within a day.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoTimeBreakdown {
    pub todo_id: i64,
    pub todo_text: String,
    pub total_duration: i64,
    pub session_count: usize,
}

/// Per-day totals with a per-todo breakdown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTimerStats {
    pub date: NaiveDate,
    pub total_duration: i64,
    pub session_count: usize,
    pub breakdown: Vec<TodoTimeBreakdown>,
}

/// Aggregate the sessions of a single day. The breakdown keeps todos in
/// first-seen order.
pub fn daily_stats(sessions: &[TimerSession], date: NaiveDate) -> DailyTimerStats {
    let mut total_duration = 0i64;
    let mut session_count = 0usize;
    let mut by_todo: IndexMap<i64, TodoTimeBreakdown> = IndexMap::new();

    for session in sessions.iter().filter(|s| s.date == date) {
        total_duration += session.duration;
        session_count += 1;
        by_todo
            .entry(session.todo_id)
            .and_modify(|b| {
                b.total_duration += session.duration;
                b.session_count += 1;
            })
            .or_insert_with(|| TodoTimeBreakdown {
                todo_id: session.todo_id,
                todo_text: session.todo_text.clone(),
                total_duration: session.duration,
                session_count: 1,
            });
    }

    DailyTimerStats {
        date,
        total_duration,
        session_count,
        breakdown: by_todo.into_values().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: &str, todo_id: i64, date: &str, duration: i64) -> TimerSession {
        TimerSession {
            id: id.into(),
            todo_id,
            todo_text: format!("todo {todo_id}"),
            todo_path: Vec::new(),
            started_at: "2024-01-10T09:00:00Z".parse().unwrap(),
            ended_at: None,
            duration,
            date: date.parse().unwrap(),
        }
    }

    #[test]
    fn daily_stats_groups_by_todo_in_first_seen_order() {
        let sessions = vec![
            session("a", 2, "2024-01-10", 1000),
            session("b", 1, "2024-01-10", 2000),
            session("c", 2, "2024-01-10", 500),
            session("d", 1, "2024-01-11", 9000), // other day, excluded
        ];

        let stats = daily_stats(&sessions, "2024-01-10".parse().unwrap());
        assert_eq!(stats.total_duration, 3500);
        assert_eq!(stats.session_count, 3);
        assert_eq!(stats.breakdown.len(), 2);
        assert_eq!(stats.breakdown[0].todo_id, 2);
        assert_eq!(stats.breakdown[0].total_duration, 1500);
        assert_eq!(stats.breakdown[0].session_count, 2);
        assert_eq!(stats.breakdown[1].todo_id, 1);
        assert_eq!(stats.breakdown[1].total_duration, 2000);
    }

    #[test]
    fn apply_merges_only_provided_fields() {
        let mut s = session("a", 1, "2024-01-10", 1000);
        s.apply(TimerSessionUpdate {
            duration: Some(4000),
            ..Default::default()
        });
        assert_eq!(s.duration, 4000);
        assert_eq!(s.todo_text, "todo 1");
        assert!(s.ended_at.is_none());
    }
}
