use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::io::store::{StoreError, read_array, write_array};
use crate::model::timer::{TimerSession, TimerSessionUpdate};

pub const TIMER_SESSIONS_FILE: &str = "timer-sessions.json";

pub fn sessions_path(data_dir: &Path) -> PathBuf {
    data_dir.join(TIMER_SESSIONS_FILE)
}

/// All sessions, newest start first (the stored order).
pub fn load_sessions(data_dir: &Path) -> Result<Vec<TimerSession>, StoreError> {
    read_array(&sessions_path(data_dir))
}

/// Sessions whose `date` matches exactly.
pub fn sessions_for_date(data_dir: &Path, date: NaiveDate) -> Result<Vec<TimerSession>, StoreError> {
    let sessions = load_sessions(data_dir)?;
    Ok(sessions.into_iter().filter(|s| s.date == date).collect())
}

/// Append one session and re-sort the whole file by `started_at` descending.
pub fn append_session(data_dir: &Path, session: TimerSession) -> Result<(), StoreError> {
    let mut sessions = load_sessions(data_dir)?;
    sessions.push(session);
    sessions.sort_by(|a, b| b.started_at.cmp(&a.started_at));
    write_array(&sessions_path(data_dir), &sessions)
}

/// Merge updates into the session with the given id.
pub fn update_session(
    data_dir: &Path,
    id: &str,
    updates: TimerSessionUpdate,
) -> Result<(), StoreError> {
    let mut sessions = load_sessions(data_dir)?;
    let session = sessions
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(|| StoreError::NotFound(format!("timer session {id}")))?;
    session.apply(updates);
    write_array(&sessions_path(data_dir), &sessions)
}

/// Remove the session with the given id.
pub fn delete_session(data_dir: &Path, id: &str) -> Result<(), StoreError> {
    let mut sessions = load_sessions(data_dir)?;
    let before = sessions.len();
    sessions.retain(|s| s.id != id);
    if sessions.len() == before {
        return Err(StoreError::NotFound(format!("timer session {id}")));
    }
    write_array(&sessions_path(data_dir), &sessions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session(id: &str, started_at: &str, date: &str) -> TimerSession {
        TimerSession {
            id: id.into(),
            todo_id: 1,
            todo_text: "task".into(),
            todo_path: Vec::new(),
            started_at: started_at.parse().unwrap(),
            ended_at: None,
            duration: 60_000,
            date: date.parse().unwrap(),
        }
    }

    #[test]
    fn append_keeps_newest_first() {
        let dir = TempDir::new().unwrap();
        append_session(dir.path(), session("a", "2024-01-10T09:00:00Z", "2024-01-10")).unwrap();
        append_session(dir.path(), session("b", "2024-01-10T12:00:00Z", "2024-01-10")).unwrap();
        append_session(dir.path(), session("c", "2024-01-10T10:00:00Z", "2024-01-10")).unwrap();

        let ids: Vec<String> = load_sessions(dir.path())
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn filter_by_exact_date() {
        let dir = TempDir::new().unwrap();
        append_session(dir.path(), session("a", "2024-01-10T09:00:00Z", "2024-01-10")).unwrap();
        append_session(dir.path(), session("b", "2024-01-11T09:00:00Z", "2024-01-11")).unwrap();

        let found = sessions_for_date(dir.path(), "2024-01-10".parse().unwrap()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "a");
    }

    #[test]
    fn update_merges_into_matching_session() {
        let dir = TempDir::new().unwrap();
        append_session(dir.path(), session("a", "2024-01-10T09:00:00Z", "2024-01-10")).unwrap();

        update_session(
            dir.path(),
            "a",
            TimerSessionUpdate {
                duration: Some(120_000),
                ended_at: Some("2024-01-10T09:02:00Z".parse().unwrap()),
                ..Default::default()
            },
        )
        .unwrap();

        let sessions = load_sessions(dir.path()).unwrap();
        assert_eq!(sessions[0].duration, 120_000);
        assert!(sessions[0].ended_at.is_some());
        assert_eq!(sessions[0].todo_text, "task");
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = update_session(dir.path(), "nope", TimerSessionUpdate::default()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn delete_removes_exactly_one() {
        let dir = TempDir::new().unwrap();
        append_session(dir.path(), session("a", "2024-01-10T09:00:00Z", "2024-01-10")).unwrap();
        append_session(dir.path(), session("b", "2024-01-10T10:00:00Z", "2024-01-10")).unwrap();

        delete_session(dir.path(), "a").unwrap();
        let sessions = load_sessions(dir.path()).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, "b");

        assert!(matches!(
            delete_session(dir.path(), "a").unwrap_err(),
            StoreError::NotFound(_)
        ));
    }
}
