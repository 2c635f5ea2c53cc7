use std::path::{Path, PathBuf};

use crate::io::store::{StoreError, read_array, write_array_with_backup};
use crate::model::timebox::TimeboxItem;

pub const TIMEBOXES_FILE: &str = "timeboxes.json";

pub fn timeboxes_path(data_dir: &Path) -> PathBuf {
    data_dir.join(TIMEBOXES_FILE)
}

/// Load the whole calendar; a missing file is created empty.
pub fn load_timeboxes(data_dir: &Path) -> Result<Vec<TimeboxItem>, StoreError> {
    read_array(&timeboxes_path(data_dir))
}

/// Overwrite the whole calendar after backing up the prior version.
pub fn save_timeboxes(data_dir: &Path, timeboxes: &[TimeboxItem]) -> Result<(), StoreError> {
    write_array_with_backup(&timeboxes_path(data_dir), timeboxes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::backup_path;
    use std::fs;
    use tempfile::TempDir;

    fn timebox(id: &str, start: &str) -> TimeboxItem {
        TimeboxItem {
            id: id.into(),
            todo_id: 1,
            start_time: start.into(),
            duration: 30,
            date: "2024-01-10".parse().unwrap(),
        }
    }

    #[test]
    fn load_missing_creates_empty_store() {
        let dir = TempDir::new().unwrap();
        assert!(load_timeboxes(dir.path()).unwrap().is_empty());
        assert!(timeboxes_path(dir.path()).exists());
    }

    #[test]
    fn save_round_trips_and_backs_up() {
        let dir = TempDir::new().unwrap();
        save_timeboxes(dir.path(), &[timebox("a", "09:00")]).unwrap();
        save_timeboxes(dir.path(), &[timebox("b", "10:00")]).unwrap();

        let loaded = load_timeboxes(dir.path()).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "b");

        let backup = fs::read_to_string(backup_path(&timeboxes_path(dir.path()))).unwrap();
        let prior: Vec<TimeboxItem> = serde_json::from_str(&backup).unwrap();
        assert_eq!(prior[0].id, "a");
    }

    #[test]
    fn non_array_contents_are_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(timeboxes_path(dir.path()), r#"{"not":"an array"}"#).unwrap();
        assert!(load_timeboxes(dir.path()).is_err());
    }
}
