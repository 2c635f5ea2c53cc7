use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A scheduled block on the timeboxing calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeboxItem {
    pub id: String,
    pub todo_id: i64,
    /// HH:MM, 24-hour
    pub start_time: String,
    /// Minutes
    pub duration: u32,
    pub date: NaiveDate,
}

impl TimeboxItem {
    /// Minutes since midnight, for sorting and overlap checks.
    /// None if `start_time` is not a valid HH:MM string.
    pub fn start_minutes(&self) -> Option<u32> {
        let (h, m) = self.start_time.split_once(':')?;
        let h: u32 = h.parse().ok()?;
        let m: u32 = m.parse().ok()?;
        if h > 23 || m > 59 {
            return None;
        }
        Some(h * 60 + m)
    }
}

/// Validate an HH:MM start time from user input.
pub fn parse_start_time(s: &str) -> Option<String> {
    let (h, m) = s.split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(format!("{h:02}:{m:02}"))
}
