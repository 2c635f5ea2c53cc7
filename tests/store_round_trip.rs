//! Wire-format round-trips for the flat-file stores: parse a realistic
//! todos.json, save it back, and verify nothing is lost or renamed.

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use twig::io::todo_store::{load_todos, save_todos, todos_path};
use twig::model::todo::{Difficulty, RecurringType, Todo};

const FULL_FEATURED: &str = r#"[
  {
    "id": 1,
    "text": "ship the quarterly report",
    "completed": false,
    "createdAt": "2024-01-08T10:00:00Z",
    "focusPriority": 1,
    "dueDate": "2024-01-15",
    "difficulty": "hard",
    "subtasks": [
      {
        "id": 2,
        "text": "collect numbers",
        "completed": true,
        "createdAt": "2024-01-08T10:01:00Z",
        "completedAt": "2024-01-09T15:30:00Z",
        "subtasks": [
          {
            "id": 3,
            "text": "export spreadsheet",
            "completed": true,
            "createdAt": "2024-01-08T10:02:00Z",
            "completedAt": "2024-01-09T15:30:00Z"
          }
        ]
      },
      { "id": 4, "text": "write summary", "completed": false, "createdAt": "2024-01-08T10:03:00Z" }
    ]
  },
  {
    "id": 5,
    "text": "water plants",
    "completed": false,
    "createdAt": "2024-01-10T08:00:00Z",
    "isRecurring": true,
    "recurringPattern": { "type": "weekly", "interval": 1, "daysOfWeek": [1, 4], "nextDueDate": "2024-01-11" },
    "dueDate": "2024-01-11",
    "parentRecurringId": 99
  }
]"#;

fn load_fixture(dir: &TempDir) -> Vec<Todo> {
    fs::write(todos_path(dir.path()), FULL_FEATURED).unwrap();
    load_todos(dir.path()).unwrap()
}

#[test]
fn full_featured_tree_parses() {
    let dir = TempDir::new().unwrap();
    let todos = load_fixture(&dir);

    assert_eq!(todos.len(), 2);
    let report = &todos[0];
    assert_eq!(report.focus_priority, Some(1));
    assert_eq!(report.difficulty, Some(Difficulty::Hard));
    assert_eq!(report.due_date, Some("2024-01-15".parse().unwrap()));
    assert_eq!(report.subtasks.len(), 2);
    assert!(report.subtasks[0].completed);
    assert_eq!(report.subtasks[0].subtasks[0].id, 3);

    let plants = &todos[1];
    assert!(plants.is_recurring);
    let pattern = plants.recurring_pattern.as_ref().unwrap();
    assert_eq!(pattern.kind, RecurringType::Weekly);
    assert_eq!(pattern.days_of_week, Some(vec![1, 4]));
    assert_eq!(pattern.next_due_date, Some("2024-01-11".parse().unwrap()));
    assert_eq!(plants.parent_recurring_id, Some(99));
}

#[test]
fn save_and_reload_is_lossless() {
    let dir = TempDir::new().unwrap();
    let todos = load_fixture(&dir);

    save_todos(dir.path(), &todos).unwrap();
    let reloaded = load_todos(dir.path()).unwrap();
    assert_eq!(reloaded, todos);
}

#[test]
fn saved_json_keeps_the_camel_case_wire_format() {
    let dir = TempDir::new().unwrap();
    let todos = load_fixture(&dir);
    save_todos(dir.path(), &todos).unwrap();

    let text = fs::read_to_string(todos_path(dir.path())).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value[0]["createdAt"], "2024-01-08T10:00:00Z");
    assert_eq!(value[0]["focusPriority"], 1);
    assert_eq!(value[0]["dueDate"], "2024-01-15");
    assert_eq!(value[1]["recurringPattern"]["type"], "weekly");
    assert_eq!(value[1]["recurringPattern"]["daysOfWeek"], serde_json::json!([1, 4]));
    assert_eq!(value[1]["parentRecurringId"], 99);
    // snake_case must never leak into the stored files
    assert!(!text.contains("created_at"));
    assert!(!text.contains("focus_priority"));
}

#[test]
fn unknown_legacy_fields_are_tolerated() {
    let dir = TempDir::new().unwrap();
    fs::write(
        todos_path(dir.path()),
        r#"[{"id":1,"text":"old","completed":false,"createdAt":"2024-01-08T10:00:00Z","timeSpent":120,"isTimerRunning":false}]"#,
    )
    .unwrap();
    let todos = load_todos(dir.path()).unwrap();
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].text, "old");
}
