use serde::Serialize;

use crate::model::timer::TimerSession;
use crate::model::todo::Todo;
use crate::ops::focus::FocusEntry;
use crate::ops::path::TodoPath;
use crate::ops::recur::display_pattern;
use crate::ops::search::SearchHit;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct FocusJson {
    pub priority: u8,
    pub id: i64,
    pub text: String,
    pub path: TodoPath,
}

#[derive(Serialize)]
pub struct SearchHitJson {
    pub id: i64,
    pub text: String,
    pub path: TodoPath,
}

pub fn search_hit_to_json(hit: &SearchHit) -> SearchHitJson {
    SearchHitJson {
        id: hit.id,
        text: hit.text.clone(),
        path: hit.path.clone(),
    }
}

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

/// One line per todo, two-space indent per level:
/// `- [x] 12 buy milk *1 [hard] (due 2024-01-12) (recurs daily)`
pub fn render_tree(todos: &[Todo]) -> String {
    let mut out = String::new();
    render_level(todos, 0, &mut out);
    out
}

fn render_level(todos: &[Todo], level: usize, out: &mut String) {
    for todo in todos {
        out.push_str(&"  ".repeat(level));
        out.push_str(&render_line(todo));
        out.push('\n');
        render_level(&todo.subtasks, level + 1, out);
    }
}

pub fn render_line(todo: &Todo) -> String {
    let checkbox = if todo.completed { 'x' } else { ' ' };
    let mut line = format!("- [{}] {} {}", checkbox, todo.id, todo.text);
    if let Some(priority) = todo.focus_priority {
        line.push_str(&format!(" *{priority}"));
    }
    if let Some(difficulty) = todo.difficulty {
        line.push_str(&format!(" [{}]", difficulty.label()));
    }
    if let Some(due) = todo.due_date {
        line.push_str(&format!(" (due {due})"));
    }
    if let Some(pattern) = &todo.recurring_pattern {
        line.push_str(&format!(" (recurs {})", display_pattern(pattern)));
    }
    line
}

/// `1. buy milk (12)` per focus rank.
pub fn render_focus_list(entries: &[FocusEntry], todos: &[Todo]) -> String {
    let mut out = String::new();
    for entry in entries {
        let text = crate::ops::path::find_by_path(todos, &entry.path)
            .map(|t| t.text.as_str())
            .unwrap_or("?");
        out.push_str(&format!("{}. {} ({})\n", entry.priority, text, entry.id));
    }
    out
}

/// Breadcrumb for nested todos: `project > draft > outline`.
pub fn render_breadcrumb(texts: &[String]) -> String {
    texts.join(" > ")
}

pub fn render_session_line(session: &TimerSession) -> String {
    let minutes = session.duration / 60_000;
    let seconds = (session.duration % 60_000) / 1000;
    format!(
        "{}  {}  {}m{:02}s  {} ({})",
        session.date,
        session.started_at.format("%H:%M"),
        minutes,
        seconds,
        session.todo_text,
        session.id
    )
}

/// Human duration: `1h 23m` / `45m` / `0m`.
pub fn render_duration_ms(ms: i64) -> String {
    let minutes = ms / 60_000;
    if minutes >= 60 {
        format!("{}h {}m", minutes / 60, minutes % 60)
    } else {
        format!("{minutes}m")
    }
}
