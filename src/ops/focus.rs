use log::warn;

use crate::model::todo::Todo;
use crate::ops::path::{TodoPath, traverse, update_at_path};

/// Global cap on focused todos.
pub const MAX_FOCUS_TODOS: usize = 5;

/// Snapshot of one focus holder, in priority order.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusEntry {
    pub path: TodoPath,
    pub id: i64,
    pub priority: u8,
    pub completed: bool,
}

/// Every focus holder in the tree, ordered by priority ascending.
pub fn focus_entries(todos: &[Todo]) -> Vec<FocusEntry> {
    let mut entries = Vec::new();
    traverse(todos, &mut |todo, path, _| {
        if let Some(priority) = todo.focus_priority {
            entries.push(FocusEntry {
                path: path.to_vec(),
                id: todo.id,
                priority,
                completed: todo.completed,
            });
        }
    });
    entries.sort_by_key(|e| e.priority);
    entries
}

/// Clear an existing focus (and close the gap), or append the node at the
/// end of the ranking. A full focus list is a logged no-op.
pub fn toggle_focus(todos: Vec<Todo>, id: i64, parent_path: &[i64]) -> Vec<Todo> {
    let mut path = parent_path.to_vec();
    path.push(id);

    let entries = focus_entries(&todos);
    if entries.iter().any(|e| e.path == path) {
        let cleared = update_at_path(todos, &path, |todo| todo.focus_priority = None);
        return renumber_focus_priorities(cleared);
    }

    if entries.len() >= MAX_FOCUS_TODOS {
        warn!("focus list is full ({MAX_FOCUS_TODOS} todos)");
        return todos;
    }
    let next = entries.len() as u8 + 1;
    update_at_path(todos, &path, |todo| todo.focus_priority = Some(next))
}

/// Re-establish the dense 1..N ranking: completed holders lose their
/// priority, the rest renumber preserving relative order. Run after any
/// completion event.
pub fn renumber_focus_priorities(mut todos: Vec<Todo>) -> Vec<Todo> {
    let entries = focus_entries(&todos);
    for entry in entries.iter().filter(|e| e.completed) {
        todos = update_at_path(todos, &entry.path, |todo| todo.focus_priority = None);
    }
    for (i, entry) in entries.iter().filter(|e| !e.completed).enumerate() {
        let priority = (i + 1) as u8;
        todos = update_at_path(todos, &entry.path, |todo| {
            todo.focus_priority = Some(priority)
        });
    }
    todos
}

/// Read-only projection of the tree down to its focused nodes: a focused
/// node keeps its whole subtree; an unfocused ancestor is kept only as far
/// as needed to reach focused descendants, with its priority cleared. Top
/// level ordered by priority, unfocused carriers after, in original order.
pub fn extract_focus_tree(todos: &[Todo]) -> Vec<Todo> {
    fn process(todos: &[Todo]) -> Vec<Todo> {
        let mut kept = Vec::new();
        for todo in todos {
            if todo.focus_priority.is_some() {
                kept.push(todo.clone());
            } else if !todo.subtasks.is_empty() {
                let focused_children = process(&todo.subtasks);
                if !focused_children.is_empty() {
                    let mut carrier = todo.clone();
                    carrier.subtasks = focused_children;
                    kept.push(carrier);
                }
            }
        }
        kept
    }

    let mut top = process(todos);
    top.sort_by_key(|t| t.focus_priority.map(i64::from).unwrap_or(i64::MAX));
    top
}
