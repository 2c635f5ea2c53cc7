use chrono::{DateTime, Utc};
use log::warn;

use crate::model::todo::{Difficulty, RecurringPattern, Todo};
use crate::ops::path::{
    MAX_TODO_DEPTH, find_by_path, is_valid_path, traverse, update_at_path,
};

/// Every operation here is a no-op on an invalid or stale path: the input
/// tree comes back unchanged and a warning is logged. The UI path is valid
/// in the normal case; the checks protect against stale references.

/// Next unique id: one past the highest id anywhere in the tree.
pub fn next_id(todos: &[Todo]) -> i64 {
    let mut max = 0;
    traverse(todos, &mut |todo, _, _| max = max.max(todo.id));
    max + 1
}

/// Append a new top-level todo.
pub fn add_top_level(mut todos: Vec<Todo>, text: &str, now: DateTime<Utc>) -> Vec<Todo> {
    let todo = Todo::new(next_id(&todos), text, now);
    todos.push(todo);
    todos
}

/// Flip completion on the addressed node and cascade the new state (and a
/// shared timestamp) through its whole subtree. Ancestors are the caller's
/// job; see [`propagate_completion`].
pub fn toggle_completion(
    todos: Vec<Todo>,
    id: i64,
    parent_path: &[i64],
    now: DateTime<Utc>,
) -> Vec<Todo> {
    if !parent_path.is_empty() && !is_valid_path(&todos, parent_path) {
        warn!("toggle: invalid parent path {parent_path:?}");
        return todos;
    }
    let mut path = parent_path.to_vec();
    path.push(id);
    update_at_path(todos, &path, |todo| {
        let completed = !todo.completed;
        todo.completed = completed;
        todo.completed_at = completed.then_some(now);
        set_subtree_completed(&mut todo.subtasks, completed, now);
    })
}

fn set_subtree_completed(subtasks: &mut [Todo], completed: bool, now: DateTime<Utc>) {
    for subtask in subtasks {
        subtask.completed = completed;
        subtask.completed_at = completed.then_some(now);
        set_subtree_completed(&mut subtask.subtasks, completed, now);
    }
}

/// Remove the node from its parent's (or the root) sequence. The caller must
/// re-run propagation: removing an incomplete child can complete the parent.
pub fn delete_todo(mut todos: Vec<Todo>, id: i64, parent_path: &[i64]) -> Vec<Todo> {
    if parent_path.is_empty() {
        todos.retain(|t| t.id != id);
        return todos;
    }
    if !is_valid_path(&todos, parent_path) {
        warn!("delete: invalid parent path {parent_path:?}");
        return todos;
    }
    update_at_path(todos, parent_path, |parent| {
        parent.subtasks.retain(|t| t.id != id)
    })
}

/// Append a fresh subtask under `parent_path`. Rejected at the depth limit
/// or on an unresolved path. A completed parent flips back to incomplete,
/// since it just gained an incomplete child.
pub fn add_subtask(
    todos: Vec<Todo>,
    parent_path: &[i64],
    text: &str,
    start_editing: bool,
    now: DateTime<Utc>,
) -> Vec<Todo> {
    if parent_path.is_empty() {
        warn!("add subtask: parent path required");
        return todos;
    }
    if parent_path.len() >= MAX_TODO_DEPTH {
        warn!("add subtask: maximum nesting depth ({MAX_TODO_DEPTH}) reached");
        return todos;
    }
    if !is_valid_path(&todos, parent_path) {
        warn!("add subtask: invalid parent path {parent_path:?}");
        return todos;
    }
    let mut subtask = Todo::new(next_id(&todos), text, now);
    subtask.is_editing = start_editing;
    update_at_path(todos, parent_path, |parent| {
        parent.subtasks.push(subtask);
        if parent.completed {
            parent.completed = false;
            parent.completed_at = None;
        }
    })
}

/// Insert a blank node in editing state immediately after `id` at the same
/// level. Same depth guard as [`add_subtask`].
pub fn add_sibling(
    mut todos: Vec<Todo>,
    id: i64,
    parent_path: &[i64],
    now: DateTime<Utc>,
) -> Vec<Todo> {
    if parent_path.len() >= MAX_TODO_DEPTH {
        warn!("add sibling: maximum nesting depth ({MAX_TODO_DEPTH}) reached");
        return todos;
    }
    let mut sibling = Todo::new(next_id(&todos), "", now);
    sibling.is_editing = true;

    if parent_path.is_empty() {
        let Some(idx) = todos.iter().position(|t| t.id == id) else {
            warn!("add sibling: todo {id} not found at top level");
            return todos;
        };
        todos.insert(idx + 1, sibling);
        return todos;
    }
    if !is_valid_path(&todos, parent_path) {
        warn!("add sibling: invalid parent path {parent_path:?}");
        return todos;
    }
    update_at_path(todos, parent_path, |parent| {
        if let Some(idx) = parent.subtasks.iter().position(|t| t.id == id) {
            parent.subtasks.insert(idx + 1, sibling);
        } else {
            warn!("add sibling: todo {id} not found under {parent_path:?}");
        }
    })
}

/// Deep-clone text and structure with fresh ids throughout; every level of
/// the clone starts incomplete. Metadata (due date, difficulty, recurrence,
/// focus) is intentionally not carried over. The clone lands right after the
/// original.
pub fn copy_todo(
    mut todos: Vec<Todo>,
    id: i64,
    parent_path: &[i64],
    now: DateTime<Utc>,
) -> Vec<Todo> {
    if parent_path.is_empty() {
        let Some(idx) = todos.iter().position(|t| t.id == id) else {
            warn!("copy: todo {id} not found at top level");
            return todos;
        };
        let mut counter = next_id(&todos);
        let copy = clone_with_fresh_ids(&todos[idx], &mut counter, now);
        todos.insert(idx + 1, copy);
        return todos;
    }
    let Some(parent) = find_by_path(&todos, parent_path) else {
        warn!("copy: invalid parent path {parent_path:?}");
        return todos;
    };
    let Some(idx) = parent.subtasks.iter().position(|t| t.id == id) else {
        warn!("copy: todo {id} not found under {parent_path:?}");
        return todos;
    };
    let mut counter = next_id(&todos);
    let copy = clone_with_fresh_ids(&parent.subtasks[idx], &mut counter, now);
    update_at_path(todos, parent_path, |parent| {
        parent.subtasks.insert(idx + 1, copy)
    })
}

fn clone_with_fresh_ids(todo: &Todo, counter: &mut i64, now: DateTime<Utc>) -> Todo {
    let id = *counter;
    *counter += 1;
    let mut clone = Todo::new(id, &todo.text, now);
    clone.subtasks = todo
        .subtasks
        .iter()
        .map(|subtask| clone_with_fresh_ids(subtask, counter, now))
        .collect();
    clone
}

/// Move `active_id` to the position currently held by `over_id`. Both must
/// live directly under `parent_path`; remove-then-insert, not a swap.
pub fn reorder(mut todos: Vec<Todo>, active_id: i64, over_id: i64, parent_path: &[i64]) -> Vec<Todo> {
    if active_id == over_id {
        return todos;
    }
    fn reorder_level(items: &mut Vec<Todo>, active_id: i64, over_id: i64) {
        let active = items.iter().position(|t| t.id == active_id);
        let over = items.iter().position(|t| t.id == over_id);
        let (Some(active), Some(over)) = (active, over) else {
            return;
        };
        let moved = items.remove(active);
        items.insert(over, moved);
    }
    if parent_path.is_empty() {
        reorder_level(&mut todos, active_id, over_id);
        return todos;
    }
    update_at_path(todos, parent_path, |parent| {
        reorder_level(&mut parent.subtasks, active_id, over_id)
    })
}

/// Replace the node's text (trimmed). Empty text meaning "delete" is policy
/// at the session layer, not here.
pub fn update_text(todos: Vec<Todo>, id: i64, parent_path: &[i64], text: &str) -> Vec<Todo> {
    with_node(todos, id, parent_path, "update text", |todo| {
        todo.text = text.trim().to_string()
    })
}

pub fn set_editing(todos: Vec<Todo>, id: i64, parent_path: &[i64], editing: bool) -> Vec<Todo> {
    with_node(todos, id, parent_path, "set editing", |todo| {
        todo.is_editing = editing
    })
}

pub fn set_due_date(
    todos: Vec<Todo>,
    id: i64,
    parent_path: &[i64],
    due: Option<chrono::NaiveDate>,
) -> Vec<Todo> {
    with_node(todos, id, parent_path, "set due date", |todo| {
        todo.due_date = due
    })
}

pub fn set_difficulty(
    todos: Vec<Todo>,
    id: i64,
    parent_path: &[i64],
    difficulty: Option<Difficulty>,
) -> Vec<Todo> {
    with_node(todos, id, parent_path, "set difficulty", |todo| {
        todo.difficulty = difficulty
    })
}

/// Set or clear the recurrence rule; `is_recurring` co-occurs with it.
pub fn set_recurring(
    todos: Vec<Todo>,
    id: i64,
    parent_path: &[i64],
    pattern: Option<RecurringPattern>,
) -> Vec<Todo> {
    with_node(todos, id, parent_path, "set recurring", |todo| {
        todo.is_recurring = pattern.is_some();
        todo.recurring_pattern = pattern;
    })
}

fn with_node(
    todos: Vec<Todo>,
    id: i64,
    parent_path: &[i64],
    op: &str,
    f: impl FnOnce(&mut Todo),
) -> Vec<Todo> {
    if !parent_path.is_empty() && !is_valid_path(&todos, parent_path) {
        warn!("{op}: invalid parent path {parent_path:?}");
        return todos;
    }
    let mut path = parent_path.to_vec();
    path.push(id);
    update_at_path(todos, &path, f)
}

/// True iff `subtasks` is non-empty and every entry is recursively complete.
pub fn all_subtasks_completed(subtasks: &[Todo]) -> bool {
    if subtasks.is_empty() {
        return false;
    }
    subtasks.iter().all(|subtask| {
        if subtask.subtasks.is_empty() {
            subtask.completed
        } else {
            subtask.completed && all_subtasks_completed(&subtask.subtasks)
        }
    })
}

/// Re-derive `completed` on every ancestor of `changed_path`, bottom-up to
/// the root. Each level is recomputed even when a lower one did not change.
pub fn propagate_completion(
    mut todos: Vec<Todo>,
    changed_path: &[i64],
    now: DateTime<Utc>,
) -> Vec<Todo> {
    if changed_path.len() <= 1 {
        return todos;
    }
    for depth in (1..changed_path.len()).rev() {
        todos = update_at_path(todos, &changed_path[..depth], |parent| {
            let derived = all_subtasks_completed(&parent.subtasks);
            if parent.completed != derived {
                parent.completed = derived;
                parent.completed_at = derived.then_some(now);
            }
        });
    }
    todos
}

/// Bulk-remove every completed node, recursively.
pub fn clear_completed(todos: Vec<Todo>) -> Vec<Todo> {
    todos
        .into_iter()
        .filter(|t| !t.completed)
        .map(|mut t| {
            t.subtasks = clear_completed(std::mem::take(&mut t.subtasks));
            t
        })
        .collect()
}
