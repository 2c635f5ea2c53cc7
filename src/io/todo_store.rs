use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::io::store::{StoreError, read_array, write_array_with_backup};
use crate::model::todo::Todo;
use crate::ops::path::{MAX_TODO_DEPTH, traverse};

pub const TODOS_FILE: &str = "todos.json";

pub fn todos_path(data_dir: &Path) -> PathBuf {
    data_dir.join(TODOS_FILE)
}

/// Load the whole tree. A missing file is created empty. The parsed tree is
/// schema-checked; a failure rejects this load only and never touches
/// whatever the caller already holds in memory.
pub fn load_todos(data_dir: &Path) -> Result<Vec<Todo>, StoreError> {
    let todos = read_array(&todos_path(data_dir))?;
    validate_tree(&todos)?;
    Ok(todos)
}

/// Persist the whole tree: validate, back up the prior file, then write.
pub fn save_todos(data_dir: &Path, todos: &[Todo]) -> Result<(), StoreError> {
    validate_tree(todos)?;
    write_array_with_backup(&todos_path(data_dir), todos)
}

/// Structural schema check: non-empty texts, focus priorities in 1..=5,
/// unique ids, and the depth bound.
fn validate_tree(todos: &[Todo]) -> Result<(), StoreError> {
    let mut seen = HashSet::new();
    let mut problem = None;
    traverse(todos, &mut |todo, path, _| {
        if problem.is_some() {
            return;
        }
        if todo.text.trim().is_empty() {
            problem = Some(format!("todo {} has empty text", todo.id));
        } else if !seen.insert(todo.id) {
            problem = Some(format!("duplicate todo id {}", todo.id));
        } else if let Some(p) = todo.focus_priority
            && !(1..=5).contains(&p)
        {
            problem = Some(format!("todo {} has focus priority {p} outside 1..=5", todo.id));
        } else if path.len() > MAX_TODO_DEPTH {
            problem = Some(format!("todo {} exceeds maximum depth {MAX_TODO_DEPTH}", todo.id));
        }
    });
    match problem {
        Some(message) => Err(StoreError::Schema(message)),
        None => Ok(()),
    }
}
