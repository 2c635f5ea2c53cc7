use crate::model::todo::Todo;
use crate::ops::path::{MAX_TODO_DEPTH, TodoPath, find_by_path};

/// Upper bound on direct children of one todo.
pub const MAX_SUBTASKS_PER_TODO: usize = 100;

/// Upper bound on todo text length, in characters.
pub const MAX_TEXT_LEN: usize = 500;

/// Why a requested operation cannot proceed. The tree layer itself stays
/// no-op on bad input; these carry the reason up to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidateError {
    #[error("path cannot be empty")]
    EmptyPath,
    #[error("todo not found at path {0:?}")]
    PathNotFound(TodoPath),
    #[error("maximum nesting depth (5) reached")]
    DepthExceeded,
    #[error("maximum of 100 subtasks per todo reached")]
    TooManySubtasks,
    #[error("todo text cannot be empty")]
    EmptyText,
    #[error("todo text cannot exceed 500 characters")]
    TextTooLong,
}

/// Can a subtask be added under `parent_path`?
pub fn validate_add_subtask(todos: &[Todo], parent_path: &[i64]) -> Result<(), ValidateError> {
    if parent_path.is_empty() {
        return Err(ValidateError::EmptyPath);
    }
    if parent_path.len() >= MAX_TODO_DEPTH {
        return Err(ValidateError::DepthExceeded);
    }
    let parent = find_by_path(todos, parent_path)
        .ok_or_else(|| ValidateError::PathNotFound(parent_path.to_vec()))?;
    if parent.subtasks.len() >= MAX_SUBTASKS_PER_TODO {
        return Err(ValidateError::TooManySubtasks);
    }
    Ok(())
}

/// Does `path` resolve to a node?
pub fn validate_path(todos: &[Todo], path: &[i64]) -> Result<(), ValidateError> {
    if path.is_empty() {
        return Err(ValidateError::EmptyPath);
    }
    find_by_path(todos, path)
        .map(|_| ())
        .ok_or_else(|| ValidateError::PathNotFound(path.to_vec()))
}

/// Is `text` acceptable for a stored todo?
pub fn validate_text(text: &str) -> Result<(), ValidateError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidateError::EmptyText);
    }
    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(ValidateError::TextTooLong);
    }
    Ok(())
}
