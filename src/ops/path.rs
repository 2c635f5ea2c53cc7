use crate::model::todo::Todo;

/// Maximum nesting level (root = level 0); mutations beyond this are rejected.
pub const MAX_TODO_DEPTH: usize = 5;

/// Root-to-node sequence of ids addressing one node in the tree.
pub type TodoPath = Vec<i64>;

/// Walk a path id-by-id. Each step must match a child of the previous node.
pub fn find_by_path<'a>(todos: &'a [Todo], path: &[i64]) -> Option<&'a Todo> {
    let (first, rest) = path.split_first()?;
    let todo = todos.iter().find(|t| t.id == *first)?;
    if rest.is_empty() {
        Some(todo)
    } else {
        find_by_path(&todo.subtasks, rest)
    }
}

pub fn find_by_path_mut<'a>(todos: &'a mut [Todo], path: &[i64]) -> Option<&'a mut Todo> {
    let (first, rest) = path.split_first()?;
    let todo = todos.iter_mut().find(|t| t.id == *first)?;
    if rest.is_empty() {
        Some(todo)
    } else {
        find_by_path_mut(&mut todo.subtasks, rest)
    }
}

/// A path is valid iff it is non-empty and every step resolves.
pub fn is_valid_path(todos: &[Todo], path: &[i64]) -> bool {
    !path.is_empty() && find_by_path(todos, path).is_some()
}

/// Apply `f` to the node at `path`. Returns the tree unchanged when the path
/// is empty or does not resolve; no other node is touched.
pub fn update_at_path(mut todos: Vec<Todo>, path: &[i64], f: impl FnOnce(&mut Todo)) -> Vec<Todo> {
    if path.is_empty() {
        return todos;
    }
    if let Some(todo) = find_by_path_mut(&mut todos, path) {
        f(todo);
    }
    todos
}

/// Remove the node at `path` from its parent's (or the root) sequence.
pub fn remove_at_path(mut todos: Vec<Todo>, path: &[i64]) -> Vec<Todo> {
    match path {
        [] => todos,
        [id] => {
            todos.retain(|t| t.id != *id);
            todos
        }
        [parent @ .., last] => {
            let last = *last;
            update_at_path(todos, parent, |p| p.subtasks.retain(|t| t.id != last))
        }
    }
}

/// Depth-first pre-order walk. The visitor receives the node, its full path
/// (ending in its own id), and its parent if any. Children are visited in
/// stored order.
pub fn traverse<F>(todos: &[Todo], visit: &mut F)
where
    F: FnMut(&Todo, &[i64], Option<&Todo>),
{
    fn walk<F>(todos: &[Todo], path: &mut Vec<i64>, parent: Option<&Todo>, visit: &mut F)
    where
        F: FnMut(&Todo, &[i64], Option<&Todo>),
    {
        for todo in todos {
            path.push(todo.id);
            visit(todo, path, parent);
            walk(&todo.subtasks, path, Some(todo), visit);
            path.pop();
        }
    }
    let mut path = Vec::new();
    walk(todos, &mut path, None, visit);
}

/// One node of a flattened tree.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatTodo<'a> {
    pub todo: &'a Todo,
    pub path: TodoPath,
    pub level: usize,
}

/// Flatten into pre-order with paths and nesting levels (top level = 0).
pub fn flatten(todos: &[Todo]) -> Vec<FlatTodo<'_>> {
    fn walk<'a>(todos: &'a [Todo], prefix: &TodoPath, out: &mut Vec<FlatTodo<'a>>) {
        for todo in todos {
            let mut path = prefix.clone();
            path.push(todo.id);
            out.push(FlatTodo {
                todo,
                level: path.len() - 1,
                path: path.clone(),
            });
            walk(&todo.subtasks, &path, out);
        }
    }
    let mut out = Vec::new();
    walk(todos, &Vec::new(), &mut out);
    out
}

/// Count nodes matching a predicate across the whole tree.
pub fn count_matching(todos: &[Todo], pred: impl Fn(&Todo) -> bool) -> usize {
    let mut count = 0;
    traverse(todos, &mut |todo, _, _| {
        if pred(todo) {
            count += 1;
        }
    });
    count
}

/// Number of levels in the deepest branch (empty tree = 0).
pub fn max_depth(todos: &[Todo]) -> usize {
    let mut deepest = 0;
    traverse(todos, &mut |_, path, _| deepest = deepest.max(path.len()));
    deepest
}

/// Resolve an id to its root path, first match in pre-order.
pub fn path_to(todos: &[Todo], id: i64) -> Option<TodoPath> {
    fn search(todos: &[Todo], id: i64, prefix: &mut Vec<i64>) -> bool {
        for todo in todos {
            prefix.push(todo.id);
            if todo.id == id || search(&todo.subtasks, id, prefix) {
                return true;
            }
            prefix.pop();
        }
        false
    }
    let mut path = Vec::new();
    search(todos, id, &mut path).then_some(path)
}

/// Texts of the nodes along `path`, root first. Stops at the first id that
/// does not resolve.
pub fn text_path(todos: &[Todo], path: &[i64]) -> Vec<String> {
    let mut texts = Vec::new();
    let mut level = todos;
    for id in path {
        match level.iter().find(|t| t.id == *id) {
            Some(todo) => {
                texts.push(todo.text.clone());
                level = &todo.subtasks;
            }
            None => break,
        }
    }
    texts
}
