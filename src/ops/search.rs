use std::ops::Range;

use regex::Regex;

use crate::model::todo::Todo;
use crate::ops::path::TodoPath;

/// A regex match against one todo's text.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub id: i64,
    pub path: TodoPath,
    pub text: String,
    pub spans: Vec<Range<usize>>,
}

/// Collect all non-overlapping match byte-ranges for a regex in the given text.
fn find_matches(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text).map(|m| m.start()..m.end()).collect()
}

/// Search todo texts in pre-order. Completed todos are skipped unless
/// `include_completed` is set; their subtrees are still visited.
pub fn search_todos(todos: &[Todo], re: &Regex, include_completed: bool) -> Vec<SearchHit> {
    fn walk(
        todos: &[Todo],
        re: &Regex,
        include_completed: bool,
        prefix: &TodoPath,
        hits: &mut Vec<SearchHit>,
    ) {
        for todo in todos {
            let mut path = prefix.clone();
            path.push(todo.id);
            if include_completed || !todo.completed {
                let spans = find_matches(re, &todo.text);
                if !spans.is_empty() {
                    hits.push(SearchHit {
                        id: todo.id,
                        path: path.clone(),
                        text: todo.text.clone(),
                        spans,
                    });
                }
            }
            walk(&todo.subtasks, re, include_completed, &path, hits);
        }
    }
    let mut hits = Vec::new();
    walk(todos, re, include_completed, &Vec::new(), &mut hits);
    hits
}
