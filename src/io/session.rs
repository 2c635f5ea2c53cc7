use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;

use chrono::{Local, NaiveDate, Utc};
use log::warn;

use crate::io::store::StoreError;
use crate::io::todo_store::{load_todos, save_todos};
use crate::io::workspace::Workspace;
use crate::model::todo::{Difficulty, RecurringPattern, Todo};
use crate::ops::focus::{renumber_focus_priorities, toggle_focus};
use crate::ops::path::find_by_path;
use crate::ops::recur::expand_on_completion;
use crate::ops::todo_ops::{
    add_sibling, add_subtask, add_top_level, clear_completed, copy_todo, delete_todo,
    propagate_completion, reorder, set_difficulty, set_due_date, set_editing, set_recurring,
    toggle_completion, update_text,
};
use crate::ops::validate::validate_add_subtask;

enum SaveMsg {
    Snapshot(Vec<Todo>),
    Flush(mpsc::SyncSender<()>),
}

/// The in-memory tree plus its debounced saver.
///
/// The tree held here is authoritative for the session. Every mutation
/// hands the saver thread a snapshot; rapid snapshots coalesce into a single
/// write of the latest tree after the quiet period. Write failures are
/// logged and swallowed — the in-memory tree is never rolled back, so it is
/// always ahead of or equal to what has been durably persisted.
pub struct TodoSession {
    todos: Vec<Todo>,
    tx: Option<mpsc::Sender<SaveMsg>>,
    saver: Option<JoinHandle<()>>,
}

impl TodoSession {
    pub fn open(workspace: &Workspace) -> Result<TodoSession, StoreError> {
        TodoSession::load(&workspace.data_dir, workspace.debounce())
    }

    pub fn load(data_dir: &Path, debounce: Duration) -> Result<TodoSession, StoreError> {
        let todos = load_todos(data_dir)?;
        let (tx, rx) = mpsc::channel();
        let dir = data_dir.to_path_buf();
        let saver = std::thread::spawn(move || saver_loop(rx, dir, debounce));
        Ok(TodoSession {
            todos,
            tx: Some(tx),
            saver: Some(saver),
        })
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    fn take(&mut self) -> Vec<Todo> {
        std::mem::take(&mut self.todos)
    }

    fn commit(&mut self, todos: Vec<Todo>) {
        self.todos = todos;
        if let Some(tx) = &self.tx {
            let _ = tx.send(SaveMsg::Snapshot(self.todos.clone()));
        }
    }

    /// Force the pending snapshot (if any) to disk now.
    pub fn flush(&self) {
        let Some(tx) = &self.tx else { return };
        let (ack_tx, ack_rx) = mpsc::sync_channel(0);
        if tx.send(SaveMsg::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }

    pub fn add(&mut self, text: &str) {
        let todos = add_top_level(self.take(), text, Utc::now());
        self.commit(todos);
    }

    /// Toggle completion, then re-derive ancestors, spawn a recurring
    /// instance on the incomplete→complete transition, and re-establish the
    /// dense focus ranking.
    pub fn toggle(&mut self, id: i64, parent_path: &[i64]) {
        let now = Utc::now();
        let mut path = parent_path.to_vec();
        path.push(id);
        // default true so an unresolved path cannot trigger expansion
        let was_completed = find_by_path(&self.todos, &path)
            .map(|t| t.completed)
            .unwrap_or(true);

        let mut todos = toggle_completion(self.take(), id, parent_path, now);
        todos = propagate_completion(todos, &path, now);
        if !was_completed {
            todos = expand_on_completion(todos, id, parent_path, today(), now);
        }
        todos = renumber_focus_priorities(todos);
        self.commit(todos);
    }

    pub fn delete(&mut self, id: i64, parent_path: &[i64]) {
        let now = Utc::now();
        let mut path = parent_path.to_vec();
        path.push(id);
        let mut todos = delete_todo(self.take(), id, parent_path);
        // removing an incomplete child can complete the parent
        todos = propagate_completion(todos, &path, now);
        todos = renumber_focus_priorities(todos);
        self.commit(todos);
    }

    pub fn add_subtask(&mut self, parent_path: &[i64], text: &str, start_editing: bool) {
        if let Err(e) = validate_add_subtask(&self.todos, parent_path) {
            warn!("add subtask rejected: {e}");
            return;
        }
        let todos = add_subtask(self.take(), parent_path, text, start_editing, Utc::now());
        self.commit(todos);
    }

    pub fn add_sibling(&mut self, id: i64, parent_path: &[i64]) {
        let todos = add_sibling(self.take(), id, parent_path, Utc::now());
        self.commit(todos);
    }

    /// Empty or whitespace-only text deletes the todo instead of storing it;
    /// otherwise the text is replaced and editing ends.
    pub fn update_text(&mut self, id: i64, parent_path: &[i64], text: &str) {
        if text.trim().is_empty() {
            self.delete(id, parent_path);
            return;
        }
        let mut todos = update_text(self.take(), id, parent_path, text);
        todos = set_editing(todos, id, parent_path, false);
        self.commit(todos);
    }

    pub fn set_editing(&mut self, id: i64, parent_path: &[i64], editing: bool) {
        let todos = set_editing(self.take(), id, parent_path, editing);
        self.commit(todos);
    }

    pub fn copy(&mut self, id: i64, parent_path: &[i64]) {
        let todos = copy_todo(self.take(), id, parent_path, Utc::now());
        self.commit(todos);
    }

    pub fn reorder(&mut self, active_id: i64, over_id: i64, parent_path: &[i64]) {
        let todos = reorder(self.take(), active_id, over_id, parent_path);
        self.commit(todos);
    }

    pub fn toggle_focus(&mut self, id: i64, parent_path: &[i64]) {
        let todos = toggle_focus(self.take(), id, parent_path);
        self.commit(todos);
    }

    pub fn clear_completed(&mut self) {
        let todos = clear_completed(self.take());
        let todos = renumber_focus_priorities(todos);
        self.commit(todos);
    }

    pub fn set_due(&mut self, id: i64, parent_path: &[i64], due: Option<NaiveDate>) {
        let todos = set_due_date(self.take(), id, parent_path, due);
        self.commit(todos);
    }

    pub fn set_difficulty(&mut self, id: i64, parent_path: &[i64], difficulty: Option<Difficulty>) {
        let todos = set_difficulty(self.take(), id, parent_path, difficulty);
        self.commit(todos);
    }

    pub fn set_recurring(&mut self, id: i64, parent_path: &[i64], pattern: Option<RecurringPattern>) {
        let todos = set_recurring(self.take(), id, parent_path, pattern);
        self.commit(todos);
    }
}

impl Drop for TodoSession {
    fn drop(&mut self) {
        self.flush();
        drop(self.tx.take());
        if let Some(saver) = self.saver.take() {
            let _ = saver.join();
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn saver_loop(rx: mpsc::Receiver<SaveMsg>, data_dir: PathBuf, debounce: Duration) {
    let mut pending: Option<Vec<Todo>> = None;
    loop {
        let msg = if pending.is_some() {
            rx.recv_timeout(debounce)
        } else {
            // nothing pending: block until the next message
            rx.recv().map_err(|_| mpsc::RecvTimeoutError::Disconnected)
        };
        match msg {
            Ok(SaveMsg::Snapshot(todos)) => pending = Some(todos),
            Ok(SaveMsg::Flush(ack)) => {
                write_pending(&data_dir, &mut pending);
                let _ = ack.send(());
            }
            Err(mpsc::RecvTimeoutError::Timeout) => write_pending(&data_dir, &mut pending),
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                write_pending(&data_dir, &mut pending);
                break;
            }
        }
    }
}

fn write_pending(data_dir: &Path, pending: &mut Option<Vec<Todo>>) {
    if let Some(todos) = pending.take()
        && let Err(e) = save_todos(data_dir, &todos)
    {
        // swallowed by design: the in-memory tree stays authoritative
        log::error!("debounced save failed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::todo_store::load_todos;
    use crate::ops::focus::focus_entries;
    use crate::ops::recur::parse_pattern;
    use tempfile::TempDir;

    fn open(dir: &Path, debounce_ms: u64) -> TodoSession {
        TodoSession::load(dir, Duration::from_millis(debounce_ms)).unwrap()
    }

    #[test]
    fn flush_writes_the_latest_snapshot() {
        let dir = TempDir::new().unwrap();
        let mut session = open(dir.path(), 10_000);
        session.add("first");
        session.add("second");
        session.flush();

        let stored = load_todos(dir.path()).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].text, "first");
    }

    #[test]
    fn debounce_coalesces_rapid_mutations() {
        let dir = TempDir::new().unwrap();
        let mut session = open(dir.path(), 300);
        session.add("a");
        session.add("b");
        session.add("c");

        // inside the quiet period nothing has hit disk yet
        let stored = load_todos(dir.path()).unwrap();
        assert!(stored.is_empty());

        std::thread::sleep(Duration::from_millis(900));
        let stored = load_todos(dir.path()).unwrap();
        assert_eq!(stored.len(), 3, "one trailing write carries the last snapshot");
    }

    #[test]
    fn drop_flushes() {
        let dir = TempDir::new().unwrap();
        {
            let mut session = open(dir.path(), 10_000);
            session.add("persisted on drop");
        }
        let stored = load_todos(dir.path()).unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[test]
    fn empty_text_update_deletes_instead() {
        let dir = TempDir::new().unwrap();
        let mut session = open(dir.path(), 10_000);
        session.add("disposable");
        let id = session.todos()[0].id;
        session.update_text(id, &[], "   ");
        assert!(session.todos().is_empty());
    }

    #[test]
    fn toggle_derives_parents_and_clears_focus() {
        let dir = TempDir::new().unwrap();
        let mut session = open(dir.path(), 10_000);
        session.add("project");
        let project = session.todos()[0].id;
        session.add_subtask(&[project], "step", false);
        let step = session.todos()[0].subtasks[0].id;

        session.toggle_focus(step, &[project]);
        assert_eq!(focus_entries(session.todos()).len(), 1);

        session.toggle(step, &[project]);
        let todos = session.todos();
        assert!(todos[0].completed, "sole subtask done, parent derives");
        assert!(focus_entries(todos).is_empty(), "completion drops focus");
    }

    #[test]
    fn completing_a_recurring_todo_spawns_one_instance() {
        let dir = TempDir::new().unwrap();
        let mut session = open(dir.path(), 10_000);
        session.add("water plants");
        let id = session.todos()[0].id;
        let pattern = parse_pattern("daily", today()).unwrap();
        session.set_recurring(id, &[], Some(pattern));

        session.toggle(id, &[]);
        let todos = session.todos();
        assert_eq!(todos.len(), 2);
        assert!(todos[0].completed);
        assert!(!todos[1].completed);
        assert_eq!(todos[1].parent_recurring_id, Some(id));

        // un-completing does not spawn again
        session.toggle(id, &[]);
        assert_eq!(session.todos().len(), 2);
    }

    #[test]
    fn deleting_a_focus_holder_keeps_the_ranking_dense() {
        let dir = TempDir::new().unwrap();
        let mut session = open(dir.path(), 10_000);
        session.add("a");
        session.add("b");
        session.add("c");
        let ids: Vec<i64> = session.todos().iter().map(|t| t.id).collect();
        for id in &ids {
            session.toggle_focus(*id, &[]);
        }
        session.delete(ids[0], &[]);

        let entries = focus_entries(session.todos());
        let priorities: Vec<u8> = entries.iter().map(|e| e.priority).collect();
        assert_eq!(priorities, vec![1, 2]);
    }

    #[test]
    fn invalid_subtask_target_is_a_logged_no_op() {
        let dir = TempDir::new().unwrap();
        let mut session = open(dir.path(), 10_000);
        session.add("only");
        let before = session.todos().to_vec();
        session.add_subtask(&[9999], "orphan", false);
        assert_eq!(session.todos(), &before[..]);
    }
}
