mod init;
pub use init::cmd_init;

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{Local, NaiveDate, Utc};
use regex::Regex;
use uuid::Uuid;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::session::TodoSession;
use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::io::workspace::{self, Workspace, WorkspaceError};
use crate::io::{timebox_store, timer_store};
use crate::model::timebox::{TimeboxItem, parse_start_time};
use crate::model::timer::{ActiveTimer, TimerSession, TimerSessionUpdate, daily_stats};
use crate::model::todo::{Difficulty, Todo};
use crate::ops::focus::{extract_focus_tree, focus_entries};
use crate::ops::path::{TodoPath, find_by_path, path_to, text_path};
use crate::ops::recur::{display_pattern, parse_pattern};
use crate::ops::search::search_todos;
use crate::ops::stats::tree_stats;
use crate::ops::validate::{validate_add_subtask, validate_text};

/// Global override for the workspace directory (set by -C flag)
static WORKSPACE_DIR_OVERRIDE: Mutex<Option<PathBuf>> = Mutex::new(None);

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;

    // Store -C override for load_workspace_cwd()
    if let Some(ref dir) = cli.workspace_dir {
        let abs = std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?;
        WORKSPACE_DIR_OVERRIDE.lock().unwrap().replace(abs);
    }

    match cli.command {
        // default with no subcommand: list the tree
        None => cmd_list(
            ListArgs {
                open: false,
                focus: false,
            },
            json,
        ),
        Some(cmd) => match cmd {
            // Init is handled in main.rs before workspace discovery
            Commands::Init(args) => cmd_init(args),

            // Read commands
            Commands::List(args) => cmd_list(args, json),
            Commands::Show(args) => cmd_show(args, json),
            Commands::Search(args) => cmd_search(args, json),
            Commands::Stats => cmd_stats(json),

            // Write commands
            Commands::Add(args) => cmd_add(args),
            Commands::Sub(args) => cmd_sub(args),
            Commands::Toggle(args) => cmd_toggle(args),
            Commands::Rm(args) => cmd_rm(args),
            Commands::Edit(args) => cmd_edit(args),
            Commands::Copy(args) => cmd_copy(args),
            Commands::Mv(args) => cmd_mv(args),
            Commands::Focus(args) => cmd_focus(args, json),
            Commands::Due(args) => cmd_due(args),
            Commands::Diff(args) => cmd_diff(args),
            Commands::Recur(args) => cmd_recur(args),
            Commands::Clear => cmd_clear(),

            // Side stores
            Commands::Timer(args) => cmd_timer(args, json),
            Commands::Timebox(args) => cmd_timebox(args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_workspace_cwd() -> Result<Workspace, WorkspaceError> {
    let start = match WORKSPACE_DIR_OVERRIDE.lock().unwrap().as_ref() {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(WorkspaceError::IoError)?,
    };
    let root = workspace::discover_workspace(&start)?;
    workspace::load_workspace(&root)
}

/// Resolve a todo id to its path; error out when it does not exist.
fn resolve(todos: &[Todo], id: i64) -> Result<TodoPath, Box<dyn std::error::Error>> {
    path_to(todos, id).ok_or_else(|| format!("todo {id} not found").into())
}

/// Split a resolved path into (parent_path, id).
fn split_parent(path: &[i64]) -> (&[i64], i64) {
    let (last, parent) = path.split_last().expect("resolved paths are non-empty");
    (parent, *last)
}

fn parse_date(s: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    s.parse()
        .map_err(|_| format!("invalid date '{s}', expected YYYY-MM-DD").into())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let session = TodoSession::open(&ws)?;
    let mut todos = session.todos().to_vec();

    if args.focus {
        todos = extract_focus_tree(&todos);
    }
    if args.open {
        todos.retain(|t| !t.completed);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&todos)?);
    } else {
        print!("{}", render_tree(&todos));
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let session = TodoSession::open(&ws)?;
    let path = resolve(session.todos(), args.id)?;
    let todo = find_by_path(session.todos(), &path).expect("resolved path");

    if json {
        println!("{}", serde_json::to_string_pretty(todo)?);
        return Ok(());
    }

    if path.len() > 1 {
        let crumbs = text_path(session.todos(), &path[..path.len() - 1]);
        println!("{}", render_breadcrumb(&crumbs));
    }
    println!("{}", render_line(todo));
    println!("  created {}", todo.created_at.format("%Y-%m-%d %H:%M"));
    if let Some(completed_at) = todo.completed_at {
        println!("  completed {}", completed_at.format("%Y-%m-%d %H:%M"));
    }
    if !todo.subtasks.is_empty() {
        println!("  {} subtask(s)", todo.subtasks.len());
    }
    Ok(())
}

fn cmd_search(args: SearchArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let re = Regex::new(&args.pattern).map_err(|e| format!("invalid pattern: {e}"))?;
    let ws = load_workspace_cwd()?;
    let session = TodoSession::open(&ws)?;
    let hits = search_todos(session.todos(), &re, args.all);

    if json {
        let out: Vec<SearchHitJson> = hits.iter().map(search_hit_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    for hit in &hits {
        if hit.path.len() > 1 {
            let crumbs = text_path(session.todos(), &hit.path[..hit.path.len() - 1]);
            println!("{} {} ({})", hit.id, hit.text, render_breadcrumb(&crumbs));
        } else {
            println!("{} {}", hit.id, hit.text);
        }
    }
    if hits.is_empty() {
        println!("no matches");
    }
    Ok(())
}

fn cmd_stats(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let session = TodoSession::open(&ws)?;
    let stats = tree_stats(session.todos(), today());

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }
    println!("total: {}", stats.total);
    println!("completed: {} ({} today)", stats.completed, stats.completed_today);
    println!("focused: {}", stats.focus_count);
    println!("deepest nesting: {}", stats.max_depth);
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    validate_text(&args.text)?;
    let ws = load_workspace_cwd()?;
    let mut session = TodoSession::open(&ws)?;

    let (id, parent_path) = match args.after {
        None => {
            session.add(&args.text);
            let id = session.todos().last().map(|t| t.id).ok_or("add failed")?;
            (id, Vec::new())
        }
        Some(after) => {
            let path = resolve(session.todos(), after)?;
            let (parent_path, after_id) = split_parent(&path);
            let parent_path = parent_path.to_vec();
            session.add_sibling(after_id, &parent_path);
            let siblings = level_of(session.todos(), &parent_path)?;
            let idx = siblings
                .iter()
                .position(|t| t.id == after_id)
                .ok_or("sibling insert failed")?;
            let id = siblings.get(idx + 1).map(|t| t.id).ok_or("sibling insert failed")?;
            session.update_text(id, &parent_path, &args.text);
            (id, parent_path)
        }
    };

    if let Some(due) = &args.due {
        session.set_due(id, &parent_path, Some(parse_date(due)?));
    }
    if let Some(level) = &args.difficulty {
        let difficulty =
            Difficulty::parse_label(level).ok_or_else(|| format!("unknown difficulty '{level}'"))?;
        session.set_difficulty(id, &parent_path, Some(difficulty));
    }
    if let Some(spec) = &args.recur {
        let pattern =
            parse_pattern(spec, today()).ok_or_else(|| format!("unknown recurrence '{spec}'"))?;
        session.set_recurring(id, &parent_path, Some(pattern));
    }
    session.flush();
    println!("added {id}");
    Ok(())
}

fn level_of<'a>(todos: &'a [Todo], parent_path: &[i64]) -> Result<&'a [Todo], Box<dyn std::error::Error>> {
    if parent_path.is_empty() {
        return Ok(todos);
    }
    find_by_path(todos, parent_path)
        .map(|t| t.subtasks.as_slice())
        .ok_or_else(|| "parent not found".into())
}

fn cmd_sub(args: SubArgs) -> Result<(), Box<dyn std::error::Error>> {
    validate_text(&args.text)?;
    let ws = load_workspace_cwd()?;
    let mut session = TodoSession::open(&ws)?;
    let parent_path = resolve(session.todos(), args.parent_id)?;
    validate_add_subtask(session.todos(), &parent_path)?;

    session.add_subtask(&parent_path, &args.text, false);
    let parent = find_by_path(session.todos(), &parent_path).expect("validated path");
    let id = parent.subtasks.last().map(|t| t.id).ok_or("add failed")?;
    session.flush();
    println!("added {id} under {}", args.parent_id);
    Ok(())
}

fn cmd_toggle(args: ToggleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let mut session = TodoSession::open(&ws)?;
    let path = resolve(session.todos(), args.id)?;
    let (parent_path, id) = split_parent(&path);
    session.toggle(id, parent_path);

    let completed = find_by_path(session.todos(), &path)
        .map(|t| t.completed)
        .unwrap_or(false);
    session.flush();
    println!("{} {}", if completed { "completed" } else { "reopened" }, id);
    Ok(())
}

fn cmd_rm(args: RmArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let mut session = TodoSession::open(&ws)?;
    let path = resolve(session.todos(), args.id)?;
    let (parent_path, id) = split_parent(&path);
    session.delete(id, parent_path);
    session.flush();
    println!("deleted {id}");
    Ok(())
}

fn cmd_edit(args: EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let mut session = TodoSession::open(&ws)?;
    let path = resolve(session.todos(), args.id)?;
    let (parent_path, id) = split_parent(&path);
    let deleting = args.text.trim().is_empty();
    session.update_text(id, parent_path, &args.text);
    session.flush();
    if deleting {
        println!("deleted {id} (empty text)");
    } else {
        println!("updated {id}");
    }
    Ok(())
}

fn cmd_copy(args: CopyArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let mut session = TodoSession::open(&ws)?;
    let path = resolve(session.todos(), args.id)?;
    let (parent_path, id) = split_parent(&path);
    session.copy(id, parent_path);
    session.flush();
    println!("copied {id}");
    Ok(())
}

fn cmd_mv(args: MvArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let mut session = TodoSession::open(&ws)?;
    let active = resolve(session.todos(), args.id)?;
    let over = resolve(session.todos(), args.over)?;
    // reorder works within one level; the caller enforces siblinghood
    if active[..active.len() - 1] != over[..over.len() - 1] {
        return Err(format!("{} and {} are not siblings", args.id, args.over).into());
    }
    let (parent_path, id) = split_parent(&active);
    session.reorder(id, args.over, parent_path);
    session.flush();
    println!("moved {id}");
    Ok(())
}

fn cmd_focus(args: FocusArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let mut session = TodoSession::open(&ws)?;

    let Some(id) = args.id else {
        // list mode
        if args.tree {
            let view = extract_focus_tree(session.todos());
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", render_tree(&view));
            }
            return Ok(());
        }
        let entries = focus_entries(session.todos());
        if json {
            let out: Vec<FocusJson> = entries
                .iter()
                .map(|e| FocusJson {
                    priority: e.priority,
                    id: e.id,
                    text: find_by_path(session.todos(), &e.path)
                        .map(|t| t.text.clone())
                        .unwrap_or_default(),
                    path: e.path.clone(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            print!("{}", render_focus_list(&entries, session.todos()));
        }
        return Ok(());
    };

    let path = resolve(session.todos(), id)?;
    let before = focus_entries(session.todos()).len();
    let (parent_path, id) = split_parent(&path);
    session.toggle_focus(id, parent_path);
    let after = focus_entries(session.todos()).len();
    session.flush();
    match after.cmp(&before) {
        std::cmp::Ordering::Greater => println!("focused {id} (#{after})"),
        std::cmp::Ordering::Less => println!("unfocused {id}"),
        std::cmp::Ordering::Equal => println!("focus list is full (5 todos)"),
    }
    Ok(())
}

fn cmd_due(args: DueArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let mut session = TodoSession::open(&ws)?;
    let path = resolve(session.todos(), args.id)?;
    let (parent_path, id) = split_parent(&path);

    let due = match (&args.date, args.clear) {
        (_, true) => None,
        (Some(date), false) => Some(parse_date(date)?),
        (None, false) => return Err("give a date or --clear".into()),
    };
    session.set_due(id, parent_path, due);
    session.flush();
    match due {
        Some(date) => println!("due {date} for {id}"),
        None => println!("cleared due date for {id}"),
    }
    Ok(())
}

fn cmd_diff(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let mut session = TodoSession::open(&ws)?;
    let path = resolve(session.todos(), args.id)?;
    let (parent_path, id) = split_parent(&path);

    let difficulty = match args.level.as_deref() {
        None => {
            let current = find_by_path(session.todos(), &path)
                .and_then(|t| t.difficulty);
            Difficulty::cycle(current)
        }
        Some("clear") => None,
        Some(level) => Some(
            Difficulty::parse_label(level)
                .ok_or_else(|| format!("unknown difficulty '{level}'"))?,
        ),
    };
    session.set_difficulty(id, parent_path, difficulty);
    session.flush();
    match difficulty {
        Some(d) => println!("difficulty {} for {id}", d.label()),
        None => println!("cleared difficulty for {id}"),
    }
    Ok(())
}

fn cmd_recur(args: RecurArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let mut session = TodoSession::open(&ws)?;
    let path = resolve(session.todos(), args.id)?;
    let (parent_path, id) = split_parent(&path);

    let Some(spec) = &args.pattern else {
        // show mode
        let todo = find_by_path(session.todos(), &path).expect("resolved path");
        match &todo.recurring_pattern {
            Some(pattern) => println!("{id} recurs {}", display_pattern(pattern)),
            None => println!("{id} does not recur"),
        }
        return Ok(());
    };

    if spec == "off" {
        session.set_recurring(id, parent_path, None);
        session.flush();
        println!("recurrence off for {id}");
        return Ok(());
    }
    let pattern =
        parse_pattern(spec, today()).ok_or_else(|| format!("unknown recurrence '{spec}'"))?;
    let summary = display_pattern(&pattern);
    session.set_recurring(id, parent_path, Some(pattern));
    session.flush();
    println!("{id} recurs {summary}");
    Ok(())
}

fn cmd_clear() -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let mut session = TodoSession::open(&ws)?;
    let before = crate::ops::path::count_matching(session.todos(), |_| true);
    session.clear_completed();
    let after = crate::ops::path::count_matching(session.todos(), |_| true);
    session.flush();
    println!("cleared {} completed todo(s)", before - after);
    Ok(())
}

// ---------------------------------------------------------------------------
// Timer commands
// ---------------------------------------------------------------------------

fn cmd_timer(cmd: TimerCmd, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    match cmd.command {
        TimerCommands::Start(args) => cmd_timer_start(args),
        TimerCommands::Stop => cmd_timer_stop(),
        TimerCommands::Log(args) => cmd_timer_log(args, json),
        TimerCommands::Set(args) => cmd_timer_set(args),
        TimerCommands::Rm(args) => cmd_timer_rm(args),
        TimerCommands::Stats(args) => cmd_timer_stats(args, json),
    }
}

/// Log the running timer (if any) as a finished session and clear it.
fn stop_active(ws: &Workspace, state: &mut UiState) -> Result<Option<TimerSession>, Box<dyn std::error::Error>> {
    let Some(active) = state.active_timer.take() else {
        return Ok(None);
    };
    let now = Utc::now();
    let session = TimerSession {
        id: Uuid::new_v4().to_string(),
        todo_id: active.todo_id,
        todo_text: active.todo_text,
        todo_path: active.todo_path,
        started_at: active.started_at,
        ended_at: Some(now),
        duration: (now - active.started_at).num_milliseconds().max(0),
        date: active.started_at.with_timezone(&Local).date_naive(),
    };
    timer_store::append_session(&ws.data_dir, session.clone())?;
    Ok(Some(session))
}

fn cmd_timer_start(args: TimerStartArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let session = TodoSession::open(&ws)?;
    let path = resolve(session.todos(), args.id)?;
    let todo = find_by_path(session.todos(), &path).expect("resolved path");

    let mut state = read_ui_state(&ws.data_dir).unwrap_or_default();
    if let Some(previous) = stop_active(&ws, &mut state)? {
        println!(
            "stopped previous timer on {} ({})",
            previous.todo_text,
            render_duration_ms(previous.duration)
        );
    }
    state.active_timer = Some(ActiveTimer {
        todo_id: todo.id,
        todo_text: todo.text.clone(),
        todo_path: text_path(session.todos(), &path[..path.len() - 1]),
        started_at: Utc::now(),
    });
    write_ui_state(&ws.data_dir, &state)?;
    println!("timing {} {}", todo.id, todo.text);
    Ok(())
}

fn cmd_timer_stop() -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let mut state = read_ui_state(&ws.data_dir).unwrap_or_default();
    match stop_active(&ws, &mut state)? {
        Some(session) => {
            write_ui_state(&ws.data_dir, &state)?;
            println!(
                "logged {} on {}",
                render_duration_ms(session.duration),
                session.todo_text
            );
        }
        None => println!("no running timer"),
    }
    Ok(())
}

fn cmd_timer_log(args: TimerLogArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let sessions = match &args.date {
        Some(date) => timer_store::sessions_for_date(&ws.data_dir, parse_date(date)?)?,
        None => timer_store::load_sessions(&ws.data_dir)?,
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }
    for session in &sessions {
        println!("{}", render_session_line(session));
    }
    if sessions.is_empty() {
        println!("no sessions");
    }
    Ok(())
}

fn cmd_timer_set(args: TimerSetArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    timer_store::update_session(
        &ws.data_dir,
        &args.id,
        TimerSessionUpdate {
            duration: Some(args.minutes as i64 * 60_000),
            ..Default::default()
        },
    )?;
    println!("set {} to {}m", args.id, args.minutes);
    Ok(())
}

fn cmd_timer_rm(args: TimerRmArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    timer_store::delete_session(&ws.data_dir, &args.id)?;
    println!("deleted session {}", args.id);
    Ok(())
}

fn cmd_timer_stats(args: TimerStatsArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let date = match &args.date {
        Some(date) => parse_date(date)?,
        None => today(),
    };
    let sessions = timer_store::load_sessions(&ws.data_dir)?;
    let stats = daily_stats(&sessions, date);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }
    println!(
        "{}: {} across {} session(s)",
        stats.date,
        render_duration_ms(stats.total_duration),
        stats.session_count
    );
    for entry in &stats.breakdown {
        println!(
            "  {} {} ({} session(s))",
            render_duration_ms(entry.total_duration),
            entry.todo_text,
            entry.session_count
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Timebox commands
// ---------------------------------------------------------------------------

fn cmd_timebox(cmd: TimeboxCmd, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    match cmd.command {
        TimeboxCommands::Add(args) => cmd_timebox_add(args),
        TimeboxCommands::List(args) => cmd_timebox_list(args, json),
        TimeboxCommands::Rm(args) => cmd_timebox_rm(args),
    }
}

fn cmd_timebox_add(args: TimeboxAddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let session = TodoSession::open(&ws)?;
    resolve(session.todos(), args.todo_id)?;

    let start_time =
        parse_start_time(&args.start).ok_or_else(|| format!("invalid start time '{}'", args.start))?;
    let date = match &args.date {
        Some(date) => parse_date(date)?,
        None => today(),
    };

    let mut timeboxes = timebox_store::load_timeboxes(&ws.data_dir)?;
    let item = TimeboxItem {
        id: Uuid::new_v4().to_string(),
        todo_id: args.todo_id,
        start_time: start_time.clone(),
        duration: args.minutes,
        date,
    };
    timeboxes.push(item);
    timebox_store::save_timeboxes(&ws.data_dir, &timeboxes)?;
    println!("boxed {} at {start_time} for {}m on {date}", args.todo_id, args.minutes);
    Ok(())
}

fn cmd_timebox_list(args: TimeboxListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let session = TodoSession::open(&ws)?;
    let mut timeboxes = timebox_store::load_timeboxes(&ws.data_dir)?;
    if let Some(date) = &args.date {
        let date = parse_date(date)?;
        timeboxes.retain(|b| b.date == date);
    }
    timeboxes.sort_by_key(|b| (b.date, b.start_minutes().unwrap_or(u32::MAX)));

    if json {
        println!("{}", serde_json::to_string_pretty(&timeboxes)?);
        return Ok(());
    }
    for item in &timeboxes {
        let text = path_to(session.todos(), item.todo_id)
            .and_then(|p| find_by_path(session.todos(), &p).map(|t| t.text.clone()))
            .unwrap_or_else(|| format!("todo {}", item.todo_id));
        println!(
            "{} {} {:>4}m  {} ({})",
            item.date, item.start_time, item.duration, text, item.id
        );
    }
    if timeboxes.is_empty() {
        println!("no timeboxes");
    }
    Ok(())
}

fn cmd_timebox_rm(args: TimeboxRmArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ws = load_workspace_cwd()?;
    let mut timeboxes = timebox_store::load_timeboxes(&ws.data_dir)?;
    let before = timeboxes.len();
    timeboxes.retain(|b| b.id != args.id);
    if timeboxes.len() == before {
        return Err(format!("timebox {} not found", args.id).into());
    }
    timebox_store::save_timeboxes(&ws.data_dir, &timeboxes)?;
    println!("removed timebox {}", args.id);
    Ok(())
}
