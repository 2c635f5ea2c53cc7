use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tw", about = concat!("[>] twig v", env!("CARGO_PKG_VERSION"), " - your todos are a tree"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different workspace directory
    #[arg(short = 'C', long = "workspace-dir", global = true)]
    pub workspace_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new twig workspace in the current directory
    Init(InitArgs),
    /// List the todo tree
    List(ListArgs),
    /// Show one todo with its breadcrumb and details
    Show(ShowArgs),
    /// Add a top-level todo (or a sibling with --after)
    Add(AddArgs),
    /// Add a subtask under an existing todo
    Sub(SubArgs),
    /// Toggle completion on a todo
    Toggle(ToggleArgs),
    /// Delete a todo and its subtree
    Rm(RmArgs),
    /// Replace a todo's text (empty text deletes it)
    Edit(EditArgs),
    /// Duplicate a todo and its subtree, reset to incomplete
    Copy(CopyArgs),
    /// Move a todo to another sibling's position
    Mv(MvArgs),
    /// Toggle focus on a todo, or list the focus ranking
    Focus(FocusArgs),
    /// Set or clear a due date
    Due(DueArgs),
    /// Set, cycle, or clear difficulty
    Diff(DiffArgs),
    /// Set or clear a recurrence rule
    Recur(RecurArgs),
    /// Remove all completed todos
    Clear,
    /// Search todo texts by regex
    Search(SearchArgs),
    /// Show tree statistics
    Stats,
    /// Time tracking
    Timer(TimerCmd),
    /// Timeboxing calendar
    #[command(name = "box")]
    Timebox(TimeboxCmd),
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Workspace name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Reinitialize even if twig/ already exists
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Hide completed todos
    #[arg(long)]
    pub open: bool,
    /// Show the focus projection instead of the full tree
    #[arg(long)]
    pub focus: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Todo id to show
    pub id: i64,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Regex pattern to search for
    pub pattern: String,
    /// Include completed todos
    #[arg(long)]
    pub all: bool,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Todo text
    pub text: String,
    /// Insert as a sibling right after this todo id
    #[arg(long)]
    pub after: Option<i64>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
    /// Difficulty (easy, normal, hard)
    #[arg(long)]
    pub difficulty: Option<String>,
    /// Recurrence (daily, weekdays, mon,thu, monthly:15, every:3)
    #[arg(long)]
    pub recur: Option<String>,
}

#[derive(Args)]
pub struct SubArgs {
    /// Parent todo id
    pub parent_id: i64,
    /// Subtask text
    pub text: String,
}

#[derive(Args)]
pub struct ToggleArgs {
    /// Todo id to toggle
    pub id: i64,
}

#[derive(Args)]
pub struct RmArgs {
    /// Todo id to delete
    pub id: i64,
}

#[derive(Args)]
pub struct EditArgs {
    /// Todo id to edit
    pub id: i64,
    /// New text; empty deletes the todo
    pub text: String,
}

#[derive(Args)]
pub struct CopyArgs {
    /// Todo id to duplicate
    pub id: i64,
}

#[derive(Args)]
pub struct MvArgs {
    /// Todo id to move
    pub id: i64,
    /// Sibling id whose position it takes
    pub over: i64,
}

#[derive(Args)]
pub struct FocusArgs {
    /// Todo id to toggle; omit to list the current ranking
    pub id: Option<i64>,
    /// Render the focus projection as a tree
    #[arg(long)]
    pub tree: bool,
}

#[derive(Args)]
pub struct DueArgs {
    /// Todo id
    pub id: i64,
    /// Due date (YYYY-MM-DD)
    pub date: Option<String>,
    /// Clear the due date
    #[arg(long)]
    pub clear: bool,
}

#[derive(Args)]
pub struct DiffArgs {
    /// Todo id
    pub id: i64,
    /// easy, normal, hard, or clear; omit to cycle
    pub level: Option<String>,
}

#[derive(Args)]
pub struct RecurArgs {
    /// Todo id
    pub id: i64,
    /// daily, weekdays, day names (mon,thu), monthly:15, every:3, or off;
    /// omit to show the current rule
    pub pattern: Option<String>,
}

// ---------------------------------------------------------------------------
// Timer subcommands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TimerCmd {
    #[command(subcommand)]
    pub command: TimerCommands,
}

#[derive(Subcommand)]
pub enum TimerCommands {
    /// Start timing a todo (stops any running timer first)
    Start(TimerStartArgs),
    /// Stop the running timer and log the session
    Stop,
    /// List logged sessions
    Log(TimerLogArgs),
    /// Adjust a logged session's duration
    Set(TimerSetArgs),
    /// Delete a logged session
    Rm(TimerRmArgs),
    /// Daily totals with a per-todo breakdown
    Stats(TimerStatsArgs),
}

#[derive(Args)]
pub struct TimerStartArgs {
    /// Todo id to time
    pub id: i64,
}

#[derive(Args)]
pub struct TimerLogArgs {
    /// Only sessions from this date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Args)]
pub struct TimerSetArgs {
    /// Session id
    pub id: String,
    /// New duration in minutes
    #[arg(long)]
    pub minutes: u32,
}

#[derive(Args)]
pub struct TimerRmArgs {
    /// Session id
    pub id: String,
}

#[derive(Args)]
pub struct TimerStatsArgs {
    /// Date to aggregate (default today)
    #[arg(long)]
    pub date: Option<String>,
}

// ---------------------------------------------------------------------------
// Timebox subcommands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TimeboxCmd {
    #[command(subcommand)]
    pub command: TimeboxCommands,
}

#[derive(Subcommand)]
pub enum TimeboxCommands {
    /// Schedule a todo into a time slot
    Add(TimeboxAddArgs),
    /// List scheduled timeboxes
    List(TimeboxListArgs),
    /// Remove a timebox
    Rm(TimeboxRmArgs),
}

#[derive(Args)]
pub struct TimeboxAddArgs {
    /// Todo id to schedule
    pub todo_id: i64,
    /// Start time (HH:MM)
    pub start: String,
    /// Length in minutes
    #[arg(long, default_value_t = 30)]
    pub minutes: u32,
    /// Date (YYYY-MM-DD, default today)
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Args)]
pub struct TimeboxListArgs {
    /// Only timeboxes on this date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Args)]
pub struct TimeboxRmArgs {
    /// Timebox id
    pub id: String,
}
