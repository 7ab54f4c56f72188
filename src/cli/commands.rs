use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dbk", about = concat!("[#] daybook v", env!("CARGO_PKG_VERSION"), " - your day, in columns"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different data directory
    #[arg(short = 'C', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task
    Add(AddArgs),
    /// List tasks through the current filter
    List(ListArgs),
    /// Show the column layout for a day
    Day(DayArgs),
    /// Show task details
    Show(ShowArgs),
    /// Set a task's status
    Status(StatusArgs),
    /// Mark a task done (shortcut for status <UID> Done)
    Done(UidArg),
    /// Permanently delete a task
    Rm(UidArg),
    /// Search tasks by regex
    Search(SearchArgs),
    /// Export tasks as CSV
    Export(ExportArgs),
    /// Sweep past-due tasks to Overdue
    SweepOverdue,
    /// Manage the project registry
    Projects(RegistryCmd),
    /// Manage the status registry
    Statuses(RegistryCmd),
    /// Manage the priority registry
    Priorities(RegistryCmd),
}

// ---------------------------------------------------------------------------
// Task command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Project name (default: General)
    #[arg(long)]
    pub project: Option<String>,
    /// Priority name (default: Medium)
    #[arg(long)]
    pub priority: Option<String>,
    /// Initial status (default: Not started)
    #[arg(long)]
    pub status: Option<String>,
    /// Description text
    #[arg(long)]
    pub desc: Option<String>,
    /// Start of a timed range: "YYYY-MM-DD HH:MM"
    #[arg(long)]
    pub start: Option<String>,
    /// End of a timed range: "YYYY-MM-DD HH:MM"
    #[arg(long)]
    pub end: Option<String>,
    /// Due date for an untimed task: "YYYY-MM-DD"
    #[arg(long, conflicts_with_all = ["start", "end"])]
    pub due: Option<String>,
}

#[derive(Args, Default)]
pub struct ListArgs {
    /// Filter by project
    #[arg(long)]
    pub project: Option<String>,
    /// Filter by title substring (case-insensitive)
    #[arg(long)]
    pub title: Option<String>,
    /// Filter by date: "YYYY-MM-DD"
    #[arg(long)]
    pub date: Option<String>,
    /// Filter by exact status (overrides deadline-mode hiding)
    #[arg(long)]
    pub status: Option<String>,
    /// Filter by priority
    #[arg(long)]
    pub priority: Option<String>,
    /// Deadline mode: all, upcoming, overdue, completed
    #[arg(long, default_value = "all")]
    pub deadline: String,
    /// Timed mode: all, timed, untimed
    #[arg(long, default_value = "all")]
    pub timed: String,
}

#[derive(Args)]
pub struct DayArgs {
    /// Date to lay out (default: today)
    pub date: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Task uid (prefix allowed)
    pub uid: String,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Task uid (prefix allowed)
    pub uid: String,
    /// New status name
    pub status: String,
}

#[derive(Args)]
pub struct UidArg {
    /// Task uid (prefix allowed)
    pub uid: String,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Regex pattern to search for
    pub pattern: String,
}

#[derive(Args, Default)]
pub struct ExportArgs {
    /// Write to a file instead of stdout
    #[arg(long)]
    pub out: Option<String>,
    #[command(flatten)]
    pub filter: ListArgs,
}

// ---------------------------------------------------------------------------
// Registry args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct RegistryCmd {
    #[command(subcommand)]
    pub action: Option<RegistryAction>,
}

#[derive(Subcommand)]
pub enum RegistryAction {
    /// List entries
    List,
    /// Add an entry
    Add(RegistryAddArgs),
    /// Remove an entry (reassigning its tasks)
    Rm(RegistryRmArgs),
}

#[derive(Args)]
pub struct RegistryAddArgs {
    /// Entry name
    pub name: String,
    /// Display color "#RRGGBB" (projects and priorities)
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Args)]
pub struct RegistryRmArgs {
    /// Entry name
    pub name: String,
    /// Reassign affected tasks to this entry (default: the system entry)
    #[arg(long)]
    pub reassign_to: Option<String>,
}
