use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for shiftkeeper
/// CLI application to record employee shifts with SQLite
#[derive(Parser, Debug)]
#[command(
    name = "shiftkeeper",
    version = env!("CARGO_PKG_VERSION"),
    about = "Attendance tracking for small teams: record shifts, catch overlaps, export monthly reports",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Use this configuration file instead of the default one
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Act as this employee (overrides `default_user` from the configuration)
    #[arg(global = true, long = "as", value_name = "ID")]
    pub actor: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Register, list, promote or remove employees
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Manage default weekly schedules
    Schedule {
        #[command(subcommand)]
        action: ScheduleAction,
    },

    /// Record a shift
    Add {
        /// Start date of the shift (YYYY-MM-DD)
        date: String,

        #[arg(long = "in", help = "Start time (HH:MM); default schedule or config otherwise")]
        start: Option<String>,

        #[arg(long = "out", help = "End time (HH:MM); earlier than --in means the next day")]
        end: Option<String>,

        #[arg(long = "end-date", help = "End date (YYYY-MM-DD) for shifts ending on another day")]
        end_date: Option<String>,

        #[arg(long = "for", value_name = "ID", help = "Employee the shift belongs to (admins only)")]
        owner: Option<String>,

        #[arg(long, help = "Free-text notes")]
        notes: Option<String>,

        #[arg(long, short = 'f', help = "Save even if the shift overlaps other employees' shifts")]
        force: bool,

        #[arg(long = "dry-run", help = "Show duration and overlaps without saving")]
        dry_run: bool,
    },

    /// Change a recorded shift
    Edit {
        /// Shift id
        id: i64,

        #[arg(long, help = "New start date (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long = "in", help = "New start time (HH:MM)")]
        start: Option<String>,

        #[arg(long = "out", help = "New end time (HH:MM)")]
        end: Option<String>,

        #[arg(long = "end-date", help = "New end date (YYYY-MM-DD)")]
        end_date: Option<String>,

        #[arg(long, conflicts_with = "clear_notes", help = "Replace the notes")]
        notes: Option<String>,

        #[arg(long = "clear-notes", help = "Remove the notes")]
        clear_notes: bool,

        #[arg(long, short = 'f', help = "Save even if the shift overlaps other employees' shifts")]
        force: bool,
    },

    /// Delete a shift by id
    Del {
        /// Shift id
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List shifts
    List {
        #[arg(long, short, help = "Filter by year/month/day or a custom range (default: this month)")]
        period: Option<String>,

        #[arg(long = "for", value_name = "ID", help = "Only shifts of this employee")]
        owner: Option<String>,

        #[arg(long, help = "Shifts of every employee (admins only)")]
        all: bool,
    },

    /// Per-employee report: work days, hours, absences, efficiency
    Report {
        /// Period: YYYY, YYYY-MM, YYYY-MM-DD or A:B (default: this month)
        period: Option<String>,

        #[arg(long, value_enum, help = "Write the report to --file in this format")]
        format: Option<ExportFormat>,

        #[arg(long, value_name = "FILE", requires = "format")]
        file: Option<String>,

        #[arg(long, help = "Daily hours grid instead of the summary")]
        grid: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Export raw shifts
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long = "for", value_name = "ID", help = "Only shifts of this employee")]
        owner: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum EmployeeAction {
    /// Register an employee
    Add {
        id: String,

        #[arg(long, help = "Display name (defaults to the id)")]
        name: Option<String>,

        #[arg(long, help = "Register as administrator")]
        admin: bool,
    },

    /// List registered employees
    List,

    /// Grant administrator rights
    Promote { id: String },

    /// Remove an employee with all their shifts and schedules
    Del {
        id: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ScheduleAction {
    /// Add a default schedule for one weekday
    Add {
        #[arg(long = "for", value_name = "ID", help = "Employee (defaults to the acting one)")]
        owner: Option<String>,

        #[arg(long, help = "Day of week: 0-6 (0 = Sunday) or a name like 'mon'")]
        day: String,

        #[arg(long = "in", help = "Start time (HH:MM)")]
        start: String,

        #[arg(long = "out", help = "End time (HH:MM)")]
        end: String,
    },

    /// List default schedules
    List {
        #[arg(long = "for", value_name = "ID")]
        owner: Option<String>,
    },

    /// Change a default schedule
    Edit {
        id: i64,

        #[arg(long)]
        day: Option<String>,

        #[arg(long = "in")]
        start: Option<String>,

        #[arg(long = "out")]
        end: Option<String>,
    },

    /// Remove a default schedule
    Del { id: i64 },
}
