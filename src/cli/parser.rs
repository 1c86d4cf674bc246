use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for ctscan-tracker
/// CLI application to plan and track CT scans of leaching samples
#[derive(Parser)]
#[command(
    name = "ctscan-tracker",
    version = env!("CARGO_PKG_VERSION"),
    about = "Plan CT scan schedules per sample, record the scans actually made and count down to the next one",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Run configuration file migrations if needed")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
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

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Start a sample now: generate and store its scan plan
    Start {
        /// Sample id as configured (e.g. sample1)
        sample: String,
    },

    /// Record a scan that was actually made
    Scan {
        /// Sample id as configured (e.g. sample1)
        sample: String,

        #[arg(
            long = "at",
            value_name = "DD.MM.YYYY HH:MM:SS",
            help = "Time of the scan, for retroactive entries (default: now)"
        )]
        at: Option<String>,
    },

    /// List planned and tracked scans in chronological order
    Timeline {
        #[arg(long, short, help = "Only show this sample")]
        sample: Option<String>,

        #[arg(long, value_name = "planned|tracked", help = "Only show one source")]
        source: Option<String>,
    },

    /// Show the next planned scan and the time left
    Next {
        #[arg(long, short, help = "Keep refreshing the countdown")]
        watch: bool,

        #[arg(
            long,
            value_name = "N",
            help = "Stop after N refreshes (only with --watch)"
        )]
        ticks: Option<u64>,
    },

    /// List configured samples and their progress
    Samples,

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Replace all scans with a wide CSV table (as written by `export --wide`)
    Restore {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Delete every planned and tracked scan
    Wipe {
        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Export scan data
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Export the raw table (one column per sample and phase)")]
        wide: bool,

        #[arg(long, short, help = "Only export this sample")]
        sample: Option<String>,

        #[arg(long, value_name = "planned|tracked", help = "Only export one source")]
        source: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
