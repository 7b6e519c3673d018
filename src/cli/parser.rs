use crate::export::{ExportBy, ExportFormat};
use clap::{Parser, Subcommand};

/// Command-line interface definition for rVoteTally
/// CLI application to record and report election results with SQLite
#[derive(Parser)]
#[command(
    name = "rvotetally",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple election results CLI: import geography and vote spreadsheets into SQLite and report turnout and rankings",
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

    /// Manage the configuration file (view or check)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
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

    /// Create, list, inspect, update or delete elections
    Election {
        #[arg(long = "create", help = "Create an election (requires --name, --type, --date)")]
        create: bool,

        #[arg(long = "list", help = "List elections, most recent first")]
        list: bool,

        #[arg(long = "show", value_name = "ID", help = "Election overview with per-governorate totals")]
        show: Option<i64>,

        #[arg(long = "update", value_name = "ID", help = "Update an election")]
        update: Option<i64>,

        #[arg(long = "delete", value_name = "ID", help = "Delete an election (blocked when FINISHED)")]
        delete: Option<i64>,

        /// Election name
        #[arg(long)]
        name: Option<String>,

        /// Election type: IRAQ or KRG
        #[arg(long = "type")]
        election_type: Option<String>,

        /// Election status: ACTIVE or FINISHED
        #[arg(long)]
        status: Option<String>,

        /// Election date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Skip the delete confirmation prompt
        #[arg(long = "yes")]
        yes: bool,
    },

    /// Import a geography spreadsheet for a governorate
    ImportGeo {
        #[arg(long, value_name = "ID")]
        election: i64,

        #[arg(long, value_name = "NAME")]
        governorate: String,

        /// Path to the .xlsx or .csv file
        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Import a vote spreadsheet for a governorate and channel
    ImportVotes {
        #[arg(long, value_name = "ID")]
        election: i64,

        #[arg(long, value_name = "NAME")]
        governorate: String,

        /// Reporting channel: public or special (case-insensitive)
        #[arg(long)]
        channel: String,

        /// Path to the .xlsx or .csv file
        #[arg(long, value_name = "FILE")]
        file: String,
    },

    /// Turnout and ranking reports (the deepest scope flag wins)
    Report {
        #[arg(long, value_name = "ID")]
        election: Option<i64>,

        #[arg(long, value_name = "NAME")]
        governorate: Option<String>,

        /// Break the governorate down by district
        #[arg(long = "by-district")]
        by_district: bool,

        #[arg(long, value_name = "ID", help = "District breakdown by subdistrict")]
        district: Option<i64>,

        #[arg(long, value_name = "ID", help = "Subdistrict breakdown by unit")]
        subdistrict: Option<i64>,

        #[arg(long, value_name = "NUMBER", help = "Unit detail with list/candidate rankings")]
        unit: Option<String>,

        /// Special-channel report (per-unit totals for a governorate)
        #[arg(long)]
        special: bool,

        /// Reporting channel: public or special (default from config)
        #[arg(long)]
        channel: Option<String>,

        /// Restrict vote sums to one list number
        #[arg(long, value_name = "LIST_NUMBER")]
        party: Option<String>,

        /// Substring filter on names/numbers where the report supports it
        #[arg(long)]
        search: Option<String>,
    },

    /// Show, set or clear the selected-party preference of a governorate
    Party {
        #[arg(long, value_name = "ID")]
        election: i64,

        #[arg(long, value_name = "NAME")]
        governorate: String,

        #[arg(long, value_name = "LIST_NUMBER", help = "Remember this party for the governorate")]
        set: Option<String>,

        #[arg(long, help = "Forget the remembered party")]
        clear: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Export a governorate ranking report
    Export {
        #[arg(long, value_name = "ID")]
        election: i64,

        #[arg(long, value_name = "NAME")]
        governorate: String,

        /// Reporting channel: public or special (default from config)
        #[arg(long)]
        channel: Option<String>,

        /// Group by list or by candidate
        #[arg(long, value_enum, default_value = "list")]
        by: ExportBy,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        /// Restrict to one list number
        #[arg(long, value_name = "LIST_NUMBER")]
        party: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
