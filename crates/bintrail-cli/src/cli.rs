use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    author,
    version,
    about,
    help_template = "{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}",
    arg_required_else_help = true
)]
pub struct Args {
    /// Set output verbosity
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress outputs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as json
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Provide custom config file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the database path
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile a repository against a published-binaries payload
    #[command(arg_required_else_help = true)]
    Reconcile {
        /// Target repository as project/repository
        target: String,

        /// Notification payload key to fetch from the backend
        #[arg(short, long, conflicts_with = "payload")]
        key: Option<String>,

        /// Read the payload from a local JSON file instead
        #[arg(short, long)]
        payload: Option<PathBuf>,

        /// Logical time of the run as RFC 3339 (defaults to now)
        #[arg(short, long)]
        time: Option<String>,
    },

    /// List release records of a repository
    #[command(arg_required_else_help = true)]
    List {
        /// Target repository as project/repository
        target: String,

        /// Include obsolete records
        #[arg(long)]
        history: bool,
    },

    /// Print the rendered projection of one release record
    #[command(arg_required_else_help = true)]
    Show {
        /// Release record ID
        id: i32,
    },

    /// List known repositories
    Repos,
}
