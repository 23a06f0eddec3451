mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "roster",
    about = "Turn solver duty assignments into SPH and VGH resident schedules",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding the solver output and tables (default: nearest roster.yaml, else cwd)
    #[arg(long, global = true, env = "ROSTER_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default roster.yaml
    Init,

    /// Decode the solver output and write the index schedule
    Index,

    /// Split the index schedule into one code table per site
    Split,

    /// Replace codes with names in the per-site tables
    Names,

    /// Write per-resident assignment counts for each site
    Counts,

    /// Write the index schedule, then any requested downstream views
    Run {
        /// Also split the schedule and resolve names
        #[arg(long)]
        names: bool,

        /// Also write assignment counts
        #[arg(long)]
        counts: bool,
    },

    /// Print the decoded rosters
    Show {
        /// Show display names instead of codes
        #[arg(long)]
        names: bool,
    },

    /// Inspect and validate roster.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    tracing::debug!(root = %root.display(), "resolved root");

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Index => cmd::index::run(&root, cli.json),
        Commands::Split => cmd::split::run(&root, cli.json),
        Commands::Names => cmd::names::run(&root, cli.json),
        Commands::Counts => cmd::counts::run(&root, cli.json),
        Commands::Run { names, counts } => cmd::run::run(&root, names, counts, cli.json),
        Commands::Show { names } => cmd::show::run(&root, names, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
