use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod linker;
mod resources;
mod storage;

use cli::commands;

/// The main CLI command line interface.
#[derive(Parser)]
#[command(name = "tracklink")]
#[command(version)]
#[command(about = "Durable links between tracker systems")]
#[command(long_about = "Tracklink keeps a durable mapping between resources of two issue\n\
    trackers. A sync run asks it for the existing counterpart of a source\n\
    resource and records the link after mirroring a new one, so nothing\n\
    gets created twice.")]
#[command(after_help = "EXAMPLES:\n    \
    tracklink init                       Create the link table\n    \
    tracklink link issue PROJ-1 RM-42    Record a link\n    \
    tracklink lookup issue PROJ-1        Find the linked target key\n    \
    tracklink unlink issue PROJ-1        Remove a link\n    \
    tracklink status                     Show link counts\n    \
    tracklink config show                Show configuration\n\n\
    For more information about a command, run 'tracklink <command> --help'.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Create the link table in the configured database
    #[command(long_about = "Creates the configured link table and its lookup index if they\n\
        do not exist yet. Safe to run repeatedly.")]
    Init,

    /// Record a link between a source and a target resource
    #[command(long_about = "Records that a source-tracker resource corresponds to a\n\
        target-tracker resource. Repeating a link updates the existing\n\
        record instead of adding a duplicate.")]
    Link(commands::link::Args),

    /// Look up the target key linked to a source resource
    #[command(long_about = "Prints the target-tracker key previously linked to a source\n\
        resource. An absent link is reported, not treated as an error.")]
    Lookup(commands::lookup::Args),

    /// Remove recorded links for a source resource
    #[command(long_about = "Deletes link records for a source resource. The linker itself\n\
        never deletes; this is the administrative path.")]
    Unlink(commands::unlink::Args),

    /// Show link counts for the configured table
    #[command(long_about = "Displays the configured database and table along with link\n\
        counts in total and per resource kind.")]
    Status,

    /// View and manage configuration settings
    #[command(long_about = "Provides subcommands to show, get, and set configuration values.\n\
        Configuration is stored in ~/.tracklink/config.json.")]
    Config(commands::config::Args),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "tracklink=debug"
    } else {
        "tracklink=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Link(args) => commands::link::run(args),
        Commands::Lookup(args) => commands::lookup::run(args),
        Commands::Unlink(args) => commands::unlink::run(args),
        Commands::Status => commands::status::run(),
        Commands::Config(args) => commands::config::run(args),
    }
}
