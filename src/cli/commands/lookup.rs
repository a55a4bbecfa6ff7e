//! Lookup command - find the target key linked to a source resource.

use anyhow::Result;
use colored::Colorize;

use crate::config::Config;
use crate::linker::{DbLinker, Linker};
use crate::resources::ResourceRef;

/// Arguments for the lookup command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    tracklink lookup issue PROJ-1       Find the target key for an issue\n    \
    tracklink lookup journal 17         Find the target key for a journal entry")]
pub struct Args {
    /// Resource kind the key belongs to (e.g. issue, journal, comment)
    #[arg(value_name = "KIND")]
    pub kind: String,

    /// Source tracker key
    #[arg(value_name = "SOURCE")]
    pub source: String,
}

/// Executes the lookup command.
///
/// An absent link is a normal outcome: it is reported and the command
/// still exits successfully.
pub fn run(args: Args) -> Result<()> {
    let config = Config::load()?;
    let linker = DbLinker::new(&config.connection, Some(config.link))?;

    let source = ResourceRef::new(&args.kind, &args.source);

    match linker.get_target_key(&source)? {
        Some(target) => {
            println!(
                "{} {} -> {}",
                args.kind,
                args.source.cyan(),
                target.yellow()
            );
        }
        None => {
            println!(
                "{}",
                format!("{} {} is not linked", args.kind, args.source).dimmed()
            );
        }
    }

    Ok(())
}
