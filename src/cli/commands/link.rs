//! Link command - record a cross-tracker link.
//!
//! Records that a source-tracker resource corresponds to a target-tracker
//! resource. The record is what later sync passes consult to avoid
//! mirroring the same resource twice.

use anyhow::Result;
use colored::Colorize;

use crate::config::Config;
use crate::linker::{DbLinker, Linker};
use crate::resources::ResourceRef;

/// Arguments for the link command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    tracklink link issue PROJ-1 RM-42   Link an issue\n    \
    tracklink link journal 17 204       Link a journal entry\n    \
    tracklink link comment 88 1204      Link a comment")]
pub struct Args {
    /// Resource kind the keys belong to (e.g. issue, journal, comment)
    #[arg(value_name = "KIND")]
    #[arg(
        long_help = "The resource kind both keys belong to. Scopes the record so\n\
        keys from different kinds cannot collide in one table."
    )]
    pub kind: String,

    /// Source tracker key
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Target tracker key
    #[arg(value_name = "TARGET")]
    pub target: String,
}

/// Executes the link command.
///
/// Repeating a link for the same kind and target key updates the
/// existing record instead of adding a duplicate.
pub fn run(args: Args) -> Result<()> {
    let config = Config::load()?;
    let linker = DbLinker::new(&config.connection, Some(config.link))?;

    let source = ResourceRef::new(&args.kind, &args.source);
    let target = ResourceRef::new(&args.kind, &args.target);

    linker.link(&source, &target)?;
    tracing::debug!(kind = %args.kind, source = %args.source, target = %args.target, "recorded link");

    println!(
        "{} {} {} -> {}",
        "Linked".green(),
        args.kind,
        args.source.cyan(),
        args.target.yellow()
    );

    Ok(())
}
