//! Unlink command - remove recorded links.
//!
//! Deletion is an administrative operation: the linker itself never
//! removes records, so this command goes straight to the storage layer.

use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;

use crate::config::Config;
use crate::storage::Database;

/// Arguments for the unlink command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    tracklink unlink issue PROJ-1       Remove the link (prompts)\n    \
    tracklink unlink issue PROJ-1 -y    Remove the link (no prompt)")]
pub struct Args {
    /// Resource kind the key belongs to (e.g. issue, journal, comment)
    #[arg(value_name = "KIND")]
    pub kind: String,

    /// Source tracker key to unlink
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    #[arg(
        long_help = "Skip the confirmation prompt and proceed with removal.\n\
        A removed link makes the next sync pass treat the source\n\
        resource as never mirrored."
    )]
    pub yes: bool,
}

/// Executes the unlink command.
pub fn run(args: Args) -> Result<()> {
    let config = Config::load()?;
    config.link.validate()?;

    let db = Database::connect(&config.connection)?;

    let filter = [
        (
            config.link.resource_field_name.as_str(),
            args.kind.as_str(),
        ),
        (config.link.source_field_name.as_str(), args.source.as_str()),
    ];

    let existing = db.get(
        &config.link.table_name,
        &[config.link.target_field_name.as_str()],
        &filter,
    )?;

    let Some(row) = existing else {
        println!(
            "{}",
            format!("{} {} has no link to remove", args.kind, args.source).dimmed()
        );
        return Ok(());
    };

    let target = row
        .get(&config.link.target_field_name)
        .unwrap_or("unknown")
        .to_string();

    if !args.yes {
        print!(
            "Unlink {} {} from {}? [y/N] ",
            args.kind,
            args.source.cyan(),
            target.yellow()
        );
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("{}", "Cancelled".dimmed());
            return Ok(());
        }
    }

    let deleted = db.delete_rows(&config.link.table_name, &filter)?;

    if deleted == 1 {
        println!(
            "{} {} {} from {}",
            "Unlinked".green(),
            args.kind,
            args.source.cyan(),
            target.yellow()
        );
    } else {
        println!(
            "{} {} record(s) for {} {}",
            "Removed".green(),
            deleted,
            args.kind,
            args.source.cyan()
        );
    }

    Ok(())
}
