//! Status command - show the link database state.
//!
//! Displays the configured connection and table along with link counts
//! in total and per resource kind.

use anyhow::Result;
use colored::Colorize;

use crate::config::Config;
use crate::storage::Database;

/// Executes the status command.
pub fn run() -> Result<()> {
    let config = Config::load()?;
    config.link.validate()?;

    println!("{}", "Tracklink".bold().cyan());
    println!("{}", "Durable links between tracker systems".dimmed());
    println!();

    println!("{}", "Database:".bold());
    println!("  Driver:   {}", config.connection.driver);
    if let Some(ref server) = config.connection.server {
        println!("  Server:   {server}");
    }
    println!("  Database: {}", config.connection.database);
    println!("  Table:    {}", config.link.table_name);

    let db = Database::connect(&config.connection)?;

    match db.count_rows(&config.link.table_name) {
        Ok(total) => {
            println!();
            println!("{}", format!("Links recorded: {total}").green());

            let by_kind =
                db.count_rows_grouped(&config.link.table_name, &config.link.resource_field_name)?;
            if !by_kind.is_empty() {
                println!();
                println!("{}", "By resource kind:".bold());
                for (kind, count) in by_kind {
                    println!("  {kind:12}  {count}");
                }
            }
        }
        Err(_) => {
            println!();
            println!(
                "{}",
                "Link table not found. Run 'tracklink init' to create it.".yellow()
            );
        }
    }

    Ok(())
}
