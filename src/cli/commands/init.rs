//! Init command - create the link table.

use anyhow::Result;
use colored::Colorize;

use crate::config::{config_path, Config};
use crate::storage::Database;

/// Executes the init command.
///
/// Creates the configured link table and its lookup index if missing,
/// and persists the effective configuration on first run.
pub fn run() -> Result<()> {
    let config = Config::load()?;
    config.link.validate()?;

    let db = Database::connect(&config.connection)?;
    db.create_link_table(
        &config.link.table_name,
        &config.link.resource_field_name,
        &config.link.source_field_name,
        &config.link.target_field_name,
    )?;

    if !config_path()?.exists() {
        config.save()?;
        tracing::debug!("wrote initial config file");
    }

    println!(
        "{} link table '{}' in {}",
        "Ready".green(),
        config.link.table_name.cyan(),
        config.connection.database
    );

    Ok(())
}
