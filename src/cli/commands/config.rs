//! Config command - manage configuration.

use anyhow::{bail, Result};
use clap::Subcommand;
use colored::Colorize;

use crate::config::{config_path, Config};

#[derive(clap::Args)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
}

pub fn run(args: Args) -> Result<()> {
    match args.command {
        Some(ConfigCommand::Show) | None => show_config(),
        Some(ConfigCommand::Get { key }) => get_config(&key),
        Some(ConfigCommand::Set { key, value }) => set_config(&key, &value),
    }
}

/// All addressable keys with their current values.
fn entries(config: &Config) -> Vec<(&'static str, String)> {
    vec![
        ("connection.driver", config.connection.driver.clone()),
        (
            "connection.server",
            config.connection.server.clone().unwrap_or_default(),
        ),
        ("connection.database", config.connection.database.clone()),
        ("link.table_name", config.link.table_name.clone()),
        (
            "link.resource_field_name",
            config.link.resource_field_name.clone(),
        ),
        (
            "link.source_field_name",
            config.link.source_field_name.clone(),
        ),
        (
            "link.target_field_name",
            config.link.target_field_name.clone(),
        ),
    ]
}

fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Tracklink Configuration".bold());
    println!();
    println!("  {}  {}", "Config file:".dimmed(), config_path()?.display());
    println!();

    for (key, value) in entries(&config) {
        println!("  {key} = {value}");
    }

    Ok(())
}

fn get_config(key: &str) -> Result<()> {
    let config = Config::load()?;

    match entries(&config).iter().find(|(k, _)| *k == key) {
        Some((_, value)) => println!("{value}"),
        None => bail!("Unknown config key '{key}'. Run 'tracklink config show' to list keys."),
    }

    Ok(())
}

fn set_config(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        "connection.driver" => config.connection.driver = value.to_string(),
        "connection.server" => {
            config.connection.server = if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        }
        "connection.database" => config.connection.database = value.to_string(),
        "link.table_name" => config.link.table_name = value.to_string(),
        "link.resource_field_name" => config.link.resource_field_name = value.to_string(),
        "link.source_field_name" => config.link.source_field_name = value.to_string(),
        "link.target_field_name" => config.link.target_field_name = value.to_string(),
        _ => bail!("Unknown config key '{key}'. Run 'tracklink config show' to list keys."),
    }

    config.save()?;
    println!("Set {} = {}", key.cyan(), value);

    Ok(())
}
