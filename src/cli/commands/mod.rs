//! CLI commands for tracklink.
//!
//! Each submodule implements a single CLI command with its argument
//! parsing and execution logic.

/// Configuration viewing and management.
pub mod config;

/// Create the link table.
pub mod init;

/// Record a cross-tracker link.
pub mod link;

/// Look up the target key for a source resource.
pub mod lookup;

/// Show link counts for the configured table.
pub mod status;

/// Remove recorded links.
pub mod unlink;
