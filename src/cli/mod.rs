//! Command-line interface for tracklink.
//!
//! Provides the administrative commands over the link database:
//! creating the link table, recording and removing links, lookups,
//! and configuration management.

/// Individual CLI command implementations.
pub mod commands;
