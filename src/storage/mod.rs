//! Storage layer for tracklink.

pub mod db;

pub use db::{ConnectionParams, Database, Row, StorageError};
