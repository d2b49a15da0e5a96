//! CLI command handlers

pub mod commands;

pub use commands::{cells, export, preview, search, sheets, summary};
