//! CLI command implementations

pub mod completions;
pub mod config;
pub mod network;
pub mod query;
