//! CLI subcommands.

pub mod migrate;
pub mod search;
