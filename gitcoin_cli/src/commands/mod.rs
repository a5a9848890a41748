//! CLI subcommand implementations.

pub mod bounties;
pub mod fields;
