//! Subcommand implementations.

pub mod open;
pub mod total;
pub mod waves;
