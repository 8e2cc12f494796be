//! Subcommand entry points, one module per `Commands` variant.

pub mod migrate;
pub mod serve;
