//! Command implementations, one module per CLI subcommand.

pub mod list_keys;
