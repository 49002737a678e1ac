//! Road graph CLI library.
//!
//! Subcommand handlers, output formatting and terminal styling used by the
//! `roadgraph-cli` binary.

pub mod commands;
pub mod output;
pub mod terminal;
