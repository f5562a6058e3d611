//! CLI support for the `leven` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod dictionary;
pub mod output;

pub use context::CommandContext;
