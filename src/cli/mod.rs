//! CLI module for the Stratovia client.
//!
//! This module provides the command-line interface for managing
//! CloudAPI infrastructure.

mod commands;
mod output;

pub use commands::{
    Cli, Commands, DatacenterCommands, LanCommands, NicCommands, OutputFormat, RequestCommands,
    ServerCommands,
};
pub use output::OutputFormatter;
