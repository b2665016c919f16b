//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the folio binary.

mod commands;
mod run;
mod server;
mod world;

pub use commands::{Cli, Commands, GenerateArgs};
pub use run::{RunOptions, build_request, continue_once, run_story};
pub use server::handle_serve;
pub use world::{clear_worlds, create_world, read_description, show_world};
