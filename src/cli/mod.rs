//! CLI module for rowlayout
//!
//! Provides command-line interface for:
//! - compile: Compile one description file
//! - inspect: Parse a layout descriptor
//! - load: Compile a directory of description files
//! - types: List registry types

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{compile, inspect, load, run, run_command, types};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
