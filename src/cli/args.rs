//! CLI argument definitions using clap
//!
//! Commands:
//! - rowlayout compile --file <path> [--no-check-names] [--align <marker>]
//! - rowlayout inspect --descriptor <string>
//! - rowlayout load --dir <path>
//! - rowlayout types

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// rowlayout - compile column descriptions into binary record layouts
#[derive(Parser, Debug)]
#[command(name = "rowlayout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log compile events at trace level
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a description file and print the schema
    Compile {
        /// Path to the JSON description file
        #[arg(long)]
        file: PathBuf,

        /// Accept column names that fail identifier validity
        #[arg(long)]
        no_check_names: bool,

        /// Alignment marker, overriding the file's option
        #[arg(long)]
        align: Option<char>,
    },

    /// Parse a layout descriptor and print its fields
    Inspect {
        /// Descriptor string, e.g. "=i(2, 3)d16s"
        #[arg(long)]
        descriptor: String,
    },

    /// Compile every description file in a directory
    Load {
        #[arg(long)]
        dir: PathBuf,
    },

    /// List the scalar types known to the registry
    Types,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
