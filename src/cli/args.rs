//! CLI argument definitions using clap
//!
//! Commands:
//! - aerovalidate check --config <path> --class <name> [--doc <path>] [--field <name>]... [--tolerant]
//! - aerovalidate classes --config <path>
//! - aerovalidate validators

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// aerovalidate - Declarative field validation for JSON documents
#[derive(Parser, Debug)]
#[command(name = "aerovalidate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate one document against a loaded class
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./aerovalidate.json")]
        config: PathBuf,

        /// Class the document belongs to
        #[arg(long)]
        class: String,

        /// Document file; one line of stdin when omitted
        #[arg(long)]
        doc: Option<PathBuf>,

        /// Validate only these fields (repeatable)
        #[arg(long = "field")]
        fields: Vec<String>,

        /// Collect every failure instead of stopping at the first
        #[arg(long)]
        tolerant: bool,
    },

    /// List loaded classes with their validation order
    Classes {
        /// Path to configuration file
        #[arg(long, default_value = "./aerovalidate.json")]
        config: PathBuf,
    },

    /// List registered validator kinds
    Validators,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
