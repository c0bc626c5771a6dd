//! CLI module for aerovalidate
//!
//! Provides command-line interface for:
//! - check: Validate one document against a loaded class
//! - classes: List loaded classes
//! - validators: List registered validator kinds

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, classes, run, run_command, validators, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_error, write_response};
