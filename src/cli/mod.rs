//! CLI module for txnq
//!
//! Provides the `txnq` command line: one command per invocation, one JSON
//! object on stdout, structured logs on stderr.

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, InputArgs, OutputArgs};
pub use commands::{execute, run, run_cli, run_command};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_error_to, write_response, write_response_to};
