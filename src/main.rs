//! # Seeds CLI
//!
//! This is the binary entry point for the `seeds` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging and terminal output.
//! - Executing the appropriate command and reporting fatal errors.
//!
//! The install pipeline itself lives in the `seeds` library crate; the binary
//! is a thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
