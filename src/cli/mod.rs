//! CLI module for placereview
//!
//! Provides command-line interface for:
//! - init: Write a default config and create the database
//! - serve: Run the HTTP API
//! - seed: Insert sample data
//! - create-admin / set-active: Account administration

mod args;
mod commands;
mod config;
mod errors;
mod io;
mod seed;

pub use args::{Cli, Command};
pub use commands::{create_admin, init, run, run_command, seed_database, serve, set_active};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_response;
pub use seed::SeedReport;
