//! CLI argument definitions using clap
//!
//! Commands:
//! - placereview init --config <path>
//! - placereview serve --config <path> [--port <port>]
//! - placereview seed --config <path>
//! - placereview create-admin --config <path> --name <name> --phone <phone> --password <password>
//! - placereview set-active --config <path> --phone <phone> --active <true|false>

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// placereview - reviews of places, searchable by name and rating
#[derive(Parser, Debug)]
#[command(name = "placereview")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default config (if absent) and create the database
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./placereview.json")]
        config: PathBuf,
    },

    /// Start the HTTP API server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./placereview.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Populate the database with sample users, places and reviews
    Seed {
        /// Path to configuration file
        #[arg(long, default_value = "./placereview.json")]
        config: PathBuf,
    },

    /// Create a staff superuser account
    CreateAdmin {
        /// Path to configuration file
        #[arg(long, default_value = "./placereview.json")]
        config: PathBuf,

        #[arg(long)]
        name: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        password: String,
    },

    /// Activate or deactivate an account
    SetActive {
        /// Path to configuration file
        #[arg(long, default_value = "./placereview.json")]
        config: PathBuf,

        #[arg(long)]
        phone: String,

        #[arg(long, action = ArgAction::Set)]
        active: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
