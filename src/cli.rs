use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::dispatch::BuildClient;

/// amitui - A terminal-based Cassandra AMI configurator
#[derive(Parser)]
#[command(name = "amitui")]
#[command(about = "A terminal-based configurator for building Cassandra machine images")]
#[command(version)]
pub struct Cli {
    /// Build service endpoint receiving the assembled configuration.
    #[arg(long, global = true, default_value = BuildClient::DEFAULT_ENDPOINT)]
    pub endpoint: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a saved configuration file without the TUI
    Build {
        /// Path to an image configuration JSON file
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        /// Path to the configuration file to validate
        config: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
