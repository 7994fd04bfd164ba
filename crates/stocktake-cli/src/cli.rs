//! Command-line definitions.

use clap::{Parser, Subcommand};
use stocktake_core::Role;

/// Stocktake - inventory tracking server
#[derive(Parser, Debug)]
#[command(name = "stocktake")]
#[command(author, version, about = "Inventory tracking server and admin tool", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "STOCKTAKE_CONFIG")]
    pub config: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API server
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,

        /// Use an in-memory store instead of MongoDB
        #[arg(long)]
        memory: bool,
    },
    /// Manage user accounts
    User {
        /// User subcommand
        #[command(subcommand)]
        action: UserAction,
    },
    /// Manage the configuration file
    Config {
        /// Config subcommand
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `stocktake user ...`
#[derive(Subcommand, Debug)]
pub enum UserAction {
    /// Create a user
    Add {
        /// Login name
        username: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Access tier
        #[arg(long, default_value = "user")]
        role: Role,

        /// Password (falls back to STOCKTAKE_USER_PASSWORD)
        #[arg(long, env = "STOCKTAKE_USER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// List users
    List,
    /// Delete a user
    Delete {
        /// Login name
        username: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Change a user's password
    Passwd {
        /// Login name
        username: String,

        /// New password (falls back to STOCKTAKE_USER_PASSWORD)
        #[arg(long, env = "STOCKTAKE_USER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}

/// `stocktake config ...`
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the resolved config file path
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Print the effective configuration with secrets masked
    Show,
}
