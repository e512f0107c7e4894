use crate::primitives::ConfigError;
use clap::{Parser, Subcommand};

use super::config::AppConfig;

/// promptmart CLI - AI tool and prompt marketplace client
#[derive(Debug, Clone, Parser)]
#[command(name = "promptmart")]
#[command(about = "Browse AI tools, buy prompts, manage your account")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// promptmart commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Load configuration from command line arguments
    /// (precedence: defaults -> .env -> env vars -> CLI args)
    pub fn load() -> Result<Self, ConfigError> {
        // .env files first, so clap's env fallbacks see their values
        let env_files = [".env.local", ".env"];
        for env_file in &env_files {
            if let Err(e) = dotenvy::from_filename(env_file) {
                // Only error if the file exists but can't be read
                if !e.to_string().contains("not found") && !e.to_string().contains("No such file") {
                    return Err(ConfigError::EnvFileError {
                        file: env_file.to_string(),
                        source: e,
                    });
                }
            }
        }

        let cli = Cli::parse();
        cli.config.validate()?;
        Ok(Self {
            app_config: cli.config,
            command: cli.command,
        })
    }
}

/// Available promptmart commands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Browse AI tools
    Tools {
        /// Show one tool by id instead of the listing
        #[arg(long)]
        id: Option<String>,

        /// Filter by category
        #[arg(long)]
        category: Option<String>,

        /// Full-text search query
        #[arg(long)]
        search: Option<String>,

        /// List tool categories instead of tools
        #[arg(long)]
        categories: bool,
    },

    /// Browse the prompt marketplace
    Prompts {
        /// Show one prompt by id instead of the listing
        #[arg(long)]
        id: Option<String>,

        /// Filter by category
        #[arg(long)]
        category: Option<String>,

        /// Full-text search query
        #[arg(long)]
        search: Option<String>,

        /// List prompt categories instead of prompts
        #[arg(long)]
        categories: bool,

        /// Show prompts you authored
        #[arg(long)]
        mine: bool,

        /// Show prompts you purchased
        #[arg(long)]
        purchased: bool,
    },

    /// Create an account and log in
    Register,

    /// Authenticate and store the session token
    Login,

    /// Clear the stored session
    Logout,

    /// Show or update your profile
    Profile {
        /// Profile fields to update, as KEY=VALUE pairs
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },

    /// Change the account password
    Passwd,

    /// Purchase a prompt
    Purchase {
        /// Prompt id to purchase
        prompt_id: String,
    },

    /// List orders, check status, cancel, or request a refund
    Orders {
        /// Show the status of one order
        #[arg(long)]
        id: Option<String>,

        /// Cancel an order
        #[arg(long, value_name = "ORDER_ID")]
        cancel: Option<String>,

        /// Request a refund for an order
        #[arg(long, value_name = "ORDER_ID")]
        refund: Option<String>,

        /// Refund reason (with --refund)
        #[arg(long, requires = "refund")]
        reason: Option<String>,

        /// List accepted payment methods
        #[arg(long)]
        methods: bool,
    },
}

impl Commands {
    /// Check if command requires a stored session token.
    ///
    /// The gate mirrors the route guard of the original marketplace UI:
    /// profile management is refused up front when logged out, everything
    /// else is allowed through and left to the server to reject.
    pub fn requires_auth(&self) -> bool {
        match self {
            Commands::Tools { .. } => false,
            Commands::Prompts { .. } => false,
            Commands::Register => false,
            Commands::Login => false,
            Commands::Logout => false,
            Commands::Profile { .. } => true,
            Commands::Passwd => true,
            Commands::Purchase { .. } => false,
            Commands::Orders { .. } => false,
        }
    }

    /// Command name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Tools { .. } => "tools",
            Commands::Prompts { .. } => "prompts",
            Commands::Register => "register",
            Commands::Login => "login",
            Commands::Logout => "logout",
            Commands::Profile { .. } => "profile",
            Commands::Passwd => "passwd",
            Commands::Purchase { .. } => "purchase",
            Commands::Orders { .. } => "orders",
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
