//! # promptmart Library
//!
//! Client library for an AI tool and prompt marketplace.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types, errors, and shared coordination
//! - [`logger`] - Structured logging configuration
//! - [`networking`] - HTTP client facade with auth-aware interception
//! - [`storage`] - Durable bearer-token storage
//! - [`session`] - Authoritative client-side session state
//! - [`api`] - Domain endpoint wrappers (auth, tools, prompts, payment)
//! - [`application`] - CLI interface and configuration management
//!
//! ## Quick Start
//!
//! ```no_run
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     promptmart_lib::main().await
//! }
//! ```

pub mod api;
pub mod application;
pub mod logger;
pub mod networking;
pub mod primitives;
pub mod session;
pub mod storage;

// Re-export commonly used types for convenience
pub use api::{ADMIN_ROLE, AuthApi, AuthResponse, PaymentApi, PromptsApi, ToolsApi, UserProfile};
pub use application::{AppConfig, Cli, CommandContext, Commands, execute_command};
pub use logger::Logger;
pub use networking::{
    ApiClient, ApiClientConfig, ApiError, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS, SessionExpiredHook,
};
pub use primitives::{
    ColorIntent, ConfigError, LogFormat, LogLevel, LogOutput, LoggerConfig, LoggerError,
    StorageError,
};
pub use session::{SessionState, SessionStore};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};

// Private imports for the main function
use anyhow::Result;
use application::CliConfig;

pub async fn main() -> Result<()> {
    // Load CLI configuration
    let config = CliConfig::load()?;

    // Execute the command
    execute_command(config).await
}
