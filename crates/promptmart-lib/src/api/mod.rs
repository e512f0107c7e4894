//! # API Module
//!
//! Domain endpoint wrappers over the shared [`crate::networking::ApiClient`]
//! facade. Each wrapper maps method calls 1:1 onto REST endpoints and owns
//! no cross-cutting behavior (auth headers, error classification, and the
//! 401 side effect all live in the facade).
//!
//! ## Modules
//!
//! - [`auth`] - account registration, login, identity management
//! - [`tools`] - AI tool listings, ratings, admin management
//! - [`prompts`] - prompt marketplace listings and purchases
//! - [`payment`] - order lifecycle and payment queries

pub mod auth;
pub mod payment;
pub mod prompts;
pub mod tools;

pub use auth::{ADMIN_ROLE, AuthApi, AuthResponse, UserProfile};
pub use payment::PaymentApi;
pub use prompts::PromptsApi;
pub use tools::ToolsApi;
