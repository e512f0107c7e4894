pub mod test_env;

// Re-export key testing utilities
pub use test_env::{admin_user_body, context_for, user_body};
