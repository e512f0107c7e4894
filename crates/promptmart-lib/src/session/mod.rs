//! Client-side session state
//!
//! Owns the single authoritative in-memory session: current user, bearer
//! token, an in-flight flag, and the last user-facing error. Every
//! state-changing operation performs exactly one auth API call, records
//! the outcome, and re-raises failures to the caller. The store never
//! hides a failure; `error` exists for display, the returned `Result` for
//! caller-specific handling.
//!
//! Concurrency: state sits behind a mutex that is never held across an
//! await. Within one operation all state writes land before the returned
//! future resolves; concurrent operations interleave last-writer-wins on
//! the shared `loading`/`error` fields.

use crate::api::{AuthApi, AuthResponse, UserProfile};
use crate::networking::ApiError;
use crate::storage::TokenStore;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Fixed user-facing messages used when the server supplies none
pub mod fallback {
    pub const REGISTER: &str = "Registration failed, please try again";
    pub const LOGIN: &str = "Login failed, please try again";
    pub const FETCH_USER: &str = "Failed to fetch user information";
    pub const UPDATE_PROFILE: &str = "Failed to update profile";
    pub const CHANGE_PASSWORD: &str = "Failed to change password";
}

/// Snapshot of the session state
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<UserProfile>,
    pub token: Option<String>,
    /// True only strictly while a store-initiated operation is in flight
    pub loading: bool,
    pub error: Option<String>,
}

/// The authoritative session store
pub struct SessionStore {
    auth: AuthApi,
    tokens: Arc<dyn TokenStore>,
    state: Mutex<SessionState>,
}

impl SessionStore {
    /// Create the store, seeding the token from durable storage
    pub fn new(auth: AuthApi, tokens: Arc<dyn TokenStore>) -> Self {
        let token = tokens.load();
        if token.is_some() {
            debug!("Session restored from stored token");
        }
        Self {
            auth,
            tokens,
            state: Mutex::new(SessionState {
                token,
                ..Default::default()
            }),
        }
    }

    /// Clone of the current state
    pub fn snapshot(&self) -> SessionState {
        self.state.lock().unwrap().clone()
    }

    /// Logged in ⇔ a token is present
    pub fn is_logged_in(&self) -> bool {
        self.state.lock().unwrap().token.is_some()
    }

    /// Admin ⇔ a user is present with the admin role (UI gating only,
    /// authorization is enforced server-side)
    pub fn is_admin(&self) -> bool {
        self.state
            .lock()
            .unwrap()
            .user
            .as_ref()
            .is_some_and(UserProfile::is_admin)
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.state.lock().unwrap().user.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().unwrap().error.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.lock().unwrap().loading
    }

    /// Write the token in memory and mirror it into durable storage
    pub fn set_token(&self, token: Option<&str>) {
        self.state.lock().unwrap().token = token.map(str::to_string);
        let result = match token {
            Some(token) => self.tokens.save(token),
            None => self.tokens.clear(),
        };
        if let Err(e) = result {
            warn!("Failed to mirror token to durable storage: {}", e);
        }
    }

    /// Create an account; on success the session is logged in
    pub async fn register(&self, payload: &Value) -> Result<AuthResponse, ApiError> {
        self.begin();
        let result = self.auth.register(payload).await;
        match &result {
            Ok(response) => {
                self.set_token(Some(&response.token));
                self.set_user(Some(response.user.clone()));
            }
            Err(err) => self.record_failure(err, fallback::REGISTER),
        }
        self.finish();
        result
    }

    /// Authenticate; on success the session is logged in
    pub async fn login(&self, credentials: &Value) -> Result<AuthResponse, ApiError> {
        self.begin();
        let result = self.auth.login(credentials).await;
        match &result {
            Ok(response) => {
                self.set_token(Some(&response.token));
                self.set_user(Some(response.user.clone()));
            }
            Err(err) => self.record_failure(err, fallback::LOGIN),
        }
        self.finish();
        result
    }

    /// Clear the session, locally only. Synchronous, no network call.
    pub fn logout(&self) {
        self.set_token(None);
        self.set_user(None);
    }

    /// Refresh the current identity from the server
    pub async fn fetch_current_user(&self) -> Result<UserProfile, ApiError> {
        self.begin();
        let result = self.auth.get_current_user().await;
        match &result {
            Ok(user) => self.set_user(Some(user.clone())),
            Err(err) => self.record_failure(err, fallback::FETCH_USER),
        }
        self.finish();
        result
    }

    /// Update the current identity
    pub async fn update_profile(&self, payload: &Value) -> Result<UserProfile, ApiError> {
        self.begin();
        let result = self.auth.update_profile(payload).await;
        match &result {
            Ok(user) => self.set_user(Some(user.clone())),
            Err(err) => self.record_failure(err, fallback::UPDATE_PROFILE),
        }
        self.finish();
        result
    }

    /// Change the credential; touches neither token nor user on success
    pub async fn change_password(&self, payload: &Value) -> Result<Value, ApiError> {
        self.begin();
        let result = self.auth.change_password(payload).await;
        if let Err(err) = &result {
            self.record_failure(err, fallback::CHANGE_PASSWORD);
        }
        self.finish();
        result
    }

    fn begin(&self) {
        let mut state = self.state.lock().unwrap();
        state.loading = true;
        state.error = None;
    }

    fn finish(&self) {
        self.state.lock().unwrap().loading = false;
    }

    fn set_user(&self, user: Option<UserProfile>) {
        self.state.lock().unwrap().user = user;
    }

    /// Record the server-supplied message, or the operation's fixed
    /// fallback when the server gave none
    fn record_failure(&self, err: &ApiError, fallback: &str) {
        let message = err
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string());
        self.state.lock().unwrap().error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
