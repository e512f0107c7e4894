//! Command execution handlers
//!
//! The composition root: builds the token store, the HTTP facade (with its
//! session-expired hook), the session store, and the domain API wrappers
//! once per invocation, then dispatches commands against them. Nothing in
//! here is a global; consumers receive what they need explicitly.

use crate::api::{AuthApi, PaymentApi, PromptsApi, ToolsApi, UserProfile};
use crate::application::{AppConfig, CliConfig, Commands};
use crate::logger::Logger;
use crate::networking::{ApiClient, ApiError, SessionExpiredHook};
use crate::primitives::LoggerError;
use crate::session::SessionStore;
use crate::storage::{FileTokenStore, TokenStore};
use anyhow::{Result, anyhow, bail};
use console::style;
use dialoguer::{Input, Password};
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// Everything a command handler needs, constructed once at startup
pub struct CommandContext {
    pub config: AppConfig,
    pub tokens: Arc<dyn TokenStore>,
    pub session: SessionStore,
    pub tools: ToolsApi,
    pub prompts: PromptsApi,
    pub payment: PaymentApi,
}

impl CommandContext {
    /// Production wiring: file-backed token store
    pub fn new(config: AppConfig) -> Result<Self> {
        let path = match &config.token_file {
            Some(path) => path.clone(),
            None => FileTokenStore::default_path()?,
        };
        let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(path));
        Self::with_token_store(config, tokens)
    }

    /// Wiring with an injected token store (used by tests)
    pub fn with_token_store(config: AppConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        // The facade reports credential expiry; deciding what "go to the
        // login view" means is this layer's job, not networking's.
        let hook: SessionExpiredHook = Arc::new(|| {
            eprintln!(
                "{}",
                style("Session expired, please run `promptmart login` again").yellow()
            );
        });

        let client = Arc::new(
            ApiClient::new(config.api_client_config(), tokens.clone())?
                .with_session_expired_hook(hook),
        );

        Ok(Self {
            session: SessionStore::new(AuthApi::new(client.clone()), tokens.clone()),
            tools: ToolsApi::new(client.clone()),
            prompts: PromptsApi::new(client.clone()),
            payment: PaymentApi::new(client),
            tokens,
            config,
        })
    }
}

/// Execute CLI commands
pub async fn execute_command(config: CliConfig) -> Result<()> {
    match Logger::init(config.app_config.logger_config()?) {
        Ok(_) | Err(LoggerError::AlreadyInitialized) => {}
        Err(e) => return Err(e.into()),
    }

    let command = match config.command {
        Some(cmd) => cmd,
        None => {
            println!(
                "{}",
                style("promptmart - AI tool & prompt marketplace").bold()
            );
            println!("Run 'promptmart --help' for usage information");
            return Ok(());
        }
    };

    let context = CommandContext::new(config.app_config)?;
    execute_command_with_context(command, &context).await
}

/// Execute a specific command with a provided context (for testing)
pub async fn execute_command_with_context(
    command: Commands,
    context: &CommandContext,
) -> Result<()> {
    // Route guard: profile management needs a stored token; everything
    // else passes through and lets the server reject.
    if command.requires_auth() && context.tokens.load().is_none() {
        bail!(
            "Please log in first: run `promptmart login`, then re-run `promptmart {}`",
            command.name()
        );
    }

    match command {
        Commands::Tools {
            id,
            category,
            search,
            categories,
        } => handle_tools(context, id, category, search, categories).await,
        Commands::Prompts {
            id,
            category,
            search,
            categories,
            mine,
            purchased,
        } => handle_prompts(context, id, category, search, categories, mine, purchased).await,
        Commands::Register => handle_register(context).await,
        Commands::Login => handle_login(context).await,
        Commands::Logout => handle_logout(context),
        Commands::Profile { set } => handle_profile(context, set).await,
        Commands::Passwd => handle_passwd(context).await,
        Commands::Purchase { prompt_id } => handle_purchase(context, &prompt_id).await,
        Commands::Orders {
            id,
            cancel,
            refund,
            reason,
            methods,
        } => handle_orders(context, id, cancel, refund, reason, methods).await,
    }
}

async fn handle_tools(
    context: &CommandContext,
    id: Option<String>,
    category: Option<String>,
    search: Option<String>,
    categories: bool,
) -> Result<()> {
    if categories {
        let body = context.tools.categories().await?;
        print_listing(&body, &["categories"], "categories");
        return Ok(());
    }

    if let Some(id) = id {
        let body = context.tools.get(&id).await?;
        print_record(&body)?;
        return Ok(());
    }

    let mut params: Vec<(&str, String)> = Vec::new();
    if let Some(category) = &category {
        params.push(("category", category.clone()));
    }
    if let Some(search) = &search {
        params.push(("search", search.clone()));
    }

    let body = context.tools.list(&params).await?;
    print_listing(&body, &["tools", "items", "data"], "tools");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn handle_prompts(
    context: &CommandContext,
    id: Option<String>,
    category: Option<String>,
    search: Option<String>,
    categories: bool,
    mine: bool,
    purchased: bool,
) -> Result<()> {
    if categories {
        let body = context.prompts.categories().await?;
        print_listing(&body, &["categories"], "categories");
        return Ok(());
    }

    if let Some(id) = id {
        let body = context.prompts.get(&id).await?;
        print_record(&body)?;
        return Ok(());
    }

    let body = if mine {
        context.prompts.mine().await?
    } else if purchased {
        context.prompts.purchased().await?
    } else {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(category) = &category {
            params.push(("category", category.clone()));
        }
        if let Some(search) = &search {
            params.push(("search", search.clone()));
        }
        context.prompts.list(&params).await?
    };

    print_listing(&body, &["prompts", "items", "data"], "prompts");
    Ok(())
}

async fn handle_register(context: &CommandContext) -> Result<()> {
    let username: String = Input::new().with_prompt("Username").interact_text()?;
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    let payload = json!({
        "username": username,
        "email": email,
        "password": password,
    });

    match context.session.register(&payload).await {
        Ok(response) => {
            println!(
                "{} Welcome, {}",
                style("✓").green(),
                profile_name(&response.user)
            );
            Ok(())
        }
        Err(err) => Err(session_failure(&context.session, err)),
    }
}

async fn handle_login(context: &CommandContext) -> Result<()> {
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;

    let credentials = json!({ "email": email, "password": password });

    match context.session.login(&credentials).await {
        Ok(response) => {
            println!(
                "{} Logged in as {}",
                style("✓").green(),
                profile_name(&response.user)
            );
            if context.session.is_admin() {
                println!("{}", style("(admin capabilities available)").dim());
            }
            Ok(())
        }
        Err(err) => Err(session_failure(&context.session, err)),
    }
}

fn handle_logout(context: &CommandContext) -> Result<()> {
    context.session.logout();
    println!("{} Logged out", style("✓").green());
    Ok(())
}

async fn handle_profile(context: &CommandContext, set: Vec<String>) -> Result<()> {
    let user = if set.is_empty() {
        match context.session.fetch_current_user().await {
            Ok(user) => user,
            Err(err) => return Err(session_failure(&context.session, err)),
        }
    } else {
        let mut fields = Map::new();
        for pair in &set {
            let Some((key, value)) = pair.split_once('=') else {
                bail!("Invalid --set value '{}', expected KEY=VALUE", pair);
            };
            fields.insert(key.to_string(), Value::String(value.to_string()));
        }
        match context.session.update_profile(&Value::Object(fields)).await {
            Ok(user) => {
                println!("{} Profile updated", style("✓").green());
                user
            }
            Err(err) => return Err(session_failure(&context.session, err)),
        }
    };

    println!("{}", style("Profile").bold());
    if let Some(role) = &user.role {
        println!("  role: {}", role);
    }
    for (key, value) in &user.extra {
        println!("  {}: {}", key, display_value(value));
    }
    Ok(())
}

async fn handle_passwd(context: &CommandContext) -> Result<()> {
    let current = Password::new().with_prompt("Current password").interact()?;
    let new = Password::new()
        .with_prompt("New password")
        .with_confirmation("Confirm new password", "Passwords do not match")
        .interact()?;

    let payload = json!({ "currentPassword": current, "newPassword": new });

    match context.session.change_password(&payload).await {
        Ok(_) => {
            println!("{} Password changed", style("✓").green());
            Ok(())
        }
        Err(err) => Err(session_failure(&context.session, err)),
    }
}

async fn handle_purchase(context: &CommandContext, prompt_id: &str) -> Result<()> {
    let body = context.prompts.purchase(prompt_id).await?;
    println!("{} Prompt {} purchased", style("✓").green(), prompt_id);
    if let Some(order_id) = body.get("orderId").and_then(Value::as_str) {
        println!("  order: {}", order_id);
    }
    Ok(())
}

async fn handle_orders(
    context: &CommandContext,
    id: Option<String>,
    cancel: Option<String>,
    refund: Option<String>,
    reason: Option<String>,
    methods: bool,
) -> Result<()> {
    if methods {
        let body = context.payment.methods().await?;
        print_listing(&body, &["methods"], "payment methods");
        return Ok(());
    }

    if let Some(order_id) = cancel {
        context.payment.cancel(&order_id).await?;
        println!("{} Order {} cancelled", style("✓").green(), order_id);
        return Ok(());
    }

    if let Some(order_id) = refund {
        let details = match reason {
            Some(reason) => json!({ "reason": reason }),
            None => json!({}),
        };
        context.payment.refund(&order_id, &details).await?;
        println!("{} Refund requested for order {}", style("✓").green(), order_id);
        return Ok(());
    }

    if let Some(order_id) = id {
        let body = context.payment.status(&order_id).await?;
        print_record(&body)?;
        return Ok(());
    }

    let body = context.payment.orders(&[]).await?;
    print_listing(&body, &["orders", "items", "data"], "orders");
    Ok(())
}

/// Prefer the store's recorded user-facing message; fall back to the raw error
fn session_failure(session: &SessionStore, err: ApiError) -> anyhow::Error {
    match session.error() {
        Some(message) => anyhow!(message),
        None => anyhow!(err),
    }
}

fn profile_name(user: &UserProfile) -> String {
    for key in ["username", "name", "email"] {
        if let Some(name) = user.field(key).and_then(Value::as_str) {
            return name.to_string();
        }
    }
    "you".to_string()
}

/// Response list shapes are not pinned down by the API: accept a bare
/// array or an object wrapping one under a known key.
fn items_of(body: &Value, keys: &[&str]) -> Vec<Value> {
    if let Some(items) = body.as_array() {
        return items.clone();
    }
    for key in keys {
        if let Some(items) = body.get(*key).and_then(Value::as_array) {
            return items.clone();
        }
    }
    Vec::new()
}

fn print_listing(body: &Value, keys: &[&str], noun: &str) {
    let items = items_of(body, keys);
    if items.is_empty() {
        println!("No {} found", noun);
        return;
    }
    for item in &items {
        println!("- {}", item_label(item));
    }
    println!("{}", style(format!("{} {}", items.len(), noun)).dim());
}

fn item_label(item: &Value) -> String {
    if let Some(label) = item.as_str() {
        return label.to_string();
    }
    let name = ["name", "title"]
        .iter()
        .find_map(|key| item.get(*key).and_then(Value::as_str));
    match (name, item.get("id")) {
        (Some(name), Some(id)) => format!("{} ({})", name, display_value(id)),
        (Some(name), None) => name.to_string(),
        _ => item.to_string(),
    }
}

/// Strings without quotes, everything else as compact JSON
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn print_record(body: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(body)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
