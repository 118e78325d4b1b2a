//! # Access Check CLI
//!
//! Evaluates one access check against the catalog access decision engine.
//!
//! Reads a JSON request from stdin:
//!
//! ```json
//! { "roles": ["ROLE_USER"], "attribute": "UNDERAGE",
//!   "subject": { "id": "movie:42", "attributes": { "content_age": "mature" } } }
//! ```
//!
//! and prints the decision as JSON. Exits 0 when granted, 1 when denied,
//! 2 on a configuration or input error.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `AUTHZ_CONFIG` - Path to a JSON access control config (default: built-in)
//! - `AUTHZ_STRATEGY` - Override the default combination strategy
//! - `RUST_LOG` - Log level (default: info); logs go to stderr

use anyhow::Context;
use catalog_authz::{AccessControlConfig, Attribute, CombinationStrategy, Resource};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Access check request
#[derive(Debug, Deserialize)]
struct CheckRequest {
    #[serde(default)]
    roles: Vec<String>,
    attribute: String,
    #[serde(default)]
    subject: Option<Resource>,
}

/// Access check response
#[derive(Debug, Serialize)]
struct CheckResponse {
    granted: bool,
    decision: String,
    strategy: CombinationStrategy,
    grants: usize,
    denies: usize,
    abstains: usize,
}

fn load_config() -> anyhow::Result<AccessControlConfig> {
    let mut config = match std::env::var("AUTHZ_CONFIG") {
        Ok(path) => AccessControlConfig::from_file(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        Err(_) => {
            info!("AUTHZ_CONFIG not set, using built-in config");
            AccessControlConfig::default()
        }
    };

    if let Ok(strategy) = std::env::var("AUTHZ_STRATEGY") {
        config.default_strategy = strategy.parse()?;
    }

    Ok(config)
}

fn run() -> anyhow::Result<bool> {
    let config = load_config()?;
    let manager = config.build().context("invalid access control config")?;

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read request from stdin")?;
    let request: CheckRequest =
        serde_json::from_str(&input).context("failed to parse request")?;
    let attribute: Attribute = request.attribute.parse()?;

    info!(
        "Access check: roles={:?}, attribute={}, subject={}",
        request.roles,
        attribute,
        request.subject.as_ref().map(|s| s.id.as_str()).unwrap_or("<none>")
    );

    let decision = manager.evaluate(
        &request.roles,
        attribute,
        request.subject.as_ref(),
        config.default_strategy,
    );

    let response = CheckResponse {
        granted: decision.granted,
        decision: if decision.granted { "grant".to_string() } else { "deny".to_string() },
        strategy: decision.strategy,
        grants: decision.tally.grants,
        denies: decision.tally.denies,
        abstains: decision.tally.abstains,
    };
    println!("{}", serde_json::to_string(&response)?);

    Ok(decision.granted)
}

fn main() -> ExitCode {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("authz-check v{}", catalog_authz::VERSION);

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("Access check failed: {:#}", e);
            ExitCode::from(2)
        }
    }
}
