//! Client configuration and the account registry.
//!
//! One configuration object describes every logical merchant account, the
//! environment, the endpoint registry, the request timeout and the payout
//! transaction PIN. It is passed explicitly at facade construction; nothing
//! here is process-global.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::{PayazaError, PayazaResult};
use crate::types::Environment;
use crate::urls::EndpointUrls;

/// Default request timeout, matching the published package configuration.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(24);

/// Key material for one logical merchant account.
#[derive(Debug, Clone)]
pub struct AccountCredential {
    /// Raw API key as issued by the gateway dashboard. Base64-encoded when
    /// building the authorization token.
    pub key: String,
}

#[derive(Debug, Clone)]
pub struct PayazaConfig {
    /// Logical account name ("primary", "premium", ...) to credential.
    pub accounts: HashMap<String, AccountCredential>,
    pub default_account: String,
    pub environment: Environment,
    pub endpoints: EndpointUrls,
    pub timeout: Duration,
    /// PIN included in payout payloads.
    pub transaction_pin: Option<String>,
}

impl Default for PayazaConfig {
    fn default() -> Self {
        Self {
            accounts: HashMap::new(),
            default_account: "primary".to_string(),
            environment: Environment::Test,
            endpoints: EndpointUrls::default(),
            timeout: DEFAULT_TIMEOUT,
            transaction_pin: None,
        }
    }
}

impl PayazaConfig {
    /// Register (or replace) a logical account.
    pub fn add_account(&mut self, name: impl Into<String>, key: impl Into<String>) {
        self.accounts
            .insert(name.into(), AccountCredential { key: key.into() });
    }

    /// Load configuration from `PAYAZA_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        let primary_key = env::var("PAYAZA_PUBLIC_KEY").context("PAYAZA_PUBLIC_KEY not set")?;
        config.add_account("primary", primary_key);

        if let Ok(premium_key) = env::var("PAYAZA_PREMIUM_PUBLIC_KEY") {
            config.add_account("premium", premium_key);
        }

        config.environment = env::var("PAYAZA_ENV")
            .unwrap_or_else(|_| "test".to_string())
            .parse()
            .map_err(|e: String| anyhow!(e))?;

        if let Ok(default_account) = env::var("PAYAZA_DEFAULT_ACCOUNT") {
            config.default_account = default_account;
        }

        config.transaction_pin = env::var("PAYAZA_TRANSACTION_PIN").ok();

        config.timeout = Duration::from_secs(
            env::var("PAYAZA_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_TIMEOUT.as_secs().to_string())
                .parse()
                .context("PAYAZA_TIMEOUT_SECS must be a valid number")?,
        );

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.accounts.is_empty() {
            return Err(anyhow!("At least one account must be configured"));
        }

        if !self.accounts.contains_key(&self.default_account) {
            return Err(anyhow!(
                "Default account '{}' is not among the configured accounts",
                self.default_account
            ));
        }

        if self.timeout.is_zero() {
            return Err(anyhow!("Request timeout must be greater than 0"));
        }

        Ok(())
    }

    /// Resolve a logical account name to its authorization token and the
    /// environment the client should bind to. Pure lookup; both failure modes
    /// are hard pre-flight errors and are never silently defaulted.
    pub fn resolve_account(&self, name: &str) -> PayazaResult<(String, Environment)> {
        let credential = self.accounts.get(name).ok_or_else(|| {
            let mut available: Vec<&str> = self.accounts.keys().map(String::as_str).collect();
            available.sort_unstable();
            PayazaError::configuration(format!(
                "Account '{name}' not found in configuration - available: {}",
                available.join(", ")
            ))
        })?;

        if credential.key.trim().is_empty() {
            return Err(PayazaError::configuration(format!(
                "API key for account '{name}' is not configured"
            )));
        }

        Ok((BASE64.encode(&credential.key), self.environment))
    }
}
