// crates/deploy-canary-config/src/config.rs
// ============================================================================
// Module: Deploy Canary Configuration
// Description: Environment loading and validation for the hook process.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: deploy-canary-core, serde, thiserror
// ============================================================================

//! ## Overview
//! The hook is configured entirely through environment variables set on the
//! function. Values are trimmed; optional values that are empty are treated as
//! unset. Validation rejects anything that cannot name a real target, topic,
//! region, or endpoint so that a misconfigured hook fails its init phase
//! instead of failing every deployment.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;

use deploy_canary_core::HookSettings;
use deploy_canary_core::LogLevel;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Function name or ARN to validate.
pub const FUNCTION_TO_TEST_ENV: &str = "FUNCTION_TO_TEST";
/// Alert topic for standalone failures.
pub const SNS_TOPIC_ARN_ENV: &str = "SNS_TOPIC_ARN";
/// Debug logging switch; only `"true"` enables it.
pub const DEBUG_ENV: &str = "DEBUG";
/// Region override for AWS clients.
pub const REGION_ENV: &str = "DEPLOY_CANARY_AWS_REGION";
/// Endpoint override for AWS clients.
pub const ENDPOINT_URL_ENV: &str = "DEPLOY_CANARY_AWS_ENDPOINT_URL";
/// Maximum length of a function name, ARN, or qualified ARN.
pub(crate) const MAX_FUNCTION_ID_LENGTH: usize = 256;
/// Maximum length of a topic ARN.
pub(crate) const MAX_TOPIC_ARN_LENGTH: usize = 256;
/// Maximum length of a region name.
pub(crate) const MAX_REGION_LENGTH: usize = 64;
/// Maximum length of an endpoint URL.
pub(crate) const MAX_ENDPOINT_URL_LENGTH: usize = 2048;

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// Validated hook process configuration.
///
/// # Invariants
/// - `function_to_test` is non-empty and contains no whitespace.
/// - Optional values are either `None` or non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookConfig {
    /// Function name or ARN to validate.
    pub function_to_test: String,
    /// Alert topic ARN for standalone failures.
    pub alert_topic_arn: Option<String>,
    /// Debug logging enabled.
    pub debug: bool,
    /// AWS region override.
    pub region: Option<String>,
    /// AWS endpoint override.
    pub endpoint_url: Option<String>,
}

impl HookConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required value is missing or any value is
    /// invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through a key lookup function.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required value is missing or any value is
    /// invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let function_to_test = lookup(FUNCTION_TO_TEST_ENV)
            .ok_or(ConfigError::Missing(FUNCTION_TO_TEST_ENV))?
            .trim()
            .to_string();
        let config = Self {
            function_to_test,
            alert_topic_arn: optional(&lookup, SNS_TOPIC_ARN_ENV),
            debug: lookup(DEBUG_ENV).as_deref() == Some("true"),
            region: optional(&lookup, REGION_ENV),
            endpoint_url: optional(&lookup, ENDPOINT_URL_ENV),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when any value breaks its limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_function_id(&self.function_to_test)?;
        if let Some(topic) = &self.alert_topic_arn {
            validate_topic_arn(topic)?;
        }
        if let Some(region) = &self.region {
            validate_region(region)?;
        }
        if let Some(endpoint) = &self.endpoint_url {
            validate_endpoint_url(endpoint)?;
        }
        Ok(())
    }

    /// Returns the minimum log level implied by `DEBUG`.
    #[must_use]
    pub const fn log_level(&self) -> LogLevel {
        if self.debug { LogLevel::Debug } else { LogLevel::Info }
    }

    /// Returns the per-run settings handed to the hook.
    #[must_use]
    pub fn hook_settings(&self) -> HookSettings {
        HookSettings {
            target: self.function_to_test.clone(),
            alert_channel: self.alert_topic_arn.clone(),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is unset.
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an optional value, trimming it and dropping empties.
fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

/// Validates the function identifier.
fn validate_function_id(value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Invalid(format!("{FUNCTION_TO_TEST_ENV} must be non-empty")));
    }
    if value.len() > MAX_FUNCTION_ID_LENGTH {
        return Err(ConfigError::Invalid(format!("{FUNCTION_TO_TEST_ENV} exceeds max length")));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(ConfigError::Invalid(format!(
            "{FUNCTION_TO_TEST_ENV} must not contain whitespace"
        )));
    }
    Ok(())
}

/// Validates the alert topic ARN.
fn validate_topic_arn(value: &str) -> Result<(), ConfigError> {
    if value.len() > MAX_TOPIC_ARN_LENGTH {
        return Err(ConfigError::Invalid(format!("{SNS_TOPIC_ARN_ENV} exceeds max length")));
    }
    if !value.starts_with("arn:") {
        return Err(ConfigError::Invalid(format!("{SNS_TOPIC_ARN_ENV} must be an arn")));
    }
    Ok(())
}

/// Validates the region override.
fn validate_region(value: &str) -> Result<(), ConfigError> {
    if value.len() > MAX_REGION_LENGTH {
        return Err(ConfigError::Invalid(format!("{REGION_ENV} exceeds max length")));
    }
    if !value.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-') {
        return Err(ConfigError::Invalid(format!(
            "{REGION_ENV} must contain only ascii letters, digits, and dashes"
        )));
    }
    Ok(())
}

/// Validates the endpoint override.
fn validate_endpoint_url(value: &str) -> Result<(), ConfigError> {
    if value.len() > MAX_ENDPOINT_URL_LENGTH {
        return Err(ConfigError::Invalid(format!("{ENDPOINT_URL_ENV} exceeds max length")));
    }
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ConfigError::Invalid(format!(
            "{ENDPOINT_URL_ENV} must use http or https"
        )));
    }
    Ok(())
}
