// crates/deploy-canary-aws/src/main.rs
// ============================================================================
// Module: Deploy Canary Lambda Entry Point
// Description: Lambda binary serving the deployment validation hook.
// Purpose: Load config once, wire AWS clients, and serve hook events.
// Dependencies: deploy-canary-aws, deploy-canary-config, deploy-canary-core, lambda_runtime
// ============================================================================

//! ## Overview
//! Start-up loads configuration, builds the logger and the AWS clients, and
//! then hands every event to [`ValidationHook::run_payload`]. Configuration
//! errors fail the Lambda init phase. Event handling always returns success to
//! the Lambda runtime; the lifecycle report or alert is the only failure
//! signal.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::process::ExitCode;
use std::sync::Arc;

use deploy_canary_aws::AwsRuntime;
use deploy_canary_aws::AwsSetupError;
use deploy_canary_aws::hook_clients;
use deploy_canary_config::ConfigError;
use deploy_canary_config::HookConfig;
use deploy_canary_core::ClientError;
use deploy_canary_core::HookLogger;
use deploy_canary_core::LogLevel;
use deploy_canary_core::ValidationHook;
use lambda_runtime::LambdaEvent;
use lambda_runtime::service_fn;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors that stop the process before or while serving events.
#[derive(Debug, Error)]
enum StartupError {
    /// Configuration is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// AWS clients could not be bootstrapped.
    #[error(transparent)]
    Setup(#[from] AwsSetupError),
    /// The shared runtime is unavailable.
    #[error(transparent)]
    Runtime(#[from] ClientError),
    /// The Lambda runtime loop exited with an error.
    #[error("lambda runtime failed: {0}")]
    Serve(String),
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Process entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            HookLogger::stderr(LogLevel::Info).error("startup_failed", err.to_string());
            ExitCode::FAILURE
        }
    }
}

/// Loads configuration, wires the hook, and serves events until shutdown.
fn run() -> Result<(), StartupError> {
    let config = HookConfig::from_env()?;
    let logger = HookLogger::stderr(config.log_level());
    logger.log(
        LogLevel::Debug,
        "config_loaded",
        "deploy canary configuration loaded",
        serde_json::to_value(&config).ok(),
    );

    let aws = Arc::new(AwsRuntime::from_config(&config)?);
    let hook = Arc::new(ValidationHook::new(config.hook_settings(), hook_clients(&aws), logger));

    let handler = service_fn(move |event: LambdaEvent<Value>| {
        let hook = Arc::clone(&hook);
        async move {
            hook.run_payload(event.payload);
            Ok::<(), lambda_runtime::Error>(())
        }
    });
    aws.runtime()?
        .block_on(lambda_runtime::run(handler))
        .map_err(|err| StartupError::Serve(err.to_string()))
}
