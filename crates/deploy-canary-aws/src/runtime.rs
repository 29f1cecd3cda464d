// crates/deploy-canary-aws/src/runtime.rs
// ============================================================================
// Module: AWS Runtime Bridge
// Description: Shared Tokio runtime and SDK configuration for AWS clients.
// Purpose: Drive async SDK calls behind the synchronous hook interfaces.
// Dependencies: aws-config, tokio
// ============================================================================

//! ## Overview
//! The hook's capability traits are synchronous while the AWS SDK is async.
//! [`AwsRuntime`] owns one multi-thread runtime plus the loaded
//! [`SdkConfig`]; the Lambda entry point serves events on the same runtime, and
//! client calls made from a worker thread are driven with `block_in_place`.
//! Current-thread callers are refused.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::future::Future;

use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_config::SdkConfig;
use deploy_canary_config::HookConfig;
use deploy_canary_core::ClientError;
use thiserror::Error;
use tokio::runtime::Builder;
use tokio::runtime::Handle;
use tokio::runtime::Runtime;
use tokio::runtime::RuntimeFlavor;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while bootstrapping AWS clients.
#[derive(Debug, Error)]
pub enum AwsSetupError {
    /// The Tokio runtime could not be created or driven.
    #[error("aws runtime error: {0}")]
    Runtime(String),
}

// ============================================================================
// SECTION: Runtime Helpers
// ============================================================================

/// Drives a future on `runtime`, or on the caller's multi-thread worker.
/// Current-thread callers are refused.
fn drive_blocking<F, T>(runtime: &Runtime, future: F) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    match Handle::try_current() {
        Err(_) => runtime.block_on(future),
        Ok(handle) if matches!(handle.runtime_flavor(), RuntimeFlavor::MultiThread) => {
            tokio::task::block_in_place(|| handle.block_on(future))
        }
        Ok(_) => Err(ClientError::Runtime(
            "aws clients cannot block inside a current-thread runtime".to_string(),
        )),
    }
}

// ============================================================================
// SECTION: AWS Runtime
// ============================================================================

/// Shared runtime and SDK configuration for all AWS clients.
pub struct AwsRuntime {
    /// Tokio runtime used to drive SDK calls and serve events.
    runtime: Option<Runtime>,
    /// Loaded SDK configuration.
    sdk_config: SdkConfig,
}

impl Drop for AwsRuntime {
    fn drop(&mut self) {
        // Dropping a runtime inside an async context panics.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

impl AwsRuntime {
    /// Builds a runtime and loads SDK configuration with optional overrides.
    ///
    /// # Errors
    ///
    /// Returns [`AwsSetupError`] when the runtime cannot be created.
    pub fn new(region: Option<&str>, endpoint_url: Option<&str>) -> Result<Self, AwsSetupError> {
        let runtime = Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|err| AwsSetupError::Runtime(err.to_string()))?;
        let region = region.map(str::to_string);
        let endpoint_url = endpoint_url.map(str::to_string);
        let sdk_config = drive_blocking(&runtime, async move {
            let mut loader = aws_config::defaults(BehaviorVersion::latest());
            if let Some(region) = region {
                loader = loader.region(Region::new(region));
            }
            if let Some(endpoint_url) = endpoint_url {
                loader = loader.endpoint_url(endpoint_url);
            }
            Ok(loader.load().await)
        })
        .map_err(|err| AwsSetupError::Runtime(err.to_string()))?;
        Ok(Self {
            runtime: Some(runtime),
            sdk_config,
        })
    }

    /// Builds a runtime from hook configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AwsSetupError`] when the runtime cannot be created.
    pub fn from_config(config: &HookConfig) -> Result<Self, AwsSetupError> {
        Self::new(config.region.as_deref(), config.endpoint_url.as_deref())
    }

    /// Returns the loaded SDK configuration.
    #[must_use]
    pub const fn sdk_config(&self) -> &SdkConfig {
        &self.sdk_config
    }

    /// Returns the runtime or an error if shutdown.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Runtime`] after the runtime has been released.
    pub fn runtime(&self) -> Result<&Runtime, ClientError> {
        self.runtime.as_ref().ok_or_else(|| ClientError::Runtime("aws runtime closed".to_string()))
    }

    /// Drives an SDK future to completion from synchronous code.
    ///
    /// # Errors
    ///
    /// Returns the future's error, or [`ClientError::Runtime`] when the
    /// runtime is unavailable or the caller is a current-thread runtime.
    pub fn block_on<F, T>(&self, future: F) -> Result<T, ClientError>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        drive_blocking(self.runtime()?, future)
    }
}
