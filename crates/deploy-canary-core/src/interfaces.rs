// crates/deploy-canary-core/src/interfaces.rs
// ============================================================================
// Module: Deploy Canary Interfaces
// Description: Capability traits for the hook's three outbound calls.
// Purpose: Keep the hook independent of any cloud SDK.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! The hook talks to the outside world through three narrow capabilities:
//! invoking the function under test, reporting a lifecycle status to the
//! deployment orchestrator, and publishing an alert. Implementations are
//! synchronous and must return acknowledgments exactly as the backend
//! produced them; the hook decides what an incomplete acknowledgment means.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors returned by outbound client implementations.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend rejected or failed the request.
    #[error("client backend error: {0}")]
    Backend(String),
    /// The local runtime could not drive the request.
    #[error("client runtime error: {0}")]
    Runtime(String),
    /// The request could not be built from the supplied inputs.
    #[error("client request invalid: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Function Invoker
// ============================================================================

/// Completion returned by a synchronous function invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeResponse {
    /// Transport-level status code reported by the invoke API.
    pub status_code: i32,
    /// Raw response payload, when present.
    pub payload: Option<Vec<u8>>,
    /// Function error marker (for example `Unhandled`), when present.
    pub function_error: Option<String>,
}

impl InvokeResponse {
    /// Builds a completion with the given status and payload and no error marker.
    #[must_use]
    pub fn new(status_code: i32, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            status_code,
            payload: Some(payload.into()),
            function_error: None,
        }
    }
}

/// Invokes the function under test.
pub trait FunctionInvoker: Send + Sync {
    /// Invokes `target` with `payload` and waits for the response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the invoke call itself fails.
    fn invoke(&self, target: &str, payload: &[u8]) -> Result<InvokeResponse, ClientError>;
}

// ============================================================================
// SECTION: Lifecycle Reporter
// ============================================================================

/// Lifecycle hook status reported to the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LifecycleStatus {
    /// Validation passed; traffic may shift.
    Succeeded,
    /// Validation failed; the deployment should roll back.
    Failed,
}

impl LifecycleStatus {
    /// Maps a pass/fail verdict onto a lifecycle status.
    #[must_use]
    pub const fn from_success(success: bool) -> Self {
        if success { Self::Succeeded } else { Self::Failed }
    }

    /// Returns the wire label for the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
        }
    }
}

/// Acknowledgment returned by the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LifecycleAck {
    /// Echoed lifecycle hook execution identifier.
    pub execution_id: Option<String>,
}

/// Reports lifecycle hook status to the deployment orchestrator.
pub trait LifecycleReporter: Send + Sync {
    /// Reports `status` for the given deployment and hook execution.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the report call fails.
    fn report(
        &self,
        deployment_id: &str,
        execution_id: &str,
        status: LifecycleStatus,
    ) -> Result<LifecycleAck, ClientError>;
}

// ============================================================================
// SECTION: Alert Publisher
// ============================================================================

/// Acknowledgment returned by the notification channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishAck {
    /// Message identifier assigned by the channel.
    pub message_id: Option<String>,
}

/// Publishes human-readable alerts.
pub trait AlertPublisher: Send + Sync {
    /// Publishes `message` with `subject` to `channel`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the publish call fails.
    fn publish(&self, channel: &str, subject: &str, message: &str)
    -> Result<PublishAck, ClientError>;
}
