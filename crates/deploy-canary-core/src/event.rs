// crates/deploy-canary-core/src/event.rs
// ============================================================================
// Module: Invocation Event
// Description: Hook invocation payload and run-mode resolution.
// Purpose: Decide whether a run is orchestrator-driven or a standalone canary.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The hook receives either a CodeDeploy lifecycle event (carrying
//! `DeploymentId` and `LifecycleEventHookExecutionId`) or an arbitrary payload
//! from a manual or scheduled trigger. Only the presence of `DeploymentId`
//! distinguishes the two; unknown keys are ignored. Known keys are kept as raw
//! JSON so a wrongly typed id never hides the deployment it belongs to.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde::de::Error as _;
use serde_json::Value;

// ============================================================================
// SECTION: Invocation Event
// ============================================================================

/// Payload delivered to the hook entry point.
///
/// # Invariants
/// - All keys are optional; a `null` value is treated as absent.
/// - Any value type is accepted for a known key; typing is checked when the
///   run mode is resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvocationEvent {
    /// Deployment identifier; presence selects orchestrated mode.
    #[serde(rename = "DeploymentId", default, skip_serializing_if = "Option::is_none")]
    pub deployment_id: Option<Value>,
    /// Lifecycle hook execution identifier used to address the status report.
    #[serde(
        rename = "LifecycleEventHookExecutionId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub lifecycle_event_hook_execution_id: Option<Value>,
    /// Raw `forceError` value; only the exact string `"true"` counts.
    #[serde(rename = "forceError", default, skip_serializing_if = "Option::is_none")]
    pub force_error: Option<Value>,
}

impl InvocationEvent {
    /// Builds an orchestrated event for the given deployment and execution.
    #[must_use]
    pub fn orchestrated(deployment_id: impl Into<String>, execution_id: impl Into<String>) -> Self {
        Self {
            deployment_id: Some(Value::String(deployment_id.into())),
            lifecycle_event_hook_execution_id: Some(Value::String(execution_id.into())),
            force_error: None,
        }
    }

    /// Parses an event from a raw JSON payload.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when the payload is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        if !value.is_object() {
            return Err(serde_json::Error::custom("invocation event must be a JSON object"));
        }
        serde_json::from_value(value)
    }

    /// Returns true when the payload asks for the forced-error alert path.
    #[must_use]
    pub fn force_error_requested(&self) -> bool {
        matches!(&self.force_error, Some(Value::String(flag)) if flag == "true")
    }

    /// Resolves the run mode for this event.
    #[must_use]
    pub fn mode(&self) -> RunMode {
        match &self.deployment_id {
            Some(deployment_id) => RunMode::Orchestrated {
                deployment_id: string_id(deployment_id),
                execution_id: self.lifecycle_event_hook_execution_id.as_ref().and_then(string_id),
            },
            None => RunMode::Standalone {
                force_error: self.force_error_requested(),
            },
        }
    }
}

/// Returns the identifier when the raw value is a JSON string.
fn string_id(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

// ============================================================================
// SECTION: Run Mode
// ============================================================================

/// How the current run reports its verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RunMode {
    /// Invoked by a deployment lifecycle hook; reports to the orchestrator.
    Orchestrated {
        /// Deployment identifier; `None` when the key is not a string.
        deployment_id: Option<String>,
        /// Lifecycle hook execution identifier, when supplied as a string.
        execution_id: Option<String>,
    },
    /// Invoked outside a deployment; alerts on failure.
    Standalone {
        /// Publish an alert even when the probe passes.
        force_error: bool,
    },
}

impl RunMode {
    /// Returns true for orchestrator-driven runs.
    #[must_use]
    pub const fn is_orchestrated(&self) -> bool {
        matches!(self, Self::Orchestrated { .. })
    }

    /// Returns a stable label for logging.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Orchestrated {
                ..
            } => "orchestrated",
            Self::Standalone {
                ..
            } => "standalone",
        }
    }
}
