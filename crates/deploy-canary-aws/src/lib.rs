// crates/deploy-canary-aws/src/lib.rs
// ============================================================================
// Module: Deploy Canary AWS Library
// Description: AWS SDK implementations of the hook's outbound interfaces.
// Purpose: Bind Lambda, CodeDeploy, and SNS to the core capability traits.
// Dependencies: aws-config, aws-sdk-lambda, aws-sdk-codedeploy, aws-sdk-sns, tokio
// ============================================================================

//! ## Overview
//! Each client wraps an SDK client plus a shared [`AwsRuntime`] that drives
//! the async SDK calls to completion behind the synchronous core traits.
//! Clients are built once per process and shared across invocations.
//!
//! Invariants:
//! - Clients never retry beyond the SDK's own retry policy.
//! - Acknowledgment fields are passed through unmodified.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use deploy_canary_core::HookClients;

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod codedeploy;
pub mod lambda;
pub mod runtime;
pub mod sns;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use codedeploy::CodeDeployLifecycleReporter;
pub use codedeploy::lifecycle_event_status;
pub use lambda::LambdaFunctionInvoker;
pub use runtime::AwsRuntime;
pub use runtime::AwsSetupError;
pub use sns::SnsAlertPublisher;

// ============================================================================
// SECTION: Client Wiring
// ============================================================================

/// Builds the three AWS-backed hook clients over one shared runtime.
#[must_use]
pub fn hook_clients(runtime: &Arc<AwsRuntime>) -> HookClients {
    HookClients {
        invoker: Arc::new(LambdaFunctionInvoker::new(Arc::clone(runtime))),
        reporter: Arc::new(CodeDeployLifecycleReporter::new(Arc::clone(runtime))),
        publisher: Arc::new(SnsAlertPublisher::new(Arc::clone(runtime))),
    }
}
