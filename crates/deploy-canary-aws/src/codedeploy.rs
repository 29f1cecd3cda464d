// crates/deploy-canary-aws/src/codedeploy.rs
// ============================================================================
// Module: CodeDeploy Lifecycle Reporter
// Description: Lifecycle hook status callback to AWS CodeDeploy.
// Purpose: Implement LifecycleReporter over aws-sdk-codedeploy.
// Dependencies: aws-sdk-codedeploy, deploy-canary-core
// ============================================================================

//! ## Overview
//! Sends `PutLifecycleEventHookExecutionStatus` for the hook execution that
//! triggered the run. CodeDeploy echoes the execution id on success; the hook
//! treats a missing echo as a reporting failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use aws_sdk_codedeploy::Client;
use aws_sdk_codedeploy::error::DisplayErrorContext;
use aws_sdk_codedeploy::types::LifecycleEventStatus;
use deploy_canary_core::ClientError;
use deploy_canary_core::LifecycleAck;
use deploy_canary_core::LifecycleReporter;
use deploy_canary_core::LifecycleStatus;

use crate::runtime::AwsRuntime;

// ============================================================================
// SECTION: Status Mapping
// ============================================================================

/// Maps a hook verdict onto the CodeDeploy status enum.
#[must_use]
pub fn lifecycle_event_status(status: LifecycleStatus) -> LifecycleEventStatus {
    match status {
        LifecycleStatus::Succeeded => LifecycleEventStatus::Succeeded,
        LifecycleStatus::Failed => LifecycleEventStatus::Failed,
    }
}

// ============================================================================
// SECTION: Reporter
// ============================================================================

/// CodeDeploy-backed lifecycle reporter.
pub struct CodeDeployLifecycleReporter {
    /// Underlying CodeDeploy client.
    client: Client,
    /// Runtime used to drive SDK calls.
    runtime: Arc<AwsRuntime>,
}

impl CodeDeployLifecycleReporter {
    /// Creates a reporter from the shared runtime.
    #[must_use]
    pub fn new(runtime: Arc<AwsRuntime>) -> Self {
        let client = Client::new(runtime.sdk_config());
        Self {
            client,
            runtime,
        }
    }
}

impl LifecycleReporter for CodeDeployLifecycleReporter {
    fn report(
        &self,
        deployment_id: &str,
        execution_id: &str,
        status: LifecycleStatus,
    ) -> Result<LifecycleAck, ClientError> {
        let client = self.client.clone();
        let deployment_id = deployment_id.to_string();
        let execution_id = execution_id.to_string();
        self.runtime.block_on(async move {
            let output = client
                .put_lifecycle_event_hook_execution_status()
                .deployment_id(deployment_id)
                .lifecycle_event_hook_execution_id(execution_id)
                .status(lifecycle_event_status(status))
                .send()
                .await
                .map_err(|err| ClientError::Backend(DisplayErrorContext(&err).to_string()))?;
            Ok(LifecycleAck {
                execution_id: output.lifecycle_event_hook_execution_id().map(str::to_string),
            })
        })
    }
}
