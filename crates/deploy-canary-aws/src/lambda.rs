// crates/deploy-canary-aws/src/lambda.rs
// ============================================================================
// Module: Lambda Function Invoker
// Description: Synchronous Lambda invoke for the function under test.
// Purpose: Implement FunctionInvoker over aws-sdk-lambda.
// Dependencies: aws-sdk-lambda, deploy-canary-core
// ============================================================================

//! ## Overview
//! Invokes the target with `RequestResponse` semantics so the status code,
//! function error marker, and payload all come back on one call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use aws_sdk_lambda::Client;
use aws_sdk_lambda::error::DisplayErrorContext;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;
use deploy_canary_core::ClientError;
use deploy_canary_core::FunctionInvoker;
use deploy_canary_core::InvokeResponse;

use crate::runtime::AwsRuntime;

// ============================================================================
// SECTION: Invoker
// ============================================================================

/// Lambda-backed function invoker.
pub struct LambdaFunctionInvoker {
    /// Underlying Lambda client.
    client: Client,
    /// Runtime used to drive SDK calls.
    runtime: Arc<AwsRuntime>,
}

impl LambdaFunctionInvoker {
    /// Creates an invoker from the shared runtime.
    #[must_use]
    pub fn new(runtime: Arc<AwsRuntime>) -> Self {
        let client = Client::new(runtime.sdk_config());
        Self {
            client,
            runtime,
        }
    }
}

impl FunctionInvoker for LambdaFunctionInvoker {
    fn invoke(&self, target: &str, payload: &[u8]) -> Result<InvokeResponse, ClientError> {
        if target.is_empty() {
            return Err(ClientError::Invalid("function name must be non-empty".to_string()));
        }
        let client = self.client.clone();
        let target = target.to_string();
        let payload = Blob::new(payload.to_vec());
        self.runtime.block_on(async move {
            let output = client
                .invoke()
                .function_name(target)
                .invocation_type(InvocationType::RequestResponse)
                .payload(payload)
                .send()
                .await
                .map_err(|err| ClientError::Backend(DisplayErrorContext(&err).to_string()))?;
            Ok(InvokeResponse {
                status_code: output.status_code(),
                payload: output.payload().map(|blob| blob.as_ref().to_vec()),
                function_error: output.function_error().map(str::to_string),
            })
        })
    }
}
