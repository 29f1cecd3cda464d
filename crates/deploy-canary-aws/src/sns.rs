// crates/deploy-canary-aws/src/sns.rs
// ============================================================================
// Module: SNS Alert Publisher
// Description: Topic publish for standalone canary failures.
// Purpose: Implement AlertPublisher over aws-sdk-sns.
// Dependencies: aws-sdk-sns, deploy-canary-core
// ============================================================================

//! ## Overview
//! Publishes the fixed alert to an SNS topic. The topic must live in the
//! client's region; cross-region topics surface as a backend error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use aws_sdk_sns::Client;
use aws_sdk_sns::error::DisplayErrorContext;
use deploy_canary_core::AlertPublisher;
use deploy_canary_core::ClientError;
use deploy_canary_core::PublishAck;

use crate::runtime::AwsRuntime;

// ============================================================================
// SECTION: Publisher
// ============================================================================

/// SNS-backed alert publisher.
pub struct SnsAlertPublisher {
    /// Underlying SNS client.
    client: Client,
    /// Runtime used to drive SDK calls.
    runtime: Arc<AwsRuntime>,
}

impl SnsAlertPublisher {
    /// Creates a publisher from the shared runtime.
    #[must_use]
    pub fn new(runtime: Arc<AwsRuntime>) -> Self {
        let client = Client::new(runtime.sdk_config());
        Self {
            client,
            runtime,
        }
    }
}

impl AlertPublisher for SnsAlertPublisher {
    fn publish(
        &self,
        channel: &str,
        subject: &str,
        message: &str,
    ) -> Result<PublishAck, ClientError> {
        let client = self.client.clone();
        let channel = channel.to_string();
        let subject = subject.to_string();
        let message = message.to_string();
        self.runtime.block_on(async move {
            let output = client
                .publish()
                .topic_arn(channel)
                .subject(subject)
                .message(message)
                .send()
                .await
                .map_err(|err| ClientError::Backend(DisplayErrorContext(&err).to_string()))?;
            Ok(PublishAck {
                message_id: output.message_id().map(str::to_string),
            })
        })
    }
}
