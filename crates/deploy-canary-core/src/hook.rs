// crates/deploy-canary-core/src/hook.rs
// ============================================================================
// Module: Validation Hook
// Description: Probe the newly deployed target and report the verdict.
// Purpose: Implement the single validation run behind the hook entry point.
// Dependencies: crate::{event, interfaces, log, probe}, serde_json
// ============================================================================

//! ## Overview
//! A run resolves its [`RunMode`], invokes the target once with
//! [`PROBE_REQUEST`], and then takes exactly one reporting branch:
//! a lifecycle status for orchestrated runs, an alert for failed (or forced)
//! standalone runs, or nothing for a passing standalone run.
//! Invariants:
//! - No retries; every outbound failure is logged and recorded in the report.
//! - The orchestrator is never called in standalone mode and the alert
//!   channel is never called in orchestrated mode.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde_json::Value;
use serde_json::json;

use crate::event::InvocationEvent;
use crate::event::RunMode;
use crate::interfaces::AlertPublisher;
use crate::interfaces::FunctionInvoker;
use crate::interfaces::LifecycleReporter;
use crate::interfaces::LifecycleStatus;
use crate::log::HookLogger;
use crate::log::LogLevel;
use crate::probe::PROBE_REQUEST;
use crate::probe::ProbeFailure;
use crate::probe::ProbeOutcome;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Subject of the standalone failure alert.
pub const ALERT_SUBJECT: &str = "Connect4Trainer testing call failed";

/// Body of the standalone failure alert.
pub const ALERT_MESSAGE: &str = "Hand-cranked canary test for Connect4Trainer failed. See \
                                 https://ap-southeast-2.console.aws.amazon.com/cloudwatch/home?\
                                 region=ap-southeast-2#dashboards:name=Connect4";

// ============================================================================
// SECTION: Settings and Clients
// ============================================================================

/// Process-level inputs the hook needs on every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookSettings {
    /// Function name or ARN to validate.
    pub target: String,
    /// Alert channel for standalone failures.
    pub alert_channel: Option<String>,
}

/// Outbound clients injected into the hook.
#[derive(Clone)]
pub struct HookClients {
    /// Invokes the function under test.
    pub invoker: Arc<dyn FunctionInvoker>,
    /// Reports lifecycle status to the orchestrator.
    pub reporter: Arc<dyn LifecycleReporter>,
    /// Publishes standalone alerts.
    pub publisher: Arc<dyn AlertPublisher>,
}

// ============================================================================
// SECTION: Run Report
// ============================================================================

/// Result of a single reporting call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The backend acknowledged with the given identifier.
    Acknowledged(String),
    /// The call returned without the expected identifier.
    Unacknowledged,
    /// The call failed.
    Failed(String),
    /// The call was not attempted because an input was missing.
    Skipped(String),
}

impl Delivery {
    /// Returns true when the backend acknowledged the call.
    #[must_use]
    pub const fn is_acknowledged(&self) -> bool {
        matches!(self, Self::Acknowledged(_))
    }
}

/// Reporting branch taken by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reporting {
    /// Lifecycle status sent to the orchestrator.
    Lifecycle {
        /// Reported status.
        status: LifecycleStatus,
        /// Delivery result.
        delivery: Delivery,
    },
    /// Alert sent to the notification channel.
    Alert {
        /// Delivery result.
        delivery: Delivery,
    },
    /// Standalone pass; nothing reported.
    Silent,
}

/// Summary of one hook run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Resolved run mode.
    pub mode: RunMode,
    /// Probe verdict.
    pub outcome: ProbeOutcome,
    /// Reporting branch and its delivery result.
    pub reporting: Reporting,
}

// ============================================================================
// SECTION: Hook
// ============================================================================

/// Deployment validation hook.
pub struct ValidationHook {
    /// Target and alert channel.
    settings: HookSettings,
    /// Outbound clients.
    clients: HookClients,
    /// Structured logger.
    logger: HookLogger,
}

impl ValidationHook {
    /// Creates a hook from its settings, clients, and logger.
    #[must_use]
    pub const fn new(settings: HookSettings, clients: HookClients, logger: HookLogger) -> Self {
        Self {
            settings,
            clients,
            logger,
        }
    }

    /// Returns the hook settings.
    #[must_use]
    pub const fn settings(&self) -> &HookSettings {
        &self.settings
    }

    /// Runs the hook for a raw JSON payload.
    ///
    /// A payload that does not parse as an [`InvocationEvent`] is logged and
    /// handled as an empty standalone event.
    pub fn run_payload(&self, payload: Value) -> RunReport {
        let event = match InvocationEvent::from_value(payload) {
            Ok(event) => event,
            Err(err) => {
                self.logger.error("event_malformed", format!("ignoring malformed event: {err}"));
                InvocationEvent::default()
            }
        };
        self.run(&event)
    }

    /// Runs the hook for one event.
    pub fn run(&self, event: &InvocationEvent) -> RunReport {
        self.logger.debug("hook_started", "entering pre-traffic hook");
        let mode = event.mode();
        let forced = matches!(mode, RunMode::Standalone { force_error: true });
        self.logger.log(
            LogLevel::Debug,
            "target_resolved",
            format!("testing new function version: {}", self.settings.target),
            Some(json!({
                "target": self.settings.target,
                "mode": mode.as_str(),
                "force_error": forced,
            })),
        );

        let outcome = self.probe_target();
        let reporting = match &mode {
            RunMode::Orchestrated {
                deployment_id,
                execution_id,
            } => {
                self.report_lifecycle(deployment_id.as_deref(), execution_id.as_deref(), &outcome)
            }
            RunMode::Standalone {
                force_error,
            } => {
                if outcome.is_success() && !*force_error {
                    Reporting::Silent
                } else {
                    self.publish_alert()
                }
            }
        };
        RunReport {
            mode,
            outcome,
            reporting,
        }
    }

    /// Invokes the target once and evaluates the response.
    fn probe_target(&self) -> ProbeOutcome {
        let result =
            self.clients.invoker.invoke(&self.settings.target, PROBE_REQUEST.as_bytes());
        let outcome = ProbeOutcome::evaluate(result);
        match outcome.failure() {
            None => self.logger.info("probe_passed", "new function passed successfully"),
            Some(failure) => {
                let message = match failure {
                    ProbeFailure::InvokeFailed {
                        message,
                    } => format!("new function could not be invoked: {message}"),
                    ProbeFailure::FunctionError {
                        status_code,
                        detail,
                    } => format!(
                        "new function failed. Status code: {status_code}. Error: {}",
                        detail.as_deref().unwrap_or("none")
                    ),
                    ProbeFailure::Mismatch {
                        actual,
                    } => format!("new function completed but response payload is wrong: {actual}"),
                };
                self.logger.log(
                    LogLevel::Error,
                    "probe_failed",
                    message,
                    serde_json::to_value(failure).ok(),
                );
            }
        }
        outcome
    }

    /// Reports the verdict to the orchestrator.
    fn report_lifecycle(
        &self,
        deployment_id: Option<&str>,
        execution_id: Option<&str>,
        outcome: &ProbeOutcome,
    ) -> Reporting {
        let status = LifecycleStatus::from_success(outcome.is_success());
        let (deployment_id, execution_id) = match (deployment_id, execution_id) {
            (Some(deployment_id), Some(execution_id)) => (deployment_id, execution_id),
            (None, _) => return self.skip_lifecycle(status, "event DeploymentId is not a string"),
            (Some(_), None) => {
                return self.skip_lifecycle(
                    status,
                    "event has no string LifecycleEventHookExecutionId",
                );
            }
        };

        let delivery = match self.clients.reporter.report(deployment_id, execution_id, status) {
            Ok(ack) => match ack.execution_id {
                Some(acked) => {
                    self.logger.info(
                        "lifecycle_reported",
                        format!("completed CodeDeploy lifecycle with status {}", status.as_str()),
                    );
                    Delivery::Acknowledged(acked)
                }
                None => {
                    self.logger.error(
                        "lifecycle_report_failed",
                        format!(
                            "failed to complete CodeDeploy lifecycle for deploymentId: \
                             {deployment_id} and lifecycleEventHookExecutionId: {execution_id}"
                        ),
                    );
                    Delivery::Unacknowledged
                }
            },
            Err(err) => {
                self.logger.error(
                    "lifecycle_report_failed",
                    format!("CodeDeploy status update failed: {err}"),
                );
                Delivery::Failed(err.to_string())
            }
        };
        Reporting::Lifecycle {
            status,
            delivery,
        }
    }

    /// Records a lifecycle report that could not be addressed.
    fn skip_lifecycle(&self, status: LifecycleStatus, reason: &str) -> Reporting {
        self.logger.error(
            "lifecycle_report_failed",
            format!("failed to complete CodeDeploy lifecycle: {reason}"),
        );
        Reporting::Lifecycle {
            status,
            delivery: Delivery::Skipped(reason.to_string()),
        }
    }

    /// Publishes the standalone failure alert.
    fn publish_alert(&self) -> Reporting {
        let Some(channel) = self.settings.alert_channel.as_deref() else {
            let reason = "no alert channel configured".to_string();
            self.logger
                .error("alert_failed", format!("hand-cranked canary test failed: {reason}"));
            return Reporting::Alert {
                delivery: Delivery::Skipped(reason),
            };
        };
        self.logger.debug(
            "alert_publishing",
            format!("publishing failure notification to {channel}"),
        );

        let delivery =
            match self.clients.publisher.publish(channel, ALERT_SUBJECT, ALERT_MESSAGE) {
                Ok(ack) => match ack.message_id {
                    Some(message_id) => {
                        self.logger.debug(
                            "alert_published",
                            format!("hand-cranked canary test failed and alert sent: {message_id}"),
                        );
                        Delivery::Acknowledged(message_id)
                    }
                    None => {
                        self.logger.error(
                            "alert_failed",
                            "hand-cranked canary test failed and the alert was not acknowledged",
                        );
                        Delivery::Unacknowledged
                    }
                },
                Err(err) => {
                    self.logger.error(
                        "alert_failed",
                        format!("hand-cranked canary test failed and could not send alert: {err}"),
                    );
                    Delivery::Failed(err.to_string())
                }
            };
        Reporting::Alert {
            delivery,
        }
    }
}
