// crates/deploy-canary-core/src/lib.rs
// ============================================================================
// Module: Deploy Canary Core Library
// Description: Public API surface for the deployment validation hook.
// Purpose: Expose the event model, probe evaluation, interfaces, and hook.
// Dependencies: crate::{event, probe, interfaces, log, hook}
// ============================================================================

//! ## Overview
//! Deploy Canary core validates a freshly deployed function version by sending
//! it a fixed probe request and comparing the reply against a known-good
//! response. The verdict is reported to the deployment orchestrator when the
//! run is part of a deployment, or to an alert channel when a standalone canary
//! check fails. Outbound calls go through the traits in [`interfaces`], so the
//! core carries no cloud SDK dependency.
//!
//! Invariants:
//! - [`ValidationHook::run`] never fails; every outbound error is logged and
//!   folded into the [`RunReport`].
//! - At most one target invoke and at most one report or alert per run.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod event;
pub mod hook;
pub mod interfaces;
pub mod log;
pub mod probe;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use event::InvocationEvent;
pub use event::RunMode;
pub use hook::ALERT_MESSAGE;
pub use hook::ALERT_SUBJECT;
pub use hook::Delivery;
pub use hook::HookClients;
pub use hook::HookSettings;
pub use hook::Reporting;
pub use hook::RunReport;
pub use hook::ValidationHook;
pub use interfaces::AlertPublisher;
pub use interfaces::ClientError;
pub use interfaces::FunctionInvoker;
pub use interfaces::InvokeResponse;
pub use interfaces::LifecycleAck;
pub use interfaces::LifecycleReporter;
pub use interfaces::LifecycleStatus;
pub use interfaces::PublishAck;
pub use log::HookLogger;
pub use log::LogLevel;
pub use log::LogRecord;
pub use log::LogSink;
pub use log::NoopLogSink;
pub use log::StderrLogSink;
pub use log::WriterLogSink;
pub use probe::EXPECTED_RESPONSE;
pub use probe::PROBE_REQUEST;
pub use probe::ProbeFailure;
pub use probe::ProbeOutcome;
pub use probe::SUCCESS_STATUS_CODE;
