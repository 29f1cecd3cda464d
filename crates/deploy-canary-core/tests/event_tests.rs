// crates/deploy-canary-core/tests/event_tests.rs
// ============================================================================
// Module: Invocation Event Tests
// Description: Event parsing and run-mode resolution.
// Purpose: Validate how raw payloads map onto run modes.
// Dependencies: deploy-canary-core, serde_json
// ============================================================================

//! ## Overview
//! Exercises [`deploy_canary_core::InvocationEvent`] parsing and
//! [`deploy_canary_core::RunMode`] selection.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use deploy_canary_core::InvocationEvent;
use deploy_canary_core::RunMode;
use serde_json::json;

/// Tests a CodeDeploy event selects orchestrated mode.
#[test]
fn deployment_id_selects_orchestrated_mode() {
    let event = InvocationEvent::from_value(json!({
        "DeploymentId": "d-1",
        "LifecycleEventHookExecutionId": "e-1",
    }))
    .unwrap();

    assert_eq!(
        event.mode(),
        RunMode::Orchestrated {
            deployment_id: Some("d-1".to_string()),
            execution_id: Some("e-1".to_string()),
        }
    );
}

/// Tests an empty event selects standalone mode.
#[test]
fn empty_event_selects_standalone_mode() {
    let event = InvocationEvent::from_value(json!({})).unwrap();

    assert_eq!(
        event.mode(),
        RunMode::Standalone {
            force_error: false,
        }
    );
}

/// Tests a null deployment id counts as absent.
#[test]
fn null_deployment_id_is_standalone() {
    let event = InvocationEvent::from_value(json!({ "DeploymentId": null })).unwrap();

    assert!(!event.mode().is_orchestrated());
}

/// Tests unknown keys are ignored.
#[test]
fn unknown_keys_are_ignored() {
    let event = InvocationEvent::from_value(json!({
        "source": "aws.events",
        "detail-type": "Scheduled Event",
    }))
    .unwrap();

    assert_eq!(event, InvocationEvent::default());
}

/// Tests only the exact string "true" requests a forced error.
#[test]
fn force_error_requires_exact_true_string() {
    let cases = [
        (json!({ "forceError": "true" }), true),
        (json!({ "forceError": "TRUE" }), false),
        (json!({ "forceError": "false" }), false),
        (json!({ "forceError": true }), false),
        (json!({}), false),
    ];
    for (payload, expected) in cases {
        let event = InvocationEvent::from_value(payload).unwrap();
        assert_eq!(event.force_error_requested(), expected);
    }
}

/// Tests a non-object payload is rejected.
#[test]
fn non_object_payload_is_rejected() {
    assert!(InvocationEvent::from_value(json!("DeploymentId")).is_err());
    assert!(InvocationEvent::from_value(json!(null)).is_err());
}

/// Tests an array payload is not read positionally into the event fields.
#[test]
fn array_payload_is_rejected() {
    assert!(InvocationEvent::from_value(json!(["d-1", "e-1", "true"])).is_err());
}

/// Tests a wrongly typed execution id keeps the deployment in orchestrated mode.
#[test]
fn numeric_execution_id_stays_orchestrated() {
    let event = InvocationEvent::from_value(json!({
        "DeploymentId": "d-1",
        "LifecycleEventHookExecutionId": 42,
    }))
    .unwrap();

    assert_eq!(
        event.mode(),
        RunMode::Orchestrated {
            deployment_id: Some("d-1".to_string()),
            execution_id: None,
        }
    );
}

/// Tests a wrongly typed deployment id still selects orchestrated mode.
#[test]
fn numeric_deployment_id_stays_orchestrated() {
    let event = InvocationEvent::from_value(json!({
        "DeploymentId": 7,
        "LifecycleEventHookExecutionId": "e-1",
        "forceError": "true",
    }))
    .unwrap();

    assert_eq!(
        event.mode(),
        RunMode::Orchestrated {
            deployment_id: None,
            execution_id: Some("e-1".to_string()),
        }
    );
}

/// Tests mode labels are stable.
#[test]
fn mode_labels_are_stable() {
    assert_eq!(InvocationEvent::orchestrated("d", "e").mode().as_str(), "orchestrated");
    assert_eq!(InvocationEvent::default().mode().as_str(), "standalone");
}
