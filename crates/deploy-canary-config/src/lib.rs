// crates/deploy-canary-config/src/lib.rs
// ============================================================================
// Module: Deploy Canary Config Library
// Description: Process configuration for the deployment validation hook.
// Purpose: Expose environment loading and validation.
// Dependencies: crate::config
// ============================================================================

//! ## Overview
//! Configuration is read once from the process environment at start-up and
//! validated fail-closed. Missing or invalid values stop the process before
//! any event is served.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::DEBUG_ENV;
pub use config::ENDPOINT_URL_ENV;
pub use config::FUNCTION_TO_TEST_ENV;
pub use config::HookConfig;
pub use config::REGION_ENV;
pub use config::SNS_TOPIC_ARN_ENV;
