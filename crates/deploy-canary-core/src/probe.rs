// crates/deploy-canary-core/src/probe.rs
// ============================================================================
// Module: Probe Evaluation
// Description: Fixed probe request, expected response, and verdict logic.
// Purpose: Turn one invoke completion into a pass/fail outcome.
// Dependencies: crate::interfaces, serde
// ============================================================================

//! ## Overview
//! The probe asks the trainer for its next move on a fixed 7x6 board. A
//! correct deployment replies with one deterministic board transition. The
//! comparison is exact string identity after UTF-8 decoding and trimming
//! surrounding whitespace, so any change in the target's JSON formatting or key
//! order is reported as a mismatch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::interfaces::ClientError;
use crate::interfaces::InvokeResponse;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Status code the invoke API returns for a synchronous completion.
pub const SUCCESS_STATUS_CODE: i32 = 200;

/// Request sent to the function under test on every run.
pub const PROBE_REQUEST: &str = concat!(
    r#"{"action":"next","currentPlayer":"r","board":{"numCols":7,"numRows":6,"rows":["#,
    r#"["r","r","y",".",".",".","."],["y","y","y",".",".",".","."],"#,
    r#"["y","y","y",".",".",".","."],["r",".","r",".",".",".","."],"#,
    r#"[".",".",".",".",".",".","."],[".",".",".",".",".",".","."]]},"column":6}"#,
);

/// Response a correct deployment returns for [`PROBE_REQUEST`].
pub const EXPECTED_RESPONSE: &str = concat!(
    r#"{"gameState":"0","playerBoard":{"numCols":7,"numRows":6,"rows":["#,
    r#"["r","r","y",".",".",".","r"],["y","y","y",".",".",".","."],"#,
    r#"["y","y","y",".",".",".","."],["r",".","r",".",".",".","."],"#,
    r#"[".",".",".",".",".",".","."],[".",".",".",".",".",".","."]]},"playerRow":0,"#,
    r#""aiBoard":{"numCols":7,"numRows":6,"rows":["#,
    r#"["r","r","y","y",".",".","r"],["y","y","y",".",".",".","."],"#,
    r#"["y","y","y",".",".",".","."],["r",".","r",".",".",".","."],"#,
    r#"[".",".",".",".",".",".","."],[".",".",".",".",".",".","."]]},"aiCol":3,"aiRow":0}"#,
);

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Reason a probe did not pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProbeFailure {
    /// The invoke call itself failed.
    InvokeFailed {
        /// Client error message.
        message: String,
    },
    /// The target completed with an error status or function error marker.
    FunctionError {
        /// Reported status code.
        status_code: i32,
        /// Reported function error detail.
        detail: Option<String>,
    },
    /// The target completed but returned a different payload.
    Mismatch {
        /// Decoded payload as received.
        actual: String,
    },
}

/// Verdict for a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The target returned exactly [`EXPECTED_RESPONSE`].
    Passed,
    /// The target failed the probe.
    Failed(ProbeFailure),
}

impl ProbeOutcome {
    /// Evaluates an invoke result against the expected response.
    #[must_use]
    pub fn evaluate(result: Result<InvokeResponse, ClientError>) -> Self {
        let response = match result {
            Ok(response) => response,
            Err(err) => {
                return Self::Failed(ProbeFailure::InvokeFailed {
                    message: err.to_string(),
                });
            }
        };
        if response.status_code != SUCCESS_STATUS_CODE || response.function_error.is_some() {
            return Self::Failed(ProbeFailure::FunctionError {
                status_code: response.status_code,
                detail: response.function_error,
            });
        }
        Self::compare_payload(response.payload.as_deref().unwrap_or_default())
    }

    /// Compares a raw response payload with [`EXPECTED_RESPONSE`].
    #[must_use]
    pub fn compare_payload(payload: &[u8]) -> Self {
        let decoded = String::from_utf8_lossy(payload);
        let actual = decoded.trim();
        if actual == EXPECTED_RESPONSE {
            Self::Passed
        } else {
            Self::Failed(ProbeFailure::Mismatch {
                actual: actual.to_string(),
            })
        }
    }

    /// Returns true when the probe passed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Returns the failure reason, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&ProbeFailure> {
        match self {
            Self::Passed => None,
            Self::Failed(failure) => Some(failure),
        }
    }
}
