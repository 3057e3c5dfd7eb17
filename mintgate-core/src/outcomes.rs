//! Terminal outcomes of a verification attempt and the execution result
//! handed back to the serverless runtime.

use alloy_primitives::{Address, Bytes};
use serde::Serialize;

/// Tagged terminal decision of one verification attempt.
///
/// Exactly one on-chain call is encoded from every outcome; once a request
/// has produced a readable credential it is never silently dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The provider record matched the claimed identity.
    Success {
        /// The (now confirmed) claimed user ID.
        claimed_user_id: String,
        /// Wallet to grant minting rights to.
        wallet: Address,
    },
    /// Verification failed in a way the contract should learn about, so it
    /// can unblock the wallet for a retry.
    Failure {
        /// Wallet the failed attempt belongs to.
        wallet: Address,
        /// User ID that was claimed in the triggering event.
        claimed_user_id: String,
        /// Human-readable failure reason, embedded in the error report.
        reason: String,
    },
}

/// One ABI-encoded contract call, ready for an external transaction sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedCall {
    /// Target contract address.
    pub to: Address,
    /// Selector plus ABI-encoded parameters.
    pub data: Bytes,
}

/// The `{canExec, callData, message}` object the serverless runtime consumes.
///
/// `can_exec == false` means no transaction may be submitted and `message`
/// carries the diagnostic; otherwise exactly one call entry is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// Whether a transaction should be submitted.
    pub can_exec: bool,
    /// The single call to submit, present iff `can_exec` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_data: Option<Vec<EncodedCall>>,
    /// Diagnostic for non-executable results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ExecutionResult {
    /// An executable result carrying exactly one call.
    #[must_use]
    pub fn executable(call: EncodedCall) -> Self {
        Self {
            can_exec: true,
            call_data: Some(vec![call]),
            message: None,
        }
    }

    /// A non-executable result with a diagnostic message.
    #[must_use]
    pub fn not_executable(message: impl Into<String>) -> Self {
        Self {
            can_exec: false,
            call_data: None,
            message: Some(message.into()),
        }
    }
}
