//! Deterministic ABI encoding of verification outcomes.
//!
//! Builds the one on-chain callback a terminal outcome maps to: a 4-byte
//! selector derived from the canonical signature, followed by ABI-encoded
//! parameters. Pure function of its inputs; same outcome, same bytes.

use alloy_core::sol_types::SolCall;
use alloy_primitives::{Address, Bytes};

use crate::outcomes::{EncodedCall, VerificationOutcome};

/// Oracle callback surface of the minting contract.
#[allow(missing_docs, clippy::all, clippy::pedantic)]
pub mod abi {
    use alloy_core::sol;

    sol! {
        interface IMintOracle {
            /// Confirms that the claimed identity matched the provider record.
            function verifyIdentity(string userId, address wallet) external;

            /// Reports a failed verification so the contract can unblock the
            /// wallet for another attempt.
            function reportVerificationError(address wallet, string userId, string reason) external;
        }
    }
}

use abi::IMintOracle;

/// Selector of `verifyIdentity(string,address)`.
pub const VERIFY_IDENTITY_SELECTOR: [u8; 4] = IMintOracle::verifyIdentityCall::SELECTOR;

/// Selector of `reportVerificationError(address,string,string)`.
pub const REPORT_VERIFICATION_ERROR_SELECTOR: [u8; 4] =
    IMintOracle::reportVerificationErrorCall::SELECTOR;

/// Encodes a terminal outcome as the single call to submit to `target`.
#[must_use]
pub fn encode_outcome(target: Address, outcome: &VerificationOutcome) -> EncodedCall {
    let data = match outcome {
        VerificationOutcome::Success {
            claimed_user_id,
            wallet,
        } => IMintOracle::verifyIdentityCall {
            userId: claimed_user_id.clone(),
            wallet: *wallet,
        }
        .abi_encode(),
        VerificationOutcome::Failure {
            wallet,
            claimed_user_id,
            reason,
        } => IMintOracle::reportVerificationErrorCall {
            wallet: *wallet,
            userId: claimed_user_id.clone(),
            reason: reason.clone(),
        }
        .abi_encode(),
    };

    EncodedCall {
        to: target,
        data: Bytes::from(data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const TARGET: Address = address!("000000000000000000000000000000000000dEaD");
    const WALLET: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    #[test]
    fn success_encodes_verify_identity_call() {
        let outcome = VerificationOutcome::Success {
            claimed_user_id: "12345".to_string(),
            wallet: WALLET,
        };

        let call = encode_outcome(TARGET, &outcome);
        assert_eq!(call.to, TARGET);
        assert_eq!(call.data[..4], VERIFY_IDENTITY_SELECTOR);

        let decoded = IMintOracle::verifyIdentityCall::abi_decode(&call.data).unwrap();
        assert_eq!(decoded.userId, "12345");
        assert_eq!(decoded.wallet, WALLET);
    }

    #[test]
    fn failure_encodes_error_report_call() {
        let outcome = VerificationOutcome::Failure {
            wallet: WALLET,
            claimed_user_id: "12345".to_string(),
            reason: "claimed identity does not match provider record".to_string(),
        };

        let call = encode_outcome(TARGET, &outcome);
        assert_eq!(call.data[..4], REPORT_VERIFICATION_ERROR_SELECTOR);

        let decoded = IMintOracle::reportVerificationErrorCall::abi_decode(&call.data).unwrap();
        assert_eq!(decoded.wallet, WALLET);
        assert_eq!(decoded.userId, "12345");
        assert!(decoded.reason.contains("match"));
    }

    #[test]
    fn encoding_is_deterministic() {
        let outcome = VerificationOutcome::Success {
            claimed_user_id: "1796129942104657921".to_string(),
            wallet: WALLET,
        };

        let first = encode_outcome(TARGET, &outcome);
        let second = encode_outcome(TARGET, &outcome);
        assert_eq!(first, second);
    }

    #[test]
    fn distinct_outcomes_use_distinct_selectors() {
        assert_ne!(VERIFY_IDENTITY_SELECTOR, REPORT_VERIFICATION_ERROR_SELECTOR);
    }
}
