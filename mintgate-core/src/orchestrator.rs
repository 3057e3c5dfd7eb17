//! The verification state machine.
//!
//! One invocation walks `Start → SecretsLoaded → Decrypted → IdentityFetched
//! → CrossChecked → {Succeeded | Failed}` and produces exactly one
//! [`ExecutionResult`]. No retries, no shared state, no caching: the external
//! scheduler re-delivers events, so a re-run with an identical request and
//! identical provider state yields byte-identical output.
//!
//! Failure policy per stage:
//! - missing or malformed secrets: non-executable result, no on-chain call;
//! - unreadable envelope (or non-UTF-8 plaintext): error propagated to the
//!   caller, never reported on-chain;
//! - provider errors and identity mismatch: encoded as an on-chain error
//!   report so the contract can unblock the wallet;
//! - revocation failure: logged, outcome unchanged.

use alloy_primitives::Address;
use tracing::{debug, info, warn};

use crate::encoder;
use crate::envelope::{self, DecryptionKey};
use crate::error::MintgateError;
use crate::outcomes::{ExecutionResult, VerificationOutcome};
use crate::provider::IdentityVerifier;
use crate::requests::VerificationRequest;
use crate::secrets::{SecretProvider, DECRYPTION_KEY};

/// Drives one verification attempt end to end.
///
/// Both collaborators are injected at construction: the secret store (no
/// ambient environment access) and the identity provider strategy.
pub struct Orchestrator<S, V> {
    secrets: S,
    verifier: V,
    target: Address,
}

impl<S: SecretProvider, V: IdentityVerifier> Orchestrator<S, V> {
    /// Creates an orchestrator that encodes outcomes against `target`.
    #[must_use]
    pub const fn new(secrets: S, verifier: V, target: Address) -> Self {
        Self {
            secrets,
            verifier,
            target,
        }
    }

    /// Runs a single verification attempt.
    ///
    /// Returns a non-executable result for configuration problems, an
    /// executable result with exactly one encoded call for every computed
    /// outcome, and an error only when the envelope itself cannot be read.
    ///
    /// # Errors
    ///
    /// Returns [`MintgateError::Decryption`] when the envelope is malformed,
    /// fails authentication, or decrypts to non-UTF-8 bytes. Such a request
    /// cannot be attributed to a legitimate wallet claim with confidence, so
    /// it is deliberately not reported on-chain.
    pub async fn run(
        &self,
        request: &VerificationRequest,
    ) -> Result<ExecutionResult, MintgateError> {
        // Start → SecretsLoaded. Preflight everything the attempt will need
        // before touching the envelope.
        let Some(key_hex) = self.secrets.get(DECRYPTION_KEY) else {
            return Ok(Self::configuration_error(&MintgateError::MissingSecret {
                name: DECRYPTION_KEY.to_string(),
            }));
        };
        for name in self.verifier.required_secrets() {
            if self.secrets.get(name).is_none() {
                return Ok(Self::configuration_error(&MintgateError::MissingSecret {
                    name: (*name).to_string(),
                }));
            }
        }
        let Ok(key) = DecryptionKey::from_hex(&key_hex) else {
            return Ok(Self::configuration_error(&MintgateError::InvalidKey));
        };

        // SecretsLoaded → Decrypted. Failures propagate.
        let plaintext = envelope::decrypt(&request.encrypted_credential, &key)?;
        let credential =
            String::from_utf8(plaintext).map_err(|_| MintgateError::Decryption {
                context: "plaintext credential is not valid UTF-8".to_string(),
            })?;
        debug!(wallet = %request.wallet, "credential decrypted");

        // Decrypted → IdentityFetched → CrossChecked.
        let outcome = match self
            .verifier
            .resolve_and_validate(&credential, request, &self.secrets)
            .await
        {
            Ok(identity) => {
                debug!(
                    wallet = %request.wallet,
                    provider_user_id = %identity.user_id,
                    "provider identity fetched"
                );
                if identity.matches_claim(&request.claimed_user_id) {
                    // CrossChecked → Succeeded. Revocation runs strictly
                    // after a confirmed match and never changes the outcome.
                    if let Err(err) = self.verifier.revoke(&credential, &self.secrets).await {
                        warn!(wallet = %request.wallet, error = %err, "credential revocation failed");
                    }
                    VerificationOutcome::Success {
                        claimed_user_id: request.claimed_user_id.clone(),
                        wallet: request.wallet,
                    }
                } else {
                    VerificationOutcome::Failure {
                        wallet: request.wallet,
                        claimed_user_id: request.claimed_user_id.clone(),
                        reason: "claimed identity does not match provider record".to_string(),
                    }
                }
            }
            Err(err) if err.is_provider_side() => VerificationOutcome::Failure {
                wallet: request.wallet,
                claimed_user_id: request.claimed_user_id.clone(),
                reason: err.to_string(),
            },
            Err(err) => return Err(err),
        };

        info!(
            wallet = %request.wallet,
            success = matches!(outcome, VerificationOutcome::Success { .. }),
            "verification outcome computed"
        );
        Ok(ExecutionResult::executable(encoder::encode_outcome(
            self.target,
            &outcome,
        )))
    }

    fn configuration_error(err: &MintgateError) -> ExecutionResult {
        info!(error = %err, "verification not executable");
        ExecutionResult::not_executable(err.to_string())
    }
}
