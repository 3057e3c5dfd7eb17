//! Inbound verification requests and provider identities.

use alloy_primitives::Address;
use serde::Deserialize;

/// One verification attempt, constructed from an on-chain event delivered by
/// the external watcher. Immutable for the lifetime of the attempt; the
/// orchestrator is safe to re-run with an identical request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    /// Hex envelope carrying the encrypted credential (see [`crate::envelope`]).
    #[serde(rename = "accessCodeEncrypted")]
    pub encrypted_credential: String,
    /// User identifier asserted by the requester in the triggering event.
    #[serde(rename = "userID")]
    pub claimed_user_id: String,
    /// Wallet the mint decision applies to.
    pub wallet: Address,
    /// Chain the triggering event was observed on, when the watcher supplies it.
    #[serde(default)]
    pub chain_id: Option<u64>,
}

impl VerificationRequest {
    /// Builds a request directly, for callers that already parsed the event.
    #[must_use]
    pub const fn new(wallet: Address, claimed_user_id: String, encrypted_credential: String) -> Self {
        Self {
            encrypted_credential,
            claimed_user_id,
            wallet,
            chain_id: None,
        }
    }
}

/// Identity record returned by the external provider for a credential.
///
/// Ephemeral: used once for the cross-check against the claimed identity,
/// never persisted or encoded on-chain beyond the user ID itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderIdentity {
    /// Opaque provider-side user ID.
    pub user_id: String,
    /// Provider-side handle when the API returns one. Diagnostics only.
    pub username: Option<String>,
}

impl ProviderIdentity {
    /// Compares the provider-side user ID against a claimed identity.
    ///
    /// Exact equality after normalization: surrounding whitespace is ignored,
    /// and when both sides parse as unsigned integers they are compared
    /// numerically so `"0012345"` and `"12345"` agree.
    #[must_use]
    pub fn matches_claim(&self, claimed_user_id: &str) -> bool {
        let provider = self.user_id.trim();
        let claimed = claimed_user_id.trim();

        match (provider.parse::<u128>(), claimed.parse::<u128>()) {
            (Ok(a), Ok(b)) => a == b,
            _ => provider == claimed,
        }
    }
}
