use thiserror::Error;

/// Error outputs from the verification core.
#[derive(Debug, Error)]
pub enum MintgateError {
    /// A secret required for this invocation is not present in the secret store.
    ///
    /// This is a configuration problem: no wallet-attributable decision can be
    /// made, so the orchestrator reports it as a non-executable result rather
    /// than an on-chain error.
    #[error("missing required secret: {name}")]
    MissingSecret {
        /// Name of the missing secret.
        name: String,
    },
    /// The configured decryption key is not 32 bytes of hex.
    #[error("DECRYPTION_KEY must be 64 hex characters (32 bytes)")]
    InvalidKey,
    /// The encrypted envelope could not be decrypted.
    ///
    /// Covers malformed wire data (non-hex, too short) as well as GCM tag
    /// verification failure. Never carries partial plaintext.
    #[error("envelope decryption failed: {context}")]
    Decryption {
        /// What made the envelope unreadable.
        context: String,
    },
    /// Sealing a plaintext into an envelope failed.
    #[error("envelope encryption failed: {context}")]
    Encryption {
        /// What the AEAD rejected.
        context: String,
    },
    /// The identity provider answered with a non-success HTTP status.
    #[error("provider returned status {status}: {body}")]
    ProviderHttp {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Response body, verbatim, for the on-chain error report.
        body: String,
    },
    /// The identity provider answered 2xx but the response is missing an
    /// expected field.
    #[error("provider response missing expected field: {field}")]
    MalformedResponse {
        /// Dotted path of the absent field.
        field: &'static str,
    },
    /// Transport-level failure reaching the identity provider.
    #[error("provider request failed: {0}")]
    Network(#[from] reqwest::Error),
}

impl MintgateError {
    /// Whether this error originates on the provider side of the protocol.
    ///
    /// Provider-side errors are recoverable at the protocol level: the
    /// orchestrator converts them into an on-chain failure report so the
    /// contract can unblock the wallet for a retry. Everything else is
    /// propagated to the caller.
    #[must_use]
    pub const fn is_provider_side(&self) -> bool {
        matches!(
            self,
            Self::ProviderHttp { .. } | Self::MalformedResponse { .. } | Self::Network(_)
        )
    }
}
