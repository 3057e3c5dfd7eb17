//! Identity provider clients.
//!
//! One strategy seam, [`IdentityVerifier`], hides the differences between the
//! supported verification flows: bearer-token lookup against the user's own
//! record (with or without post-success revocation) and third-party
//! wallet-to-user mapping. The orchestrator is written once against the
//! trait; each provider only answers "who does this credential belong to".

use serde::Deserialize;

use crate::error::MintgateError;
use crate::http::Request;
use crate::requests::{ProviderIdentity, VerificationRequest};
use crate::secrets::{SecretProvider, CLIENT_ID, CLIENT_SECRET, PROVIDER_API_KEY};

/// Capability seam between the orchestrator and a concrete identity provider.
#[allow(async_fn_in_trait)]
pub trait IdentityVerifier {
    /// Secrets that must be provisioned before a verification attempt may
    /// start. Checked by the orchestrator up front so a misconfigured
    /// deployment is reported before anything is decrypted.
    fn required_secrets(&self) -> &'static [&'static str];

    /// Resolves the decrypted credential into the provider's identity record.
    ///
    /// # Errors
    ///
    /// Returns [`MintgateError::ProviderHttp`] on a non-success status,
    /// [`MintgateError::MalformedResponse`] when the expected user-ID field
    /// is absent, or [`MintgateError::Network`] on transport failure.
    async fn resolve_and_validate(
        &self,
        credential: &str,
        request: &VerificationRequest,
        secrets: &dyn SecretProvider,
    ) -> Result<ProviderIdentity, MintgateError>;

    /// Invalidates the credential at the provider after a successful match.
    ///
    /// Best-effort: the orchestrator logs failures and never lets them change
    /// an outcome that has already been computed.
    ///
    /// # Errors
    ///
    /// Returns a provider or transport error when revocation is supported and
    /// the call fails.
    async fn revoke(
        &self,
        credential: &str,
        secrets: &dyn SecretProvider,
    ) -> Result<(), MintgateError>;
}

/// Response shape of the provider's "current user" endpoint.
#[derive(Debug, Deserialize)]
struct UsersMeResponse {
    data: Option<UserRecord>,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    id: Option<String>,
    username: Option<String>,
}

/// Twitter/X identity verification via `GET /2/users/me` with the decrypted
/// access token as bearer credential.
///
/// Covers both the plain flow and the relayer flow: the latter additionally
/// revokes the access token once the identity match is confirmed, using the
/// OAuth client credentials from the secret store.
pub struct TwitterIdentity {
    base_url: String,
    revoke_on_success: bool,
    http: Request,
}

impl TwitterIdentity {
    /// Creates a client against `base_url` (e.g. `https://api.x.com`).
    #[must_use]
    pub fn new(base_url: impl Into<String>, revoke_on_success: bool) -> Self {
        Self {
            base_url: base_url.into(),
            revoke_on_success,
            http: Request::new(),
        }
    }
}

impl IdentityVerifier for TwitterIdentity {
    fn required_secrets(&self) -> &'static [&'static str] {
        if self.revoke_on_success {
            &[CLIENT_ID, CLIENT_SECRET]
        } else {
            &[]
        }
    }

    async fn resolve_and_validate(
        &self,
        credential: &str,
        _request: &VerificationRequest,
        _secrets: &dyn SecretProvider,
    ) -> Result<ProviderIdentity, MintgateError> {
        let url = format!("{}/2/users/me", self.base_url);
        let response = self.http.get(&url).bearer_auth(credential).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MintgateError::ProviderHttp {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: UsersMeResponse =
            response
                .json()
                .await
                .map_err(|_| MintgateError::MalformedResponse {
                    field: "data",
                })?;

        let record = parsed.data.ok_or(MintgateError::MalformedResponse { field: "data" })?;
        let user_id = record
            .id
            .ok_or(MintgateError::MalformedResponse { field: "data.id" })?;

        Ok(ProviderIdentity {
            user_id,
            username: record.username,
        })
    }

    async fn revoke(
        &self,
        credential: &str,
        secrets: &dyn SecretProvider,
    ) -> Result<(), MintgateError> {
        if !self.revoke_on_success {
            return Ok(());
        }

        let client_id = secrets.get(CLIENT_ID).ok_or_else(|| {
            MintgateError::MissingSecret {
                name: CLIENT_ID.to_string(),
            }
        })?;
        let client_secret = secrets.get(CLIENT_SECRET).ok_or_else(|| {
            MintgateError::MissingSecret {
                name: CLIENT_SECRET.to_string(),
            }
        })?;

        let url = format!("{}/2/oauth2/revoke", self.base_url);
        let response = self
            .http
            .post(&url)
            .basic_auth(client_id, Some(client_secret))
            .form(&[
                ("token", credential),
                ("token_type_hint", "access_token"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MintgateError::ProviderHttp {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

/// Response shape of the wallet-mapping lookup.
#[derive(Debug, Deserialize)]
struct UserByWalletResponse {
    user: Option<MappedUser>,
}

#[derive(Debug, Deserialize)]
struct MappedUser {
    fid: Option<u64>,
    username: Option<String>,
}

/// Farcaster identity verification through a third-party wallet-to-user
/// mapping (Neynar-style API).
///
/// The provider is asked which user the event's wallet is registered to; the
/// returned fid is the provider identity the orchestrator cross-checks. No
/// revocation: the mapping is not a credential that can be invalidated.
pub struct FarcasterIdentity {
    base_url: String,
    http: Request,
}

impl FarcasterIdentity {
    /// Creates a client against `base_url` (e.g. `https://api.neynar.com`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: Request::new(),
        }
    }
}

impl IdentityVerifier for FarcasterIdentity {
    fn required_secrets(&self) -> &'static [&'static str] {
        &[PROVIDER_API_KEY]
    }

    async fn resolve_and_validate(
        &self,
        _credential: &str,
        request: &VerificationRequest,
        secrets: &dyn SecretProvider,
    ) -> Result<ProviderIdentity, MintgateError> {
        let api_key = secrets.get(PROVIDER_API_KEY).ok_or_else(|| {
            MintgateError::MissingSecret {
                name: PROVIDER_API_KEY.to_string(),
            }
        })?;

        let url = format!(
            "{}/v2/farcaster/user/custody-address?custody_address={:#x}",
            self.base_url, request.wallet
        );
        let response = self.http.get(&url).header("x-api-key", api_key).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MintgateError::ProviderHttp {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: UserByWalletResponse =
            response
                .json()
                .await
                .map_err(|_| MintgateError::MalformedResponse {
                    field: "user",
                })?;

        let user = parsed.user.ok_or(MintgateError::MalformedResponse { field: "user" })?;
        let fid = user
            .fid
            .ok_or(MintgateError::MalformedResponse { field: "user.fid" })?;

        Ok(ProviderIdentity {
            user_id: fid.to_string(),
            username: user.username,
        })
    }

    async fn revoke(
        &self,
        _credential: &str,
        _secrets: &dyn SecretProvider,
    ) -> Result<(), MintgateError> {
        Ok(())
    }
}
