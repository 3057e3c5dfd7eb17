//! End-to-end verification flows against a mocked identity provider.

use alloy_core::sol_types::SolCall;
use alloy_primitives::{address, Address};
use mockito::{Matcher, Server};

use mintgate_core::abi::IMintOracle;
use mintgate_core::envelope::{self, DecryptionKey};
use mintgate_core::secrets::{StaticSecrets, CLIENT_ID, CLIENT_SECRET, DECRYPTION_KEY, PROVIDER_API_KEY};
use mintgate_core::{
    FarcasterIdentity, Orchestrator, TwitterIdentity, VerificationRequest,
    REPORT_VERIFICATION_ERROR_SELECTOR, VERIFY_IDENTITY_SELECTOR,
};

const KEY_HEX: &str = "1d301612428be037c255ea8b4d1f1b3951f7cb227fcdb318d6b02c84c6bca0a4";
const TARGET: Address = address!("000000000000000000000000000000000000dEaD");
const WALLET: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

fn sealed(credential: &str) -> String {
    let key = DecryptionKey::from_hex(KEY_HEX).unwrap();
    envelope::encrypt(credential.as_bytes(), &key).unwrap()
}

#[tokio::test]
async fn twitter_flow_with_revocation_verifies_and_revokes() {
    let mut server = Server::new_async().await;
    let users_me = server
        .mock("GET", "/2/users/me")
        .match_header("authorization", "Bearer access-token-1")
        .with_status(200)
        .with_body(r#"{"data": {"id": "1796129942104657921", "username": "alice"}}"#)
        .create_async()
        .await;
    let revoke = server
        .mock("POST", "/2/oauth2/revoke")
        .match_body(Matcher::UrlEncoded(
            "token".to_string(),
            "access-token-1".to_string(),
        ))
        .with_status(200)
        .with_body(r#"{"revoked": true}"#)
        .create_async()
        .await;

    let secrets = StaticSecrets::new()
        .with(DECRYPTION_KEY, KEY_HEX)
        .with(CLIENT_ID, "client-id")
        .with(CLIENT_SECRET, "client-secret");
    let orchestrator = Orchestrator::new(secrets, TwitterIdentity::new(server.url(), true), TARGET);

    let request = VerificationRequest::new(
        WALLET,
        "1796129942104657921".to_string(),
        sealed("access-token-1"),
    );
    let result = orchestrator.run(&request).await.unwrap();

    users_me.assert_async().await;
    revoke.assert_async().await;

    // The runtime consumes this object as JSON.
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["canExec"], true);
    let calls = result.call_data.unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].to, TARGET);
    assert_eq!(calls[0].data[..4], VERIFY_IDENTITY_SELECTOR);

    let decoded = IMintOracle::verifyIdentityCall::abi_decode(&calls[0].data).unwrap();
    assert_eq!(decoded.userId, "1796129942104657921");
    assert_eq!(decoded.wallet, WALLET);
}

#[tokio::test]
async fn farcaster_flow_reports_mismatch_on_chain() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v2/farcaster/user/custody-address")
        .match_query(Matcher::UrlEncoded(
            "custody_address".to_string(),
            format!("{WALLET:#x}"),
        ))
        .match_header("x-api-key", "neynar-key")
        .with_status(200)
        .with_body(r#"{"user": {"fid": 777, "username": "mallory.eth"}}"#)
        .create_async()
        .await;

    let secrets = StaticSecrets::new()
        .with(DECRYPTION_KEY, KEY_HEX)
        .with(PROVIDER_API_KEY, "neynar-key");
    let orchestrator = Orchestrator::new(secrets, FarcasterIdentity::new(server.url()), TARGET);

    let request = VerificationRequest::new(WALLET, "12345".to_string(), sealed("12345"));
    let result = orchestrator.run(&request).await.unwrap();

    assert!(result.can_exec);
    let calls = result.call_data.unwrap();
    assert_eq!(calls[0].data[..4], REPORT_VERIFICATION_ERROR_SELECTOR);

    let decoded = IMintOracle::reportVerificationErrorCall::abi_decode(&calls[0].data).unwrap();
    assert_eq!(decoded.wallet, WALLET);
    assert_eq!(decoded.userId, "12345");
    assert!(decoded.reason.contains("match"));
}

#[tokio::test]
async fn farcaster_flow_confirms_matching_fid() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v2/farcaster/user/custody-address")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"user": {"fid": 12345, "username": "alice.eth"}}"#)
        .create_async()
        .await;

    let secrets = StaticSecrets::new()
        .with(DECRYPTION_KEY, KEY_HEX)
        .with(PROVIDER_API_KEY, "neynar-key");
    let orchestrator = Orchestrator::new(secrets, FarcasterIdentity::new(server.url()), TARGET);

    let request = VerificationRequest::new(WALLET, "12345".to_string(), sealed("12345"));
    let result = orchestrator.run(&request).await.unwrap();

    let calls = result.call_data.unwrap();
    let decoded = IMintOracle::verifyIdentityCall::abi_decode(&calls[0].data).unwrap();
    assert_eq!(decoded.userId, "12345");
}

#[tokio::test]
async fn missing_configuration_never_reaches_the_provider() {
    let mut server = Server::new_async().await;
    let users_me = server
        .mock("GET", "/2/users/me")
        .expect(0)
        .create_async()
        .await;

    let orchestrator = Orchestrator::new(
        StaticSecrets::new(),
        TwitterIdentity::new(server.url(), false),
        TARGET,
    );
    let request = VerificationRequest::new(WALLET, "12345".to_string(), sealed("access-token-1"));
    let result = orchestrator.run(&request).await.unwrap();

    users_me.assert_async().await;
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["canExec"], false);
    assert!(json["message"].as_str().unwrap().contains("DECRYPTION_KEY"));
}
