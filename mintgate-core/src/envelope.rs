//! Authenticated encryption for short credentials carried on-chain.
//!
//! Wire format: hex string = `nonce (24 bytes, 48 hex chars) || ciphertext+tag`.
//! AES-256-GCM with a 24-byte random nonce, raw key material, no KDF. The
//! split at byte offset 24 is an interoperability contract with the
//! credential-issuing side and must never change.

use aes_gcm::aead::consts::U24;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::aes::Aes256;
use aes_gcm::{AesGcm, Nonce};

use crate::error::MintgateError;

/// AES-256-GCM parameterized with the 24-byte nonce the wire format mandates.
type Aes256Gcm24 = AesGcm<Aes256, U24>;

/// Nonce length in bytes (48 hex characters on the wire).
pub const NONCE_SIZE: usize = 24;

/// GCM authentication tag length in bytes, appended to the ciphertext.
pub const TAG_SIZE: usize = 16;

/// Envelope decryption key (256-bit).
///
/// Provisioned through the secret store, used directly as AES key material.
/// Zeroized on drop; never logged, serialized, or embedded in any outcome.
#[derive(Clone, zeroize::Zeroize, zeroize::ZeroizeOnDrop)]
pub struct DecryptionKey([u8; 32]);

impl DecryptionKey {
    /// Creates a key from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parses a key from its 64-hex-character secret-store representation.
    ///
    /// # Errors
    ///
    /// Returns [`MintgateError::InvalidKey`] if the input is not exactly
    /// 32 bytes of hex.
    pub fn from_hex(hex_key: &str) -> Result<Self, MintgateError> {
        let raw = hex::decode(hex_key.trim()).map_err(|_| MintgateError::InvalidKey)?;
        let bytes: [u8; 32] = raw.try_into().map_err(|_| MintgateError::InvalidKey)?;
        Ok(Self(bytes))
    }

    /// Returns a reference to the raw key bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for DecryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecryptionKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Encrypts a plaintext credential into the hex envelope format.
///
/// Primarily exercised by the credential-issuing side and by tests; the
/// oracle itself only decrypts. Output interoperates byte-for-byte with any
/// conforming producer: a fresh random 24-byte nonce, then ciphertext with
/// the GCM tag appended, all hex-encoded.
///
/// # Errors
///
/// Returns [`MintgateError::Encryption`] if the AEAD rejects the input
/// (only possible for plaintexts beyond the GCM length limit).
pub fn encrypt(plaintext: &[u8], key: &DecryptionKey) -> Result<String, MintgateError> {
    let cipher = Aes256Gcm24::new(key.as_bytes().into());
    let nonce = Aes256Gcm24::generate_nonce(&mut OsRng);
    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|_| MintgateError::Encryption {
            context: "AES-256-GCM encryption failed".to_string(),
        })?;

    let mut envelope = hex::encode(nonce);
    envelope.push_str(&hex::encode(ciphertext));
    Ok(envelope)
}

/// Decrypts a hex envelope back to the plaintext credential.
///
/// Accepts an optional `0x` prefix on the envelope; everything after it must
/// be the exact wire format. Splits at byte offset 24 and verifies the GCM
/// tag; on any failure no partial plaintext is ever returned.
///
/// # Errors
///
/// Returns [`MintgateError::Decryption`] if the envelope is not valid hex,
/// is shorter than nonce plus tag, or fails authentication.
pub fn decrypt(envelope: &str, key: &DecryptionKey) -> Result<Vec<u8>, MintgateError> {
    let envelope = envelope.strip_prefix("0x").unwrap_or(envelope);
    let raw = hex::decode(envelope).map_err(|_| MintgateError::Decryption {
        context: "envelope is not valid hex".to_string(),
    })?;

    if raw.len() < NONCE_SIZE + TAG_SIZE {
        return Err(MintgateError::Decryption {
            context: "envelope is shorter than nonce plus tag".to_string(),
        });
    }

    let (nonce, ciphertext) = raw.split_at(NONCE_SIZE);
    let cipher = Aes256Gcm24::new(key.as_bytes().into());
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| MintgateError::Decryption {
            context: "authentication tag verification failed".to_string(),
        })
}
