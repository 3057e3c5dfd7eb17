//! Identity-verification core for the mint oracle.
//!
//! Bridges on-chain mint requests to off-chain identity providers: decrypts a
//! client-side-encrypted credential carried in an on-chain event, validates
//! it against the provider (Twitter/X or a Farcaster wallet mapping),
//! cross-checks the returned identity against the claimed one, and encodes
//! exactly one deterministic on-chain callback — a verification confirmation
//! or a structured error report — for an external transaction sender.
//!
//! The crate is a library only: transaction submission, event watching, and
//! the smart contracts themselves are external collaborators.
#![deny(clippy::all, clippy::pedantic)]

pub mod envelope;

mod encoder;
pub use encoder::*;

mod error;
pub use error::*;

mod orchestrator;
pub use orchestrator::*;

mod outcomes;
pub use outcomes::*;

mod provider;
pub use provider::*;

mod requests;
pub use requests::*;

pub mod secrets;

// private modules
mod http;
