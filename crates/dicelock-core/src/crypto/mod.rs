//! Cryptographic primitives for the commit-reveal fairness protocol.
//!
//! This module provides:
//! - SecretKey and Digest for the keyed-hash commitment
//! - Commitment for one commit -> contribute -> combine -> reveal round
//! - Standalone combine/verify for independent re-checking

mod commitment;

pub use commitment::{combine, verify, Commitment, Digest, Reveal, SecretKey};
