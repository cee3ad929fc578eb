//! SecretKey, Digest and Commitment for the commit-reveal scheme.

use hmac::{Hmac, Mac};
use rand::{CryptoRng, Rng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;

use crate::error::GameError;

type HmacSha256 = Hmac<Sha256>;

/// 256-bit key for the keyed commitment hash, fresh per commitment
#[derive(Clone, Serialize, Deserialize)]
pub struct SecretKey([u8; 32]);

impl SecretKey {
    /// Draw a new random key from a cryptographically secure source
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Digest = HMAC-SHA-256(secret_key, decimal string of the secret)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest([u8; 32]);

impl Digest {
    fn compute(key: &SecretKey, secret: u64) -> Self {
        let mut mac = HmacSha256::new_from_slice(key.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(secret.to_string().as_bytes());
        Self(mac.finalize().into_bytes().into())
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// The withheld half of a commitment, published once the peer's
/// contribution is locked in
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Reveal {
    pub secret_key: SecretKey,
    pub secret: u64,
}

/// A drawn commitment.
///
/// The digest is public from the start; the key and the secret stay hidden
/// until `into_reveal` consumes the value. Consuming on reveal means the
/// triple can never be mutated afterwards.
#[derive(Clone, Debug)]
pub struct Commitment {
    secret_key: SecretKey,
    secret: u64,
    range: u64,
    digest: Digest,
}

impl Commitment {
    /// Draw a secret uniformly from `[0, range)` and commit to it.
    ///
    /// Requires `range >= 1`. The bounded draw goes through `Rng::gen_range`,
    /// which is free of modulo bias.
    pub fn draw<R: RngCore + CryptoRng>(range: u64, rng: &mut R) -> Result<Self, GameError> {
        if range == 0 {
            return Err(GameError::EmptyRange);
        }
        let secret_key = SecretKey::random(rng);
        let secret = rng.gen_range(0..range);
        let digest = Digest::compute(&secret_key, secret);
        Ok(Self {
            secret_key,
            secret,
            range,
            digest,
        })
    }

    /// The published digest
    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    /// The range the secret was drawn from
    pub fn range(&self) -> u64 {
        self.range
    }

    /// Fold the peer contribution into the hidden secret:
    /// `(secret + contribution) mod range`
    pub fn combine_peer(&self, contribution: u64) -> Result<u64, GameError> {
        combine(self.secret, contribution, self.range)
    }

    /// Whether the peer's guess equals the hidden secret. Used by binary
    /// rounds where the secret itself is the decision, not an addend.
    pub fn matches(&self, guess: u64) -> bool {
        self.secret == guess
    }

    /// Consume the commitment, exposing the withheld fields
    pub fn into_reveal(self) -> Reveal {
        Reveal {
            secret_key: self.secret_key,
            secret: self.secret,
        }
    }
}

/// `(secret + contribution) mod range`, rejecting contributions outside
/// `[0, range)`. Callers validate peer input before combining.
pub fn combine(secret: u64, contribution: u64, range: u64) -> Result<u64, GameError> {
    if range == 0 {
        return Err(GameError::EmptyRange);
    }
    if contribution >= range {
        return Err(GameError::ContributionOutOfRange {
            got: contribution,
            range,
        });
    }
    Ok(((secret as u128 + contribution as u128) % range as u128) as u64)
}

/// Recompute the digest for a revealed pair and compare against the
/// published one. The comparison is constant-time. Returns false on any
/// mismatch; never errors.
pub fn verify(digest: &Digest, secret_key: &SecretKey, secret: u64) -> bool {
    let mut mac = match HmacSha256::new_from_slice(secret_key.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(secret.to_string().as_bytes());
    mac.verify_slice(digest.as_bytes()).is_ok()
}
