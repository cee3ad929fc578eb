//! Dicelock Core Library
//!
//! This crate provides the commit-reveal fairness protocol, the dice and
//! win-probability engine, and the session state machine for a two-party
//! non-transitive dice game. Every random outcome a session produces can be
//! re-verified by a peer who does not trust the host's randomness.

pub mod crypto;
pub mod dice;
pub mod error;
pub mod interact;
pub mod protocol;

pub use crypto::{combine, verify, Commitment, Digest, Reveal, SecretKey};
pub use dice::probability::{tie_probability, win_probability};
pub use dice::{DiceSet, Die, MIN_DICE};
pub use error::GameError;
pub use interact::{Exchange, Interaction, ScriptedInteraction};
pub use protocol::{
    GameSession, Outcome, Party, Phase, RoundRecord, SessionId, SessionReport, TiePolicy,
};
