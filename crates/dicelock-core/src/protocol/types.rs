//! Session-level types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::GameError;

/// Unique session identifier, for log correlation and transcripts
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new random session ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the two parties at the table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Party {
    /// The untrusting peer supplying guesses and contributions
    User,
    /// The committing side running the session
    Host,
}

impl Party {
    /// Get the other party
    pub fn opponent(&self) -> Party {
        match self {
            Party::User => Party::Host,
            Party::Host => Party::User,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::User => write!(f, "user"),
            Party::Host => write!(f, "host"),
        }
    }
}

/// Final verdict of a session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    UserWins,
    HostWins,
    Tie,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::UserWins => "user wins",
            Outcome::HostWins => "host wins",
            Outcome::Tie => "tie",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Named rule for resolving equal roll values
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TiePolicy {
    /// Equal values go to the host: only a strictly greater user roll wins
    #[default]
    HostWins,
    /// Equal values go to the user
    UserWins,
    /// Equal values end the session in a declared tie
    Draw,
}

impl TiePolicy {
    /// Verdict for a session whose rolls came out equal
    pub fn on_tie(&self) -> Outcome {
        match self {
            TiePolicy::HostWins => Outcome::HostWins,
            TiePolicy::UserWins => Outcome::UserWins,
            TiePolicy::Draw => Outcome::Tie,
        }
    }
}

impl FromStr for TiePolicy {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "host" => Ok(TiePolicy::HostWins),
            "user" => Ok(TiePolicy::UserWins),
            "draw" => Ok(TiePolicy::Draw),
            _ => Err(GameError::UnknownTiePolicy(s.to_string())),
        }
    }
}

/// Phases a session moves through, in order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Init,
    DetermineFirst,
    SelectDice,
    ComputeProbability,
    Roll,
    Result,
}
