//! Dice definitions.

pub mod probability;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use crate::error::GameError;

/// Minimum number of dice a playable set needs
pub const MIN_DICE: usize = 3;

/// An immutable ordered sequence of integer face values
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    faces: Vec<i64>,
}

impl Die {
    /// Create a die from its face values; at least one face is required
    pub fn new(faces: Vec<i64>) -> Result<Self, GameError> {
        if faces.is_empty() {
            return Err(GameError::EmptyDie);
        }
        Ok(Self { faces })
    }

    /// The ordered face values
    pub fn faces(&self) -> &[i64] {
        &self.faces
    }

    /// Number of faces; the commitment range for rolls of this die
    pub fn face_count(&self) -> u64 {
        self.faces.len() as u64
    }

    /// Face value at a rolled index. The index must come from a combine over
    /// this die's face count.
    pub fn face(&self, index: u64) -> i64 {
        self.faces[index as usize]
    }
}

impl FromStr for Die {
    type Err = GameError;

    /// Parse a comma-separated list of integers, e.g. `2,2,4,4,9,9`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let faces = s
            .split(',')
            .map(|token| {
                token.trim().parse::<i64>().map_err(|_| GameError::InvalidFace {
                    spec: s.to_string(),
                    token: token.trim().to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Die::new(faces)
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, face) in self.faces.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", face)?;
        }
        Ok(())
    }
}

/// A set of three or more dice.
///
/// Dice are distinct by position, never by value: two dice with identical
/// faces remain separate choices, so all selection is index-based.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiceSet {
    dice: Vec<Die>,
}

impl DiceSet {
    /// Validate and take ownership of the dice
    pub fn new(dice: Vec<Die>) -> Result<Self, GameError> {
        if dice.len() < MIN_DICE {
            return Err(GameError::TooFewDice {
                got: dice.len(),
                min: MIN_DICE,
            });
        }
        Ok(Self { dice })
    }

    /// Parse one die per raw argument
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, GameError> {
        let dice = args
            .iter()
            .map(|arg| arg.as_ref().parse())
            .collect::<Result<Vec<Die>, _>>()?;
        Self::new(dice)
    }

    pub fn len(&self) -> usize {
        self.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Die> {
        self.dice.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Die> {
        self.dice.iter()
    }
}

impl Index<usize> for DiceSet {
    type Output = Die;

    fn index(&self, index: usize) -> &Die {
        &self.dice[index]
    }
}
