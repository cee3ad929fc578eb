//! Session orchestration for the dice game.

mod session;
mod types;

pub use session::{GameSession, RoundRecord, SessionReport};
pub use types::{Outcome, Party, Phase, SessionId, TiePolicy};
