//! The game orchestration state machine.
//!
//! Drives turn-order determination, dice selection and rolling by invoking
//! the commitment protocol and folding in the peer's contributions. Strictly
//! sequential: the only suspension points are `Interaction::ask` calls, and
//! a commitment's digest is always published before the matching question.

use rand::{CryptoRng, Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::crypto::{verify, Commitment, Digest, Reveal};
use crate::dice::probability::win_probability;
use crate::dice::{DiceSet, Die};
use crate::error::GameError;
use crate::interact::Interaction;

use super::types::{Outcome, Party, Phase, SessionId, TiePolicy};

/// Everything an independent party needs to re-check one protocol round
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Which round this was ("first move", "host roll", "user roll")
    pub label: String,
    /// The range the secret was drawn from
    pub range: u64,
    /// Published digest, hex
    pub digest: String,
    /// The peer's locked-in number (guess or roll contribution)
    pub contribution: u64,
    /// The revealed secret
    pub secret: u64,
    /// The revealed key, hex
    pub secret_key: String,
    /// The number the round produced (the secret itself for the opening
    /// round, the combined face index for rolls)
    pub value: u64,
}

/// Verdict and verification material of a finished session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionReport {
    pub session: SessionId,
    pub first_chooser: Party,
    pub user_die: Die,
    pub host_die: Die,
    /// A-priori chance of the user die beating the host die
    pub win_probability: f64,
    pub user_value: i64,
    pub host_value: i64,
    pub outcome: Outcome,
    pub rounds: Vec<RoundRecord>,
}

/// A single game from validated dice to the declared winner.
///
/// Owns all protocol state for its lifetime; `run` consumes the session, so
/// a finished or aborted game cannot be resumed.
pub struct GameSession<R, I> {
    id: SessionId,
    dice: DiceSet,
    remaining: Vec<usize>,
    rng: R,
    peer: I,
    tie_policy: TiePolicy,
    phase: Phase,
    rounds: Vec<RoundRecord>,
}

impl<R: RngCore + CryptoRng, I: Interaction> GameSession<R, I> {
    /// Start a session over an already-validated dice set
    pub fn new(dice: DiceSet, rng: R, peer: I) -> Self {
        let remaining = (0..dice.len()).collect();
        Self {
            id: SessionId::new(),
            dice,
            remaining,
            rng,
            peer,
            tie_policy: TiePolicy::default(),
            phase: Phase::Init,
            rounds: Vec::new(),
        }
    }

    /// Replace the default tie rule
    pub fn with_tie_policy(mut self, tie_policy: TiePolicy) -> Self {
        self.tie_policy = tie_policy;
        self
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Play the session to completion
    pub fn run(mut self) -> Result<SessionReport, GameError> {
        info!(session = %self.id, dice = self.dice.len(), "session started");

        self.enter(Phase::DetermineFirst);
        let first_chooser = self.determine_first_chooser()?;

        self.enter(Phase::SelectDice);
        let (user_die, host_die) = self.select_dice(first_chooser)?;

        self.enter(Phase::ComputeProbability);
        let probability = win_probability(&user_die, &host_die);
        self.peer.say(&format!(
            "Your die ({}) beats mine ({}) with probability {:.4}.",
            user_die, host_die, probability
        ))?;

        self.enter(Phase::Roll);
        let host_value = self.roll(Party::Host, &host_die)?;
        let user_value = self.roll(Party::User, &user_die)?;

        self.enter(Phase::Result);
        let outcome = self.decide(user_value, host_value);
        self.peer.say(&format!(
            "Your roll {} against my roll {}: {}.",
            user_value, host_value, outcome
        ))?;

        info!(session = %self.id, %outcome, "session finished");

        Ok(SessionReport {
            session: self.id,
            first_chooser,
            user_die,
            host_die,
            win_probability: probability,
            user_value,
            host_value,
            outcome,
            rounds: self.rounds,
        })
    }

    fn enter(&mut self, phase: Phase) {
        debug!(session = %self.id, from = ?self.phase, to = ?phase, "phase transition");
        self.phase = phase;
    }

    /// Commit to a bit, let the peer guess it, reveal. A correct guess puts
    /// the user in the first-chooser seat. The guess is locked in before the
    /// reveal; it is never combined arithmetically.
    fn determine_first_chooser(&mut self) -> Result<Party, GameError> {
        self.peer
            .say("Let's decide who picks a die first.")?;
        let commitment = Commitment::draw(2, &mut self.rng)?;
        self.peer.say(&format!(
            "I committed to a bit (HMAC={}).",
            commitment.digest()
        ))?;

        let guess = self.ask_number("Guess my bit", 2)?;
        let matched = commitment.matches(guess);

        let digest = *commitment.digest();
        let reveal = commitment.into_reveal();
        self.peer.say(&format!(
            "My bit was {} (KEY={}).",
            reveal.secret, reveal.secret_key
        ))?;
        let secret = reveal.secret;
        self.record("first move", 2, digest, guess, reveal, secret)?;

        let first_chooser = if matched { Party::User } else { Party::Host };
        match first_chooser {
            Party::User => self.peer.say("You guessed it, you pick first.")?,
            Party::Host => self.peer.say("You guessed wrong, I pick first.")?,
        }
        debug!(session = %self.id, %first_chooser, "turn order decided");
        Ok(first_chooser)
    }

    /// Hand one die to each party; whatever is left over stays on the table.
    /// Removal is positional, so duplicate face lists stay distinct.
    fn select_dice(&mut self, first_chooser: Party) -> Result<(Die, Die), GameError> {
        match first_chooser {
            Party::User => {
                let user_die = self.user_pick()?;
                let host_die = self.host_pick()?;
                Ok((user_die, host_die))
            }
            Party::Host => {
                let host_die = self.host_pick()?;
                let user_die = self.user_pick()?;
                Ok((user_die, host_die))
            }
        }
    }

    /// The host's own pick is a plain uniform secure draw over what remains.
    /// An unobserved self-choice needs no commitment round.
    fn host_pick(&mut self) -> Result<Die, GameError> {
        let slot = self.rng.gen_range(0..self.remaining.len());
        let die = self.take_remaining(slot);
        self.peer.say(&format!("I take the [{}] die.", die))?;
        Ok(die)
    }

    fn user_pick(&mut self) -> Result<Die, GameError> {
        let mut menu = String::from("Pick your die:");
        for (slot, &index) in self.remaining.iter().enumerate() {
            menu.push_str(&format!("\n  {} - {}", slot, self.dice[index]));
        }
        self.peer.say(&menu)?;

        let slot = self.ask_number("Your die", self.remaining.len() as u64)? as usize;
        let die = self.take_remaining(slot);
        self.peer.say(&format!("You take the [{}] die.", die))?;
        Ok(die)
    }

    fn take_remaining(&mut self, slot: usize) -> Die {
        let index = self.remaining.remove(slot);
        self.dice[index].clone()
    }

    /// One commit -> contribute -> combine -> reveal round for a die
    fn roll(&mut self, party: Party, die: &Die) -> Result<i64, GameError> {
        let range = die.face_count();
        let commitment = Commitment::draw(range, &mut self.rng)?;
        self.peer.say(&format!(
            "Rolling for the {}: I committed to a number in [0..{}] (HMAC={}).",
            party,
            range - 1,
            commitment.digest()
        ))?;

        let contribution = self.ask_number("Your number", range)?;
        let index = commitment.combine_peer(contribution)?;

        let digest = *commitment.digest();
        let reveal = commitment.into_reveal();
        self.peer.say(&format!(
            "My number was {} (KEY={}).",
            reveal.secret, reveal.secret_key
        ))?;
        let value = die.face(index);
        self.peer.say(&format!(
            "({} + {}) % {} = {}, so the {} roll is {}.",
            reveal.secret, contribution, range, index, party, value
        ))?;
        self.record(&format!("{} roll", party), range, digest, contribution, reveal, index)?;

        Ok(value)
    }

    /// Ask until the peer supplies an integer in `[0, range)`. Bad input is
    /// re-prompted within the current state; nothing else changes.
    fn ask_number(&mut self, prompt: &str, range: u64) -> Result<u64, GameError> {
        loop {
            let answer = self.peer.ask(&format!("{} [0..{}]: ", prompt, range - 1))?;
            match answer.trim().parse::<u64>() {
                Ok(n) if n < range => return Ok(n),
                _ => {
                    debug!(session = %self.id, answer = %answer, "rejected peer input");
                    self.peer.say(&format!(
                        "Enter an integer between 0 and {}.",
                        range - 1
                    ))?;
                }
            }
        }
    }

    /// Self-check the reveal against the published digest and append the
    /// round to the transcript. A mismatch is reported, not enforced: the
    /// abort policy belongs to the peer.
    fn record(
        &mut self,
        label: &str,
        range: u64,
        digest: Digest,
        contribution: u64,
        reveal: Reveal,
        value: u64,
    ) -> Result<(), GameError> {
        if !verify(&digest, &reveal.secret_key, reveal.secret) {
            warn!(session = %self.id, label, "reveal does not match the published digest");
            self.peer
                .say("Warning: this reveal does not match the published digest.")?;
        }
        self.rounds.push(RoundRecord {
            label: label.to_string(),
            range,
            digest: digest.to_string(),
            contribution,
            secret: reveal.secret,
            secret_key: reveal.secret_key.to_string(),
            value,
        });
        Ok(())
    }

    /// Strict comparison; equal values fall to the named tie policy
    fn decide(&self, user_value: i64, host_value: i64) -> Outcome {
        if user_value > host_value {
            Outcome::UserWins
        } else if host_value > user_value {
            Outcome::HostWins
        } else {
            self.tie_policy.on_tie()
        }
    }
}
