//! The prompt/response boundary between the session and its peer.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::GameError;

/// Blocking question -> answer exchange with the peer.
///
/// The session is agnostic to the transport behind this trait: a terminal,
/// a socket, or a harness feeding canned answers. `ask` blocks until a line
/// is available and is called at most once per logical question.
pub trait Interaction {
    /// Publish a line to the peer (digests, reveals, results)
    fn say(&mut self, line: &str) -> Result<(), GameError>;

    /// Put a question to the peer and block for the trimmed answer line
    fn ask(&mut self, prompt: &str) -> Result<String, GameError>;
}

/// One event that passed through a [`ScriptedInteraction`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Exchange {
    Said(String),
    Asked { prompt: String, answer: String },
}

/// Canned-answer implementation for tests and harnesses.
///
/// Answers are consumed in order; running out of them reads as the channel
/// closing. Clones share the same script and event log, so a test can keep
/// a handle while the session owns the other.
#[derive(Clone, Default)]
pub struct ScriptedInteraction {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    answers: VecDeque<String>,
    log: Vec<Exchange>,
}

impl ScriptedInteraction {
    pub fn new<S, I>(answers: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                answers: answers.into_iter().map(Into::into).collect(),
                log: Vec::new(),
            })),
        }
    }

    /// Everything said and asked so far, in order
    pub fn log(&self) -> Vec<Exchange> {
        self.inner.lock().unwrap().log.clone()
    }
}

impl Interaction for ScriptedInteraction {
    fn say(&mut self, line: &str) -> Result<(), GameError> {
        let mut inner = self.inner.lock().unwrap();
        inner.log.push(Exchange::Said(line.to_string()));
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> Result<String, GameError> {
        let mut inner = self.inner.lock().unwrap();
        let answer = inner.answers.pop_front().ok_or_else(|| {
            GameError::InteractionClosed(format!("no scripted answer for {:?}", prompt))
        })?;
        inner.log.push(Exchange::Asked {
            prompt: prompt.to_string(),
            answer: answer.clone(),
        });
        Ok(answer.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_answers_in_order() {
        let mut peer = ScriptedInteraction::new(["first", "second"]);

        assert_eq!(peer.ask("a?").unwrap(), "first");
        assert_eq!(peer.ask("b?").unwrap(), "second");
    }

    #[test]
    fn test_exhausted_script_reads_as_closed() {
        let mut peer = ScriptedInteraction::new(Vec::<String>::new());

        assert!(matches!(
            peer.ask("anything?"),
            Err(GameError::InteractionClosed(_))
        ));
    }

    #[test]
    fn test_log_preserves_order() {
        let handle = ScriptedInteraction::new(["42"]);
        let mut peer = handle.clone();
        peer.say("hello").unwrap();
        peer.ask("what?").unwrap();

        assert_eq!(
            handle.log(),
            vec![
                Exchange::Said("hello".to_string()),
                Exchange::Asked {
                    prompt: "what?".to_string(),
                    answer: "42".to_string()
                },
            ]
        );
    }
}
