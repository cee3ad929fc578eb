//! Terminal implementation of the interaction boundary.

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use dicelock_core::{GameError, Interaction};

/// Line-oriented prompt/response channel over the controlling terminal.
/// Ctrl-C and Ctrl-D read as the channel closing, which aborts the session.
pub struct TermInteraction {
    editor: DefaultEditor,
}

impl TermInteraction {
    pub fn new() -> Result<Self, GameError> {
        let editor =
            DefaultEditor::new().map_err(|err| GameError::InteractionClosed(err.to_string()))?;
        Ok(Self { editor })
    }
}

impl Interaction for TermInteraction {
    fn say(&mut self, line: &str) -> Result<(), GameError> {
        println!("{}", line);
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> Result<String, GameError> {
        match self.editor.readline(&prompt.cyan().to_string()) {
            Ok(line) => Ok(line.trim().to_string()),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                Err(GameError::InteractionClosed("input ended".to_string()))
            }
            Err(err) => Err(GameError::InteractionClosed(err.to_string())),
        }
    }
}
