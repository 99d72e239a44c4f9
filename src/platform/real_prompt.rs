//! Real prompter: the arrow-key menu for selects, `dialoguer` for text input.

use anyhow::{Context, Result};
use dialoguer::Input;
use std::io;

use super::{Prompter, RealFs, RealTerminal};
use crate::prompt::{self, PathCompleter, SelectError, SelectOption};

/// Real prompter — draws on the controlling terminal.
pub struct RealPrompter {
    pointer: String,
}

impl RealPrompter {
    pub fn new(pointer: impl Into<String>) -> Self {
        Self {
            pointer: pointer.into(),
        }
    }
}

impl Prompter for RealPrompter {
    fn select<T: Clone>(&self, question: &str, options: &[SelectOption<T>]) -> Result<T> {
        let mut terminal = RealTerminal::new();
        Ok(prompt::select(
            &mut terminal,
            question,
            options,
            &self.pointer,
        )?)
    }

    fn ask(&self, question: &str) -> Result<String> {
        let completer = PathCompleter::new(&RealFs);
        let answer = Input::<String>::new()
            .with_prompt(question)
            .allow_empty(true)
            .completion_with(&completer)
            .interact_text();
        match answer {
            Ok(line) => Ok(line),
            Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => {
                Err(SelectError::Cancelled.into())
            }
            Err(e) => Err(e).context("Prompt interaction failed"),
        }
    }
}
