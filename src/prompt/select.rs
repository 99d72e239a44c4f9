//! Arrow-key select prompt.
//!
//! Prints the question once, then draws the option block and redraws it in
//! place on every cursor move. The terminal is held in interactive mode (raw
//! input, hidden cursor) by an [`InteractiveMode`] guard for exactly as long as
//! the prompt waits for keys; every exit path releases it once.

use crossterm::cursor::{Hide, Show};
use crossterm::queue;
use crossterm::style::Stylize;
use std::io::{self, Write};
use std::ops::{Deref, DerefMut};

use super::erase::erase_lines;
use crate::platform::{Key, Terminal};

/// Marker drawn in front of the highlighted option.
pub const DEFAULT_POINTER: &str = "❯";

const HINT: &str = "(Use up and down arrows to navigate)";

#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    /// The prompt was called with an empty question or no options.
    #[error("{0}")]
    Usage(String),
    /// The user pressed escape or ctrl-C.
    #[error("Operation canceled")]
    Cancelled,
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl SelectError {
    /// True when the error, anywhere in an `anyhow` chain, is a user cancellation.
    pub fn is_cancellation(err: &anyhow::Error) -> bool {
        err.chain().any(|cause| {
            matches!(
                cause.downcast_ref::<SelectError>(),
                Some(SelectError::Cancelled)
            )
        })
    }
}

/// One selectable item.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption<T> {
    pub name: String,
    pub value: T,
    /// Shown next to the name only while the option is highlighted.
    pub description: Option<String>,
}

impl<T> SelectOption<T> {
    pub fn new(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A bare label is both the name and the value.
impl From<&str> for SelectOption<String> {
    fn from(label: &str) -> Self {
        SelectOption::new(label, label.to_string())
    }
}

impl From<String> for SelectOption<String> {
    fn from(label: String) -> Self {
        SelectOption::new(label.clone(), label)
    }
}

/// Reject calls that can never produce a selection.
pub(crate) fn validate<T>(question: &str, options: &[SelectOption<T>]) -> Result<(), SelectError> {
    if question.is_empty() {
        return Err(SelectError::Usage("Must provide a question".to_string()));
    }
    if options.is_empty() {
        return Err(SelectError::Usage(
            "Must provide the options. Options can be bare labels or name/value records."
                .to_string(),
        ));
    }
    Ok(())
}

/// Holds a terminal in raw mode with the cursor hidden until released or dropped.
pub struct InteractiveMode<'a, T: Terminal> {
    term: &'a mut T,
    active: bool,
}

impl<'a, T: Terminal> InteractiveMode<'a, T> {
    pub fn acquire(term: &'a mut T) -> io::Result<Self> {
        term.set_raw_mode(true)?;
        let guard = Self { term, active: true };
        queue!(guard.term, Hide)?;
        guard.term.flush()?;
        Ok(guard)
    }

    /// Restore line-buffered input and show the cursor.
    pub fn release(mut self) -> io::Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let shown = queue!(self.term, Show).and_then(|()| self.term.flush());
        let cooked = self.term.set_raw_mode(false);
        shown.and(cooked)
    }
}

impl<T: Terminal> Drop for InteractiveMode<'_, T> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

impl<T: Terminal> Deref for InteractiveMode<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.term
    }
}

impl<T: Terminal> DerefMut for InteractiveMode<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.term
    }
}

/// What a keypress does to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Redraw,
    Confirm,
    Cancel,
    Ignore,
}

struct Session<'a, T> {
    options: &'a [SelectOption<T>],
    pointer: &'a str,
    cursor: usize,
    rendered: bool,
}

impl<'a, T> Session<'a, T> {
    fn new(options: &'a [SelectOption<T>], pointer: &'a str) -> Self {
        Self {
            options,
            pointer,
            cursor: 0,
            rendered: false,
        }
    }

    fn handle(&mut self, key: Key) -> Action {
        let last = self.options.len() - 1;
        match key {
            Key::Down => {
                self.cursor = if self.cursor < last { self.cursor + 1 } else { 0 };
                Action::Redraw
            }
            Key::Up => {
                self.cursor = if self.cursor > 0 { self.cursor - 1 } else { last };
                Action::Redraw
            }
            Key::Enter => Action::Confirm,
            Key::Escape | Key::Interrupt => Action::Cancel,
            Key::Other => Action::Ignore,
        }
    }

    /// Draw the option block, replacing the previous one if there was one.
    ///
    /// Leaves the cursor at the end of the last option line.
    fn render<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if self.rendered {
            erase_lines(out, self.options.len())?;
        }
        self.rendered = true;

        for (i, option) in self.options.iter().enumerate() {
            if i == self.cursor {
                write!(
                    out,
                    " {} {}",
                    self.pointer.green().bold(),
                    option.name.as_str().green().bold()
                )?;
                if let Some(description) = &option.description {
                    write!(out, " {}", description.as_str().dim())?;
                }
            } else {
                write!(out, "   {}", option.name)?;
            }
            if i + 1 < self.options.len() {
                // Raw mode disables output post-processing, so return explicitly.
                write!(out, "\r\n")?;
            }
        }
        out.flush()
    }
}

/// Ask `question` and block until the user picks one of `options`.
///
/// Returns the chosen option's value. Fails with [`SelectError::Usage`]
/// before touching the terminal when there is nothing to ask, and with
/// [`SelectError::Cancelled`] when the user presses escape or ctrl-C.
pub fn select<T: Clone, W: Terminal>(
    term: &mut W,
    question: &str,
    options: &[SelectOption<T>],
    pointer: &str,
) -> Result<T, SelectError> {
    validate(question, options)?;

    writeln!(term, "{} {}", question.cyan().bold(), HINT.dim())?;

    let mut session = Session::new(options, pointer);
    let mut guard = InteractiveMode::acquire(term)?;
    session.render(&mut *guard)?;

    loop {
        match session.handle(guard.read_key()?) {
            Action::Ignore => {}
            Action::Redraw => session.render(&mut *guard)?,
            Action::Confirm => {
                let chosen = &options[session.cursor];
                erase_lines(&mut *guard, options.len() + 1)?;
                write!(
                    guard,
                    "{} {}\r\n",
                    question.cyan().bold(),
                    chosen.name.as_str().yellow()
                )?;
                guard.release()?;
                return Ok(chosen.value.clone());
            }
            Action::Cancel => {
                erase_lines(&mut *guard, options.len())?;
                guard.release()?;
                return Err(SelectError::Cancelled);
            }
        }
    }
}
