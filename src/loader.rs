//! Spinner shown while long-running scaffold steps execute.
//!
//! Each [`Loader`] owns its spinner and current message; two loaders never
//! share animation state.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const FRAMES: &[&str] = &["⣾", "⣷", "⣯", "⣟", "⡿", "⢿", "⣻", "⣽", "✔"];

pub struct Loader {
    spinner: ProgressBar,
    message: String,
}

impl Loader {
    /// Start spinning with `message`. Draws nothing when stderr is not a terminal.
    pub fn start(message: impl Into<String>) -> Self {
        Self::with_bar(ProgressBar::new_spinner(), message.into())
    }

    /// A loader that tracks messages but never draws.
    #[cfg(test)]
    pub fn hidden(message: impl Into<String>) -> Self {
        Self::with_bar(ProgressBar::hidden(), message.into())
    }

    fn with_bar(spinner: ProgressBar, message: String) -> Self {
        let style = ProgressStyle::with_template("{spinner:.white.bold} {msg:.white.bold}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(FRAMES);
        spinner.set_style(style);
        spinner.set_message(message.clone());
        spinner.enable_steady_tick(Duration::from_millis(100));
        Self { spinner, message }
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.spinner.set_message(self.message.clone());
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Stop the animation and clear its line.
    pub fn stop(&self) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for Loader {
    fn drop(&mut self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}
