//! Fake terminal for testing the select prompt.
//!
//! Serves a scripted queue of keys, captures every byte written, and records
//! each raw-mode transition so tests can assert the terminal was restored.
//! Reading past the end of the script fails with `UnexpectedEof`.

use std::collections::VecDeque;
use std::io::{self, Write};

use super::{Key, Terminal};

pub struct FakeTerminal {
    keys: VecDeque<Key>,
    output: Vec<u8>,
    raw: bool,
    /// Every `set_raw_mode` argument, in call order.
    raw_transitions: Vec<bool>,
}

impl FakeTerminal {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            output: Vec::new(),
            raw: false,
            raw_transitions: Vec::new(),
        }
    }

    pub fn is_raw(&self) -> bool {
        self.raw
    }

    pub fn raw_transitions(&self) -> &[bool] {
        &self.raw_transitions
    }

    /// Everything written so far, lossily decoded.
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// How many scripted keys have not been read.
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl Write for FakeTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Terminal for FakeTerminal {
    fn set_raw_mode(&mut self, enabled: bool) -> io::Result<()> {
        self.raw = enabled;
        self.raw_transitions.push(enabled);
        Ok(())
    }

    fn read_key(&mut self) -> io::Result<Key> {
        self.keys.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "FakeTerminal: no more keys queued")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serves_keys_then_eof() {
        let mut term = FakeTerminal::new([Key::Down, Key::Enter]);
        assert_eq!(term.read_key().unwrap(), Key::Down);
        assert_eq!(term.read_key().unwrap(), Key::Enter);
        assert_eq!(
            term.read_key().unwrap_err().kind(),
            io::ErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn test_records_raw_transitions() {
        let mut term = FakeTerminal::new([]);
        term.set_raw_mode(true).unwrap();
        assert!(term.is_raw());
        term.set_raw_mode(false).unwrap();
        assert_eq!(term.raw_transitions(), &[true, false]);
    }
}
