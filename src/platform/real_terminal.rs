//! Real terminal backed by stdout and crossterm's event reader.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io::{self, Write};

use super::{Key, Terminal};

/// Real terminal — raw mode through crossterm, output to stdout.
pub struct RealTerminal {
    out: io::Stdout,
}

impl RealTerminal {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Write for RealTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl Terminal for RealTerminal {
    fn set_raw_mode(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            terminal::enable_raw_mode()
        } else {
            terminal::disable_raw_mode()
        }
    }

    fn read_key(&mut self) -> io::Result<Key> {
        loop {
            if let Event::Key(key) = event::read()?
                && key.kind != KeyEventKind::Release
            {
                return Ok(map_key(key));
            }
        }
    }
}

/// Translate a crossterm key event into the keys the select prompt knows.
fn map_key(key: KeyEvent) -> Key {
    match key.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
        _ => Key::Other,
    }
}
