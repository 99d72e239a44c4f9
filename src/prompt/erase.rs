//! In-place erasing of previously written terminal lines.

use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};

/// Erase the last `count` lines, ending at column 0 of the topmost erased line.
///
/// Assumes the cursor sits on the last line of the block. Emits one line
/// clear per line with a single-row cursor-up between them, then one
/// cursor-to-column-0. Nothing is written for `count == 0`.
pub fn erase_lines<W: Write>(out: &mut W, count: usize) -> io::Result<()> {
    for i in 0..count {
        queue!(out, Clear(ClearType::CurrentLine))?;
        if i + 1 < count {
            queue!(out, MoveUp(1))?;
        }
    }
    if count > 0 {
        queue!(out, MoveToColumn(0))?;
    }
    Ok(())
}
