/// Small fixed-width text display
use log::warn;
use std::io::{self, Write};

use crate::utils::wrap_text;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub trait DisplayDriver {
    fn clear(&mut self);

    /// Replace the screen contents with `lines`
    fn show(&mut self, lines: &[String]);
}

/// Renders to a terminal, word-wrapped to `width` columns like a small OLED
pub struct ConsoleDisplay<W: Write> {
    out: W,
    width: usize,
}

impl ConsoleDisplay<io::Stdout> {
    pub fn stdout(width: usize) -> Self {
        Self::new(io::stdout(), width)
    }
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W, width: usize) -> Self {
        Self { out, width }
    }

    fn write_frame(&mut self, lines: &[String]) -> io::Result<()> {
        write!(self.out, "{}", CLEAR_SCREEN)?;
        for line in lines {
            for row in wrap_text(line, self.width) {
                writeln!(self.out, "{}", row)?;
            }
        }
        self.out.flush()
    }
}

impl<W: Write> DisplayDriver for ConsoleDisplay<W> {
    fn clear(&mut self) {
        if let Err(e) = self.write_frame(&[]) {
            warn!("Failed to clear display: {}", e);
        }
    }

    fn show(&mut self, lines: &[String]) {
        if let Err(e) = self.write_frame(lines) {
            warn!("Failed to update display: {}", e);
        }
    }
}
