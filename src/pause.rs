//! Final "press any key" wait that keeps a double-clicked console open.

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, BufRead, IsTerminal, Write};

pub const PAUSE_PROMPT: &str = "Press any key to continue . . . ";

/// Blocks until the user acknowledges.
pub trait Pause {
    fn wait(&mut self) -> io::Result<()>;
}

/// Pause on the real console.
#[derive(Debug, Default)]
pub struct ConsolePause;

impl Pause for ConsolePause {
    fn wait(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", PAUSE_PROMPT)?;
        stdout.flush()?;

        if io::stdin().is_terminal() {
            wait_for_key()?;
        } else {
            // Piped stdin: a line or EOF acknowledges
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
        }

        writeln!(stdout)?;
        Ok(())
    }
}

fn wait_for_key() -> io::Result<()> {
    enable_raw_mode()?;
    let result = read_key_press();
    // Always attempt cleanup, even if reading failed
    let _ = disable_raw_mode();
    result
}

fn read_key_press() -> io::Result<()> {
    loop {
        if let Event::Key(key) = event::read()? {
            // Windows reports both press and release
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}
