#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Crossterm-backed terminal adapter for chunkwalk.
//!
//! Entering the backend switches the terminal into raw mode on the alternate
//! screen with the cursor hidden. Dropping it restores the terminal, so an
//! error unwinding out of the session still leaves the shell usable.

use std::io::{self, BufWriter, Stdout, Write};

use anyhow::{Context, Result};
use chunkwalk_core::{Key, KeyEvent, ScreenSize};
use chunkwalk_rendering::TerminalBackend;
use crossterm::{
    cursor::{self, MoveTo},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};

/// Terminal backend writing to standard output through crossterm.
#[derive(Debug)]
pub struct CrosstermBackend {
    writer: BufWriter<Stdout>,
}

impl CrosstermBackend {
    /// Takes over the terminal: raw mode, alternate screen, hidden cursor.
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let mut backend = Self {
            writer: BufWriter::with_capacity(16384, io::stdout()),
        };
        execute!(
            backend.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        )
        .context("failed to enter the alternate screen")?;
        log::debug!("terminal entered raw mode");
        Ok(backend)
    }

    fn restore(&mut self) -> io::Result<()> {
        execute!(self.writer, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        if let Err(error) = self.restore() {
            log::error!("failed to restore terminal: {error}");
        }
    }
}

impl TerminalBackend for CrosstermBackend {
    fn clear(&mut self) -> Result<()> {
        queue!(self.writer, Clear(ClearType::All)).context("failed to clear screen")
    }

    fn draw_cell(&mut self, x: u16, y: u16, glyph: char) -> Result<()> {
        queue!(self.writer, MoveTo(x, y), Print(glyph))
            .with_context(|| format!("failed to draw cell ({x}, {y})"))
    }

    fn terminal_size(&self) -> Result<ScreenSize> {
        let (columns, rows) = terminal::size().context("failed to query terminal size")?;
        Ok(ScreenSize::new(columns, rows))
    }

    fn read_key(&mut self) -> Result<KeyEvent> {
        loop {
            match event::read().context("failed to read terminal event")? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    return Ok(decode_key(key.code, key.modifiers));
                }
                Event::Resize(..) => return Ok(KeyEvent::plain(Key::Other)),
                _ => {}
            }
        }
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("failed to flush terminal output")
    }
}

/// Converts a crossterm key code and modifiers into a chunkwalk key event.
#[must_use]
pub fn decode_key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    let key = match code {
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    };

    KeyEvent {
        key,
        shift: modifiers.contains(KeyModifiers::SHIFT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_decode_with_shift_state() {
        assert_eq!(
            decode_key(KeyCode::Left, KeyModifiers::NONE),
            KeyEvent::plain(Key::Left)
        );
        assert_eq!(
            decode_key(KeyCode::Up, KeyModifiers::SHIFT),
            KeyEvent::shifted(Key::Up)
        );
        assert_eq!(
            decode_key(KeyCode::Down, KeyModifiers::SHIFT | KeyModifiers::CONTROL),
            KeyEvent::shifted(Key::Down)
        );
    }

    #[test]
    fn exit_keys_and_characters_decode() {
        assert_eq!(
            decode_key(KeyCode::Enter, KeyModifiers::NONE).key,
            Key::Enter
        );
        assert_eq!(decode_key(KeyCode::Esc, KeyModifiers::NONE).key, Key::Esc);
        assert_eq!(
            decode_key(KeyCode::Char('v'), KeyModifiers::NONE).key,
            Key::Char('v')
        );
        assert_eq!(decode_key(KeyCode::F(5), KeyModifiers::NONE).key, Key::Other);
    }
}
