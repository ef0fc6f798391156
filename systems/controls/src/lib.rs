#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure controls system translating key presses into world commands.

use chunkwalk_core::{Command, Direction, Key, KeyEvent, VisibilityStrategy};

/// Outcome of a single key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    /// Command to forward to the world.
    Command(Command),
    /// Request to end the session.
    Exit,
}

/// Maps key events to commands, tracking the visibility toggle.
#[derive(Debug)]
pub struct Controls {
    visibility: VisibilityStrategy,
}

impl Controls {
    /// Creates a controls system whose toggle starts from `visibility`.
    #[must_use]
    pub fn new(visibility: VisibilityStrategy) -> Self {
        Self { visibility }
    }

    /// Translates one key press.
    ///
    /// Arrow keys scroll the view opposite to the arrow so the actor walks
    /// in the arrow's direction; shift makes the actor run.
    pub fn handle(&mut self, event: KeyEvent) -> Option<Input> {
        let direction = match event.key {
            Key::Left => Direction::Right,
            Key::Right => Direction::Left,
            Key::Up => Direction::Down,
            Key::Down => Direction::Up,
            Key::Enter | Key::Esc => return Some(Input::Exit),
            Key::Char('v') => {
                self.visibility = self.visibility.toggled();
                return Some(Input::Command(Command::SetVisibility {
                    strategy: self.visibility,
                }));
            }
            Key::Char(_) | Key::Other => return None,
        };

        Some(Input::Command(Command::Move {
            direction,
            running: event.shift,
        }))
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(VisibilityStrategy::default())
    }
}
