#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for chunkwalk terminal adapters.

use anyhow::Result as AnyResult;
use chunkwalk_core::{KeyEvent, ScreenSize};
use chunkwalk_world::{camera, query, Actor, World};

/// Character-cell terminal capable of presenting frames and reporting keys.
pub trait TerminalBackend {
    /// Blanks the whole screen.
    fn clear(&mut self) -> AnyResult<()>;

    /// Draws a glyph at the given screen column and row.
    fn draw_cell(&mut self, x: u16, y: u16, glyph: char) -> AnyResult<()>;

    /// Current size of the screen in character cells.
    fn terminal_size(&self) -> AnyResult<ScreenSize>;

    /// Blocks until the next key press.
    fn read_key(&mut self) -> AnyResult<KeyEvent>;

    /// Pushes any buffered output to the screen.
    fn flush(&mut self) -> AnyResult<()> {
        Ok(())
    }
}

/// Counters describing a single rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Chunks selected by the visibility strategy.
    pub chunks: usize,
    /// Cells drawn, including the actor.
    pub cells: usize,
}

/// Draws the world around the actor onto a terminal backend.
#[derive(Debug, Default)]
pub struct FrameRenderer {
    frames: u64,
}

impl FrameRenderer {
    /// Creates a renderer that has not drawn anything yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames rendered so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Clears the screen, draws every visible chunk and then the actor at the centre.
    pub fn render<B>(&mut self, world: &World, actor: &Actor, backend: &mut B) -> AnyResult<FrameStats>
    where
        B: TerminalBackend + ?Sized,
    {
        let screen = backend.terminal_size()?;
        backend.clear()?;

        let mut stats = FrameStats::default();
        for chunk in query::visible_chunks(world, actor.position(), screen) {
            stats.chunks += 1;
            for cell in camera::project_chunk(chunk, actor.position(), screen) {
                backend.draw_cell(cell.x, cell.y, cell.glyph)?;
                stats.cells += 1;
            }
        }

        if screen.columns() > 0 && screen.rows() > 0 {
            let cell = camera::actor_cell(screen, actor.glyph());
            backend.draw_cell(cell.x, cell.y, cell.glyph)?;
            stats.cells += 1;
        }

        backend.flush()?;
        self.frames += 1;
        log::trace!(
            "frame {} drew {} cells from {} chunks",
            self.frames,
            stats.cells,
            stats.chunks
        );
        Ok(stats)
    }
}
