//! World-to-screen transform keeping the actor at the screen centre.

use chunkwalk_core::{ScreenSize, WorldPos, CHUNK_HEIGHT, CHUNK_WIDTH};

use crate::Chunk;

/// Character to draw at a screen cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenCell {
    /// Screen column.
    pub x: u16,
    /// Screen row.
    pub y: u16,
    /// Glyph to draw.
    pub glyph: char,
}

/// Projects every on-screen cell of a chunk relative to the actor.
///
/// Cells falling outside the screen are skipped; a chunk lying entirely
/// off-screen yields nothing.
pub fn project_chunk(
    chunk: &Chunk,
    actor: WorldPos,
    screen: ScreenSize,
) -> impl Iterator<Item = ScreenCell> + '_ {
    let (center_x, center_y) = screen.center();
    let base_x = i64::from(center_x) - actor.x() + i64::from(chunk.coord().column() * CHUNK_WIDTH);
    let base_y = i64::from(center_y) - actor.y() + i64::from(chunk.coord().row() * CHUNK_HEIGHT);
    let width = i64::from(screen.columns());
    let height = i64::from(screen.rows());

    chunk.cells().filter_map(move |(local, glyph)| {
        let x = base_x + i64::from(local.x());
        let y = base_y + i64::from(local.y());
        if (0..width).contains(&x) && (0..height).contains(&y) {
            Some(ScreenCell {
                x: x as u16,
                y: y as u16,
                glyph,
            })
        } else {
            None
        }
    })
}

/// Screen cell of the actor; always the exact screen centre.
#[must_use]
pub fn actor_cell(screen: ScreenSize, glyph: char) -> ScreenCell {
    let (x, y) = screen.center();
    ScreenCell { x, y, glyph }
}
