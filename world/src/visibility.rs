//! Selection of the chunks handed to the renderer each frame.

use chunkwalk_core::{
    ScreenSize, VisibilityStrategy, WorldPos, CHUNK_HEIGHT, CHUNK_WIDTH, GRID_COLUMNS, GRID_ROWS,
};

/// Inclusive window of chunk columns and rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkWindow {
    /// First visible chunk column.
    pub min_column: u32,
    /// Last visible chunk column.
    pub max_column: u32,
    /// First visible chunk row.
    pub min_row: u32,
    /// Last visible chunk row.
    pub max_row: u32,
}

impl ChunkWindow {
    /// Window covering the whole world grid.
    pub const FULL: Self = Self {
        min_column: 0,
        max_column: GRID_COLUMNS - 1,
        min_row: 0,
        max_row: GRID_ROWS - 1,
    };

    /// Reports whether the chunk coordinate lies inside the window.
    #[must_use]
    pub const fn contains(&self, column: u32, row: u32) -> bool {
        column >= self.min_column
            && column <= self.max_column
            && row >= self.min_row
            && row <= self.max_row
    }
}

/// Window of chunks that may intersect the screen under the given strategy.
///
/// The windowed strategy spans `ceil(screen / chunk) + 2` chunks per axis,
/// centred on the chunk holding the actor and clamped to the grid.
#[must_use]
pub fn window_for(strategy: VisibilityStrategy, actor: WorldPos, screen: ScreenSize) -> ChunkWindow {
    match strategy {
        VisibilityStrategy::All => ChunkWindow::FULL,
        VisibilityStrategy::Windowed => {
            let span_columns = u32::from(screen.columns()).div_ceil(CHUNK_WIDTH) + 2;
            let span_rows = u32::from(screen.rows()).div_ceil(CHUNK_HEIGHT) + 2;
            let (min_column, max_column) = clamp_span(
                actor.x().div_euclid(i64::from(CHUNK_WIDTH)),
                span_columns,
                GRID_COLUMNS,
            );
            let (min_row, max_row) = clamp_span(
                actor.y().div_euclid(i64::from(CHUNK_HEIGHT)),
                span_rows,
                GRID_ROWS,
            );
            ChunkWindow {
                min_column,
                max_column,
                min_row,
                max_row,
            }
        }
    }
}

fn clamp_span(center: i64, span: u32, extent: u32) -> (u32, u32) {
    let first = center - i64::from(span / 2);
    let last = i64::from(extent) - 1;
    let min = first.clamp(0, last);
    let max = (first + i64::from(span) - 1).clamp(0, last);
    (min as u32, max as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_strategy_covers_the_grid() {
        let window = window_for(
            VisibilityStrategy::All,
            WorldPos::new(500, 200),
            ScreenSize::new(10, 10),
        );
        assert_eq!(window, ChunkWindow::FULL);
        assert!(window.contains(25, 8));
    }

    #[test]
    fn windowed_strategy_centres_on_actor_chunk() {
        // 80x24 terminal: ceil(80/32)+2 = 5 columns, ceil(24/32)+2 = 3 rows.
        let actor = WorldPos::new(10 * 32 + 4, 4 * 32 + 4);
        let window = window_for(VisibilityStrategy::Windowed, actor, ScreenSize::new(80, 24));
        assert_eq!(
            window,
            ChunkWindow {
                min_column: 8,
                max_column: 12,
                min_row: 3,
                max_row: 5,
            }
        );
    }

    #[test]
    fn even_spans_cover_exactly_span_chunks() {
        // 100x40 terminal: ceil(100/32)+2 = 6 columns, ceil(40/32)+2 = 4 rows.
        let actor = WorldPos::new(10 * 32 + 4, 4 * 32 + 4);
        let window = window_for(VisibilityStrategy::Windowed, actor, ScreenSize::new(100, 40));
        assert_eq!(
            window,
            ChunkWindow {
                min_column: 7,
                max_column: 12,
                min_row: 2,
                max_row: 5,
            }
        );
        assert_eq!(window.max_column - window.min_column + 1, 6);
        assert_eq!(window.max_row - window.min_row + 1, 4);
    }

    #[test]
    fn windowed_strategy_clamps_to_grid_corner() {
        let window = window_for(
            VisibilityStrategy::Windowed,
            WorldPos::new(2, 2),
            ScreenSize::new(80, 24),
        );
        assert_eq!(
            window,
            ChunkWindow {
                min_column: 0,
                max_column: 2,
                min_row: 0,
                max_row: 1,
            }
        );

        let far = WorldPos::new(i64::from(GRID_COLUMNS * 32) - 1, i64::from(GRID_ROWS * 32) - 1);
        let window = window_for(VisibilityStrategy::Windowed, far, ScreenSize::new(80, 24));
        assert_eq!(window.max_column, GRID_COLUMNS - 1);
        assert_eq!(window.max_row, GRID_ROWS - 1);
        assert_eq!(window.min_column, GRID_COLUMNS - 3);
    }
}
