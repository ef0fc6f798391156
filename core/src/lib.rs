#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the chunkwalk engine.
//!
//! This crate defines the value types that connect adapters, the
//! authoritative world, and pure systems. Adapters translate terminal input
//! into [`KeyEvent`] values, the controls system turns those into
//! [`Command`] values, the world executes commands via its `apply` entry
//! point and reports what happened as [`Event`] values.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Number of tile columns contained in a single chunk.
pub const CHUNK_WIDTH: u32 = 32;

/// Number of tile rows contained in a single chunk.
pub const CHUNK_HEIGHT: u32 = 32;

/// Number of chunk columns addressable by the world grid (`A` through `Z`).
pub const GRID_COLUMNS: u32 = 26;

/// Number of chunk rows addressable by the world grid (`1` through `9`).
pub const GRID_ROWS: u32 = 9;

/// Glyph that marks an impassable wall tile.
pub const WALL_GLYPH: char = '&';

/// Glyph that marks an empty floor tile.
pub const FLOOR_GLYPH: char = ' ';

/// Location of a chunk within the world grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    column: u32,
    row: u32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate without validating it against the grid.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Creates a chunk coordinate when it addresses a slot of the world grid.
    #[must_use]
    pub const fn within_grid(column: u32, row: u32) -> Option<Self> {
        if column < GRID_COLUMNS && row < GRID_ROWS {
            Some(Self { column, row })
        } else {
            None
        }
    }

    /// Zero-based column of the chunk.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row of the chunk.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Reports whether the coordinate addresses a slot of the world grid.
    #[must_use]
    pub const fn is_within_grid(&self) -> bool {
        self.column < GRID_COLUMNS && self.row < GRID_ROWS
    }

    /// Absolute world position of the chunk's upper-left cell.
    #[must_use]
    pub const fn origin(&self) -> WorldPos {
        WorldPos::new(
            self.column as i64 * CHUNK_WIDTH as i64,
            self.row as i64 * CHUNK_HEIGHT as i64,
        )
    }

    /// Absolute world position of the provided local cell inside this chunk.
    #[must_use]
    pub const fn absolute(&self, local: LocalPos) -> WorldPos {
        let origin = self.origin();
        WorldPos::new(origin.x + local.x as i64, origin.y + local.y as i64)
    }
}

/// Orders chunk coordinates lexicographically by `(column, row)`.
///
/// The world sorts chunks with this comparator before building its grid, so
/// duplicate coordinates end up adjacent and door registration follows a
/// stable chunk order.
#[must_use]
pub fn compare_chunk_coords(a: &ChunkCoord, b: &ChunkCoord) -> Ordering {
    a.column
        .cmp(&b.column)
        .then_with(|| a.row.cmp(&b.row))
}

/// Cell position local to a single chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalPos {
    x: u32,
    y: u32,
}

impl LocalPos {
    /// Creates a new local position.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Column of the cell inside its chunk.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Row of the cell inside its chunk.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }
}

/// Absolute cell position measured across the whole world.
///
/// Coordinates are signed so that a step off the top or left edge of the
/// grid is representable; such positions never resolve to a chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldPos {
    x: i64,
    y: i64,
}

impl WorldPos {
    /// Creates a new absolute world position.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Absolute column of the cell.
    #[must_use]
    pub const fn x(&self) -> i64 {
        self.x
    }

    /// Absolute row of the cell.
    #[must_use]
    pub const fn y(&self) -> i64 {
        self.y
    }

    /// Returns the position shifted by the provided delta.
    #[must_use]
    pub const fn offset(self, dx: i64, dy: i64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Splits the position into the chunk containing it and the local cell.
    ///
    /// Uses floor division so negative positions land in negative chunk
    /// coordinates, which lie outside the grid and yield `None`.
    #[must_use]
    pub fn locate(&self) -> Option<(ChunkCoord, LocalPos)> {
        let width = i64::from(CHUNK_WIDTH);
        let height = i64::from(CHUNK_HEIGHT);
        let column = u32::try_from(self.x.div_euclid(width)).ok()?;
        let row = u32::try_from(self.y.div_euclid(height)).ok()?;
        let chunk = ChunkCoord::within_grid(column, row)?;
        let local_x = u32::try_from(self.x.rem_euclid(width)).ok()?;
        let local_y = u32::try_from(self.y.rem_euclid(height)).ok()?;
        Some((chunk, LocalPos::new(local_x, local_y)))
    }
}

/// Identifier of a door, written as a single digit in chunk files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DoorId(u8);

impl DoorId {
    /// Decodes a door identifier from its chunk-file glyph.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        symbol
            .to_digit(10)
            .and_then(|digit| u8::try_from(digit).ok())
            .map(Self)
    }

    /// Glyph used to write the door in chunk files.
    #[must_use]
    pub fn symbol(&self) -> char {
        char::from(b'0' + self.0)
    }

    /// Numeric value of the door identifier.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

/// Collision class of a single chunk cell, decoded once at load time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Walkable cell, including decorative glyphs.
    Floor,
    /// Impassable cell.
    Wall,
    /// Teleporting cell belonging to the door pipe with the given identifier.
    Door(DoorId),
}

impl Tile {
    /// Classifies a chunk-file glyph.
    #[must_use]
    pub fn from_glyph(glyph: char) -> Self {
        if glyph == WALL_GLYPH {
            return Self::Wall;
        }

        match DoorId::from_symbol(glyph) {
            Some(door) => Self::Door(door),
            None => Self::Floor,
        }
    }
}

/// Direction the view scrolls in response to a movement command.
///
/// The actor stays fixed at the screen centre while the world scrolls, so the
/// actor walks opposite to the direction the view moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// View scrolls left; the actor walks toward increasing columns.
    Left,
    /// View scrolls right; the actor walks toward decreasing columns.
    Right,
    /// View scrolls up; the actor walks toward increasing rows.
    Up,
    /// View scrolls down; the actor walks toward decreasing rows.
    Down,
}

impl Direction {
    /// Unit delta applied to the actor's position for a single step.
    #[must_use]
    pub const fn actor_delta(self) -> (i64, i64) {
        match self {
            Self::Left => (1, 0),
            Self::Right => (-1, 0),
            Self::Up => (0, 1),
            Self::Down => (0, -1),
        }
    }
}

/// Movement mode of the actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Speed {
    /// One step per movement command.
    #[default]
    Walk,
    /// Two independently checked steps per movement command.
    Run,
}

impl Speed {
    /// Number of single-cell steps consumed by one movement command.
    #[must_use]
    pub const fn steps(self) -> u32 {
        match self {
            Self::Walk => 1,
            Self::Run => 2,
        }
    }
}

/// Strategy used to select which chunks are rendered each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityStrategy {
    /// Every loaded chunk is rendered and clipped against the screen.
    #[default]
    All,
    /// Only chunks inside a window around the actor's chunk are rendered.
    Windowed,
}

impl VisibilityStrategy {
    /// Returns the other strategy.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::All => Self::Windowed,
            Self::Windowed => Self::All,
        }
    }
}

/// Dimensions of the terminal measured in character cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScreenSize {
    columns: u16,
    rows: u16,
}

impl ScreenSize {
    /// Creates a new screen size.
    #[must_use]
    pub const fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows }
    }

    /// Number of character columns.
    #[must_use]
    pub const fn columns(&self) -> u16 {
        self.columns
    }

    /// Number of character rows.
    #[must_use]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    /// Screen cell at which the actor is always drawn.
    #[must_use]
    pub const fn center(&self) -> (u16, u16) {
        (self.columns / 2, self.rows / 2)
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Moves the actor one step, or two when running, scrolling the view.
    Move {
        /// Direction the view scrolls.
        direction: Direction,
        /// Whether the actor runs for this command.
        running: bool,
    },
    /// Selects the strategy used to pick visible chunks.
    SetVisibility {
        /// Strategy to activate.
        strategy: VisibilityStrategy,
    },
}

/// Events reported by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the actor walked onto an open cell.
    ActorStepped {
        /// Position before the step.
        from: WorldPos,
        /// Position after the step.
        to: WorldPos,
    },
    /// Reports that a step was stopped by a wall.
    StepBlocked {
        /// Position the actor kept.
        at: WorldPos,
        /// Wall cell the actor tried to enter.
        wall: WorldPos,
    },
    /// Confirms that the actor travelled through a door.
    ActorTeleported {
        /// Door pipe that carried the actor.
        door: DoorId,
        /// Position before the teleport.
        from: WorldPos,
        /// Absolute position of the arrival entrance.
        to: WorldPos,
    },
    /// Announces that a new visibility strategy is active.
    VisibilityChanged {
        /// Strategy that became active.
        strategy: VisibilityStrategy,
    },
}

/// Keys recognised by the controls system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Enter / return, the confirm key.
    Enter,
    /// Escape.
    Esc,
    /// Printable character.
    Char(char),
    /// Any key without a dedicated variant.
    Other,
}

/// Single key press delivered by a terminal backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// Key that was pressed.
    pub key: Key,
    /// Whether shift was held during the press.
    pub shift: bool,
}

impl KeyEvent {
    /// Creates a key event without modifiers.
    #[must_use]
    pub const fn plain(key: Key) -> Self {
        Self { key, shift: false }
    }

    /// Creates a key event with shift held.
    #[must_use]
    pub const fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }
}
