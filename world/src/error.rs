//! Error taxonomy for world construction and movement resolution.

use std::{io, path::PathBuf};

use chunkwalk_core::{ChunkCoord, DoorId, LocalPos, WorldPos};
use thiserror::Error;

use crate::DoorEntrance;

/// Errors that abort world construction.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A chunk's text is not exactly 32 rows of 32 characters.
    #[error(
        "chunk {coord:?} must be {expected_columns}x{expected_rows} \
         (found {rows} rows, row widths {min_columns}..={max_columns})"
    )]
    InvalidChunkShape {
        /// Coordinate the chunk file was addressed to.
        coord: ChunkCoord,
        /// Number of rows found.
        rows: usize,
        /// Narrowest row found.
        min_columns: usize,
        /// Widest row found.
        max_columns: usize,
        /// Required number of columns.
        expected_columns: u32,
        /// Required number of rows.
        expected_rows: u32,
    },
    /// A file or exclusion name does not match `[A-Z][1-9]`.
    #[error("invalid chunk file name `{name}` (expected a letter A-Z followed by a digit 1-9)")]
    InvalidChunkFileName {
        /// Offending name.
        name: String,
    },
    /// Two chunk sources resolve to the same coordinate.
    #[error("more than one chunk resolves to {coord:?}")]
    DuplicateChunk {
        /// Coordinate claimed twice.
        coord: ChunkCoord,
    },
    /// A chunk was addressed beyond the `A1`..`Z9` grid.
    #[error("chunk {coord:?} lies outside the world grid")]
    ChunkOutsideGrid {
        /// Rejected coordinate.
        coord: ChunkCoord,
    },
    /// A chunk file named explicitly does not exist.
    #[error("could not load chunk from path {path:?}: file is missing")]
    ChunkFileMissing {
        /// Path that was requested.
        path: PathBuf,
    },
    /// Reading a chunk file or directory failed.
    #[error("failed to read {path:?}")]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Chunk-local coordinate outside the chunk grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("local cell ({x}, {y}) lies outside the chunk grid")]
pub struct OutOfRange {
    /// Requested column.
    pub x: u32,
    /// Requested row.
    pub y: u32,
}

/// Errors raised while resolving a movement command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MovementError {
    /// The actor tried to enter a position with no chunk behind it.
    #[error("player is in the void at {position:?}")]
    PlayerInVoid {
        /// Position that has no chunk.
        position: WorldPos,
    },
    /// The door pipe has fewer than two entrances, so it leads nowhere.
    #[error("door {} has a single entrance and cannot be traversed", door.symbol())]
    SingleEntranceDoor {
        /// Door that was used.
        door: DoorId,
    },
    /// The departing cell is not registered as a door entrance.
    #[error("no door entrance is registered at {chunk:?} {local:?}")]
    UnknownEntrance {
        /// Chunk of the requested entrance.
        chunk: ChunkCoord,
        /// Local cell of the requested entrance.
        local: LocalPos,
    },
    /// A chunk was queried outside its bounds.
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),
}

impl MovementError {
    /// Reports whether the session must stop after this error.
    ///
    /// A single-entrance door only rejects the command; every other failure
    /// leaves the actor somewhere the world cannot describe.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::SingleEntranceDoor { .. })
    }

    pub(crate) fn unknown_entrance(entrance: DoorEntrance) -> Self {
        Self::UnknownEntrance {
            chunk: entrance.chunk(),
            local: entrance.local(),
        }
    }
}

/// Errors raised when creating an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ActorError {
    /// Initial coordinates must be strictly positive.
    #[error("actor coordinates must be strictly positive (received {position:?})")]
    NonPositivePosition {
        /// Rejected position.
        position: WorldPos,
    },
}
