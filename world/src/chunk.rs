//! Fixed-size tile grids addressed by chunk coordinates.

use std::collections::BTreeMap;

use chunkwalk_core::{ChunkCoord, DoorId, LocalPos, Tile, CHUNK_HEIGHT, CHUNK_WIDTH};

use crate::{LoadError, OutOfRange};

/// Immutable 32x32 tile grid positioned in the world grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    coord: ChunkCoord,
    glyphs: Vec<char>,
    tiles: Vec<Tile>,
}

impl Chunk {
    /// Builds a chunk from raw chunk-file text.
    ///
    /// The text must contain exactly [`CHUNK_HEIGHT`] lines of exactly
    /// [`CHUNK_WIDTH`] characters. A trailing newline and CRLF line endings
    /// are accepted.
    pub fn parse(coord: ChunkCoord, raw: &str) -> Result<Self, LoadError> {
        let rows: Vec<&str> = raw.lines().collect();
        if is_invalid_rows(&rows) {
            let widths = rows.iter().map(|row| row.chars().count());
            return Err(LoadError::InvalidChunkShape {
                coord,
                rows: rows.len(),
                min_columns: widths.clone().min().unwrap_or(0),
                max_columns: widths.max().unwrap_or(0),
                expected_columns: CHUNK_WIDTH,
                expected_rows: CHUNK_HEIGHT,
            });
        }

        let glyphs: Vec<char> = rows.iter().flat_map(|row| row.chars()).collect();
        let tiles = glyphs.iter().copied().map(Tile::from_glyph).collect();

        Ok(Self {
            coord,
            glyphs,
            tiles,
        })
    }

    /// Coordinate of the chunk in the world grid.
    #[must_use]
    pub const fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Collision class of the local cell.
    pub fn tile_at(&self, x: u32, y: u32) -> Result<Tile, OutOfRange> {
        let index = index(x, y)?;
        Ok(self.tiles[index])
    }

    /// Glyph written in the chunk file at the local cell.
    pub fn glyph_at(&self, x: u32, y: u32) -> Result<char, OutOfRange> {
        let index = index(x, y)?;
        Ok(self.glyphs[index])
    }

    /// Reports whether the local cell is a wall.
    pub fn is_wall(&self, x: u32, y: u32) -> Result<bool, OutOfRange> {
        Ok(self.tile_at(x, y)? == Tile::Wall)
    }

    /// Door written at the local cell, if any.
    pub fn door_at(&self, x: u32, y: u32) -> Result<Option<DoorId>, OutOfRange> {
        match self.tile_at(x, y)? {
            Tile::Door(door) => Ok(Some(door)),
            Tile::Floor | Tile::Wall => Ok(None),
        }
    }

    /// Local cells of every door in this chunk, grouped by door in row-major order.
    #[must_use]
    pub fn entrances(&self) -> BTreeMap<DoorId, Vec<LocalPos>> {
        let mut entrances: BTreeMap<DoorId, Vec<LocalPos>> = BTreeMap::new();
        for (offset, tile) in self.tiles.iter().enumerate() {
            if let Tile::Door(door) = tile {
                entrances
                    .entry(*door)
                    .or_default()
                    .push(local_from_offset(offset));
            }
        }
        entrances
    }

    /// Every cell of the chunk with its glyph, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (LocalPos, char)> + '_ {
        self.glyphs
            .iter()
            .enumerate()
            .map(|(offset, glyph)| (local_from_offset(offset), *glyph))
    }
}

/// Reports whether raw chunk text fails the 32x32 shape requirement.
#[must_use]
pub fn is_invalid_grid(raw: &str) -> bool {
    let rows: Vec<&str> = raw.lines().collect();
    is_invalid_rows(&rows)
}

fn is_invalid_rows(rows: &[&str]) -> bool {
    rows.len() != CHUNK_HEIGHT as usize
        || rows
            .iter()
            .any(|row| row.chars().count() != CHUNK_WIDTH as usize)
}

fn index(x: u32, y: u32) -> Result<usize, OutOfRange> {
    if x >= CHUNK_WIDTH || y >= CHUNK_HEIGHT {
        return Err(OutOfRange { x, y });
    }
    Ok(y as usize * CHUNK_WIDTH as usize + x as usize)
}

fn local_from_offset(offset: usize) -> LocalPos {
    let width = CHUNK_WIDTH as usize;
    LocalPos::new((offset % width) as u32, (offset / width) as u32)
}
