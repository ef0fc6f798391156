//! Door discovery and teleport pairing.
//!
//! Every door glyph found while scanning the loaded chunks becomes a
//! [`DoorEntrance`]. Entrances sharing a glyph form a pipe; travelling through
//! entrance `i` of a pipe arrives at entrance `(i + 1) mod len`, so a pipe of
//! two entrances is a plain two-way portal and longer pipes cycle.

use std::collections::{BTreeMap, HashMap};

use chunkwalk_core::{ChunkCoord, DoorId, LocalPos, WorldPos};

use crate::{Chunk, MovementError};

/// Single door-tagged cell of a specific chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DoorEntrance {
    chunk: ChunkCoord,
    local: LocalPos,
}

impl DoorEntrance {
    /// Creates a new entrance descriptor.
    #[must_use]
    pub const fn new(chunk: ChunkCoord, local: LocalPos) -> Self {
        Self { chunk, local }
    }

    /// Chunk containing the entrance.
    #[must_use]
    pub const fn chunk(&self) -> ChunkCoord {
        self.chunk
    }

    /// Cell of the entrance inside its chunk.
    #[must_use]
    pub const fn local(&self) -> LocalPos {
        self.local
    }

    /// Absolute world position of the entrance.
    #[must_use]
    pub const fn absolute(&self) -> WorldPos {
        self.chunk.absolute(self.local)
    }
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    door: DoorId,
    index: usize,
}

/// Registry of every door pipe discovered across the loaded chunks.
#[derive(Clone, Debug, Default)]
pub struct DoorRegistry {
    pipes: BTreeMap<DoorId, Vec<DoorEntrance>>,
    slots: HashMap<DoorEntrance, Slot>,
}

impl DoorRegistry {
    /// Scans the chunks in the order given and groups their doors into pipes.
    #[must_use]
    pub fn build<'a, I>(chunks: I) -> Self
    where
        I: IntoIterator<Item = &'a Chunk>,
    {
        let mut registry = Self::default();
        for chunk in chunks {
            for (door, locals) in chunk.entrances() {
                for local in locals {
                    registry.register(door, DoorEntrance::new(chunk.coord(), local));
                }
            }
        }
        registry
    }

    fn register(&mut self, door: DoorId, entrance: DoorEntrance) {
        let pipe = self.pipes.entry(door).or_default();
        let _ = self.slots.insert(
            entrance,
            Slot {
                door,
                index: pipe.len(),
            },
        );
        pipe.push(entrance);
    }

    /// Entrance reached by travelling through `current`.
    ///
    /// Lookup is exact on `(chunk, local)`; a pipe with fewer than two
    /// entrances cannot be traversed.
    pub fn next_entrance(&self, current: DoorEntrance) -> Result<DoorEntrance, MovementError> {
        let slot = self
            .slots
            .get(&current)
            .ok_or_else(|| MovementError::unknown_entrance(current))?;
        let pipe = self
            .pipes
            .get(&slot.door)
            .ok_or_else(|| MovementError::unknown_entrance(current))?;

        if pipe.len() < 2 {
            return Err(MovementError::SingleEntranceDoor { door: slot.door });
        }

        Ok(pipe[(slot.index + 1) % pipe.len()])
    }

    /// Ordered entrances of a door pipe.
    #[must_use]
    pub fn pipe(&self, door: DoorId) -> Option<&[DoorEntrance]> {
        self.pipes.get(&door).map(Vec::as_slice)
    }

    /// Door that owns the provided entrance.
    #[must_use]
    pub fn door_of(&self, entrance: DoorEntrance) -> Option<DoorId> {
        self.slots.get(&entrance).map(|slot| slot.door)
    }

    /// Iterator over every registered door in ascending order.
    pub fn doors(&self) -> impl Iterator<Item = DoorId> + '_ {
        self.pipes.keys().copied()
    }

    /// Doors whose pipe holds fewer than two entrances.
    pub fn dead_ends(&self) -> impl Iterator<Item = DoorId> + '_ {
        self.pipes
            .iter()
            .filter(|(_, pipe)| pipe.len() < 2)
            .map(|(door, _)| *door)
    }

    /// Total number of registered entrances.
    #[must_use]
    pub fn entrance_count(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn door(symbol: char) -> DoorId {
        DoorId::from_symbol(symbol).expect("digit")
    }

    fn chunk_with(coord: ChunkCoord, doors: &[(u32, u32, char)]) -> Chunk {
        let mut rows = vec![vec![' '; 32]; 32];
        for &(x, y, symbol) in doors {
            rows[y as usize][x as usize] = symbol;
        }
        let text = rows
            .iter()
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        Chunk::parse(coord, &text).expect("valid chunk")
    }

    #[test]
    fn pair_is_an_involution() {
        let a = chunk_with(ChunkCoord::new(0, 0), &[(10, 10, '5')]);
        let b = chunk_with(ChunkCoord::new(1, 0), &[(3, 3, '5')]);
        let registry = DoorRegistry::build([&a, &b]);

        let start = DoorEntrance::new(a.coord(), LocalPos::new(10, 10));
        let across = registry.next_entrance(start).expect("paired door");
        assert_eq!(across, DoorEntrance::new(b.coord(), LocalPos::new(3, 3)));
        assert_eq!(registry.next_entrance(across), Ok(start));
    }

    #[test]
    fn longer_pipes_cycle_in_scan_order() {
        let a = chunk_with(ChunkCoord::new(0, 0), &[(4, 9, '2'), (4, 1, '2')]);
        let b = chunk_with(ChunkCoord::new(0, 1), &[(30, 30, '2')]);
        let registry = DoorRegistry::build([&a, &b]);

        let e0 = DoorEntrance::new(a.coord(), LocalPos::new(4, 1));
        let e1 = DoorEntrance::new(a.coord(), LocalPos::new(4, 9));
        let e2 = DoorEntrance::new(b.coord(), LocalPos::new(30, 30));

        assert_eq!(registry.pipe(door('2')), Some(&[e0, e1, e2][..]));
        assert_eq!(registry.next_entrance(e0), Ok(e1));
        assert_eq!(registry.next_entrance(e1), Ok(e2));
        assert_eq!(registry.next_entrance(e2), Ok(e0));
    }

    #[test]
    fn single_entrance_cannot_be_traversed() {
        let a = chunk_with(ChunkCoord::new(0, 0), &[(8, 8, '9')]);
        let registry = DoorRegistry::build([&a]);

        let lonely = DoorEntrance::new(a.coord(), LocalPos::new(8, 8));
        assert_eq!(
            registry.next_entrance(lonely),
            Err(MovementError::SingleEntranceDoor { door: door('9') })
        );
        assert_eq!(registry.dead_ends().collect::<Vec<_>>(), vec![door('9')]);
    }

    #[test]
    fn lookup_requires_exact_entrance() {
        let a = chunk_with(ChunkCoord::new(0, 0), &[(10, 10, '5')]);
        let b = chunk_with(ChunkCoord::new(1, 0), &[(3, 3, '5')]);
        let registry = DoorRegistry::build([&a, &b]);

        let neighbour = DoorEntrance::new(a.coord(), LocalPos::new(11, 10));
        assert_eq!(
            registry.next_entrance(neighbour),
            Err(MovementError::UnknownEntrance {
                chunk: a.coord(),
                local: LocalPos::new(11, 10),
            })
        );
    }

    #[test]
    fn doors_with_different_symbols_stay_separate() {
        let a = chunk_with(ChunkCoord::new(0, 0), &[(1, 1, '1'), (2, 2, '2')]);
        let b = chunk_with(ChunkCoord::new(0, 1), &[(1, 1, '1'), (2, 2, '2')]);
        let registry = DoorRegistry::build([&a, &b]);

        assert_eq!(registry.doors().collect::<Vec<_>>(), vec![door('1'), door('2')]);
        assert_eq!(registry.entrance_count(), 4);
        assert_eq!(
            registry.door_of(DoorEntrance::new(b.coord(), LocalPos::new(2, 2))),
            Some(door('2'))
        );
        assert_eq!(
            registry.next_entrance(DoorEntrance::new(a.coord(), LocalPos::new(1, 1))),
            Ok(DoorEntrance::new(b.coord(), LocalPos::new(1, 1)))
        );
    }
}
