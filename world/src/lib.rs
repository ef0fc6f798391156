#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for chunkwalk.
//!
//! The [`World`] owns every loaded [`Chunk`] and the [`DoorRegistry`] built
//! from them. The session owns the [`Actor`] and lends it to [`apply`], which
//! resolves one [`Command`] at a time into steps, blocked steps and
//! teleports.

mod actor;
pub mod camera;
mod chunk;
mod diagnostics;
mod doors;
mod error;
mod loader;
pub mod visibility;

use chunkwalk_core::{
    compare_chunk_coords, ChunkCoord, Command, Direction, Event, Tile, VisibilityStrategy,
    WorldPos, GRID_COLUMNS, GRID_ROWS,
};

pub use actor::{Actor, DEFAULT_ACTOR_GLYPH};
pub use chunk::{is_invalid_grid, Chunk};
pub use diagnostics::{DiagnosticSink, LogSink, RecordingSink, SharedSink};
pub use doors::{DoorEntrance, DoorRegistry};
pub use error::{ActorError, LoadError, MovementError, OutOfRange};
pub use loader::{chunk_name, load_chunk_file, load_chunks, parse_chunk_name, LoadOptions};

/// Represents the authoritative chunkwalk world state.
#[derive(Debug)]
pub struct World {
    grid: Vec<Option<Chunk>>,
    doors: DoorRegistry,
    visibility: VisibilityStrategy,
    diagnostics: Option<Box<dyn DiagnosticSink>>,
}

impl World {
    /// Assembles a world from already parsed chunks.
    ///
    /// Chunks are ordered with [`compare_chunk_coords`]; that order is also
    /// the order in which their doors are registered. Two chunks sharing a
    /// coordinate abort construction.
    pub fn from_chunks(mut chunks: Vec<Chunk>) -> Result<Self, LoadError> {
        chunks.sort_by(|a, b| compare_chunk_coords(&a.coord(), &b.coord()));
        if let Some(pair) = chunks
            .windows(2)
            .find(|pair| pair[0].coord() == pair[1].coord())
        {
            return Err(LoadError::DuplicateChunk {
                coord: pair[0].coord(),
            });
        }

        let doors = DoorRegistry::build(&chunks);
        for door in doors.dead_ends() {
            log::warn!(
                "door {} has a single entrance and cannot be traversed",
                door.symbol()
            );
        }

        let mut grid: Vec<Option<Chunk>> = (0..GRID_COLUMNS * GRID_ROWS).map(|_| None).collect();
        for chunk in chunks {
            let coord = chunk.coord();
            let index = grid_index(coord).ok_or(LoadError::ChunkOutsideGrid { coord })?;
            grid[index] = Some(chunk);
        }

        let world = Self {
            grid,
            doors,
            visibility: VisibilityStrategy::default(),
            diagnostics: None,
        };
        log::info!(
            "world assembled from {} chunks with {} door entrances",
            query::chunk_count(&world),
            world.doors.entrance_count()
        );
        Ok(world)
    }

    /// Loads chunk files from disk and assembles the world.
    pub fn load(options: &LoadOptions) -> Result<Self, LoadError> {
        Self::from_chunks(load_chunks(options)?)
    }

    /// Selects the strategy used to pick visible chunks.
    #[must_use]
    pub fn with_visibility(mut self, strategy: VisibilityStrategy) -> Self {
        self.visibility = strategy;
        self
    }

    /// Attaches a sink that receives a trace of every resolved step.
    #[must_use]
    pub fn with_diagnostics(mut self, sink: Box<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        grid_index(coord).and_then(|index| self.grid[index].as_ref())
    }

    fn trace(&mut self, message: impl FnOnce() -> String) {
        if let Some(sink) = self.diagnostics.as_mut() {
            sink.record(&message());
        }
    }

    fn step(
        &mut self,
        actor: &mut Actor,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) -> Result<(), MovementError> {
        let from = actor.position();
        let (dx, dy) = direction.actor_delta();
        let candidate = from.offset(dx, dy);

        let Some((coord, local)) = candidate.locate() else {
            return Err(MovementError::PlayerInVoid {
                position: candidate,
            });
        };
        let Some(chunk) = self.chunk(coord) else {
            return Err(MovementError::PlayerInVoid {
                position: candidate,
            });
        };

        match chunk.tile_at(local.x(), local.y())? {
            Tile::Door(door) => {
                let entered = DoorEntrance::new(coord, local);
                let departing = self.departing_entrance(from, entered);
                let target = self.doors.next_entrance(departing)?;
                let to = target.absolute();
                actor.teleport(to);
                self.trace(|| format!("door {} carried actor {from:?} -> {to:?}", door.symbol()));
                out_events.push(Event::ActorTeleported { door, from, to });
            }
            Tile::Wall => {
                self.trace(|| format!("wall at {candidate:?} blocked actor at {from:?}"));
                out_events.push(Event::StepBlocked {
                    at: from,
                    wall: candidate,
                });
            }
            Tile::Floor => {
                actor.step(dx, dy);
                self.trace(|| format!("actor stepped {from:?} -> {candidate:?}"));
                out_events.push(Event::ActorStepped {
                    from,
                    to: candidate,
                });
            }
        }

        Ok(())
    }

    /// Entrance treated as departed when stepping onto `entered`.
    ///
    /// An actor already standing on an entrance of the same pipe departs from
    /// where it stands; otherwise the door cell being entered is departed.
    fn departing_entrance(&self, from: WorldPos, entered: DoorEntrance) -> DoorEntrance {
        let entered_door = self.doors.door_of(entered);
        from.locate()
            .map(|(coord, local)| DoorEntrance::new(coord, local))
            .filter(|current| {
                entered_door.is_some() && self.doors.door_of(*current) == entered_door
            })
            .unwrap_or(entered)
    }
}

/// Applies the provided command to the world and the actor.
///
/// Each step of a movement command is resolved independently from the actor's
/// current position. An error stops the command; steps resolved before it
/// keep their effect and their events.
pub fn apply(
    world: &mut World,
    actor: &mut Actor,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), MovementError> {
    match command {
        Command::Move { direction, running } => {
            if running {
                actor.run();
            }
            let speed = actor.speed();
            actor.walk();

            for _ in 0..speed.steps() {
                world.step(actor, direction, out_events)?;
            }
            Ok(())
        }
        Command::SetVisibility { strategy } => {
            world.visibility = strategy;
            out_events.push(Event::VisibilityChanged { strategy });
            Ok(())
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use chunkwalk_core::{ChunkCoord, ScreenSize, VisibilityStrategy, WorldPos};

    use super::{Chunk, DoorRegistry, World};
    use crate::visibility::window_for;

    /// Chunk stored at the coordinate, if any.
    #[must_use]
    pub fn chunk(world: &World, coord: ChunkCoord) -> Option<&Chunk> {
        world.chunk(coord)
    }

    /// Every loaded chunk in row-major coordinate order.
    pub fn chunks(world: &World) -> impl Iterator<Item = &Chunk> {
        world.grid.iter().flatten()
    }

    /// Number of loaded chunks.
    #[must_use]
    pub fn chunk_count(world: &World) -> usize {
        chunks(world).count()
    }

    /// Door pipes discovered across the loaded chunks.
    #[must_use]
    pub fn door_registry(world: &World) -> &DoorRegistry {
        &world.doors
    }

    /// Strategy currently used to pick visible chunks.
    #[must_use]
    pub fn visibility(world: &World) -> VisibilityStrategy {
        world.visibility
    }

    /// Chunks to render for an actor at `actor` on a screen of `screen` cells.
    #[must_use]
    pub fn visible_chunks(world: &World, actor: WorldPos, screen: ScreenSize) -> Vec<&Chunk> {
        visible_chunks_with(world, world.visibility, actor, screen)
    }

    /// Chunks to render under an explicitly chosen strategy.
    #[must_use]
    pub fn visible_chunks_with(
        world: &World,
        strategy: VisibilityStrategy,
        actor: WorldPos,
        screen: ScreenSize,
    ) -> Vec<&Chunk> {
        let window = window_for(strategy, actor, screen);
        chunks(world)
            .filter(|chunk| window.contains(chunk.coord().column(), chunk.coord().row()))
            .collect()
    }
}

fn grid_index(coord: ChunkCoord) -> Option<usize> {
    if !coord.is_within_grid() {
        return None;
    }
    let row = usize::try_from(coord.row()).ok()?;
    let column = usize::try_from(coord.column()).ok()?;
    let width = usize::try_from(GRID_COLUMNS).ok()?;
    Some(row * width + column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunkwalk_core::{LocalPos, ScreenSize};

    fn open_chunk(coord: ChunkCoord) -> Chunk {
        let text = vec![" ".repeat(32); 32].join("\n");
        Chunk::parse(coord, &text).expect("valid chunk")
    }

    #[test]
    fn from_chunks_places_chunks_in_grid() {
        let world =
            World::from_chunks(vec![open_chunk(ChunkCoord::new(4, 2)), open_chunk(ChunkCoord::new(0, 0))])
                .expect("valid world");

        assert_eq!(query::chunk_count(&world), 2);
        assert!(query::chunk(&world, ChunkCoord::new(4, 2)).is_some());
        assert!(query::chunk(&world, ChunkCoord::new(1, 0)).is_none());
        assert!(query::chunk(&world, ChunkCoord::new(30, 0)).is_none());

        let order: Vec<_> = query::chunks(&world).map(Chunk::coord).collect();
        assert_eq!(order, vec![ChunkCoord::new(0, 0), ChunkCoord::new(4, 2)]);
    }

    #[test]
    fn duplicate_coordinates_abort_construction() {
        let result = World::from_chunks(vec![
            open_chunk(ChunkCoord::new(3, 3)),
            open_chunk(ChunkCoord::new(1, 1)),
            open_chunk(ChunkCoord::new(3, 3)),
        ]);

        match result {
            Err(LoadError::DuplicateChunk { coord }) => assert_eq!(coord, ChunkCoord::new(3, 3)),
            other => panic!("expected duplicate chunk error, got {other:?}"),
        }
    }

    #[test]
    fn visibility_command_switches_strategy() {
        let mut world =
            World::from_chunks(vec![open_chunk(ChunkCoord::new(0, 0)), open_chunk(ChunkCoord::new(9, 0))])
                .expect("valid world");
        let mut actor = Actor::new('P', WorldPos::new(2, 2)).expect("valid actor");
        let screen = ScreenSize::new(80, 24);
        let mut events = Vec::new();

        assert_eq!(query::visible_chunks(&world, actor.position(), screen).len(), 2);

        apply(
            &mut world,
            &mut actor,
            Command::SetVisibility {
                strategy: VisibilityStrategy::Windowed,
            },
            &mut events,
        )
        .expect("visibility change never fails");

        assert_eq!(query::visibility(&world), VisibilityStrategy::Windowed);
        assert_eq!(
            events,
            vec![Event::VisibilityChanged {
                strategy: VisibilityStrategy::Windowed
            }]
        );
        let visible: Vec<_> = query::visible_chunks(&world, actor.position(), screen)
            .into_iter()
            .map(Chunk::coord)
            .collect();
        assert_eq!(visible, vec![ChunkCoord::new(0, 0)]);
    }

    #[test]
    fn departing_entrance_prefers_current_cell_on_same_pipe() {
        let mut rows = vec![vec![' '; 32]; 32];
        rows[5][5] = '4';
        rows[5][6] = '4';
        let text = rows
            .iter()
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        let chunk = Chunk::parse(ChunkCoord::new(0, 0), &text).expect("valid chunk");
        let world = World::from_chunks(vec![chunk]).expect("valid world");

        let standing = WorldPos::new(5, 5);
        let entered = DoorEntrance::new(ChunkCoord::new(0, 0), LocalPos::new(6, 5));
        assert_eq!(
            world.departing_entrance(standing, entered),
            DoorEntrance::new(ChunkCoord::new(0, 0), LocalPos::new(5, 5))
        );

        let elsewhere = WorldPos::new(7, 7);
        assert_eq!(world.departing_entrance(elsewhere, entered), entered);
    }
}
