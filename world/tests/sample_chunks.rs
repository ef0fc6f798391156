use std::path::PathBuf;

use chunkwalk_core::{ChunkCoord, DoorId, Tile};
use chunkwalk_world::{query, LoadOptions, World};

fn sample_directory() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../chunks")
}

#[test]
fn shipped_chunks_load_into_a_two_by_two_world() {
    let world =
        World::load(&LoadOptions::new().with_directory(sample_directory())).expect("sample loads");

    assert_eq!(query::chunk_count(&world), 4);
    for (column, row) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        assert!(query::chunk(&world, ChunkCoord::new(column, row)).is_some());
    }
}

#[test]
fn shipped_doors_form_a_pair_and_a_cycle() {
    let world =
        World::load(&LoadOptions::new().with_directory(sample_directory())).expect("sample loads");
    let registry = query::door_registry(&world);

    let pair = registry
        .pipe(DoorId::from_symbol('1').expect("digit"))
        .expect("door 1 exists");
    let cycle = registry
        .pipe(DoorId::from_symbol('2').expect("digit"))
        .expect("door 2 exists");

    assert_eq!(pair.len(), 2);
    assert_eq!(cycle.len(), 3);
    assert!(registry.dead_ends().next().is_none());
}

#[test]
fn default_start_is_open_floor() {
    let world =
        World::load(&LoadOptions::new().with_directory(sample_directory())).expect("sample loads");
    let chunk = query::chunk(&world, ChunkCoord::new(0, 0)).expect("A1 loaded");

    assert_eq!(chunk.tile_at(2, 2), Ok(Tile::Floor));
}
