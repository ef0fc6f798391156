use std::{fs, path::Path};

use chunkwalk_core::{ChunkCoord, DoorId, LocalPos};
use chunkwalk_world::{query, DoorEntrance, LoadError, LoadOptions, World};

fn open_text() -> String {
    vec![" ".repeat(32); 32].join("\n") + "\n"
}

fn text_with_door(x: usize, y: usize, symbol: char) -> String {
    let mut rows = vec![vec![' '; 32]; 32];
    rows[y][x] = symbol;
    rows.iter()
        .map(|row| row.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("write chunk file");
}

#[test]
fn loads_every_valid_chunk_in_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "A1", &open_text());
    write(dir.path(), "B1", &open_text());
    write(dir.path(), "C4", &open_text());
    write(dir.path(), "notes.txt", "ignored");
    write(dir.path(), "a1", "ignored");

    let world = World::load(&LoadOptions::new().with_directory(dir.path())).expect("loads");

    let coords: Vec<_> = query::chunks(&world).map(|chunk| chunk.coord()).collect();
    assert_eq!(
        coords,
        vec![
            ChunkCoord::new(0, 0),
            ChunkCoord::new(1, 0),
            ChunkCoord::new(2, 3),
        ]
    );
}

#[test]
fn excluded_chunks_are_skipped() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "A1", &open_text());
    write(dir.path(), "B1", &open_text());

    let options = LoadOptions::new()
        .with_directory(dir.path())
        .exclude("B1")
        .expect("valid exclusion");
    let world = World::load(&options).expect("loads");

    assert_eq!(query::chunk_count(&world), 1);
    assert!(query::chunk(&world, ChunkCoord::new(1, 0)).is_none());
}

#[test]
fn malformed_chunk_aborts_loading() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "A1", &open_text());
    write(dir.path(), "B1", &vec![" ".repeat(31); 32].join("\n"));

    let error = World::load(&LoadOptions::new().with_directory(dir.path()))
        .expect_err("B1 is 31 columns wide");

    match error {
        LoadError::InvalidChunkShape { coord, .. } => assert_eq!(coord, ChunkCoord::new(1, 0)),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn same_coordinate_from_two_sources_is_duplicate() {
    let first = tempfile::tempdir().expect("temp dir");
    let second = tempfile::tempdir().expect("temp dir");
    write(first.path(), "D4", &open_text());
    write(second.path(), "D4", &open_text());

    let options = LoadOptions::new()
        .with_directory(first.path())
        .with_directory(second.path());
    let error = World::load(&options).expect_err("two D4 chunks");

    match error {
        LoadError::DuplicateChunk { coord } => assert_eq!(coord, ChunkCoord::new(3, 3)),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn explicit_file_must_exist() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("E5");

    let error = World::load(&LoadOptions::new().with_file(&missing)).expect_err("E5 is missing");

    match error {
        LoadError::ChunkFileMissing { path } => assert_eq!(path, missing),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn explicit_file_needs_a_chunk_name() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "chunk.txt", &open_text());

    let error = World::load(&LoadOptions::new().with_file(dir.path().join("chunk.txt")))
        .expect_err("name does not address a chunk");

    assert!(matches!(error, LoadError::InvalidChunkFileName { name } if name == "chunk.txt"));
}

#[test]
fn missing_directory_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let error = World::load(&LoadOptions::new().with_directory(dir.path().join("absent")))
        .expect_err("directory is missing");

    assert!(matches!(error, LoadError::ChunkFileMissing { .. }));
}

#[test]
fn doors_pair_across_loaded_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "A1", &text_with_door(10, 10, '5'));
    write(dir.path(), "B2", &text_with_door(3, 3, '5'));

    let world = World::load(&LoadOptions::new().with_directory(dir.path())).expect("loads");
    let registry = query::door_registry(&world);

    let a = DoorEntrance::new(ChunkCoord::new(0, 0), LocalPos::new(10, 10));
    let b = DoorEntrance::new(ChunkCoord::new(1, 1), LocalPos::new(3, 3));
    assert_eq!(
        registry.pipe(DoorId::from_symbol('5').expect("digit")),
        Some(&[a, b][..])
    );
    assert_eq!(registry.next_entrance(a), Ok(b));
}

#[test]
fn excluded_explicit_files_are_never_read() {
    let dir = tempfile::tempdir().expect("temp dir");
    write(dir.path(), "A1", &open_text());
    write(dir.path(), "C2", &vec![" ".repeat(5); 3].join("\n"));

    let options = LoadOptions::new()
        .with_file(dir.path().join("A1"))
        .with_file(dir.path().join("E5"))
        .with_file(dir.path().join("C2"))
        .exclude("E5")
        .expect("valid exclusion")
        .exclude("C2")
        .expect("valid exclusion");
    let world = World::load(&options).expect("excluded files are skipped");

    assert_eq!(query::chunk_count(&world), 1);
    assert!(query::chunk(&world, ChunkCoord::new(0, 0)).is_some());
}
