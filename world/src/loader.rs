//! Chunk discovery and loading from disk.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use chunkwalk_core::{ChunkCoord, GRID_COLUMNS, GRID_ROWS};

use crate::{Chunk, LoadError};

/// Where chunks come from and which ones to leave out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    directories: Vec<PathBuf>,
    files: Vec<PathBuf>,
    excluded: HashSet<ChunkCoord>,
}

impl LoadOptions {
    /// Creates empty options that load nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory scanned for chunk files named `A1` through `Z9`.
    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directories.push(directory.into());
        self
    }

    /// Adds an explicit chunk file; it must exist.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.files.push(file.into());
        self
    }

    /// Excludes the chunk with the given file name, e.g. `"B2"`.
    pub fn exclude(mut self, name: &str) -> Result<Self, LoadError> {
        let coord = parse_chunk_name(name)?;
        let _ = self.excluded.insert(coord);
        Ok(self)
    }

    /// Directories scanned for chunk files.
    #[must_use]
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Explicit chunk files.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Reports whether the chunk at the coordinate is excluded.
    #[must_use]
    pub fn is_excluded(&self, coord: ChunkCoord) -> bool {
        self.excluded.contains(&coord)
    }
}

/// Decodes a chunk file name of the form `[A-Z][1-9]` into a coordinate.
pub fn parse_chunk_name(name: &str) -> Result<ChunkCoord, LoadError> {
    let invalid = || LoadError::InvalidChunkFileName {
        name: name.to_owned(),
    };

    let mut chars = name.chars();
    let (Some(letter), Some(digit), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(invalid());
    };
    if !letter.is_ascii_uppercase() || !('1'..='9').contains(&digit) {
        return Err(invalid());
    }

    let column = u32::from(letter) - u32::from('A');
    let row = digit.to_digit(10).ok_or_else(invalid)? - 1;
    ChunkCoord::within_grid(column, row).ok_or_else(invalid)
}

/// File name that addresses the chunk coordinate.
#[must_use]
pub fn chunk_name(coord: ChunkCoord) -> String {
    let letter = char::from_u32(u32::from('A') + coord.column()).unwrap_or('?');
    format!("{letter}{}", coord.row() + 1)
}

/// Reads one chunk file, deriving its coordinate from the file name.
pub fn load_chunk_file(path: &Path) -> Result<Chunk, LoadError> {
    let coord = parse_chunk_name(file_name(path))?;

    if !path.exists() {
        return Err(LoadError::ChunkFileMissing {
            path: path.to_path_buf(),
        });
    }

    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Chunk::parse(coord, &raw)
}

fn file_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
}

/// Loads every chunk selected by the options.
///
/// Directories are scanned in row-major name order (`A1`, `B1`, ..., `Z9`);
/// files with any other name are ignored. Explicit files follow; an excluded
/// explicit file is skipped without being read. Duplicate
/// coordinates are detected later, when the world grid is assembled.
pub fn load_chunks(options: &LoadOptions) -> Result<Vec<Chunk>, LoadError> {
    let mut chunks = Vec::new();

    for directory in &options.directories {
        if !directory.is_dir() {
            return Err(LoadError::ChunkFileMissing {
                path: directory.clone(),
            });
        }

        for row in 0..GRID_ROWS {
            for column in 0..GRID_COLUMNS {
                let coord = ChunkCoord::new(column, row);
                if options.is_excluded(coord) {
                    continue;
                }
                let path = directory.join(chunk_name(coord));
                if path.is_file() {
                    log::trace!("loading chunk {}", path.display());
                    chunks.push(load_chunk_file(&path)?);
                }
            }
        }
    }

    for file in &options.files {
        let coord = parse_chunk_name(file_name(file))?;
        if options.is_excluded(coord) {
            log::trace!("skipping excluded chunk file {}", file.display());
            continue;
        }
        chunks.push(load_chunk_file(file)?);
    }

    Ok(chunks)
}
