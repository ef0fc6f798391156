//! Session configuration read from TOML and merged with command-line flags.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use chunkwalk_core::{VisibilityStrategy, WorldPos};
use chunkwalk_world::{LoadOptions, DEFAULT_ACTOR_GLYPH};
use serde::Deserialize;

use crate::Args;

/// Directory scanned when neither flags nor configuration name a chunk source.
const DEFAULT_CHUNK_DIRECTORY: &str = "chunks";

/// Actor start used when nothing else is configured.
const DEFAULT_START: WorldPos = WorldPos::new(2, 2);

/// Contents of a `chunkwalk.toml` file.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SessionConfig {
    chunks: Vec<PathBuf>,
    chunk_files: Vec<PathBuf>,
    exclude: Vec<String>,
    visibility: Option<VisibilityStrategy>,
    actor_glyph: Option<char>,
    start: Option<StartConfig>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct StartConfig {
    x: i64,
    y: i64,
}

impl SessionConfig {
    /// Reads and parses a configuration file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse configuration toml contents")
    }
}

/// Fully resolved settings for one session.
#[derive(Debug)]
pub(crate) struct Settings {
    pub(crate) load: LoadOptions,
    pub(crate) visibility: VisibilityStrategy,
    pub(crate) actor_glyph: char,
    pub(crate) start: WorldPos,
}

impl Settings {
    /// Merges command-line flags over the configuration file.
    ///
    /// Chunk sources and exclusions from both places are combined; scalar
    /// flags replace the configured value.
    pub(crate) fn resolve(args: &Args, config: SessionConfig) -> Result<Self> {
        let mut directories = config.chunks;
        directories.extend(args.chunks.iter().cloned());
        let mut files = config.chunk_files;
        files.extend(args.chunk_files.iter().cloned());
        if directories.is_empty() && files.is_empty() {
            directories.push(PathBuf::from(DEFAULT_CHUNK_DIRECTORY));
        }

        let mut load = LoadOptions::new();
        for directory in directories {
            load = load.with_directory(directory);
        }
        for file in files {
            load = load.with_file(file);
        }
        for name in config.exclude.iter().chain(&args.exclude) {
            load = load
                .exclude(name)
                .with_context(|| format!("cannot exclude `{name}`"))?;
        }

        let visibility = args
            .visibility
            .map(VisibilityStrategy::from)
            .or(config.visibility)
            .unwrap_or_default();

        let actor_glyph = config.actor_glyph.unwrap_or(DEFAULT_ACTOR_GLYPH);
        if actor_glyph.is_control() {
            bail!("actor glyph must be printable (received {actor_glyph:?})");
        }

        let configured = config
            .start
            .map_or(DEFAULT_START, |start| WorldPos::new(start.x, start.y));
        let start = WorldPos::new(
            args.start_x.unwrap_or(configured.x()),
            args.start_y.unwrap_or(configured.y()),
        );

        Ok(Self {
            load,
            visibility,
            actor_glyph,
            start,
        })
    }
}
