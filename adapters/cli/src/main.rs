#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that lets a player walk the chunk world in a terminal.

mod config;
mod session;

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use chunkwalk_core::VisibilityStrategy;
use chunkwalk_rendering_crossterm::CrosstermBackend;
use chunkwalk_world::{query, Actor, LogSink, World};
use clap::{Parser, ValueEnum};

use self::{
    config::{SessionConfig, Settings},
    session::Session,
};

/// Command-line arguments accepted by `chunkwalk`.
#[derive(Debug, Parser)]
#[command(
    name = "chunkwalk",
    about = "Walk a chunked tile world in the terminal"
)]
struct Args {
    /// Directory scanned for chunk files named A1 through Z9.
    #[arg(long = "chunks", value_name = "DIR")]
    chunks: Vec<PathBuf>,
    /// Additional chunk file to load.
    #[arg(long = "chunk-file", value_name = "FILE")]
    chunk_files: Vec<PathBuf>,
    /// Chunk name to leave out, such as B2.
    #[arg(long, value_name = "NAME")]
    exclude: Vec<String>,
    /// Which chunks are handed to the renderer each frame.
    #[arg(long, value_enum)]
    visibility: Option<VisibilityArg>,
    /// Actor start column in world cells.
    #[arg(long, allow_hyphen_values = true)]
    start_x: Option<i64>,
    /// Actor start row in world cells.
    #[arg(long, allow_hyphen_values = true)]
    start_y: Option<i64>,
    /// TOML configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// File receiving log output while the terminal is taken over.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

/// Visibility strategy as spelled on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum VisibilityArg {
    /// Every loaded chunk.
    All,
    /// Only chunks near the actor.
    Windowed,
}

impl From<VisibilityArg> for VisibilityStrategy {
    fn from(arg: VisibilityArg) -> Self {
        match arg {
            VisibilityArg::All => Self::All,
            VisibilityArg::Windowed => Self::Windowed,
        }
    }
}

/// Entry point for the chunkwalk command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    let settings = Settings::resolve(&args, config)?;

    let world = World::load(&settings.load)
        .context("failed to load chunks")?
        .with_visibility(settings.visibility)
        .with_diagnostics(Box::new(LogSink));
    let actor = Actor::new(settings.actor_glyph, settings.start).context("invalid actor start")?;
    log::info!(
        "starting at {:?} with {} chunks",
        actor.position(),
        query::chunk_count(&world)
    );

    let mut backend = CrosstermBackend::enter()?;
    let outcome = Session::new(world, actor, settings.visibility).run(&mut backend);
    drop(backend);

    let summary = outcome?;
    log::info!(
        "session ended at {:?} after {} commands, {} teleports and {} frames",
        summary.position,
        summary.commands,
        summary.teleports,
        summary.frames
    );
    Ok(())
}

/// Routes `log` output through env_logger.
///
/// Output goes to `--log-file` when given. Otherwise logging stays off unless
/// `RUST_LOG` asks for it, since stderr shares the screen with the game.
fn init_logging(args: &Args) -> Result<()> {
    let env = env_logger::Env::default();
    let mut builder = match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file at {}", path.display()))?;
            let mut builder = env_logger::Builder::from_env(env.default_filter_or("info"));
            let _ = builder.target(env_logger::Target::Pipe(Box::new(file)));
            builder
        }
        None => env_logger::Builder::from_env(env.default_filter_or("off")),
    };
    builder.try_init().context("failed to initialise logging")
}
