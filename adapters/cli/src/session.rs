//! Interactive control loop tying the world, controls, and terminal together.

use anyhow::{Context, Result};
use chunkwalk_core::{Command, Event, VisibilityStrategy, WorldPos};
use chunkwalk_rendering::{FrameRenderer, TerminalBackend};
use chunkwalk_system_controls::{Controls, Input};
use chunkwalk_world::{self as world, Actor, World};

/// What happened during a finished session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SessionSummary {
    pub(crate) frames: u64,
    pub(crate) commands: u64,
    pub(crate) teleports: u64,
    pub(crate) position: WorldPos,
}

/// Owns the world and actor for the lifetime of a play session.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    actor: Actor,
    controls: Controls,
    renderer: FrameRenderer,
    events: Vec<Event>,
    commands: u64,
    teleports: u64,
}

impl Session {
    pub(crate) fn new(world: World, actor: Actor, visibility: VisibilityStrategy) -> Self {
        Self {
            world,
            actor,
            controls: Controls::new(visibility),
            renderer: FrameRenderer::new(),
            events: Vec::new(),
            commands: 0,
            teleports: 0,
        }
    }

    /// Renders, reads a key, and applies it until the exit key is pressed.
    ///
    /// Fatal movement errors end the session with an error. A door with a
    /// single entrance only rejects the offending command.
    pub(crate) fn run<B>(mut self, backend: &mut B) -> Result<SessionSummary>
    where
        B: TerminalBackend + ?Sized,
    {
        loop {
            let _ = self
                .renderer
                .render(&self.world, &self.actor, backend)
                .context("failed to render frame")?;

            let key = backend.read_key()?;
            match self.controls.handle(key) {
                Some(Input::Exit) => break,
                Some(Input::Command(command)) => self.execute(command)?,
                None => log::trace!("ignoring unbound key {key:?}"),
            }
        }

        Ok(SessionSummary {
            frames: self.renderer.frames(),
            commands: self.commands,
            teleports: self.teleports,
            position: self.actor.position(),
        })
    }

    fn execute(&mut self, command: Command) -> Result<()> {
        self.commands += 1;
        self.events.clear();
        let outcome = world::apply(&mut self.world, &mut self.actor, command, &mut self.events);

        for event in &self.events {
            match event {
                Event::ActorTeleported { door, from, to } => {
                    self.teleports += 1;
                    log::debug!("door {} carried actor from {from:?} to {to:?}", door.symbol());
                }
                Event::VisibilityChanged { strategy } => {
                    log::info!("visibility strategy set to {strategy:?}");
                }
                Event::ActorStepped { .. } | Event::StepBlocked { .. } => {}
            }
        }

        match outcome {
            Ok(()) => Ok(()),
            Err(error) if !error.is_fatal() => {
                log::warn!("command {command:?} rejected: {error}");
                Ok(())
            }
            Err(error) => Err(error).context("actor left the playable world"),
        }
    }
}
