//! The single controllable entity.

use chunkwalk_core::{Speed, WorldPos};

use crate::ActorError;

/// Glyph drawn for the actor when none is configured.
pub const DEFAULT_ACTOR_GLYPH: char = 'P';

/// Actor walking through the world, owned by the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    glyph: char,
    position: WorldPos,
    speed: Speed,
}

impl Actor {
    /// Creates a walking actor at a strictly positive position.
    pub fn new(glyph: char, position: WorldPos) -> Result<Self, ActorError> {
        if position.x() <= 0 || position.y() <= 0 {
            return Err(ActorError::NonPositivePosition { position });
        }

        Ok(Self {
            glyph,
            position,
            speed: Speed::Walk,
        })
    }

    /// Glyph drawn at the screen centre.
    #[must_use]
    pub const fn glyph(&self) -> char {
        self.glyph
    }

    /// Absolute world position.
    #[must_use]
    pub const fn position(&self) -> WorldPos {
        self.position
    }

    /// Current movement mode.
    #[must_use]
    pub const fn speed(&self) -> Speed {
        self.speed
    }

    /// Switches to walking.
    pub fn walk(&mut self) {
        self.speed = Speed::Walk;
    }

    /// Switches to running.
    pub fn run(&mut self) {
        self.speed = Speed::Run;
    }

    pub(crate) fn step(&mut self, dx: i64, dy: i64) {
        self.position = self.position.offset(dx, dy);
    }

    pub(crate) fn teleport(&mut self, destination: WorldPos) {
        self.position = destination;
    }
}
