//! Tiles: floor pieces and raised blocks
//!
//! Tiles move kinematically. They never react to the player; the player reacts
//! to them in [`crate::player::PlayerBody::check_floor`].

use crate::shapes::Cube;
use crate::world::PhysicsConfig;
use cubehop_math::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Key for referencing tiles in the physics world
    pub struct TileKey;
}

/// Which way a sliding block first moves
///
/// The block turns around as soon as it passes its home cell, so the
/// initial heading is only held for a single tick. After that it sweeps
/// between home and the board limit on the far side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlideDirection {
    /// Starts along -Z, sweeps between home and `+slide_limit`
    TowardNegZ,
    /// Starts along +Z, sweeps between `-slide_limit` and home
    TowardPosZ,
    /// Starts along +X, sweeps between `-slide_limit` and home
    TowardPosX,
    /// Starts along -X, sweeps between home and `+slide_limit`
    TowardNegX,
}

impl SlideDirection {
    /// Whether the block moves along the X axis (otherwise Z)
    pub fn is_x_axis(&self) -> bool {
        matches!(self, SlideDirection::TowardPosX | SlideDirection::TowardNegX)
    }

    /// Sign of the initial velocity
    pub fn initial_sign(&self) -> f32 {
        match self {
            SlideDirection::TowardNegZ | SlideDirection::TowardNegX => -1.0,
            SlideDirection::TowardPosZ | SlideDirection::TowardPosX => 1.0,
        }
    }
}

/// How a tile moves each tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileMotion {
    /// Never moves
    #[default]
    Static,
    /// Bobs up and down around its home height
    Bob,
    /// Slides back and forth along one horizontal axis
    Slide(SlideDirection),
}

/// A cube on the board
#[derive(Clone, Debug)]
pub struct Tile {
    /// Current center
    pub position: Vec3,
    /// Center the tile was spawned at
    pub home: Vec3,
    /// Per-tick velocity
    pub velocity: Vec3,
    /// Half edge length
    pub half_size: f32,
    /// Motion kind
    pub motion: TileMotion,
}

impl Tile {
    /// Create a static tile
    pub fn new(position: Vec3, half_size: f32) -> Self {
        Self {
            position,
            home: position,
            velocity: Vec3::ZERO,
            half_size,
            motion: TileMotion::Static,
        }
    }

    /// Set the motion kind
    pub fn with_motion(mut self, motion: TileMotion) -> Self {
        self.motion = motion;
        self
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Create a bobbing floor tile
    pub fn bobbing(position: Vec3, half_size: f32) -> Self {
        Self::new(position, half_size).with_motion(TileMotion::Bob)
    }

    /// Create a sliding block
    pub fn sliding(position: Vec3, half_size: f32, direction: SlideDirection) -> Self {
        Self::new(position, half_size).with_motion(TileMotion::Slide(direction))
    }

    /// Get the tile's collision cube
    pub fn collider(&self) -> Cube {
        Cube::new(self.position, self.half_size)
    }

    /// Whether the tile moves at all
    pub fn is_moving(&self) -> bool {
        self.motion != TileMotion::Static
    }

    /// Advance the tile by one tick according to its motion kind
    pub fn advance<R: Rng + ?Sized>(&mut self, config: &PhysicsConfig, rng: &mut R) {
        match self.motion {
            TileMotion::Static => {}
            TileMotion::Bob => self.bob(config, rng),
            TileMotion::Slide(_) => self.slide(config),
        }
    }

    /// Move a bobbing tile one tick
    ///
    /// A tile at rest picks a random vertical heading. It then travels until it
    /// leaves `home.y ± bob_amplitude` and turns around.
    pub fn bob<R: Rng + ?Sized>(&mut self, config: &PhysicsConfig, rng: &mut R) {
        if self.velocity.y == 0.0 {
            self.velocity.y = if rng.gen_bool(0.5) {
                config.bob_speed
            } else {
                -config.bob_speed
            };
        }

        self.position.y += self.velocity.y;

        let floor_y = self.home.y;
        if self.position.y > floor_y + config.bob_amplitude
            || self.position.y < floor_y - config.bob_amplitude
        {
            self.velocity.y = -self.velocity.y;
        }
    }

    /// Move a sliding block one tick
    ///
    /// The height is pinned to the spawn height so a block never drifts
    /// vertically, whatever its velocity says.
    pub fn slide(&mut self, config: &PhysicsConfig) {
        let TileMotion::Slide(direction) = self.motion else {
            return;
        };

        let limit = config.slide_limit;
        let (pos, vel, home) = if direction.is_x_axis() {
            (&mut self.position.x, &mut self.velocity.x, self.home.x)
        } else {
            (&mut self.position.z, &mut self.velocity.z, self.home.z)
        };

        if *vel == 0.0 {
            *vel = direction.initial_sign() * config.slide_speed;
        }
        *pos += *vel;

        let turn = match direction {
            SlideDirection::TowardNegZ | SlideDirection::TowardNegX => *pos < home || *pos > limit,
            SlideDirection::TowardPosZ | SlideDirection::TowardPosX => *pos > home || *pos < -limit,
        };
        if turn {
            *vel = -*vel;
        }

        self.position.y = self.home.y;
    }
}
