//! Player physics for the hopping cube
//!
//! Provides per-tick gravity, jumping and the floor/wall response against tiles.
//! All quantities are per tick; there is no `dt`.

use crate::body::Tile;
use crate::collision::{axis_sign, ContactFlags};
use crate::shapes::Cube;
use crate::world::PhysicsConfig;
use cubehop_math::Vec3;

/// Default player half edge length
pub const DEFAULT_PLAYER_HALF_SIZE: f32 = 0.2;

/// Player physics state
#[derive(Clone, Debug)]
pub struct PlayerBody {
    /// Current center
    pub position: Vec3,
    /// Per-tick velocity
    pub velocity: Vec3,
    /// Half edge length
    pub half_size: f32,
    /// Where the player returns on respawn
    pub spawn: Vec3,
}

impl PlayerBody {
    /// Create a new player at the given spawn point
    pub fn new(spawn: Vec3) -> Self {
        Self::with_half_size(spawn, DEFAULT_PLAYER_HALF_SIZE)
    }

    /// Create a new player with a custom size
    pub fn with_half_size(spawn: Vec3, half_size: f32) -> Self {
        Self {
            position: spawn,
            velocity: Vec3::ZERO,
            half_size,
            spawn,
        }
    }

    /// Get the player's collision cube at the current position
    pub fn collider(&self) -> Cube {
        Cube::new(self.position, self.half_size)
    }

    /// Set horizontal velocity components
    ///
    /// `None` leaves that component unchanged.
    pub fn set_horizontal(&mut self, x: Option<f32>, z: Option<f32>) {
        if let Some(vx) = x {
            self.velocity.x = vx;
        }
        if let Some(vz) = z {
            self.velocity.z = vz;
        }
    }

    /// Add the jump impulse unless the player is already rising fast
    ///
    /// Jumping is allowed in mid-air; the ceiling only caps stacked impulses.
    pub fn jump(&mut self, config: &PhysicsConfig) {
        if self.velocity.y < config.jump_ceiling {
            self.velocity.y += config.jump_impulse;
        }
    }

    /// Return to the spawn point with zero velocity
    pub fn respawn(&mut self) {
        self.position = self.spawn;
        self.velocity = Vec3::ZERO;
    }

    /// Resolve contacts against every overlapping tile
    ///
    /// Side pushes only happen when the tile is roughly level with the player
    /// (`side_band`), so walking across the top of a tile is not blocked.
    pub fn check_floor<'a, I>(&mut self, tiles: I, config: &PhysicsConfig) -> ContactFlags
    where
        I: IntoIterator<Item = &'a Tile>,
    {
        let mut flags = ContactFlags::empty();

        for tile in tiles {
            if !self.collider().overlaps(&tile.collider()) {
                continue;
            }

            let dy = (self.position.y - tile.position.y).abs();

            if self.velocity.x != 0.0 && dy < config.side_band {
                self.position.x += axis_sign(self.position.x - tile.position.x) * config.push_out;
                self.velocity.x = 0.0;
                flags |= ContactFlags::BLOCKED_X;
            }

            if self.velocity.z != 0.0 && dy < config.side_band {
                self.position.z += axis_sign(self.position.z - tile.position.z) * config.push_out;
                self.velocity.z = 0.0;
                flags |= ContactFlags::BLOCKED_Z;
            }

            if self.velocity.y != 0.0 && dy < config.landing_band {
                self.position.y -= self.velocity.y;
                self.velocity.y = 0.0;
                flags |= ContactFlags::LANDED;
            }

            flags |= ContactFlags::SUPPORTED;

            // Ride along with moving tiles
            if tile.velocity.y != 0.0 {
                self.velocity.y = tile.velocity.y;
                flags |= ContactFlags::CARRIED;
            }
            if tile.velocity.x != 0.0 && self.velocity.x.abs() < config.carry_threshold {
                self.velocity.x = tile.velocity.x;
                flags |= ContactFlags::CARRIED;
            }
            if tile.velocity.z != 0.0 && self.velocity.z.abs() < config.carry_threshold {
                self.velocity.z = tile.velocity.z;
                flags |= ContactFlags::CARRIED;
            }
        }

        flags
    }

    /// Apply one tick of gravity and motion
    ///
    /// The vertical move happens first and is checked against the tiles; the
    /// horizontal move is applied afterwards without a check, so a wall is
    /// only felt on the following tick.
    pub fn apply_gravity<'a, I>(&mut self, tiles: I, config: &PhysicsConfig) -> ContactFlags
    where
        I: IntoIterator<Item = &'a Tile>,
    {
        let whole = self.velocity.y.trunc();
        self.position.y += self.velocity.y;

        let flags = self.check_floor(tiles, config);
        if flags.contains(ContactFlags::SUPPORTED) {
            self.position.y -= whole;
            self.position.y += self.velocity.y;
        }

        self.velocity.y = self.velocity.y * config.vertical_damping - config.gravity;
        self.position.x += self.velocity.x;
        self.position.z += self.velocity.z;

        flags
    }
}
