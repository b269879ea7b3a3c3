//! Game world
//!
//! The GameWorld owns the physics simulation built from a [`Level`] plus the
//! cosmetic spin state, and advances both one tick at a time.

use crate::level::Level;
use crate::spin::SpinState;
use cubehop_math::Vec3;
use cubehop_physics::{
    PhysicsConfig, PhysicsWorld, PlayerBody, StepReport, Tile, TileKey, TileMotion,
};

/// Default spin per tick, in degrees
pub const DEFAULT_SPIN_INCREMENT: f32 = 1.0;

/// The playable board
pub struct GameWorld {
    /// Level name (for display/debugging)
    name: String,
    physics: PhysicsWorld,
    spin: SpinState,
    spin_increment: f32,
    /// Ticks since creation
    ticks: u64,
}

impl GameWorld {
    /// Build a world from a level
    ///
    /// Every non-hole cell gets a tile at `(x, floor_y, z)`. Sliding blocks sit
    /// at `obstacle_y` instead.
    pub fn from_level(level: &Level, config: PhysicsConfig, seed: u64) -> Self {
        let (sx, sy, sz) = level.player_spawn;
        let player = PlayerBody::with_half_size(Vec3::new(sx, sy, sz), level.player_half_size);
        let mut physics = PhysicsWorld::with_config(config)
            .with_seed(seed)
            .with_player(player);

        for (x, z) in level.tile_cells() {
            let (fx, fz) = (x as f32, z as f32);
            let tile = if let Some(direction) = level.slider_at((x, z)) {
                Tile::sliding(Vec3::new(fx, level.obstacle_y, fz), level.tile_half_size, direction)
            } else if level.is_bobbing((x, z)) {
                Tile::bobbing(Vec3::new(fx, level.floor_y, fz), level.tile_half_size)
            } else {
                Tile::new(Vec3::new(fx, level.floor_y, fz), level.tile_half_size)
            };
            physics.add_tile(tile);
        }

        log::info!(
            "Built level '{}' with {} tiles",
            level.name,
            physics.tile_count()
        );

        Self {
            name: level.name.clone(),
            physics,
            spin: SpinState::default(),
            spin_increment: DEFAULT_SPIN_INCREMENT,
            ticks: 0,
        }
    }

    /// Set the spin per tick, in degrees
    pub fn with_spin_increment(mut self, increment: f32) -> Self {
        self.spin_increment = increment;
        self
    }

    /// Advance the world by one tick
    pub fn tick(&mut self) -> StepReport {
        let report = self.physics.step();
        if report.respawned {
            log::debug!("Player respawned at tick {}", self.ticks);
        }

        self.spin.advance(self.spin_increment);
        self.ticks += 1;
        report
    }

    /// Put the player back at the spawn point
    pub fn reset_player(&mut self) {
        self.physics.player_mut().respawn();
        log::info!("Player reset to spawn");
    }

    /// Level name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of ticks simulated so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Get the physics world
    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    /// Get the physics world mutably
    pub fn physics_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.physics
    }

    /// Get the player
    pub fn player(&self) -> &PlayerBody {
        self.physics.player()
    }

    /// Get the player mutably
    pub fn player_mut(&mut self) -> &mut PlayerBody {
        self.physics.player_mut()
    }

    /// Jump using the world's physics constants
    pub fn jump(&mut self) {
        let config = self.physics.config.clone();
        self.physics.player_mut().jump(&config);
    }

    /// Iterate over all tiles with their keys
    pub fn tiles(&self) -> impl Iterator<Item = (TileKey, &Tile)> {
        self.physics.tiles()
    }

    /// Count tiles with a given kind of motion
    pub fn count_tiles(&self, pred: impl Fn(&TileMotion) -> bool) -> usize {
        self.physics.tiles().filter(|(_, t)| pred(&t.motion)).count()
    }

    /// Get the spin state
    pub fn spin(&self) -> &SpinState {
        &self.spin
    }

    /// Get the spin state mutably
    pub fn spin_mut(&mut self) -> &mut SpinState {
        &mut self.spin
    }
}
