//! Physics world and simulation

use crate::body::{Tile, TileKey, TileMotion};
use crate::collision::ContactFlags;
use crate::player::PlayerBody;
use cubehop_math::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use slotmap::SlotMap;

/// Configuration for the physics simulation
///
/// Every value is per tick. The defaults reproduce the board's feel at 60 ticks
/// per second.
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsConfig {
    /// Subtracted from vertical velocity each tick
    pub gravity: f32,
    /// Vertical velocity multiplier applied before gravity
    pub vertical_damping: f32,
    /// Added to vertical velocity by a jump
    pub jump_impulse: f32,
    /// Jumps are ignored while vertical velocity is at or above this
    pub jump_ceiling: f32,
    /// Max height difference for a tile to push the player sideways
    pub side_band: f32,
    /// Max height difference for a tile to stop vertical motion
    pub landing_band: f32,
    /// Distance of one sideways push
    pub push_out: f32,
    /// Player speed below which a moving tile carries the player
    pub carry_threshold: f32,
    /// Vertical speed of bobbing tiles
    pub bob_speed: f32,
    /// How far bobbing tiles travel from their home height
    pub bob_amplitude: f32,
    /// Speed of sliding blocks
    pub slide_speed: f32,
    /// Board edge that sliding blocks turn around at
    pub slide_limit: f32,
    /// The player respawns after falling below this height
    pub kill_y: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.02,
            vertical_damping: 0.95,
            jump_impulse: 0.3,
            jump_ceiling: 1.0,
            side_band: 0.5,
            landing_band: 1.0,
            push_out: 0.05,
            carry_threshold: 0.01,
            bob_speed: 0.005,
            bob_amplitude: 0.8,
            slide_speed: 0.025,
            slide_limit: 5.0,
            kill_y: -20.0,
        }
    }
}

/// What happened during one tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Contacts from the player's floor check
    pub contacts: ContactFlags,
    /// Whether the player fell off the board and was respawned
    pub respawned: bool,
}

/// The physics world containing the tiles and the player
pub struct PhysicsWorld {
    /// All tiles (using generational keys)
    tiles: SlotMap<TileKey, Tile>,
    /// The player
    player: PlayerBody,
    /// Source of bobbing directions
    rng: StdRng,
    /// Physics configuration
    pub config: PhysicsConfig,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            tiles: SlotMap::with_key(),
            player: PlayerBody::new(Vec3::ZERO),
            rng: StdRng::seed_from_u64(0),
            config,
        }
    }

    /// Reseed the random source used for bobbing directions
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Replace the player
    pub fn with_player(mut self, player: PlayerBody) -> Self {
        self.player = player;
        self
    }

    /// Add a tile to the world, returning its key
    pub fn add_tile(&mut self, tile: Tile) -> TileKey {
        self.tiles.insert(tile)
    }

    /// Remove a tile from the world
    pub fn remove_tile(&mut self, key: TileKey) -> Option<Tile> {
        self.tiles.remove(key)
    }

    /// Get a reference to a tile
    pub fn get_tile(&self, key: TileKey) -> Option<&Tile> {
        self.tiles.get(key)
    }

    /// Get a mutable reference to a tile
    pub fn get_tile_mut(&mut self, key: TileKey) -> Option<&mut Tile> {
        self.tiles.get_mut(key)
    }

    /// Get the number of tiles in the world
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Iterate over all tiles with their keys
    pub fn tiles(&self) -> impl Iterator<Item = (TileKey, &Tile)> {
        self.tiles.iter()
    }

    /// Get the player
    pub fn player(&self) -> &PlayerBody {
        &self.player
    }

    /// Get the player mutably (input writes velocity here)
    pub fn player_mut(&mut self) -> &mut PlayerBody {
        &mut self.player
    }

    /// Step the simulation by one tick
    ///
    /// Tiles move before the player so the floor check sees this tick's tile
    /// positions and velocities.
    pub fn step(&mut self) -> StepReport {
        // Bobbing floor first, then the sliding blocks
        for tile in self.tiles.values_mut() {
            if tile.motion == TileMotion::Bob {
                tile.bob(&self.config, &mut self.rng);
            }
        }
        for tile in self.tiles.values_mut() {
            if matches!(tile.motion, TileMotion::Slide(_)) {
                tile.slide(&self.config);
            }
        }

        let contacts = self.player.apply_gravity(self.tiles.values(), &self.config);

        let respawned = self.player.position.y < self.config.kill_y;
        if respawned {
            log::debug!(
                "Player fell below {} at ({:.2}, {:.2}), respawning",
                self.config.kill_y,
                self.player.position.x,
                self.player.position.z
            );
            self.player.respawn();
        }

        StepReport { contacts, respawned }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::SlideDirection;

    #[test]
    fn test_physics_config_default() {
        let config = PhysicsConfig::default();
        assert_eq!(config.gravity, 0.02);
        assert_eq!(config.vertical_damping, 0.95);
        assert_eq!(config.kill_y, -20.0);
    }

    #[test]
    fn test_physics_config_custom() {
        let config = PhysicsConfig {
            gravity: 0.05,
            ..PhysicsConfig::default()
        };
        assert_eq!(config.gravity, 0.05);
        assert_eq!(config.jump_impulse, 0.3);
    }

    /// Helper to create a world with a single floor tile under the origin
    fn world_with_floor() -> PhysicsWorld {
        let mut world = PhysicsWorld::new();
        world.add_tile(Tile::new(Vec3::new(0.0, -2.0, 0.0), 0.5));
        world
    }

    #[test]
    fn test_world_add_tile() {
        let mut world = PhysicsWorld::new();
        assert_eq!(world.tile_count(), 0);

        let key = world.add_tile(Tile::new(Vec3::new(1.0, -2.0, 1.0), 0.5));
        assert!(world.get_tile(key).is_some());
        assert_eq!(world.tile_count(), 1);
    }

    #[test]
    fn test_world_remove_tile() {
        let mut world = PhysicsWorld::new();
        let key = world.add_tile(Tile::new(Vec3::ZERO, 0.5));

        let removed = world.remove_tile(key);
        assert!(removed.is_some());
        assert_eq!(world.tile_count(), 0);

        // Stale key no longer resolves
        assert!(world.get_tile(key).is_none());
        assert!(world.remove_tile(key).is_none());
    }

    #[test]
    fn test_world_get_tile_mut() {
        let mut world = PhysicsWorld::new();
        let key = world.add_tile(Tile::new(Vec3::ZERO, 0.5));

        if let Some(tile) = world.get_tile_mut(key) {
            tile.position = Vec3::new(0.0, 1.0, 0.0);
        }
        let tile = world.get_tile(key).expect("Tile should exist");
        assert_eq!(tile.position, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_player_lands_and_stays_supported() {
        let mut world = world_with_floor();

        let mut supported_ticks = 0;
        for i in 0..400 {
            let report = world.step();
            assert!(!report.respawned);
            if i >= 300 && report.contacts.contains(ContactFlags::SUPPORTED) {
                supported_ticks += 1;
            }
        }

        let y = world.player().position.y;
        assert!((y - (-1.3)).abs() < 0.05, "player ended at {}", y);
        // Resting contact keeps re-triggering while gravity pulls down
        assert!(supported_ticks > 0);
    }

    #[test]
    fn test_player_falls_through_hole_and_respawns() {
        let mut world = PhysicsWorld::new();
        // Tile off to the side, nothing under the player
        world.add_tile(Tile::new(Vec3::new(3.0, -2.0, 3.0), 0.5));

        let mut respawns = 0;
        for _ in 0..200 {
            let report = world.step();
            if report.respawned {
                respawns += 1;
                assert_eq!(world.player().position, world.player().spawn);
                assert_eq!(world.player().velocity, Vec3::ZERO);
            }
        }
        assert!(respawns >= 1);
    }

    #[test]
    fn test_walking_into_block() {
        let mut world = world_with_floor();
        world.add_tile(Tile::new(Vec3::new(1.0, -1.0, 0.0), 0.5));
        world.player_mut().position = Vec3::new(0.2, -1.35, 0.0);
        world.player_mut().set_horizontal(Some(0.05), None);

        let mut blocked = false;
        for _ in 0..20 {
            let report = world.step();
            blocked |= report.contacts.contains(ContactFlags::BLOCKED_X);
        }

        assert!(blocked);
        assert_eq!(world.player().velocity.x, 0.0);
        assert!(world.player().position.x < 0.36, "x = {}", world.player().position.x);
    }

    #[test]
    fn test_jump_from_floor() {
        let mut world = world_with_floor();
        for _ in 0..300 {
            world.step();
        }
        let rest_y = world.player().position.y;

        let config = world.config.clone();
        world.player_mut().jump(&config);
        let mut peak = rest_y;
        for _ in 0..30 {
            world.step();
            peak = peak.max(world.player().position.y);
        }
        assert!(peak > rest_y + 0.5, "peak {} rest {}", peak, rest_y);
    }

    #[test]
    fn test_moving_tiles_advance_in_step() {
        let mut world = PhysicsWorld::new().with_seed(3);
        let bob = world.add_tile(Tile::bobbing(Vec3::new(-5.0, -2.0, 3.0), 0.5));
        let slide = world.add_tile(Tile::sliding(
            Vec3::new(4.0, -1.0, -3.0),
            0.5,
            SlideDirection::TowardPosZ,
        ));
        let fixed = world.add_tile(Tile::new(Vec3::new(-3.0, -2.0, -3.0), 0.5));

        for _ in 0..10 {
            world.step();
        }

        let bob = world.get_tile(bob).expect("bobbing tile");
        assert_ne!(bob.position.y, -2.0);
        let slide = world.get_tile(slide).expect("sliding tile");
        assert_ne!(slide.position.z, -3.0);
        assert_eq!(slide.position.x, 4.0);
        let fixed = world.get_tile(fixed).expect("static tile");
        assert_eq!(fixed.position, fixed.home);
    }

    #[test]
    fn test_same_seed_same_motion() {
        let build = || {
            let mut world = PhysicsWorld::new().with_seed(99);
            let key = world.add_tile(Tile::bobbing(Vec3::new(0.0, -2.0, 0.0), 0.5));
            for _ in 0..50 {
                world.step();
            }
            world.get_tile(key).map(|t| t.position.y)
        };
        assert_eq!(build(), build());
    }
}
