//! Renderable instances - bridges GameWorld to GPU buffers
//!
//! Converts the world's tiles and player into per-instance model matrices for
//! the cube pipeline. Sliding blocks and the player pick up their spin angle
//! here; the physics never sees it.

use crate::pipeline::CubeInstance;
use cubehop_core::{GameWorld, TileMotion};
use cubehop_math::{mat4, Mat4, Vec3};

/// Model matrix for a cube: scale to size, spin about Y, then move into place
pub fn cube_model(center: Vec3, half_size: f32, spin_radians: f32) -> Mat4 {
    let scaled = mat4::scale(half_size);
    let model = if spin_radians != 0.0 {
        mat4::mul(mat4::rotation_y(spin_radians), scaled)
    } else {
        scaled
    };
    mat4::mul(mat4::translation(center), model)
}

/// Instances for one frame, grouped by mesh
#[derive(Clone, Debug, Default)]
pub struct FrameInstances {
    /// Instances of the player mesh
    pub player: Vec<CubeInstance>,
    /// Instances of the tile mesh
    pub tiles: Vec<CubeInstance>,
}

impl FrameInstances {
    /// Create empty instance lists
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect instances from a world
    pub fn from_world(world: &GameWorld) -> Self {
        let mut result = Self::new();
        result.rebuild(world);
        result
    }

    /// Refill from a world, keeping allocations
    pub fn rebuild(&mut self, world: &GameWorld) {
        self.clear();

        let hazard_spin = world.spin().hazards.radians();
        self.tiles.reserve(world.physics().tile_count());
        for (_, tile) in world.tiles() {
            let spin = match tile.motion {
                TileMotion::Slide(_) => hazard_spin,
                TileMotion::Static | TileMotion::Bob => 0.0,
            };
            self.tiles
                .push(CubeInstance::new(cube_model(tile.position, tile.half_size, spin)));
        }

        let player = world.player();
        self.player.push(CubeInstance::new(cube_model(
            player.position,
            player.half_size,
            world.spin().player.radians(),
        )));
    }

    /// Clear all instances
    pub fn clear(&mut self) {
        self.player.clear();
        self.tiles.clear();
    }

    /// Total number of instances
    pub fn instance_count(&self) -> usize {
        self.player.len() + self.tiles.len()
    }
}
