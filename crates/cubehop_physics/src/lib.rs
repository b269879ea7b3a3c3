//! Physics simulation for Cube Hop
//!
//! This crate provides the per-tick simulation of the board, including:
//! - Axis-aligned cube colliders and overlap tests
//! - Floor tiles, bobbing tiles and sliding blocks
//! - Player gravity, jumping and floor/wall response
//! - A physics world that steps everything in a fixed order

pub mod body;
pub mod collision;
pub mod player;
pub mod shapes;
pub mod world;

// Re-export commonly used types
pub use body::{SlideDirection, Tile, TileKey, TileMotion};
pub use collision::{axis_sign, ContactFlags};
pub use player::{PlayerBody, DEFAULT_PLAYER_HALF_SIZE};
pub use shapes::Cube;
pub use world::{PhysicsConfig, PhysicsWorld, StepReport};
