//! Core types for Cube Hop
//!
//! This crate provides the game-level types built on top of the physics:
//!
//! - [`Level`] - Loadable/saveable board layout
//! - [`LevelValidator`] - Static checks on a level
//! - [`GameWorld`] - The playable board, built from a level
//! - [`SpinState`] - Cosmetic rotation of the player and sliding blocks

mod level;
mod level_validator;
mod spin;
mod world;

pub use level::{Cell, GridBounds, Level, LevelLoadError, LevelSaveError, SliderSpec};
pub use level_validator::{LevelValidator, ValidationError, MAX_GRID_CELLS};
pub use spin::{SpinChannel, SpinState, SpinTarget};
pub use world::{GameWorld, DEFAULT_SPIN_INCREMENT};

// Re-export commonly used types for convenience
pub use cubehop_math::Vec3;
pub use cubehop_physics::{
    ContactFlags, PhysicsConfig, PhysicsWorld, PlayerBody, SlideDirection, StepReport, Tile,
    TileKey, TileMotion,
};
