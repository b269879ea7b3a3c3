//! Cube Hop Rendering Library
//!
//! This crate provides the wgpu-based rendering of the board: every tile and
//! the player are unit cubes drawn with one instanced pipeline.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::ChaseCamera`] - Camera that follows the player
//! - [`pipeline::CubePipeline`] - Instanced cube rendering with depth testing
//! - [`renderable::FrameInstances`] - Converts a GameWorld to instance lists

pub mod camera;
pub mod context;
pub mod geometry;
pub mod pipeline;
pub mod renderable;

// Re-export core types for convenience
pub use cubehop_core::{GameWorld, Tile, TileMotion, Vec3};

pub use camera::{CameraMode, ChaseCamera, Projection};
pub use renderable::FrameInstances;
