//! Mathematics for Cube Hop
//!
//! This crate provides the small set of vector and matrix types the game needs.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Mat4`] - 4x4 column-major matrix (view, projection and model transforms)

mod vec3;
pub mod mat4;

pub use vec3::Vec3;
pub use mat4::Mat4;
