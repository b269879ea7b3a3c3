//! Cube Hop - a small 3D platformer
//!
//! Application-level modules shared by the binary and the integration tests.

pub mod config;
pub mod input;
pub mod systems;
