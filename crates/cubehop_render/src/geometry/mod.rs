//! Mesh data for the board

pub mod cube;

pub use cube::{cube_vertices, CUBE_POSITIONS, CUBE_VERTEX_COUNT, PLAYER_PALETTE, TILE_PALETTE};
