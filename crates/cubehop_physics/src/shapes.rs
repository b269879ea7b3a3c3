//! Collision shapes
//!
//! Everything on the board is an axis-aligned cube, so one primitive is enough.

use cubehop_math::Vec3;

/// An axis-aligned cube defined by its center and half edge length
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cube {
    pub center: Vec3,
    pub half_size: f32,
}

impl Cube {
    /// Create a new cube at the given center
    pub fn new(center: Vec3, half_size: f32) -> Self {
        Self { center, half_size }
    }

    /// Minimum corner
    pub fn min(&self) -> Vec3 {
        self.center - Vec3::new(self.half_size, self.half_size, self.half_size)
    }

    /// Maximum corner
    pub fn max(&self) -> Vec3 {
        self.center + Vec3::new(self.half_size, self.half_size, self.half_size)
    }

    /// Check whether two cubes overlap
    ///
    /// Touching faces do not count: on every axis the center distance must be
    /// strictly less than the combined half sizes.
    pub fn overlaps(&self, other: &Cube) -> bool {
        let reach = self.half_size + other.half_size;
        let delta = (self.center - other.center).abs();
        delta.x < reach && delta.y < reach && delta.z < reach
    }
}
