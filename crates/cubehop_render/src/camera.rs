//! Chase camera
//!
//! The camera never rotates on its own. It sits at a fixed offset from the
//! player, looks at the player with +Y up, and switches between two offsets.

use cubehop_math::{mat4, Mat4, Vec3};

/// Which offset the camera uses
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraMode {
    /// Diagonal view from above and behind
    #[default]
    Follow,
    /// Nearly straight down
    Overhead,
}

impl CameraMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Follow => CameraMode::Overhead,
            CameraMode::Overhead => CameraMode::Follow,
        }
    }

    /// Short name for display
    pub fn name(&self) -> &'static str {
        match self {
            CameraMode::Follow => "follow",
            CameraMode::Overhead => "overhead",
        }
    }
}

/// Projection kind
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    /// Orthographic box of `half_extent` on each side of the view center,
    /// widened horizontally to match the aspect ratio
    Orthographic { half_extent: f32 },
    /// Perspective with a vertical field of view in radians
    Perspective { fov_y: f32 },
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Orthographic { half_extent: 4.0 }
    }
}

/// Camera that follows the player
#[derive(Clone, Debug)]
pub struct ChaseCamera {
    pub mode: CameraMode,
    pub projection: Projection,
    /// Eye offset from the player in follow mode
    pub follow_offset: Vec3,
    /// Eye offset from the player in overhead mode
    pub overhead_offset: Vec3,
    pub near: f32,
    pub far: f32,
    target: Vec3,
}

impl Default for ChaseCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl ChaseCamera {
    pub fn new() -> Self {
        Self {
            mode: CameraMode::Follow,
            projection: Projection::default(),
            follow_offset: Vec3::new(2.0, 2.0, 2.0),
            overhead_offset: Vec3::new(0.1, 3.0, 0.1),
            near: 0.1,
            far: 500.0,
            target: Vec3::ZERO,
        }
    }

    /// Set the projection
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Set both eye offsets
    pub fn with_offsets(mut self, follow: Vec3, overhead: Vec3) -> Self {
        self.follow_offset = follow;
        self.overhead_offset = overhead;
        self
    }

    /// Set the clip planes
    pub fn with_clip(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Set the starting mode
    pub fn with_mode(mut self, mode: CameraMode) -> Self {
        self.mode = mode;
        self
    }

    /// Switch between follow and overhead
    pub fn toggle_mode(&mut self) -> CameraMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// Track the player position
    pub fn follow(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Point the camera looks at
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Current eye position
    pub fn eye(&self) -> Vec3 {
        let offset = match self.mode {
            CameraMode::Follow => self.follow_offset,
            CameraMode::Overhead => self.overhead_offset,
        };
        self.target + offset
    }

    /// World-to-view matrix
    pub fn view_matrix(&self) -> Mat4 {
        mat4::look_at(self.eye(), self.target, Vec3::Y)
    }

    /// View-to-clip matrix for the given aspect ratio (width / height)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        match self.projection {
            Projection::Orthographic { half_extent } => {
                let half_w = half_extent * aspect;
                mat4::orthographic(-half_w, half_w, -half_extent, half_extent, self.near, self.far)
            }
            Projection::Perspective { fov_y } => {
                mat4::perspective(fov_y, aspect, self.near, self.far)
            }
        }
    }

    /// Combined projection * view
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        mat4::mul(self.projection_matrix(aspect), self.view_matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubehop_math::mat4::transform_point;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_follow_eye() {
        let mut camera = ChaseCamera::new();
        camera.follow(Vec3::new(1.0, -1.5, -2.0));
        assert_eq!(camera.eye(), Vec3::new(3.0, 0.5, 0.0));
    }

    #[test]
    fn test_toggle_mode() {
        let mut camera = ChaseCamera::new();
        assert_eq!(camera.toggle_mode(), CameraMode::Overhead);
        assert_eq!(camera.eye(), Vec3::new(0.1, 3.0, 0.1));
        assert_eq!(camera.toggle_mode(), CameraMode::Follow);
    }

    #[test]
    fn test_target_projects_to_center() {
        let mut camera = ChaseCamera::new();
        camera.follow(Vec3::new(2.0, -1.3, 3.0));

        for _ in 0..2 {
            let clip = transform_point(camera.view_projection(1.0), camera.target());
            assert!(clip.x.abs() < EPSILON, "x = {}", clip.x);
            assert!(clip.y.abs() < EPSILON, "y = {}", clip.y);
            assert!(clip.z > 0.0 && clip.z < 1.0);
            camera.toggle_mode();
        }
    }

    #[test]
    fn test_orthographic_aspect_widens_horizontally() {
        let camera = ChaseCamera::new();
        let square = camera.projection_matrix(1.0);
        let wide = camera.projection_matrix(2.0);
        assert!((square[0][0] - 0.25).abs() < EPSILON);
        assert!((wide[0][0] - 0.125).abs() < EPSILON);
        assert_eq!(square[1][1], wide[1][1]);
    }

    #[test]
    fn test_perspective_projection() {
        let camera = ChaseCamera::new().with_projection(Projection::Perspective {
            fov_y: std::f32::consts::FRAC_PI_2,
        });
        let proj = camera.projection_matrix(1.0);
        assert!((proj[1][1] - 1.0).abs() < EPSILON);
        assert_eq!(proj[2][3], -1.0);
    }
}
