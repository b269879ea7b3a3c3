//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`CUBEHOP_SECTION__KEY`)

use cubehop_core::{Level, LevelValidator, Vec3};
use cubehop_render::{CameraMode, ChaseCamera, Projection};
use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Physics configuration
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Spin configuration
    #[serde(default)]
    pub spin: SpinConfig,
    /// Level configuration
    #[serde(default)]
    pub level: LevelConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`CUBEHOP_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // CUBEHOP_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("CUBEHOP_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Per-tick physics constants for the simulation
    pub fn to_physics_config(&self) -> cubehop_physics::PhysicsConfig {
        self.physics.to_physics_config()
    }

    /// Load the configured level
    ///
    /// A missing, unreadable or invalid level file falls back to the built-in
    /// layout with a warning.
    pub fn load_level(&self) -> Level {
        let level = match Level::load(&self.level.path) {
            Ok(level) => level,
            Err(e) => {
                log::warn!(
                    "Failed to load level '{}': {}. Using built-in layout.",
                    self.level.path,
                    e
                );
                return Level::default_layout();
            }
        };

        if let Err(errors) = LevelValidator::validate_or_error(&level) {
            for error in &errors {
                log::warn!("Level '{}': {}", self.level.path, error);
            }
            log::warn!(
                "Level '{}' has {} problem(s). Using built-in layout.",
                self.level.path,
                errors.len()
            );
            return Level::default_layout();
        }

        log::info!("Loaded level '{}' from {}", level.name, self.level.path);
        level
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Cube Hop".to_string(),
            width: 1000,
            height: 1000,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Projection used by the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    Orthographic,
    Perspective,
}

/// Camera mode at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartMode {
    Follow,
    Overhead,
}

impl From<StartMode> for CameraMode {
    fn from(mode: StartMode) -> Self {
        match mode {
            StartMode::Follow => CameraMode::Follow,
            StartMode::Overhead => CameraMode::Overhead,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Orthographic or perspective
    pub projection: ProjectionKind,
    /// Half the visible height for the orthographic projection
    pub ortho_half_extent: f32,
    /// Vertical field of view in degrees (perspective only)
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Eye offset from the player in follow mode [x, y, z]
    pub follow_offset: [f32; 3],
    /// Eye offset from the player in overhead mode [x, y, z]
    pub overhead_offset: [f32; 3],
    /// Mode at startup
    pub start_mode: StartMode,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionKind::Orthographic,
            ortho_half_extent: 4.0,
            fov: 90.0,
            near: 0.1,
            far: 500.0,
            follow_offset: [2.0, 2.0, 2.0],
            overhead_offset: [0.1, 3.0, 0.1],
            start_mode: StartMode::Follow,
        }
    }
}

impl CameraConfig {
    /// Build the chase camera this config describes
    pub fn to_chase_camera(&self) -> ChaseCamera {
        let projection = match self.projection {
            ProjectionKind::Orthographic => Projection::Orthographic {
                half_extent: self.ortho_half_extent,
            },
            ProjectionKind::Perspective => Projection::Perspective {
                fov_y: self.fov.to_radians(),
            },
        };

        ChaseCamera::new()
            .with_projection(projection)
            .with_offsets(
                Vec3::from_array(self.follow_offset),
                Vec3::from_array(self.overhead_offset),
            )
            .with_clip(self.near, self.far)
            .with_mode(self.start_mode.into())
    }
}

/// Physics configuration
///
/// All motion constants are per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Most ticks run in a single frame
    pub max_ticks_per_frame: u32,
    /// Subtracted from vertical velocity each tick
    pub gravity: f32,
    /// Vertical velocity multiplier
    pub vertical_damping: f32,
    /// Vertical velocity added by a jump
    pub jump_impulse: f32,
    /// Jumps are ignored at or above this vertical velocity
    pub jump_ceiling: f32,
    /// Height band in which tiles push the player sideways
    pub side_band: f32,
    /// Height band in which tiles stop vertical motion
    pub landing_band: f32,
    /// Sideways push distance
    pub push_out: f32,
    /// Player speed below which moving tiles carry the player
    pub carry_threshold: f32,
    /// Bobbing tile speed
    pub bob_speed: f32,
    /// Bobbing tile travel from home
    pub bob_amplitude: f32,
    /// Sliding block speed
    pub slide_speed: f32,
    /// Sliding block turnaround distance
    pub slide_limit: f32,
    /// Respawn height
    pub kill_y: f32,
    /// Seed for bobbing tile randomness
    pub seed: u64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        let physics = cubehop_physics::PhysicsConfig::default();
        Self {
            tick_rate: 60,
            max_ticks_per_frame: 5,
            gravity: physics.gravity,
            vertical_damping: physics.vertical_damping,
            jump_impulse: physics.jump_impulse,
            jump_ceiling: physics.jump_ceiling,
            side_band: physics.side_band,
            landing_band: physics.landing_band,
            push_out: physics.push_out,
            carry_threshold: physics.carry_threshold,
            bob_speed: physics.bob_speed,
            bob_amplitude: physics.bob_amplitude,
            slide_speed: physics.slide_speed,
            slide_limit: physics.slide_limit,
            kill_y: physics.kill_y,
            seed: 42,
        }
    }
}

impl PhysicsConfig {
    /// Convert to the physics crate's config
    pub fn to_physics_config(&self) -> cubehop_physics::PhysicsConfig {
        cubehop_physics::PhysicsConfig {
            gravity: self.gravity,
            vertical_damping: self.vertical_damping,
            jump_impulse: self.jump_impulse,
            jump_ceiling: self.jump_ceiling,
            side_band: self.side_band,
            landing_band: self.landing_band,
            push_out: self.push_out,
            carry_threshold: self.carry_threshold,
            bob_speed: self.bob_speed,
            bob_amplitude: self.bob_amplitude,
            slide_speed: self.slide_speed,
            slide_limit: self.slide_limit,
            kill_y: self.kill_y,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Horizontal speed set by the arrow keys (units per tick)
    pub move_speed: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            move_speed: cubehop_input::DEFAULT_MOVE_SPEED,
        }
    }
}

/// Spin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    /// Degrees per tick
    pub increment: f32,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            increment: cubehop_core::DEFAULT_SPIN_INCREMENT,
        }
    }
}

/// Level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Path to a RON level file
    pub path: String,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            path: "levels/default.ron".to_string(),
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.3, 0.3, 0.3, 0.0],
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
