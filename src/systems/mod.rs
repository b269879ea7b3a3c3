//! Application systems
//!
//! The window, the fixed-step simulation, and the renderer, each owned by the app.

mod render;
mod simulation;
mod window;

pub use render::{clear_color, RenderError, RenderSystem};
pub use simulation::{SimulationResult, SimulationSystem};
pub use window::{WindowError, WindowSystem};
