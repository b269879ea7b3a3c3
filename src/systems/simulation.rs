//! Game simulation system
//!
//! Manages the game loop simulation including:
//! - Delta time calculation
//! - Input → player intents
//! - Fixed-step world ticks

use std::time::Instant;
use cubehop_core::GameWorld;
use cubehop_input::{PlayerController, PlayerIntent};
use crate::config::PhysicsConfig;

/// Longest frame time fed to the accumulator, in seconds
const MAX_FRAME_TIME: f32 = 0.25;

/// Result of a simulation update
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimulationResult {
    /// Ticks run this frame
    pub ticks: u32,
    /// Whether the player respawned during any of them
    pub respawned: bool,
}

/// Runs the world at a fixed tick rate regardless of frame rate
///
/// Frame time accumulates and is consumed one tick at a time. Once
/// `max_ticks_per_frame` is reached the leftover time is dropped, so a long
/// stall slows the game down instead of fast-forwarding it.
pub struct SimulationSystem {
    last_frame: Instant,
    accumulator: f32,
    tick_duration: f32,
    max_ticks_per_frame: u32,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new(tick_rate: u32, max_ticks_per_frame: u32) -> Self {
        Self {
            last_frame: Instant::now(),
            accumulator: 0.0,
            tick_duration: 1.0 / tick_rate.max(1) as f32,
            max_ticks_per_frame: max_ticks_per_frame.max(1),
        }
    }

    /// Create from the physics section of the config
    pub fn from_config(config: &PhysicsConfig) -> Self {
        Self::new(config.tick_rate, config.max_ticks_per_frame)
    }

    /// Seconds per tick
    pub fn tick_duration(&self) -> f32 {
        self.tick_duration
    }

    /// Run one simulation frame using wall-clock time
    pub fn update(
        &mut self,
        world: &mut GameWorld,
        controller: &mut PlayerController,
    ) -> SimulationResult {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(dt, world, controller)
    }

    /// Run one simulation frame covering `dt` seconds
    ///
    /// Pending intents are applied first, then as many ticks as the
    /// accumulated time allows.
    pub fn advance(
        &mut self,
        dt: f32,
        world: &mut GameWorld,
        controller: &mut PlayerController,
    ) -> SimulationResult {
        for intent in controller.drain_intents() {
            apply_intent(world, intent);
        }

        self.accumulator += dt.clamp(0.0, MAX_FRAME_TIME);

        let mut result = SimulationResult::default();
        while self.accumulator >= self.tick_duration {
            if result.ticks == self.max_ticks_per_frame {
                log::debug!(
                    "Dropping {:.3}s of simulation time",
                    self.accumulator
                );
                self.accumulator = 0.0;
                break;
            }
            let report = world.tick();
            result.respawned |= report.respawned;
            result.ticks += 1;
            self.accumulator -= self.tick_duration;
        }

        result
    }

    /// Forget accumulated time (after a reset or a long pause)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_frame = Instant::now();
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::from_config(&PhysicsConfig::default())
    }
}

fn apply_intent(world: &mut GameWorld, intent: PlayerIntent) {
    match intent {
        PlayerIntent::SetHorizontal { x, z } => world.player_mut().set_horizontal(x, z),
        PlayerIntent::Jump => world.jump(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubehop_core::Level;
    use winit::event::ElementState;
    use winit::keyboard::KeyCode;

    fn world() -> GameWorld {
        GameWorld::from_level(
            &Level::default_layout(),
            cubehop_core::PhysicsConfig::default(),
            7,
        )
    }

    #[test]
    fn test_one_tick_per_step() {
        let mut sim = SimulationSystem::new(60, 5);
        let mut world = world();
        let mut controller = PlayerController::new();

        let step = sim.tick_duration();
        let result = sim.advance(step, &mut world, &mut controller);
        assert_eq!(result.ticks, 1);
        assert_eq!(world.ticks(), 1);
    }

    #[test]
    fn test_partial_steps_accumulate() {
        let mut sim = SimulationSystem::new(60, 5);
        let mut world = world();
        let mut controller = PlayerController::new();

        let half = sim.tick_duration() * 0.5;
        assert_eq!(sim.advance(half, &mut world, &mut controller).ticks, 0);
        assert_eq!(sim.advance(half, &mut world, &mut controller).ticks, 1);
    }

    #[test]
    fn test_ticks_capped_per_frame() {
        let mut sim = SimulationSystem::new(60, 5);
        let mut world = world();
        let mut controller = PlayerController::new();

        let result = sim.advance(10.0, &mut world, &mut controller);
        assert_eq!(result.ticks, 5);
        // Leftover time was dropped
        assert_eq!(sim.advance(0.0, &mut world, &mut controller).ticks, 0);
    }

    #[test]
    fn test_intents_reach_player() {
        let mut sim = SimulationSystem::new(60, 5);
        let mut world = world();
        let mut controller = PlayerController::new();

        controller.process_keyboard(KeyCode::ArrowUp, ElementState::Pressed, false);
        sim.advance(0.0, &mut world, &mut controller);
        assert_eq!(world.player().velocity.x, -controller.move_speed);
        assert_eq!(world.player().velocity.z, 0.0);
        assert!(!controller.has_pending());
    }

    #[test]
    fn test_jump_intent() {
        let mut sim = SimulationSystem::new(60, 5);
        let mut world = world();
        let mut controller = PlayerController::new();

        let before = world.player().velocity.y;
        controller.process_keyboard(KeyCode::Space, ElementState::Pressed, false);
        sim.advance(0.0, &mut world, &mut controller);
        assert!(world.player().velocity.y > before);
    }

    #[test]
    fn test_default_construction() {
        let sim = SimulationSystem::default();
        assert!((sim.tick_duration() - 1.0 / 60.0).abs() < 1e-6);
        assert!(sim.last_frame.elapsed().as_millis() < 100);
    }
}
