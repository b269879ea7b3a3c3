//! Player controller for board movement
//!
//! Controls:
//! - Up/Down arrows: move along -X/+X
//! - Left/Right arrows: move along +Z/-Z
//! - Space: jump
//!
//! Movement is not additive. Pressing an arrow replaces the whole horizontal
//! velocity, so the cube only ever moves along one axis at a time. Releasing an
//! arrow stops motion on that arrow's axis even if another arrow on the same
//! axis is still held.

use std::collections::VecDeque;

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Default per-tick movement speed
pub const DEFAULT_MOVE_SPEED: f32 = 0.05;

/// A request for the simulation to change the player's motion
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayerIntent {
    /// Set horizontal velocity; `None` leaves that component alone
    SetHorizontal { x: Option<f32>, z: Option<f32> },
    /// Add the jump impulse
    Jump,
}

/// Converts key events into an ordered queue of [`PlayerIntent`]s
pub struct PlayerController {
    pending: VecDeque<PlayerIntent>,
    /// Per-tick speed applied by arrow keys
    pub move_speed: f32,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerController {
    pub fn new() -> Self {
        Self::with_move_speed(DEFAULT_MOVE_SPEED)
    }

    pub fn with_move_speed(move_speed: f32) -> Self {
        Self {
            pending: VecDeque::new(),
            move_speed,
        }
    }

    /// Process keyboard input
    ///
    /// Returns true if the key is a movement key. Auto-repeat events are
    /// consumed without producing intents.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState, repeat: bool) -> bool {
        let speed = self.move_speed;
        let intent = match (key, state) {
            (KeyCode::ArrowUp, ElementState::Pressed) => PlayerIntent::SetHorizontal {
                x: Some(-speed),
                z: Some(0.0),
            },
            (KeyCode::ArrowDown, ElementState::Pressed) => PlayerIntent::SetHorizontal {
                x: Some(speed),
                z: Some(0.0),
            },
            (KeyCode::ArrowLeft, ElementState::Pressed) => PlayerIntent::SetHorizontal {
                x: Some(0.0),
                z: Some(speed),
            },
            (KeyCode::ArrowRight, ElementState::Pressed) => PlayerIntent::SetHorizontal {
                x: Some(0.0),
                z: Some(-speed),
            },
            (KeyCode::ArrowUp | KeyCode::ArrowDown, ElementState::Released) => {
                PlayerIntent::SetHorizontal { x: Some(0.0), z: None }
            }
            (KeyCode::ArrowLeft | KeyCode::ArrowRight, ElementState::Released) => {
                PlayerIntent::SetHorizontal { x: None, z: Some(0.0) }
            }
            (KeyCode::Space, ElementState::Pressed) => PlayerIntent::Jump,
            (KeyCode::Space, ElementState::Released) => return true,
            _ => return false,
        };

        if !repeat {
            log::trace!("Player intent: {:?}", intent);
            self.pending.push_back(intent);
        }
        true
    }

    /// Whether any intents are waiting
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Take all pending intents in the order they arrived
    pub fn drain_intents(&mut self) -> impl Iterator<Item = PlayerIntent> + '_ {
        self.pending.drain(..)
    }

    /// Drop pending intents (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(controller: &mut PlayerController, key: KeyCode) {
        controller.process_keyboard(key, ElementState::Pressed, false);
    }

    fn release(controller: &mut PlayerController, key: KeyCode) {
        controller.process_keyboard(key, ElementState::Released, false);
    }

    fn drain(controller: &mut PlayerController) -> Vec<PlayerIntent> {
        controller.drain_intents().collect()
    }

    #[test]
    fn test_arrow_presses() {
        let mut controller = PlayerController::new();
        press(&mut controller, KeyCode::ArrowUp);
        press(&mut controller, KeyCode::ArrowDown);
        press(&mut controller, KeyCode::ArrowLeft);
        press(&mut controller, KeyCode::ArrowRight);

        assert_eq!(
            drain(&mut controller),
            vec![
                PlayerIntent::SetHorizontal { x: Some(-0.05), z: Some(0.0) },
                PlayerIntent::SetHorizontal { x: Some(0.05), z: Some(0.0) },
                PlayerIntent::SetHorizontal { x: Some(0.0), z: Some(0.05) },
                PlayerIntent::SetHorizontal { x: Some(0.0), z: Some(-0.05) },
            ]
        );
    }

    #[test]
    fn test_arrow_releases() {
        let mut controller = PlayerController::new();
        release(&mut controller, KeyCode::ArrowUp);
        release(&mut controller, KeyCode::ArrowDown);
        release(&mut controller, KeyCode::ArrowLeft);
        release(&mut controller, KeyCode::ArrowRight);

        assert_eq!(
            drain(&mut controller),
            vec![
                PlayerIntent::SetHorizontal { x: Some(0.0), z: None },
                PlayerIntent::SetHorizontal { x: Some(0.0), z: None },
                PlayerIntent::SetHorizontal { x: None, z: Some(0.0) },
                PlayerIntent::SetHorizontal { x: None, z: Some(0.0) },
            ]
        );
    }

    #[test]
    fn test_space_jumps_on_press_only() {
        let mut controller = PlayerController::new();
        assert!(controller.process_keyboard(KeyCode::Space, ElementState::Pressed, false));
        assert!(controller.process_keyboard(KeyCode::Space, ElementState::Released, false));
        assert_eq!(drain(&mut controller), vec![PlayerIntent::Jump]);
    }

    #[test]
    fn test_repeat_is_ignored() {
        let mut controller = PlayerController::new();
        press(&mut controller, KeyCode::Space);
        assert!(controller.process_keyboard(KeyCode::Space, ElementState::Pressed, true));
        assert!(controller.process_keyboard(KeyCode::ArrowUp, ElementState::Pressed, true));
        assert_eq!(drain(&mut controller), vec![PlayerIntent::Jump]);
    }

    #[test]
    fn test_unhandled_keys() {
        let mut controller = PlayerController::new();
        assert!(!controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed, false));
        assert!(!controller.process_keyboard(KeyCode::Escape, ElementState::Pressed, false));
        assert!(!controller.has_pending());
    }

    #[test]
    fn test_custom_speed() {
        let mut controller = PlayerController::with_move_speed(0.1);
        press(&mut controller, KeyCode::ArrowRight);
        assert_eq!(
            drain(&mut controller),
            vec![PlayerIntent::SetHorizontal { x: Some(0.0), z: Some(-0.1) }]
        );
    }

    #[test]
    fn test_drain_empties_queue() {
        let mut controller = PlayerController::new();
        press(&mut controller, KeyCode::ArrowLeft);
        assert!(controller.has_pending());
        let _ = drain(&mut controller);
        assert!(!controller.has_pending());

        press(&mut controller, KeyCode::ArrowLeft);
        controller.clear();
        assert!(!controller.has_pending());
    }
}
