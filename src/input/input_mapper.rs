//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard and mouse input to high-level actions like Exit, ToggleCamera, etc.
//! Movement keys (arrows, Space) are NOT mapped here - they go directly to PlayerController.

use cubehop_core::SpinTarget;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Actions triggered by special input (not movement)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape or Q)
    Exit,
    /// Switch between follow and overhead camera (V key)
    ToggleCamera,
    /// Reverse a spin direction (mouse button release)
    ReverseSpin(SpinTarget),
    /// Start or stop a spin (P / C key release)
    ToggleSpin(SpinTarget),
    /// Put the player back at the spawn point (R key)
    ResetPlayer,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
}

/// Maps raw input events to semantic actions
///
/// Movement keys (arrows, Space) are NOT mapped here - they go directly
/// to the PlayerController. This mapper handles "special" keys only.
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Most actions fire on press; the spin toggles fire on release.
    /// Auto-repeat presses are ignored.
    pub fn map_keyboard(key: KeyCode, state: ElementState, repeat: bool) -> Option<InputAction> {
        match state {
            ElementState::Pressed if !repeat => match key {
                KeyCode::Escape | KeyCode::KeyQ => Some(InputAction::Exit),
                KeyCode::KeyV => Some(InputAction::ToggleCamera),
                KeyCode::KeyR => Some(InputAction::ResetPlayer),
                KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
                _ => None,
            },
            ElementState::Released => match key {
                KeyCode::KeyP => Some(InputAction::ToggleSpin(SpinTarget::Player)),
                KeyCode::KeyC => Some(InputAction::ToggleSpin(SpinTarget::Hazards)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Map mouse button to an action
    ///
    /// Left release reverses the player spin, right release the hazard spin
    pub fn map_mouse_button(button: MouseButton, state: ElementState) -> Option<InputAction> {
        if state != ElementState::Released {
            return None;
        }

        match button {
            MouseButton::Left => Some(InputAction::ReverseSpin(SpinTarget::Player)),
            MouseButton::Right => Some(InputAction::ReverseSpin(SpinTarget::Hazards)),
            _ => None,
        }
    }
}
