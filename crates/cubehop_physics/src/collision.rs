//! Contact reporting for the player/tile response
//!
//! The floor check does not compute penetration depths. It applies a handful
//! of fixed nudges and reports what happened through [`ContactFlags`].

use bitflags::bitflags;

bitflags! {
    /// What happened to the player during one floor check
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ContactFlags: u8 {
        /// The player overlaps at least one tile
        const SUPPORTED = 1 << 0;
        /// A tile pushed the player back along X
        const BLOCKED_X = 1 << 1;
        /// A tile pushed the player back along Z
        const BLOCKED_Z = 1 << 2;
        /// Vertical motion was undone and cancelled
        const LANDED = 1 << 3;
        /// The player picked up velocity from a moving tile
        const CARRIED = 1 << 4;
    }
}

impl ContactFlags {
    /// True if any horizontal push-back happened
    pub fn is_blocked(&self) -> bool {
        self.intersects(ContactFlags::BLOCKED_X | ContactFlags::BLOCKED_Z)
    }
}

/// Sign of a separation along one axis
///
/// Unlike [`f32::signum`], zero maps to zero so a player centered exactly on a
/// tile is not pushed in either direction.
#[inline]
pub fn axis_sign(delta: f32) -> f32 {
    if delta > 0.0 {
        1.0
    } else if delta < 0.0 {
        -1.0
    } else {
        0.0
    }
}
