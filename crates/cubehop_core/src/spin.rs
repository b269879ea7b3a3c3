//! Cosmetic spin state
//!
//! The player cube and the sliding blocks can spin about the vertical axis.
//! Spinning is purely visual; colliders stay axis-aligned.

/// One independently controlled rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinChannel {
    /// Current angle in degrees, kept in [0, 360)
    pub angle: f32,
    /// +1 or -1
    pub direction: f32,
    /// Whether the angle advances
    pub enabled: bool,
}

impl Default for SpinChannel {
    fn default() -> Self {
        Self {
            angle: 0.0,
            direction: 1.0,
            enabled: true,
        }
    }
}

impl SpinChannel {
    /// Flip the rotation direction
    pub fn reverse(&mut self) {
        self.direction = -self.direction;
    }

    /// Start or stop the rotation
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Advance by one tick
    pub fn advance(&mut self, increment: f32) {
        if self.enabled {
            self.angle = (self.angle + increment * self.direction).rem_euclid(360.0);
        }
    }

    /// Current angle in radians
    pub fn radians(&self) -> f32 {
        self.angle.to_radians()
    }
}

/// Which spin channel an action targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpinTarget {
    /// The player cube
    Player,
    /// The sliding blocks
    Hazards,
}

/// Both spin channels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpinState {
    pub player: SpinChannel,
    pub hazards: SpinChannel,
}

impl SpinState {
    /// Get a channel by target
    pub fn channel(&self, target: SpinTarget) -> &SpinChannel {
        match target {
            SpinTarget::Player => &self.player,
            SpinTarget::Hazards => &self.hazards,
        }
    }

    /// Get a channel mutably by target
    pub fn channel_mut(&mut self, target: SpinTarget) -> &mut SpinChannel {
        match target {
            SpinTarget::Player => &mut self.player,
            SpinTarget::Hazards => &mut self.hazards,
        }
    }

    /// Advance both channels by one tick
    pub fn advance(&mut self, increment: f32) {
        self.player.advance(increment);
        self.hazards.advance(increment);
    }
}
