//! Player input handling
//!
//! This crate turns arrow-key and space-bar events into movement intents
//! for the hopping cube.

mod player_controller;

pub use player_controller::{PlayerController, PlayerIntent, DEFAULT_MOVE_SPEED};
