//! Input handling module
//!
//! Maps raw events to semantic actions. Arrow keys and space belong to
//! `cubehop_input::PlayerController`.

mod input_mapper;

pub use input_mapper::{InputMapper, InputAction};
