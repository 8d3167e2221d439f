//! DICE terminal application.
//!
//! This crate wires the roll simulator to a real-time loop thread, a side
//! menu, a terminal renderer and a bell sound cue.

pub mod actions;
pub mod error;
pub mod game_loop;
pub mod menu;
pub mod render;
pub mod sound;
pub mod state;

pub use dice_core as core;
pub use error::AppError;
