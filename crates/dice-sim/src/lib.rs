//! Roll simulation engine for DICE.
//!
//! Owns the roll state machine, draws faces at a fixed tick rate,
//! and produces `RollSnapshot`s for the presentation layer.

pub mod engine;
pub mod observer;
pub mod scheduler;
pub mod sound;

pub use dice_core as core;
pub use engine::RollSimulator;
