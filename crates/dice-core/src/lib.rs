//! Core types and definitions for the DICE roller.
//!
//! This crate defines the vocabulary shared across all other crates:
//! die faces, pip layout, commands, events, snapshots, configuration and
//! constants. It has no dependency on any runtime or rendering framework.

pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod pips;
pub mod state;
pub mod types;

pub use error::DiceError;
pub use types::DieFace;
