//! Commands sent from the presentation layer to the simulator.
//!
//! Commands are applied at the next host step, in arrival order.

use serde::{Deserialize, Serialize};

use crate::config::Preferences;

/// All possible user actions that reach the roll simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RollCommand {
    /// Trigger pressed. Ignored while a roll is in progress.
    StartRoll,
    /// Settle the current roll on its last drawn faces.
    CancelRoll,
    /// Replace the user preferences. Ignored while a roll is in progress.
    SetPreferences { preferences: Preferences },
}
