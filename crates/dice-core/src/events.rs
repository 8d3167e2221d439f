//! Events emitted by the simulator for observers, audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::types::DieFace;

/// Roll lifecycle notifications delivered to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RollEvent {
    /// A roll began at `started_at` (host seconds).
    RollStarted { started_at: f64 },
    /// Intermediate shuffle faces for animation tick `tick` (1-based).
    FacesChanged { tick: u32, faces: Vec<DieFace> },
    /// The roll finished; `faces` is the result.
    RollSettled { faces: Vec<DieFace> },
    /// The roll was cut short and settled on the last drawn faces.
    RollCancelled { faces: Vec<DieFace> },
    /// Every die landed on the same face.
    Doubles { face: DieFace },
}

impl RollEvent {
    /// True for the events that end a roll.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RollEvent::RollSettled { .. } | RollEvent::RollCancelled { .. }
        )
    }
}

/// Audio cues for the frontend sound system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// The dice started rolling.
    DiceRoll,
}
