//! Roll state and the snapshot handed to renderers after each host step.

use serde::{Deserialize, Serialize};

use crate::config::Preferences;
use crate::events::{AudioEvent, RollEvent};
use crate::types::DieFace;

/// Where the simulator is in its roll lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state")]
pub enum RollState {
    /// No roll has happened yet.
    #[default]
    Idle,
    /// Animation in progress.
    Rolling {
        /// Host time (seconds) at which the roll began.
        started_at: f64,
        /// Ticks run so far in this roll.
        ticks_elapsed: u32,
    },
    /// The last roll finished on these faces.
    Settled { faces: Vec<DieFace> },
}

impl RollState {
    pub fn is_rolling(&self) -> bool {
        matches!(self, RollState::Rolling { .. })
    }
}

/// Complete visible roll state, built after each host step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RollSnapshot {
    pub state: RollState,
    pub faces: Vec<DieFace>,
    pub rolling: bool,
    /// Rolls that reached a settled state (cancelled ones included).
    pub rolls_completed: u64,
    pub preferences: Preferences,
    /// Events raised since the previous snapshot.
    pub events: Vec<RollEvent>,
    /// Audio requests raised since the previous snapshot.
    pub audio_events: Vec<AudioEvent>,
}
