//! State the input thread keeps about the running roll loop.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use dice_core::commands::RollCommand;
use dice_core::config::Preferences;
use dice_core::state::RollSnapshot;

use crate::menu::SideMenu;

/// Messages on the input → roll loop channel.
#[derive(Debug)]
pub enum LoopCommand {
    Roll(RollCommand),
    /// Stop after the current step.
    Shutdown,
}

/// Everything the input thread needs to reach the roll loop.
///
/// The simulator lives on the loop thread. This side only talks to it
/// through the command channel and reads back published snapshots.
pub struct AppState {
    /// Set by `start_roll_loop`, taken by `stop_roll_loop`.
    pub command_tx: Mutex<Option<mpsc::Sender<LoopCommand>>>,
    /// Written by the loop thread after every step.
    pub latest_snapshot: Arc<Mutex<Option<RollSnapshot>>>,
    pub running: Mutex<bool>,
    /// Open menu locks the roll trigger.
    pub menu: Mutex<SideMenu>,
    /// Preferences as last sent to the loop. Edits start from here rather
    /// than from a snapshot that may not reflect the previous edit yet.
    pub preferences: Mutex<Preferences>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
            menu: Mutex::new(SideMenu::new()),
            preferences: Mutex::new(Preferences::default()),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
