use thiserror::Error;

use dice_core::DiceError;

/// Failures surfaced by the app layer to the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] DiceError),

    #[error("failed to spawn roll loop: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("roll loop already running")]
    AlreadyRunning,

    #[error("roll loop not started")]
    NotStarted,

    #[error("roll loop stopped")]
    LoopStopped,

    #[error("preferences cannot change while a roll is in progress")]
    RollInProgress,

    #[error("app state lock poisoned")]
    Poisoned,
}
