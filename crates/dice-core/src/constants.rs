//! Roll pacing and tuning parameters.

/// Number of sides on every die.
pub const DIE_SIDES: u8 = 6;

/// Lowest face value.
pub const MIN_FACE: u8 = 1;

/// Highest face value.
pub const MAX_FACE: u8 = DIE_SIDES;

// --- Pacing ---

/// Seconds between animation ticks.
pub const TICK_INTERVAL_SECS: f64 = 0.1;

/// Ticks per roll, including the final settling draw.
/// 10 ticks at 0.1 s gives a 1.0 s roll.
pub const TOTAL_TICKS: u32 = 10;

/// Upper bound on ticks per roll. Rolls are a visual flourish, not a wait.
pub const MAX_TOTAL_TICKS: u32 = 120;

/// Smallest accepted tick interval (seconds).
pub const MIN_TICK_INTERVAL_SECS: f64 = 0.01;

/// Largest accepted tick interval (seconds).
pub const MAX_TICK_INTERVAL_SECS: f64 = 1.0;

/// Tolerance when comparing scheduled tick instants.
pub const TIME_EPSILON: f64 = 1e-9;

// --- Dice ---

/// Dice shown by default.
pub const DEFAULT_DICE_COUNT: usize = 2;

/// Most dice the roller will show.
pub const MAX_DICE_COUNT: usize = 2;

// --- Pip layout ---

/// Distance of the outer pip rows/columns from the die edge, as a fraction of
/// the die size (20pt on a 100pt die).
pub const PIP_PADDING: f32 = 0.2;
