//! Periodic tick scheduling.
//!
//! The simulator never sleeps or spawns timers itself. It asks a
//! `TickScheduler` to start or stop, and the host asks the scheduler how many
//! ticks have come due whenever it gets a chance to run.

use dice_core::constants::TIME_EPSILON;

/// A host-provided periodic callback source.
pub trait TickScheduler {
    /// Begin firing every `interval_secs`, first at `now + interval_secs`.
    fn start(&mut self, now: f64, interval_secs: f64);

    /// Stop firing. Ticks not yet taken are discarded.
    fn stop(&mut self);

    fn is_active(&self) -> bool;

    /// Number of ticks due at or before `now`. Consumes them.
    fn take_due(&mut self, now: f64) -> u32;

    /// Host time of the next tick, if active.
    fn next_due(&self) -> Option<f64>;
}

/// Fires at `start + k * interval` for k = 1, 2, ...
///
/// Instants are computed from the tick count rather than accumulated, so
/// long rolls do not drift.
#[derive(Debug, Clone, Default)]
pub struct IntervalScheduler {
    started_at: f64,
    interval_secs: f64,
    fired: u64,
    active: bool,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks handed out since the last `start`.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    fn due_at(&self, k: u64) -> f64 {
        self.started_at + self.interval_secs * k as f64
    }
}

impl TickScheduler for IntervalScheduler {
    fn start(&mut self, now: f64, interval_secs: f64) {
        self.started_at = now;
        self.interval_secs = interval_secs;
        self.fired = 0;
        self.active = true;
    }

    fn stop(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn take_due(&mut self, now: f64) -> u32 {
        if !self.active || self.interval_secs <= 0.0 {
            return 0;
        }
        let elapsed = now + TIME_EPSILON - self.started_at;
        if elapsed < self.interval_secs {
            return 0;
        }
        // Float to int `as` saturates, so a huge gap cannot wrap.
        let reached = (elapsed / self.interval_secs).floor() as u64;
        let due = reached.saturating_sub(self.fired);
        self.fired = self.fired.max(reached);
        u32::try_from(due).unwrap_or(u32::MAX)
    }

    fn next_due(&self) -> Option<f64> {
        self.active.then(|| self.due_at(self.fired + 1))
    }
}
