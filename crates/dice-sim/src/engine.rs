//! Roll simulator, the core of the roller.
//!
//! `RollSimulator` owns the roll state machine, processes commands, draws
//! faces on each scheduled tick and produces `RollSnapshot`s. Completely
//! headless (no rendering or audio backend), so a fixed seed replays exactly.

use std::collections::VecDeque;

use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use dice_core::commands::RollCommand;
use dice_core::config::{Preferences, RollConfig};
use dice_core::events::{AudioEvent, RollEvent};
use dice_core::state::{RollSnapshot, RollState};
use dice_core::{DiceError, DieFace};

use crate::observer::{ObserverRegistry, RollObserver, SubscriptionId};
use crate::scheduler::{IntervalScheduler, TickScheduler};
use crate::sound::{NullSoundPlayer, SoundPlayer};

/// The roll simulator. One per screen session.
pub struct RollSimulator {
    config: RollConfig,
    state: RollState,
    /// Last published faces, one per die.
    faces: Vec<DieFace>,
    rng: ChaCha8Rng,
    /// Index into `DieFace::ALL`.
    face_dist: Uniform<usize>,
    scheduler: Box<dyn TickScheduler>,
    sound: Box<dyn SoundPlayer>,
    observers: ObserverRegistry,
    command_queue: VecDeque<RollCommand>,
    pending_events: Vec<RollEvent>,
    audio_events: Vec<AudioEvent>,
    rolls_completed: u64,
}

impl RollSimulator {
    /// Create a simulator with an `IntervalScheduler` and no sound.
    pub fn new(config: RollConfig) -> Result<Self, DiceError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(Self {
            faces: vec![DieFace::ONE; config.preferences.dice_count],
            config,
            state: RollState::Idle,
            rng,
            face_dist: Uniform::new(0, DieFace::ALL.len()),
            scheduler: Box::new(IntervalScheduler::new()),
            sound: Box::new(NullSoundPlayer),
            observers: ObserverRegistry::new(),
            command_queue: VecDeque::new(),
            pending_events: Vec::new(),
            audio_events: Vec::new(),
            rolls_completed: 0,
        })
    }

    /// Replace the tick source.
    pub fn with_scheduler(mut self, scheduler: impl TickScheduler + 'static) -> Self {
        self.scheduler = Box::new(scheduler);
        self
    }

    /// Replace the sound player.
    pub fn with_sound_player(mut self, sound: impl SoundPlayer + 'static) -> Self {
        self.sound = Box::new(sound);
        self
    }

    // --- Roll lifecycle ---

    /// Begin a roll at host time `now`. Returns false (and does nothing) if a
    /// roll is already in progress.
    pub fn start(&mut self, now: f64) -> bool {
        if self.state.is_rolling() {
            debug!("start ignored, roll in progress");
            return false;
        }

        self.state = RollState::Rolling {
            started_at: now,
            ticks_elapsed: 0,
        };
        self.request_roll_sound();
        self.scheduler.start(now, self.config.tick_interval_secs);

        info!(
            started_at = now,
            dice = self.faces.len(),
            ticks = self.config.total_ticks,
            "roll started"
        );
        self.emit(RollEvent::RollStarted { started_at: now });
        true
    }

    /// Run one animation tick. No-op unless rolling.
    ///
    /// Every tick redraws each die independently. The tick that reaches
    /// `total_ticks` draws the result and settles the roll.
    pub fn tick(&mut self) {
        let (started_at, ticks_elapsed) = match &self.state {
            RollState::Rolling {
                started_at,
                ticks_elapsed,
            } => (*started_at, *ticks_elapsed),
            _ => return,
        };

        self.draw_faces();
        let tick = ticks_elapsed + 1;

        if tick >= self.config.total_ticks {
            self.settle();
            return;
        }

        self.state = RollState::Rolling {
            started_at,
            ticks_elapsed: tick,
        };
        debug!(tick, faces = ?self.faces, "shuffle");
        self.emit(RollEvent::FacesChanged {
            tick,
            faces: self.faces.clone(),
        });
    }

    /// Settle immediately on the last drawn faces. Returns false if no roll
    /// was in progress.
    pub fn cancel(&mut self) -> bool {
        if !self.state.is_rolling() {
            return false;
        }

        self.scheduler.stop();
        self.state = RollState::Settled {
            faces: self.faces.clone(),
        };
        self.rolls_completed += 1;

        info!(faces = ?self.faces, "roll cancelled");
        self.emit(RollEvent::RollCancelled {
            faces: self.faces.clone(),
        });
        true
    }

    /// Run every tick the scheduler says is due by `now`. Returns the number
    /// of ticks actually run.
    pub fn advance_to(&mut self, now: f64) -> u32 {
        let due = self.scheduler.take_due(now);
        let mut ran = 0;
        for _ in 0..due {
            if !self.state.is_rolling() {
                break;
            }
            self.tick();
            ran += 1;
        }
        ran
    }

    // --- Commands ---

    /// Queue a command for processing at the next `step`.
    pub fn queue_command(&mut self, command: RollCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = RollCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply queued commands, run due ticks, and return the resulting snapshot.
    pub fn step(&mut self, now: f64) -> RollSnapshot {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command, now);
        }
        self.advance_to(now);
        self.snapshot()
    }

    /// Apply a single command immediately.
    pub fn handle_command(&mut self, command: RollCommand, now: f64) {
        match command {
            RollCommand::StartRoll => {
                self.start(now);
            }
            RollCommand::CancelRoll => {
                self.cancel();
            }
            RollCommand::SetPreferences { preferences } => {
                if let Err(error) = self.set_preferences(preferences) {
                    warn!(%error, "preferences rejected");
                }
            }
        }
    }

    /// Replace the preferences. Returns `Ok(false)` if a roll is in progress
    /// and nothing changed.
    pub fn set_preferences(&mut self, preferences: Preferences) -> Result<bool, DiceError> {
        preferences.validate()?;

        if self.state.is_rolling() {
            warn!("preferences ignored, roll in progress");
            return Ok(false);
        }

        if preferences.dice_count != self.config.preferences.dice_count {
            self.faces = vec![DieFace::ONE; preferences.dice_count];
            if let RollState::Settled { .. } = self.state {
                self.state = RollState::Idle;
            }
        }
        self.config.preferences = preferences;
        debug!(?preferences, "preferences updated");
        Ok(true)
    }

    // --- Observation ---

    pub fn subscribe(&mut self, observer: impl RollObserver + 'static) -> SubscriptionId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// First two faces: the shuffle pair while rolling, the result once
    /// settled, `(1, 1)` before any roll. A single die reports 1 for the
    /// second slot.
    pub fn current_faces(&self) -> (DieFace, DieFace) {
        let left = self.faces.first().copied().unwrap_or_default();
        let right = self.faces.get(1).copied().unwrap_or_default();
        (left, right)
    }

    /// All faces in die order.
    pub fn faces(&self) -> &[DieFace] {
        &self.faces
    }

    pub fn is_rolling(&self) -> bool {
        self.state.is_rolling()
    }

    pub fn state(&self) -> &RollState {
        &self.state
    }

    pub fn config(&self) -> &RollConfig {
        &self.config
    }

    pub fn rolls_completed(&self) -> u64 {
        self.rolls_completed
    }

    /// Host time of the next scheduled tick, if rolling.
    pub fn next_tick_due(&self) -> Option<f64> {
        self.scheduler.next_due()
    }

    /// Build a snapshot, draining events raised since the last one.
    pub fn snapshot(&mut self) -> RollSnapshot {
        RollSnapshot {
            state: self.state.clone(),
            faces: self.faces.clone(),
            rolling: self.state.is_rolling(),
            rolls_completed: self.rolls_completed,
            preferences: self.config.preferences,
            events: std::mem::take(&mut self.pending_events),
            audio_events: std::mem::take(&mut self.audio_events),
        }
    }

    // --- Internals ---

    fn draw_faces(&mut self) {
        for face in &mut self.faces {
            *face = DieFace::ALL[self.face_dist.sample(&mut self.rng)];
        }
    }

    fn settle(&mut self) {
        self.scheduler.stop();
        self.state = RollState::Settled {
            faces: self.faces.clone(),
        };
        self.rolls_completed += 1;

        info!(faces = ?self.faces, "roll settled");
        self.emit(RollEvent::RollSettled {
            faces: self.faces.clone(),
        });

        if let Some(face) = self.doubles() {
            info!(%face, "doubles");
            self.emit(RollEvent::Doubles { face });
        }
    }

    /// The shared face when the callout is on and every die matches.
    fn doubles(&self) -> Option<DieFace> {
        if !self.config.preferences.doubles_callout || self.faces.len() < 2 {
            return None;
        }
        let first = self.faces[0];
        self.faces.iter().all(|&f| f == first).then_some(first)
    }

    fn request_roll_sound(&mut self) {
        if self.config.preferences.muted {
            debug!("roll sound muted");
            return;
        }
        self.audio_events.push(AudioEvent::DiceRoll);
        if let Err(error) = self.sound.play_roll() {
            warn!(%error, "roll sound failed");
        }
    }

    fn emit(&mut self, event: RollEvent) {
        self.observers.notify(&event);
        self.pending_events.push(event);
    }
}
