//! Roll loop thread: drives the simulator in real time and publishes snapshots.
//!
//! The simulator is created inside this thread because it is not `Send`.
//! Commands arrive via `mpsc` channel. Snapshots go out on a channel for the
//! renderer and into shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, error, info};

use dice_core::config::RollConfig;
use dice_core::DiceError;
use dice_core::state::RollSnapshot;
use dice_sim::sound::SoundPlayer;
use dice_sim::RollSimulator;

use crate::error::AppError;
use crate::state::LoopCommand;

/// How long the loop waits for a command when no tick is scheduled.
const IDLE_WAIT: Duration = Duration::from_millis(250);

/// Handles held by the spawner.
pub struct RollLoop {
    pub command_tx: mpsc::Sender<LoopCommand>,
    pub snapshots: mpsc::Receiver<RollSnapshot>,
    pub handle: JoinHandle<()>,
}

/// Spawns the roll loop in a new thread.
///
/// Returns once the simulator exists on the new thread, so a config the
/// simulator rejects is reported here and no dead loop is handed back.
pub fn spawn_roll_loop(
    config: RollConfig,
    sound: Box<dyn SoundPlayer + Send>,
    latest_snapshot: Arc<Mutex<Option<RollSnapshot>>>,
) -> Result<RollLoop, AppError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();
    let (snap_tx, snap_rx) = mpsc::channel::<RollSnapshot>();
    let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<(), DiceError>>(1);

    let handle = std::thread::Builder::new()
        .name("dice-roll-loop".into())
        .spawn(move || {
            let simulator = match RollSimulator::new(config) {
                Ok(sim) => sim.with_sound_player(sound),
                Err(e) => {
                    error!(error = %e, "roll simulator failed to start");
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };
            let _ = ready_tx.send(Ok(()));
            run_roll_loop(simulator, cmd_rx, snap_tx, &latest_snapshot);
        })?;

    match ready_rx.recv() {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            let _ = handle.join();
            return Err(e.into());
        }
        Err(_) => {
            let _ = handle.join();
            return Err(AppError::LoopStopped);
        }
    }

    Ok(RollLoop {
        command_tx: cmd_tx,
        snapshots: snap_rx,
        handle,
    })
}

/// The loop. Runs until Shutdown command or channel disconnect.
fn run_roll_loop(
    mut simulator: RollSimulator,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    snap_tx: mpsc::Sender<RollSnapshot>,
    latest_snapshot: &Mutex<Option<RollSnapshot>>,
) {
    let clock = Instant::now();
    let mut dirty = true;
    info!("roll loop started");

    loop {
        // 1. Apply queued commands and run due ticks
        let now = clock.elapsed().as_secs_f64();
        let snapshot = simulator.step(now);

        // 2. Publish when something visible changed
        if dirty || !snapshot.events.is_empty() {
            let _ = snap_tx.send(snapshot.clone());
        }
        dirty = false;

        // 3. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Wait for the next tick or the next command, whichever is first
        let wait = simulator
            .next_tick_due()
            .map(|due| Duration::from_secs_f64((due - clock.elapsed().as_secs_f64()).max(0.0)))
            .unwrap_or(IDLE_WAIT);

        match cmd_rx.recv_timeout(wait) {
            Ok(LoopCommand::Roll(cmd)) => {
                debug!(?cmd, "command received");
                simulator.queue_command(cmd);
                dirty = true;
                // Drain anything else that arrived with it
                loop {
                    match cmd_rx.try_recv() {
                        Ok(LoopCommand::Roll(cmd)) => simulator.queue_command(cmd),
                        Ok(LoopCommand::Shutdown) => return stop(),
                        Err(mpsc::TryRecvError::Empty) => break,
                        Err(mpsc::TryRecvError::Disconnected) => return stop(),
                    }
                }
            }
            Ok(LoopCommand::Shutdown) => return stop(),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => return stop(),
        }
    }
}

fn stop() {
    info!("roll loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use dice_core::commands::RollCommand;
    use dice_core::events::RollEvent;
    use dice_sim::sound::NullSoundPlayer;

    fn fast_config() -> RollConfig {
        RollConfig {
            seed: Some(99),
            tick_interval_secs: 0.01,
            total_ticks: 5,
            ..Default::default()
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<LoopCommand>();

        tx.send(LoopCommand::Roll(RollCommand::StartRoll)).unwrap();
        tx.send(LoopCommand::Roll(RollCommand::CancelRoll)).unwrap();
        tx.send(LoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            LoopCommand::Roll(RollCommand::StartRoll)
        ));
        assert!(matches!(
            commands[1],
            LoopCommand::Roll(RollCommand::CancelRoll)
        ));
        assert!(matches!(commands[2], LoopCommand::Shutdown));
    }

    #[test]
    fn test_loop_runs_a_roll_to_completion() {
        let latest = Arc::new(Mutex::new(None));
        let roll_loop =
            spawn_roll_loop(fast_config(), Box::new(NullSoundPlayer), latest.clone()).unwrap();

        roll_loop
            .command_tx
            .send(LoopCommand::Roll(RollCommand::StartRoll))
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut settled = None;
        while Instant::now() < deadline {
            let Ok(snap) = roll_loop
                .snapshots
                .recv_timeout(Duration::from_millis(500))
            else {
                continue;
            };
            if let Some(RollEvent::RollSettled { faces }) =
                snap.events.iter().find(|e| e.is_terminal())
            {
                settled = Some(faces.clone());
                break;
            }
        }

        let faces = settled.expect("roll should settle within the deadline");
        assert_eq!(faces.len(), 2);

        roll_loop.command_tx.send(LoopCommand::Shutdown).unwrap();
        roll_loop.handle.join().unwrap();

        let last = latest.lock().unwrap().clone().unwrap();
        assert!(!last.rolling);
        assert_eq!(last.rolls_completed, 1);
    }

    #[test]
    fn test_loop_stops_on_disconnect() {
        let latest = Arc::new(Mutex::new(None));
        let roll_loop =
            spawn_roll_loop(fast_config(), Box::new(NullSoundPlayer), latest).unwrap();
        drop(roll_loop.command_tx);
        roll_loop.handle.join().unwrap();
    }

    #[test]
    fn test_invalid_config_reported_by_spawn() {
        let config = RollConfig {
            total_ticks: 0,
            ..Default::default()
        };
        let latest = Arc::new(Mutex::new(None));
        let result = spawn_roll_loop(config, Box::new(NullSoundPlayer), latest.clone());
        assert!(matches!(
            result,
            Err(AppError::Config(DiceError::InvalidTotalTicks(0)))
        ));
        assert!(latest.lock().unwrap().is_none());
    }
}
