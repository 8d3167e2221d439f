//! User actions bridged to the roll loop thread.
//!
//! Each function takes the shared `AppState`, so the input handler never
//! touches the simulator directly.

use std::sync::mpsc;
use std::thread::JoinHandle;

use tracing::debug;

use dice_core::commands::RollCommand;
use dice_core::config::{Preferences, RollConfig};
use dice_core::state::RollSnapshot;
use dice_sim::sound::SoundPlayer;

use crate::error::AppError;
use crate::game_loop;
use crate::menu::MenuItem;
use crate::state::{AppState, LoopCommand};

/// Start the roll loop. Fails if it is already running.
///
/// Returns the snapshot stream and the loop thread handle.
pub fn start_roll_loop(
    state: &AppState,
    config: RollConfig,
    sound: Box<dyn SoundPlayer + Send>,
) -> Result<(mpsc::Receiver<RollSnapshot>, JoinHandle<()>), AppError> {
    let mut running = state.running.lock().map_err(|_| AppError::Poisoned)?;
    if *running {
        return Err(AppError::AlreadyRunning);
    }

    let preferences = config.preferences;
    let roll_loop = game_loop::spawn_roll_loop(config, sound, state.latest_snapshot.clone())?;
    *state.preferences.lock().map_err(|_| AppError::Poisoned)? = preferences;

    let mut tx_lock = state.command_tx.lock().map_err(|_| AppError::Poisoned)?;
    *tx_lock = Some(roll_loop.command_tx);
    *running = true;

    Ok((roll_loop.snapshots, roll_loop.handle))
}

/// Forward a roll command to the loop.
pub fn send_command(state: &AppState, command: RollCommand) -> Result<(), AppError> {
    let tx_lock = state.command_tx.lock().map_err(|_| AppError::Poisoned)?;
    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(LoopCommand::Roll(command))
            .map_err(|_| AppError::LoopStopped),
        None => Err(AppError::NotStarted),
    }
}

/// Press the roll trigger. Returns false if the open menu swallowed the press.
pub fn trigger_roll(state: &AppState) -> Result<bool, AppError> {
    let roll_enabled = state
        .menu
        .lock()
        .map_err(|_| AppError::Poisoned)?
        .roll_enabled();
    if !roll_enabled {
        debug!("roll trigger locked while menu is open");
        return Ok(false);
    }
    send_command(state, RollCommand::StartRoll)?;
    Ok(true)
}

pub fn cancel_roll(state: &AppState) -> Result<(), AppError> {
    send_command(state, RollCommand::CancelRoll)
}

/// Open or close the side menu. Returns the new open state.
pub fn toggle_menu(state: &AppState) -> Result<bool, AppError> {
    let mut menu = state.menu.lock().map_err(|_| AppError::Poisoned)?;
    let open = menu.toggle();
    debug!(open, "menu toggled");
    Ok(open)
}

/// Pick a menu item. `None` if the menu was closed.
pub fn select_menu_item(state: &AppState, item: MenuItem) -> Result<Option<MenuItem>, AppError> {
    let mut menu = state.menu.lock().map_err(|_| AppError::Poisoned)?;
    Ok(menu.select(item))
}

/// Edit the preferences and send them to the simulator.
///
/// Edits build on the last preferences sent, so several edits in a row all
/// land. Refused with `RollInProgress` while the latest snapshot shows a
/// roll, since the simulator would drop the change.
pub fn update_preferences(
    state: &AppState,
    edit: impl FnOnce(&mut Preferences),
) -> Result<Preferences, AppError> {
    if get_snapshot(state)?.is_some_and(|s| s.rolling) {
        debug!("preferences locked while rolling");
        return Err(AppError::RollInProgress);
    }

    let mut current = state.preferences.lock().map_err(|_| AppError::Poisoned)?;
    let mut preferences = *current;
    edit(&mut preferences);
    preferences.validate()?;
    send_command(state, RollCommand::SetPreferences { preferences })?;
    *current = preferences;
    Ok(preferences)
}

/// Latest snapshot, for polling.
pub fn get_snapshot(state: &AppState) -> Result<Option<RollSnapshot>, AppError> {
    let lock = state.latest_snapshot.lock().map_err(|_| AppError::Poisoned)?;
    Ok(lock.clone())
}

/// Ask the loop to shut down. Safe to call when it is not running.
pub fn stop_roll_loop(state: &AppState) -> Result<(), AppError> {
    let mut running = state.running.lock().map_err(|_| AppError::Poisoned)?;
    let mut tx_lock = state.command_tx.lock().map_err(|_| AppError::Poisoned)?;
    if let Some(tx) = tx_lock.take() {
        let _ = tx.send(LoopCommand::Shutdown);
    }
    *running = false;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dice_sim::sound::NullSoundPlayer;
    use std::time::{Duration, Instant};

    fn fast_config() -> RollConfig {
        RollConfig {
            seed: Some(5),
            tick_interval_secs: 0.01,
            total_ticks: 4,
            ..Default::default()
        }
    }

    fn wait_until(state: &AppState, pred: impl Fn(&RollSnapshot) -> bool) -> RollSnapshot {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(snap) = get_snapshot(state).unwrap() {
                if pred(&snap) {
                    return snap;
                }
            }
            assert!(Instant::now() < deadline, "timed out waiting for snapshot");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_send_before_start_fails() {
        let state = AppState::new();
        assert!(matches!(
            send_command(&state, RollCommand::StartRoll),
            Err(AppError::NotStarted)
        ));
    }

    #[test]
    fn test_double_start_rejected() {
        let state = AppState::new();
        let (_snaps, handle) =
            start_roll_loop(&state, fast_config(), Box::new(NullSoundPlayer)).unwrap();
        assert!(matches!(
            start_roll_loop(&state, fast_config(), Box::new(NullSoundPlayer)),
            Err(AppError::AlreadyRunning)
        ));
        stop_roll_loop(&state).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_menu_locks_trigger() {
        let state = AppState::new();
        let (_snaps, handle) =
            start_roll_loop(&state, fast_config(), Box::new(NullSoundPlayer)).unwrap();

        assert!(toggle_menu(&state).unwrap());
        assert!(!trigger_roll(&state).unwrap());
        assert_eq!(
            select_menu_item(&state, MenuItem::Account).unwrap(),
            Some(MenuItem::Account)
        );
        assert!(trigger_roll(&state).unwrap());

        let snap = wait_until(&state, |s| s.rolls_completed == 1);
        assert!(!snap.rolling);

        stop_roll_loop(&state).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_update_preferences_reaches_simulator() {
        let state = AppState::new();
        let (_snaps, handle) =
            start_roll_loop(&state, fast_config(), Box::new(NullSoundPlayer)).unwrap();
        wait_until(&state, |_| true);

        let sent = update_preferences(&state, |p| p.dice_count = 1).unwrap();
        assert_eq!(sent.dice_count, 1);
        let snap = wait_until(&state, |s| s.preferences.dice_count == 1);
        assert_eq!(snap.faces.len(), 1);

        assert!(update_preferences(&state, |p| p.dice_count = 5).is_err());
        assert_eq!(state.preferences.lock().unwrap().dice_count, 1);

        stop_roll_loop(&state).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_back_to_back_preference_edits_both_apply() {
        let state = AppState::new();
        let (_snaps, handle) =
            start_roll_loop(&state, fast_config(), Box::new(NullSoundPlayer)).unwrap();
        wait_until(&state, |_| true);

        update_preferences(&state, |p| p.doubles_callout = true).unwrap();
        let sent = update_preferences(&state, |p| p.muted = true).unwrap();
        assert!(sent.doubles_callout);
        assert!(sent.muted);

        let snap = wait_until(&state, |s| s.preferences.muted);
        assert!(snap.preferences.doubles_callout);

        stop_roll_loop(&state).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_preferences_refused_while_rolling() {
        let slow = RollConfig {
            seed: Some(5),
            tick_interval_secs: 1.0,
            total_ticks: 10,
            ..Default::default()
        };
        let state = AppState::new();
        let (_snaps, handle) = start_roll_loop(&state, slow, Box::new(NullSoundPlayer)).unwrap();

        assert!(trigger_roll(&state).unwrap());
        wait_until(&state, |s| s.rolling);

        assert!(matches!(
            update_preferences(&state, |p| p.muted = true),
            Err(AppError::RollInProgress)
        ));
        assert!(!state.preferences.lock().unwrap().muted);

        cancel_roll(&state).unwrap();
        wait_until(&state, |s| !s.rolling);
        let sent = update_preferences(&state, |p| p.muted = true).unwrap();
        assert!(sent.muted);
        let snap = wait_until(&state, |s| s.preferences.muted);
        assert_eq!(snap.rolls_completed, 1);

        stop_roll_loop(&state).unwrap();
        handle.join().unwrap();
    }
}
