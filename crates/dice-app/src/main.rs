use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dice_app::actions;
use dice_app::menu::MenuItem;
use dice_app::render;
use dice_app::sound::open_sound_player;
use dice_app::state::AppState;
use dice_app::AppError;
use dice_core::config::{Preferences, RollConfig};
use dice_core::state::RollSnapshot;

/// Roll one or two dice in the terminal.
#[derive(Parser, Debug)]
#[command(name = "dice", version)]
struct Args {
    /// JSON config file; command-line flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed for a reproducible sequence of rolls.
    #[arg(long)]
    seed: Option<u64>,
    /// Roll this many times without reading input, then exit.
    #[arg(long)]
    rolls: Option<u32>,
    /// Seconds between animation ticks.
    #[arg(long)]
    interval: Option<f64>,
    /// Ticks per roll.
    #[arg(long)]
    ticks: Option<u32>,
    /// Number of dice (1 or 2).
    #[arg(long)]
    dice: Option<usize>,
    /// Announce doubles.
    #[arg(long)]
    doubles: bool,
    /// No roll sound.
    #[arg(long)]
    mute: bool,
    /// Roll sound asset; if it is missing the roll is silent.
    #[arg(long)]
    sound_asset: Option<PathBuf>,
    /// Print snapshots as JSON lines instead of drawing dice.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;
    info!(?config, "starting");

    let state = AppState::new();
    let sound = open_sound_player(args.sound_asset.as_deref());
    let (snapshots, loop_handle) = actions::start_roll_loop(&state, config, sound)?;

    match args.rolls {
        Some(rolls) => run_auto(&state, &snapshots, rolls, args.json)?,
        None => run_interactive(&state, snapshots, args.json)?,
    }

    actions::stop_roll_loop(&state)?;
    loop_handle
        .join()
        .map_err(|_| anyhow::anyhow!("roll loop panicked"))?;
    Ok(())
}

fn build_config(args: &Args) -> Result<RollConfig> {
    let mut config = match &args.config {
        Some(path) => RollConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RollConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(interval) = args.interval {
        config.tick_interval_secs = interval;
    }
    if let Some(ticks) = args.ticks {
        config.total_ticks = ticks;
    }
    if let Some(dice) = args.dice {
        config.preferences.dice_count = dice;
    }
    config.preferences.doubles_callout |= args.doubles;
    config.preferences.muted |= args.mute;

    config.validate()?;
    Ok(config)
}

fn print_snapshot(snapshot: &RollSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
    } else {
        println!("{}\n", render::render_snapshot(snapshot));
    }
    Ok(())
}

/// Roll `rolls` times back to back, printing every published snapshot.
fn run_auto(
    state: &AppState,
    snapshots: &mpsc::Receiver<RollSnapshot>,
    rolls: u32,
    json: bool,
) -> Result<()> {
    for _ in 0..rolls {
        actions::trigger_roll(state)?;
        loop {
            let snapshot = snapshots.recv().context("roll loop stopped")?;
            print_snapshot(&snapshot, json)?;
            if snapshot.events.iter().any(|e| e.is_terminal()) {
                break;
            }
        }
    }
    Ok(())
}

const HELP: &str = "[r] roll  [c] cancel  [m] menu  [q] quit";
const PREFERENCES_HELP: &str = "[1]/[2] dice  [d] doubles callout  [s] sound";

/// Read single-letter commands from stdin while a printer thread draws
/// snapshots as they arrive.
fn run_interactive(
    state: &AppState,
    snapshots: mpsc::Receiver<RollSnapshot>,
    json: bool,
) -> Result<()> {
    let printer = std::thread::Builder::new()
        .name("dice-printer".into())
        .spawn(move || {
            for snapshot in snapshots {
                if let Err(e) = print_snapshot(&snapshot, json) {
                    tracing::warn!(error = %e, "failed to print snapshot");
                }
            }
        })?;

    println!("{HELP}");
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        match line.trim() {
            "r" => {
                if !actions::trigger_roll(state)? {
                    println!("close the menu to roll");
                }
            }
            "c" => actions::cancel_roll(state)?,
            "m" => {
                actions::toggle_menu(state)?;
                let menu = *state
                    .menu
                    .lock()
                    .map_err(|_| anyhow::anyhow!("menu lock poisoned"))?;
                println!("{}", render::render_menu(&menu));
            }
            "p" => {
                if actions::select_menu_item(state, MenuItem::Preferences)?.is_some() {
                    let prefs = *state
                        .preferences
                        .lock()
                        .map_err(|_| anyhow::anyhow!("preferences lock poisoned"))?;
                    println!("{prefs:?}\n{PREFERENCES_HELP}");
                }
            }
            "a" => {
                if actions::select_menu_item(state, MenuItem::Account)?.is_some() {
                    println!("no account features offline");
                }
            }
            "1" | "2" => {
                let count = if line.trim() == "1" { 1 } else { 2 };
                edit_preferences(state, |p| p.dice_count = count)?;
            }
            "d" => {
                if let Some(prefs) =
                    edit_preferences(state, |p| p.doubles_callout = !p.doubles_callout)?
                {
                    println!("doubles callout {}", on_off(prefs.doubles_callout));
                }
            }
            "s" => {
                if let Some(prefs) = edit_preferences(state, |p| p.muted = !p.muted)? {
                    println!("sound {}", on_off(!prefs.muted));
                }
            }
            "q" => break,
            "" => {}
            _ => println!("{HELP}"),
        }
    }

    actions::stop_roll_loop(state)?;
    printer
        .join()
        .map_err(|_| anyhow::anyhow!("printer thread panicked"))?;
    Ok(())
}

/// `None` when the edit was refused because a roll is in progress.
fn edit_preferences(
    state: &AppState,
    edit: impl FnOnce(&mut Preferences),
) -> Result<Option<Preferences>> {
    match actions::update_preferences(state, edit) {
        Ok(prefs) => Ok(Some(prefs)),
        Err(AppError::RollInProgress) => {
            println!("wait for the roll to finish");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
