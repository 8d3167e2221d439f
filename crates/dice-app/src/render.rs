//! Text renderer for dice faces and roll status.
//!
//! Pips are placed on a 3x3 grid derived from the normalized pip positions,
//! so the layout rule lives in one place.

use dice_core::constants::PIP_PADDING;
use dice_core::events::RollEvent;
use dice_core::pips::pip_positions;
use dice_core::state::RollSnapshot;
use dice_core::DieFace;
use glam::Vec2;

use crate::menu::{MenuItem, SideMenu};

const PIP: char = 'o';
const DIE_TOP: &str = "+-------+";

/// Grid cell (column, row) for a normalized pip position.
fn grid_cell(position: Vec2) -> (usize, usize) {
    let span = 1.0 - 2.0 * PIP_PADDING;
    let to_cell = |v: f32| (((v - PIP_PADDING) / span) * 2.0).round().clamp(0.0, 2.0) as usize;
    (to_cell(position.x), to_cell(position.y))
}

/// Five text lines drawing one die.
pub fn render_die(face: DieFace) -> [String; 5] {
    let mut grid = [[' '; 3]; 3];
    for pip in pip_positions(face) {
        let (col, row) = grid_cell(pip.position());
        grid[row][col] = PIP;
    }

    let row = |r: [char; 3]| format!("| {} {} {} |", r[0], r[1], r[2]);
    [
        DIE_TOP.to_string(),
        row(grid[0]),
        row(grid[1]),
        row(grid[2]),
        DIE_TOP.to_string(),
    ]
}

/// Dice drawn side by side.
pub fn render_dice(faces: &[DieFace]) -> String {
    let dice: Vec<[String; 5]> = faces.iter().map(|&f| render_die(f)).collect();
    (0..5)
        .map(|line| {
            dice.iter()
                .map(|d| d[line].as_str())
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full frame for a snapshot: dice, then a status line.
pub fn render_snapshot(snapshot: &RollSnapshot) -> String {
    let mut out = render_dice(&snapshot.faces);
    out.push('\n');

    if snapshot.rolling {
        out.push_str("rolling...");
    } else {
        let total: u32 = snapshot.faces.iter().map(|f| u32::from(f.value())).sum();
        match snapshot.events.iter().find(|e| e.is_terminal()) {
            Some(RollEvent::RollCancelled { .. }) => {
                out.push_str(&format!("cancelled at {total}  [r] Roll Dice"))
            }
            Some(_) => out.push_str(&format!("total {total}  [r] Roll Dice")),
            None => out.push_str("[r] Roll Dice"),
        }
    }

    for event in &snapshot.events {
        if let RollEvent::Doubles { face } = event {
            out.push_str(&format!("\nDOUBLE {face}s! Beast mode!"));
        }
    }
    out
}

/// The side menu as a list, or a hint when closed.
pub fn render_menu(menu: &SideMenu) -> String {
    if !menu.is_open() {
        return "[m] menu".to_string();
    }
    let mut out = String::from("== DICE ==");
    for item in MenuItem::ALL {
        let key = match item {
            MenuItem::Preferences => 'p',
            MenuItem::Account => 'a',
        };
        out.push_str(&format!("\n [{key}] {item}"));
    }
    out.push_str("\n [m] close");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dice_core::state::RollState;

    fn pip_count(lines: &[String]) -> usize {
        lines.iter().map(|l| l.matches(PIP).count()).sum()
    }

    #[test]
    fn test_render_die_pip_counts() {
        for face in DieFace::ALL {
            assert_eq!(pip_count(&render_die(face)), face.value() as usize);
        }
    }

    #[test]
    fn test_render_one_is_centered() {
        let lines = render_die(DieFace::ONE);
        assert_eq!(lines[1], "|       |");
        assert_eq!(lines[2], "|   o   |");
        assert_eq!(lines[3], "|       |");
    }

    #[test]
    fn test_render_six_has_middle_row_edges() {
        let lines = render_die(DieFace::SIX);
        assert_eq!(lines[1], "| o   o |");
        assert_eq!(lines[2], "| o   o |");
        assert_eq!(lines[3], "| o   o |");
    }

    #[test]
    fn test_render_two_is_diagonal() {
        let lines = render_die(DieFace::TWO);
        assert_eq!(lines[1], "| o     |");
        assert_eq!(lines[3], "|     o |");
    }

    #[test]
    fn test_render_dice_side_by_side() {
        let out = render_dice(&[DieFace::ONE, DieFace::SIX]);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], "|   o   |  | o   o |");
    }

    #[test]
    fn test_render_snapshot_status() {
        let mut snapshot = RollSnapshot {
            faces: vec![DieFace::THREE, DieFace::THREE],
            rolling: true,
            ..Default::default()
        };
        assert!(render_snapshot(&snapshot).ends_with("rolling..."));

        snapshot.rolling = false;
        snapshot.state = RollState::Settled {
            faces: snapshot.faces.clone(),
        };
        snapshot.events = vec![
            RollEvent::RollSettled {
                faces: snapshot.faces.clone(),
            },
            RollEvent::Doubles {
                face: DieFace::THREE,
            },
        ];
        let out = render_snapshot(&snapshot);
        assert!(out.contains("total 6"));
        assert!(out.contains("DOUBLE 3s!"));
    }

    #[test]
    fn test_render_menu() {
        let mut menu = SideMenu::new();
        assert_eq!(render_menu(&menu), "[m] menu");
        menu.toggle();
        let out = render_menu(&menu);
        assert!(out.contains("[p] Preferences"));
        assert!(out.contains("[a] Account"));
    }
}
