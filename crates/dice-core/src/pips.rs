//! Pip layout for drawing a die face.
//!
//! Follows the standard six-face convention: odd faces carry a center pip,
//! every face from 2 up has one diagonal corner pair, 4 and up add the
//! opposite diagonal, and 6 adds a middle row pair instead of the center.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::PIP_PADDING;
use crate::types::DieFace;

/// One of the seven slots a pip can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Pip {
    TopLeft,
    TopRight,
    MidLeft,
    Center,
    MidRight,
    BottomLeft,
    BottomRight,
}

impl Pip {
    /// Normalized position inside a unit die, y growing downward.
    pub fn position(self) -> Vec2 {
        let near = PIP_PADDING;
        let far = 1.0 - PIP_PADDING;
        match self {
            Pip::TopLeft => Vec2::new(near, near),
            Pip::TopRight => Vec2::new(far, near),
            Pip::MidLeft => Vec2::new(near, 0.5),
            Pip::Center => Vec2::new(0.5, 0.5),
            Pip::MidRight => Vec2::new(far, 0.5),
            Pip::BottomLeft => Vec2::new(near, far),
            Pip::BottomRight => Vec2::new(far, far),
        }
    }
}

/// Pip slots occupied by `face`.
pub fn pip_positions(face: DieFace) -> BTreeSet<Pip> {
    let value = face.value();
    let mut pips = BTreeSet::new();

    if face.is_odd() {
        pips.insert(Pip::Center);
    }
    if value >= 2 {
        pips.insert(Pip::TopLeft);
        pips.insert(Pip::BottomRight);
    }
    if value >= 4 {
        pips.insert(Pip::TopRight);
        pips.insert(Pip::BottomLeft);
    }
    if value == 6 {
        pips.insert(Pip::MidLeft);
        pips.insert(Pip::MidRight);
    }

    pips
}

/// Pip centers for `face` scaled to a die of `size` units.
pub fn pip_points(face: DieFace, size: f32) -> Vec<Vec2> {
    pip_positions(face)
        .into_iter()
        .map(|pip| pip.position() * size)
        .collect()
}
