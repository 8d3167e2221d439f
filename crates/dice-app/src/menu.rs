//! Side navigation menu.
//!
//! While the menu is open the roll trigger is locked, so a tap meant to
//! dismiss the menu never starts a roll.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Entries listed in the side menu, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuItem {
    Preferences,
    Account,
}

impl MenuItem {
    pub const ALL: [MenuItem; 2] = [MenuItem::Preferences, MenuItem::Account];

    pub fn title(self) -> &'static str {
        match self {
            MenuItem::Preferences => "Preferences",
            MenuItem::Account => "Account",
        }
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideMenu {
    open: bool,
}

impl SideMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip open/closed. Returns the new open state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Pick an item. Only possible while open; picking closes the menu.
    pub fn select(&mut self, item: MenuItem) -> Option<MenuItem> {
        if !self.open {
            return None;
        }
        self.open = false;
        Some(item)
    }

    /// The roll trigger only responds while the menu is closed.
    pub fn roll_enabled(&self) -> bool {
        !self.open
    }
}
