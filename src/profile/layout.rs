//! Deck layout configuration.
//!
//! Collects the constants that shape a generated profile (grid width,
//! hotkey alphabet, reserved library slots) in one place instead of
//! scattering literals through the build routine. Defaults describe the
//! Ulanzi D200H layout the stamp library was drawn for; a TOML file can
//! override individual fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, StampError};

/// Layout and placement rules for a generated profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DeckLayout {
    /// Button columns on the device keypad.
    pub columns: u32,
    /// Maximum number of button actions to place.
    pub max_actions: usize,
    /// Hotkey letters, assigned in discovery order.
    pub hotkey_alphabet: String,
    /// Modifier prefix for every hotkey binding.
    pub hotkey_modifiers: String,
    /// Highest stamp index in the library (indices start at 1).
    pub stamp_count: u32,
    /// Library indices that exist but are never placed on buttons.
    pub reserved_indices: Vec<u32>,
    /// Edge length of the square button thumbnails, in pixels.
    pub thumbnail_size: u32,
}

impl Default for DeckLayout {
    fn default() -> Self {
        Self {
            // D200H keypad: 5 columns x 3 rows
            columns: 5,
            max_actions: 13,
            hotkey_alphabet: "ABCDEFGHIJKLM".to_string(),
            hotkey_modifiers: "Ctrl+Shift+Alt".to_string(),
            stamp_count: 14,
            // Stamp 14 is the remove tool, not a coloring stamp
            reserved_indices: vec![14],
            thumbnail_size: 80,
        }
    }
}

impl DeckLayout {
    /// Loads a layout from a TOML file, applying defaults for absent fields.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(StampError::LayoutNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let layout: Self =
            toml::from_str(&contents).map_err(|e| StampError::LayoutParse(e.to_string()))?;

        layout.validate()?;

        info!(path = %path.display(), "Loaded layout overrides");
        debug!(?layout, "Effective layout");
        Ok(layout)
    }

    /// Checks the layout for values the builder cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(StampError::LayoutInvalid(
                "columns must be at least 1".to_string(),
            ));
        }
        if self.max_actions == 0 {
            return Err(StampError::LayoutInvalid(
                "max_actions must be at least 1".to_string(),
            ));
        }
        if self.hotkey_alphabet.is_empty() {
            return Err(StampError::LayoutInvalid(
                "hotkey_alphabet must not be empty".to_string(),
            ));
        }
        if self.stamp_count == 0 {
            return Err(StampError::LayoutInvalid(
                "stamp_count must be at least 1".to_string(),
            ));
        }
        if self.thumbnail_size == 0 {
            return Err(StampError::LayoutInvalid(
                "thumbnail_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of actions actually placeable: the configured maximum, capped
    /// by the number of available hotkey letters.
    pub fn capacity(&self) -> usize {
        self.max_actions.min(self.hotkey_alphabet.chars().count())
    }

    /// Grid position for the button at placement order `slot` (0-based),
    /// row-major over the configured column count.
    pub fn position(&self, slot: usize) -> (u32, u32) {
        let slot = u32::try_from(slot).unwrap_or(u32::MAX);
        (slot % self.columns, slot / self.columns)
    }

    /// Page-manifest key for the button at placement order `slot`.
    pub fn position_key(&self, slot: usize) -> String {
        let (col, row) = self.position(slot);
        format!("{col}_{row}")
    }

    /// Full hotkey string for placement order `slot`, or `None` once the
    /// alphabet is exhausted.
    pub fn hotkey(&self, slot: usize) -> Option<String> {
        self.hotkey_alphabet
            .chars()
            .nth(slot)
            .map(|letter| format!("{}+{letter}", self.hotkey_modifiers))
    }
}
