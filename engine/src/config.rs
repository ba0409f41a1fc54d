use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};

/// Smallest tile edge that still leaves room for every trail slot.
const MIN_TILE_EDGE: u32 = 6;

/// Largest tile edge accepted; keeps whole-grid and whole-sheet pixel sizes well inside `u32`.
pub const MAX_TILE_EDGE: u32 = 256;

/// Environment flag helper: accepts `1/true/yes/on` and `0/false/no/off` (case-insensitive).
pub fn env_bool(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .and_then(|v| match v.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub fn env_u32(name: &str) -> Option<u32> {
    std::env::var(name).ok().and_then(|v| v.trim().parse::<u32>().ok())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub tile_width: u32,
    pub tile_height: u32,
    /// Margin kept from the foreground tile when a background tile peeks through it.
    pub bg_border: u32,
    pub show_bg: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tile_width: 32,
            tile_height: 32,
            bg_border: 4,
            show_bg: true,
        }
    }
}

impl RenderConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: RenderConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `TILEVIEW_TILE_SIZE`, `TILEVIEW_BG_BORDER` and `TILEVIEW_SHOW_BG` when set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(size) = env_u32("TILEVIEW_TILE_SIZE") {
            self.tile_width = size;
            self.tile_height = size;
        }
        if let Some(border) = env_u32("TILEVIEW_BG_BORDER") {
            self.bg_border = border;
        }
        if let Some(show_bg) = env_bool("TILEVIEW_SHOW_BG") {
            self.show_bg = show_bg;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.tile_width < MIN_TILE_EDGE || self.tile_height < MIN_TILE_EDGE {
            return Err(RenderError::InvalidConfig(format!(
                "tiles must be at least {MIN_TILE_EDGE}x{MIN_TILE_EDGE}, got {}x{}",
                self.tile_width, self.tile_height
            )));
        }
        if self.tile_width > MAX_TILE_EDGE || self.tile_height > MAX_TILE_EDGE {
            return Err(RenderError::InvalidConfig(format!(
                "tiles must be at most {MAX_TILE_EDGE}x{MAX_TILE_EDGE}, got {}x{}",
                self.tile_width, self.tile_height
            )));
        }
        let double_border = self.bg_border.saturating_mul(2);
        if double_border >= self.tile_width || double_border >= self.tile_height {
            return Err(RenderError::InvalidConfig(format!(
                "bg_border {} leaves no interior in a {}x{} tile",
                self.bg_border, self.tile_width, self.tile_height
            )));
        }
        Ok(())
    }

}
