use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

use tile_engine::{ConnectionButton, Creature, LevelLayers, Position, TileIndex, TransparencyTable};

/// Everything the viewer shows, loaded from one JSON file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Scene {
    /// Absent when the level failed to load; the layers then stay as they are.
    pub level: Option<LevelLayers>,
    pub transparent_tiles: Vec<TileIndex>,
    pub monsters: Vec<Creature>,
    pub slips: Vec<Creature>,
    pub connections: Vec<ConnectionButton>,
    pub chip_history: Vec<Position>,
    pub chip: Position,
}

impl Scene {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading scene {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing scene {}", path.display()))
    }

    pub fn transparency(&self) -> TransparencyTable {
        TransparencyTable::from_transparent(self.transparent_tiles.iter().copied())
    }
}
