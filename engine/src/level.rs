//! Level data handed to the renderer by the game model.

use serde::{Deserialize, Serialize};

use crate::atlas::TILE_VARIANTS;
use crate::error::{RenderError, Result};
use crate::grid::{GRID_CELLS, Position, TileIndex};

/// Background and foreground tile indices for every grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLevelLayers", into = "RawLevelLayers")]
pub struct LevelLayers {
    background: Box<[TileIndex; GRID_CELLS]>,
    foreground: Box<[TileIndex; GRID_CELLS]>,
}

#[derive(Serialize, Deserialize)]
struct RawLevelLayers {
    background: Vec<TileIndex>,
    foreground: Vec<TileIndex>,
}

impl TryFrom<RawLevelLayers> for LevelLayers {
    type Error = RenderError;

    fn try_from(raw: RawLevelLayers) -> Result<Self> {
        Self::from_vecs(raw.background, raw.foreground)
    }
}

impl From<LevelLayers> for RawLevelLayers {
    fn from(layers: LevelLayers) -> Self {
        Self {
            background: layers.background.to_vec(),
            foreground: layers.foreground.to_vec(),
        }
    }
}

fn boxed_layer(layer: &'static str, cells: Vec<TileIndex>) -> Result<Box<[TileIndex; GRID_CELLS]>> {
    let actual = cells.len();
    cells
        .into_boxed_slice()
        .try_into()
        .map_err(|_| RenderError::LayerLength {
            layer,
            expected: GRID_CELLS,
            actual,
        })
}

impl LevelLayers {
    /// A level whose every cell uses `background` under `foreground`.
    pub fn filled(background: TileIndex, foreground: TileIndex) -> Self {
        Self {
            background: Box::new([background; GRID_CELLS]),
            foreground: Box::new([foreground; GRID_CELLS]),
        }
    }

    pub fn from_vecs(background: Vec<TileIndex>, foreground: Vec<TileIndex>) -> Result<Self> {
        Ok(Self {
            background: boxed_layer("background", background)?,
            foreground: boxed_layer("foreground", foreground)?,
        })
    }

    pub fn background(&self) -> &[TileIndex; GRID_CELLS] {
        &self.background
    }

    pub fn foreground(&self) -> &[TileIndex; GRID_CELLS] {
        &self.foreground
    }

    /// Sets both layers at `pos`. Positions outside the grid are ignored.
    pub fn set(&mut self, pos: Position, background: TileIndex, foreground: TileIndex) {
        if let Some(i) = pos.index() {
            self.background[i] = background;
            self.foreground[i] = foreground;
        }
    }

    pub fn set_foreground(&mut self, pos: Position, tile: TileIndex) {
        if let Some(i) = pos.index() {
            self.foreground[i] = tile;
        }
    }

    pub fn set_background(&mut self, pos: Position, tile: TileIndex) {
        if let Some(i) = pos.index() {
            self.background[i] = tile;
        }
    }
}

/// A monster or block on the board; only its position matters to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub position: Position,
}

impl Creature {
    pub const fn at(x: u32, y: u32) -> Self {
        Self {
            position: Position::new(x, y),
        }
    }
}

/// A button wired to a target tile (trap, clone machine, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionButton {
    pub button_position: Position,
    pub target_position: Position,
}

/// Tile metadata the renderer needs from the game model.
pub trait TileMetadata {
    /// Whether the foreground sprite for `tile` lets the background show through.
    fn is_transparent(&self, tile: TileIndex) -> bool;
}

/// Transparency flags for every atlas sprite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransparencyTable {
    transparent: [bool; TILE_VARIANTS],
}

impl Default for TransparencyTable {
    fn default() -> Self {
        Self {
            transparent: [false; TILE_VARIANTS],
        }
    }
}

impl TransparencyTable {
    pub fn from_transparent(tiles: impl IntoIterator<Item = TileIndex>) -> Self {
        let mut table = Self::default();
        for tile in tiles {
            table.set(tile, true);
        }
        table
    }

    pub fn set(&mut self, tile: TileIndex, transparent: bool) {
        if let Some(flag) = self.transparent.get_mut(tile as usize) {
            *flag = transparent;
        }
    }
}

impl TileMetadata for TransparencyTable {
    fn is_transparent(&self, tile: TileIndex) -> bool {
        // Out-of-atlas indices render as tile 0, so they share its flag.
        self.transparent
            .get(tile as usize)
            .copied()
            .unwrap_or(self.transparent[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vecs_rejects_short_layers() {
        let err = LevelLayers::from_vecs(vec![0; GRID_CELLS], vec![0; 10]).unwrap_err();
        assert!(matches!(
            err,
            RenderError::LayerLength {
                layer: "foreground",
                expected: GRID_CELLS,
                actual: 10
            }
        ));
    }

    #[test]
    fn json_roundtrip_preserves_cells() {
        let mut layers = LevelLayers::filled(0, 1);
        layers.set(Position::new(3, 2), 5, 6);

        let json = serde_json::to_string(&layers).unwrap();
        let back: LevelLayers = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layers);
        assert_eq!(back.foreground()[2 * 32 + 3], 6);
    }

    #[test]
    fn json_with_wrong_length_fails_to_parse() {
        let json = r#"{ "background": [0, 0], "foreground": [0, 0] }"#;
        assert!(serde_json::from_str::<LevelLayers>(json).is_err());
    }

    #[test]
    fn transparency_table_clamps_unknown_tiles_to_tile_zero() {
        let table = TransparencyTable::from_transparent([0, 7]);
        assert!(table.is_transparent(7));
        assert!(!table.is_transparent(8));
        assert!(table.is_transparent(250));
    }
}
