//! Tile atlas slicing.
//!
//! The source image is a 7-column x 16-row sheet of sprites. Sprite `i` is read from column
//! `i / 16`, row `i % 16`, so indices run down each column before moving right. This differs
//! from the grid's row-major order on purpose: it matches how the sheets are laid out.

use std::path::Path;

use image::RgbaImage;
use tracing::{debug, info};

use crate::config::RenderConfig;
use crate::error::{RenderError, Result};
use crate::grid::TileIndex;
use crate::rect::{Insets, Rect};
use crate::surface::CHANNELS;

pub const ATLAS_COLUMNS: u32 = 7;
pub const ATLAS_ROWS: u32 = 16;
pub const TILE_VARIANTS: usize = (ATLAS_COLUMNS * ATLAS_ROWS) as usize;

/// Where sprite `index` sits in the sheet, in tile units.
pub fn atlas_cell(index: usize) -> (u32, u32) {
    let column = index as u32 / ATLAS_ROWS;
    let row = index as u32 % ATLAS_ROWS;
    (column, row)
}

/// Per-sprite pixel blocks sliced from a tile sheet.
#[derive(Debug, Clone)]
pub struct TileAtlas {
    tile_width: u32,
    tile_height: u32,
    bg_border: u32,
    tiles: Vec<Vec<u8>>,
    bg_tiles: Vec<Vec<u8>>,
}

impl TileAtlas {
    /// Slice a packed RGBA sheet of `width x height` pixels.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8], config: &RenderConfig) -> Result<Self> {
        config.validate()?;

        let expected = (width as usize) * (height as usize) * CHANNELS;
        if rgba.len() != expected {
            return Err(RenderError::AtlasBufferLength {
                expected,
                actual: rgba.len(),
            });
        }

        let needed = ATLAS_COLUMNS
            .checked_mul(config.tile_width)
            .zip(ATLAS_ROWS.checked_mul(config.tile_height))
            .ok_or_else(|| {
                RenderError::InvalidConfig(format!(
                    "a {}x{} tile sheet does not fit in u32 pixels",
                    config.tile_width, config.tile_height
                ))
            })?;
        if width < needed.0 || height < needed.1 {
            return Err(RenderError::AtlasTooSmall {
                needed,
                actual: (width, height),
            });
        }

        let stride = width as usize * CHANNELS;
        let copy_region = |rect: Rect| -> Vec<u8> {
            let row_bytes = rect.w as usize * CHANNELS;
            let mut block = Vec::with_capacity(row_bytes * rect.h as usize);
            for y in rect.y..rect.bottom() {
                let start = y as usize * stride + rect.x as usize * CHANNELS;
                block.extend_from_slice(&rgba[start..start + row_bytes]);
            }
            block
        };

        let mut tiles = Vec::with_capacity(TILE_VARIANTS);
        let mut bg_tiles = Vec::with_capacity(TILE_VARIANTS);
        for index in 0..TILE_VARIANTS {
            let (column, row) = atlas_cell(index);
            let full = Rect::new(
                column * config.tile_width,
                row * config.tile_height,
                config.tile_width,
                config.tile_height,
            );
            tiles.push(copy_region(full));
            bg_tiles.push(copy_region(full.inset(Insets::all(config.bg_border))));
        }

        info!(
            width,
            height,
            tile_width = config.tile_width,
            tile_height = config.tile_height,
            "sliced tile atlas into {TILE_VARIANTS} sprites"
        );

        Ok(Self {
            tile_width: config.tile_width,
            tile_height: config.tile_height,
            bg_border: config.bg_border,
            tiles,
            bg_tiles,
        })
    }

    pub fn from_image(image: &RgbaImage, config: &RenderConfig) -> Result<Self> {
        Self::from_rgba(image.width(), image.height(), image.as_raw(), config)
    }

    pub fn open(path: impl AsRef<Path>, config: &RenderConfig) -> Result<Self> {
        let image = image::open(path.as_ref())?.to_rgba8();
        Self::from_image(&image, config)
    }

    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    pub fn bg_border(&self) -> u32 {
        self.bg_border
    }

    /// Full `tile_width x tile_height` block for `index`. Unknown indices use tile 0.
    pub fn tile(&self, index: TileIndex) -> &[u8] {
        &self.tiles[clamp_index(index)]
    }

    /// Border-cropped block for `index`, used when a background tile peeks through.
    pub fn bg_tile(&self, index: TileIndex) -> &[u8] {
        &self.bg_tiles[clamp_index(index)]
    }
}

fn clamp_index(index: TileIndex) -> usize {
    let index = index as usize;
    if index < TILE_VARIANTS {
        index
    } else {
        debug!(index, "tile index outside atlas, using tile 0");
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> RenderConfig {
        RenderConfig {
            tile_width: 6,
            tile_height: 6,
            bg_border: 1,
            show_bg: true,
        }
    }

    #[test]
    fn atlas_cell_runs_down_columns() {
        assert_eq!(atlas_cell(0), (0, 0));
        assert_eq!(atlas_cell(1), (0, 1));
        assert_eq!(atlas_cell(15), (0, 15));
        assert_eq!(atlas_cell(16), (1, 0));
        assert_eq!(atlas_cell(111), (6, 15));
    }

    #[test]
    fn rejects_undersized_sheet() {
        let config = small_config();
        let (w, h) = (6 * 7, 6 * 15);
        let rgba = vec![0u8; (w * h * 4) as usize];
        let err = TileAtlas::from_rgba(w, h, &rgba, &config).unwrap_err();
        assert!(matches!(
            err,
            RenderError::AtlasTooSmall {
                needed: (42, 96),
                actual: (42, 90)
            }
        ));
    }

    #[test]
    fn oversized_tiles_are_a_config_error() {
        let config = RenderConfig {
            tile_width: 1 << 30,
            tile_height: 1 << 30,
            bg_border: 4,
            show_bg: true,
        };
        let err = TileAtlas::from_rgba(1, 1, &[0u8; 4], &config).unwrap_err();
        assert!(matches!(err, RenderError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_buffer_length_mismatch() {
        let config = small_config();
        let err = TileAtlas::from_rgba(42, 96, &[0u8; 16], &config).unwrap_err();
        assert!(matches!(err, RenderError::AtlasBufferLength { .. }));
    }

    #[test]
    fn out_of_range_index_clamps_to_tile_zero() {
        let config = small_config();
        let (w, h) = (42u32, 96u32);
        let mut rgba = vec![0u8; (w * h * 4) as usize];
        // Mark the top-left pixel of tile 0.
        rgba[..4].copy_from_slice(&[200, 0, 0, 255]);
        let atlas = TileAtlas::from_rgba(w, h, &rgba, &config).unwrap();

        assert_eq!(atlas.tile(200), atlas.tile(0));
        assert_eq!(atlas.bg_tile(TILE_VARIANTS as u8), atlas.bg_tile(0));
        assert_eq!(&atlas.tile(0)[..4], &[200, 0, 0, 255]);
    }
}
