//! Persistent background and foreground layers plus the blank-background template.

use tracing::info;

use crate::atlas::TileAtlas;
use crate::grid::{GRID_CELLS, TileGeometry, TileIndex};
use crate::rect::{Insets, Rect};
use crate::surface::{PixelSurface, SurfaceSize};

/// The persistent pixel layers covering the whole 32x32 grid.
#[derive(Debug, Clone)]
pub struct Layers {
    geometry: TileGeometry,
    background: PixelSurface,
    foreground: PixelSurface,
    blank_background: PixelSurface,
}

impl Layers {
    /// Allocate the three layers and paint tile 0 across the blank-background template.
    ///
    /// The background and foreground layers start fully transparent.
    pub fn initialise(atlas: &TileAtlas) -> Self {
        let geometry = TileGeometry::new(atlas.tile_width(), atlas.tile_height());
        let size = SurfaceSize::new(geometry.grid_pixel_width(), geometry.grid_pixel_height());

        let mut blank_background = PixelSurface::new(size);
        let blank = atlas.tile(0);
        for i in 0..GRID_CELLS {
            blank_background.write_block(geometry.cell_rect(i), blank);
        }

        info!(width = size.width, height = size.height, "initialised layers");

        Self {
            geometry,
            background: PixelSurface::new(size),
            foreground: PixelSurface::new(size),
            blank_background,
        }
    }

    pub fn geometry(&self) -> TileGeometry {
        self.geometry
    }

    pub fn size(&self) -> SurfaceSize {
        self.background.size()
    }

    pub fn background(&self) -> &PixelSurface {
        &self.background
    }

    pub fn foreground(&self) -> &PixelSurface {
        &self.foreground
    }

    pub fn blank_background(&self) -> &PixelSurface {
        &self.blank_background
    }

    /// A transparent scratch surface the size of the layers, for overlays.
    pub fn new_overlay(&self) -> PixelSurface {
        PixelSurface::new(self.size())
    }

    pub fn write_background_tile(&mut self, cell: usize, atlas: &TileAtlas, tile: TileIndex) {
        self.background
            .write_block(self.geometry.cell_rect(cell), atlas.tile(tile));
    }

    pub fn write_foreground_tile(&mut self, cell: usize, atlas: &TileAtlas, tile: TileIndex) {
        self.foreground
            .write_block(self.geometry.cell_rect(cell), atlas.tile(tile));
    }

    /// Overwrite the interior of a foreground cell with the cropped background sprite,
    /// leaving a `bg_border` ring of the foreground tile's own pixels.
    pub fn write_background_peek(&mut self, cell: usize, atlas: &TileAtlas, tile: TileIndex) {
        let inner = peek_rect(self.geometry.cell_rect(cell), atlas.bg_border());
        self.foreground.write_block(inner, atlas.bg_tile(tile));
    }

    /// Background, then foreground, then `overlay` (if any), each composited source-over.
    pub fn composite(&self, overlay: Option<&PixelSurface>) -> PixelSurface {
        let mut out = self.background.clone();
        out.blend_over(&self.foreground);
        if let Some(overlay) = overlay {
            out.blend_over(overlay);
        }
        out
    }
}

pub fn peek_rect(cell: Rect, bg_border: u32) -> Rect {
    cell.inset(Insets::all(bg_border))
}
