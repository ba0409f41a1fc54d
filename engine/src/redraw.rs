//! Change-driven redraw of the persistent layers.
//!
//! Only cells whose foreground tile index differs from the last rendered frame are rewritten.
//! A cell whose background alone changed keeps its stale pixels until its foreground changes
//! or a `from_scratch` redraw is requested.

use tracing::debug;

use crate::atlas::TileAtlas;
use crate::grid::{EMPTY_TILE, GRID_CELLS, TileIndex};
use crate::layers::Layers;
use crate::level::{LevelLayers, TileMetadata};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedrawOptions {
    /// Repaint every cell regardless of the previous frame.
    pub from_scratch: bool,
    /// Let non-empty background tiles peek through transparent foreground tiles.
    pub show_bg: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedrawStats {
    pub cells_redrawn: usize,
    pub background_peeks: usize,
}

/// Cells that need repainting when moving from `previous` to `current`.
pub fn dirty_cells<'a>(
    previous: &'a [TileIndex; GRID_CELLS],
    current: &'a [TileIndex; GRID_CELLS],
    from_scratch: bool,
) -> impl Iterator<Item = usize> + 'a {
    (0..GRID_CELLS).filter(move |&i| from_scratch || previous[i] != current[i])
}

/// Owns the foreground snapshot of the last rendered frame.
#[derive(Debug, Clone)]
pub struct RedrawEngine {
    previous_foreground: Box<[TileIndex; GRID_CELLS]>,
}

impl Default for RedrawEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RedrawEngine {
    /// Starts with an all-empty snapshot.
    pub fn new() -> Self {
        Self {
            previous_foreground: Box::new([EMPTY_TILE; GRID_CELLS]),
        }
    }

    pub fn previous_foreground(&self) -> &[TileIndex; GRID_CELLS] {
        &self.previous_foreground
    }

    /// Repaint changed cells of `level` into `layers`.
    ///
    /// Returns `None` and leaves the layers and snapshot untouched when there is no level.
    pub fn redraw(
        &mut self,
        layers: &mut Layers,
        atlas: &TileAtlas,
        metadata: &dyn TileMetadata,
        level: Option<&LevelLayers>,
        options: RedrawOptions,
    ) -> Option<RedrawStats> {
        let level = level?;
        let background = level.background();
        let foreground = level.foreground();

        let mut stats = RedrawStats::default();
        for i in dirty_cells(&self.previous_foreground, foreground, options.from_scratch) {
            let bg = background[i];
            let fg = foreground[i];
            layers.write_background_tile(i, atlas, bg);
            layers.write_foreground_tile(i, atlas, fg);
            if options.show_bg && metadata.is_transparent(fg) && bg != EMPTY_TILE {
                layers.write_background_peek(i, atlas, bg);
                stats.background_peeks += 1;
            }
            stats.cells_redrawn += 1;
        }

        *self.previous_foreground = *foreground;

        debug!(
            cells = stats.cells_redrawn,
            peeks = stats.background_peeks,
            from_scratch = options.from_scratch,
            "redrew level"
        );
        Some(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dirty_cells_only_reports_changes() {
        let previous = [0u8; GRID_CELLS];
        let mut current = [0u8; GRID_CELLS];
        current[5] = 3;
        current[1000] = 1;

        let dirty: Vec<usize> = dirty_cells(&previous, &current, false).collect();
        assert_eq!(dirty, vec![5, 1000]);
    }

    #[test]
    fn from_scratch_marks_every_cell() {
        let tiles = [4u8; GRID_CELLS];
        assert_eq!(dirty_cells(&tiles, &tiles, true).count(), GRID_CELLS);
        assert_eq!(dirty_cells(&tiles, &tiles, false).count(), 0);
    }
}
