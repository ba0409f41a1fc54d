//! Polyline routing through grid positions with per-tile lane slots.
//!
//! Each time the path enters a tile it is given one of [`SLOT_COUNT`] anchor slots in that tile.
//! A path keeps its current slot while the tile has not used it yet, so straight runs stay on
//! one lane. Once the slot is taken in the tile being entered, the lowest free slot is used
//! instead. When every slot of a tile is taken, slot 0 is reused and segments may overlap.

use tracing::{trace, warn};

use crate::graphics::{BLACK, Canvas2d};
use crate::grid::{GRID_CELLS, Position, SLOT_COUNT, TileGeometry};

/// Which slots each tile has handed out during one trail render.
///
/// One bit per slot, fixed size, allocated per call and thrown away afterwards.
#[derive(Debug, Clone)]
pub struct SlotTable {
    used: [u32; GRID_CELLS],
}

const _: () = assert!(SLOT_COUNT <= u32::BITS as usize);

impl Default for SlotTable {
    fn default() -> Self {
        Self {
            used: [0; GRID_CELLS],
        }
    }
}

impl SlotTable {
    pub fn is_used(&self, tile: usize, slot: usize) -> bool {
        slot < SLOT_COUNT && self.used[tile] & (1 << slot) != 0
    }

    pub fn mark(&mut self, tile: usize, slot: usize) {
        if slot < SLOT_COUNT {
            self.used[tile] |= 1 << slot;
        }
    }

    pub fn first_free(&self, tile: usize) -> Option<usize> {
        (0..SLOT_COUNT).find(|&slot| !self.is_used(tile, slot))
    }

    /// Slot to use when entering `tile` from a segment that left on `current`.
    pub fn choose(&self, tile: usize, current: usize) -> usize {
        if !self.is_used(tile, current) {
            return current;
        }
        self.first_free(tile).unwrap_or_else(|| {
            warn!(tile, "all trail slots used, overlapping on slot 0");
            0
        })
    }
}

/// One straight piece of a routed trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailSegment {
    pub from: Position,
    pub from_slot: usize,
    pub to: Position,
    pub to_slot: usize,
}

impl TrailSegment {
    pub fn endpoints(&self, geometry: TileGeometry) -> ((i32, i32), (i32, i32)) {
        (
            geometry.slot_anchor(self.from, self.from_slot),
            geometry.slot_anchor(self.to, self.to_slot),
        )
    }
}

/// Route a trail through `positions`.
///
/// Consecutive positions on the same tile collapse into one. Positions outside the grid are
/// dropped before routing.
pub fn route_trail(positions: &[Position]) -> Vec<TrailSegment> {
    let mut cells = positions
        .iter()
        .filter_map(|&pos| pos.index().map(|index| (pos, index)));

    let Some((mut previous, mut previous_index)) = cells.next() else {
        return Vec::new();
    };

    let mut slots = SlotTable::default();
    let mut old_slot = 0usize;
    let mut segments = Vec::new();

    for (pos, tile) in cells {
        if tile == previous_index {
            continue;
        }
        let slot = slots.choose(tile, old_slot);
        trace!(?previous, ?pos, from_slot = old_slot, to_slot = slot, "trail segment");
        segments.push(TrailSegment {
            from: previous,
            from_slot: old_slot,
            to: pos,
            to_slot: slot,
        });
        slots.mark(tile, slot);
        previous = pos;
        previous_index = tile;
        old_slot = slot;
    }

    segments
}

/// Route and draw a trail in black onto `canvas`.
pub fn draw_trail(canvas: &mut dyn Canvas2d, geometry: TileGeometry, positions: &[Position]) {
    for segment in route_trail(positions) {
        let (from, to) = segment.endpoints(geometry);
        canvas.draw_line(from, to, BLACK);
    }
}
