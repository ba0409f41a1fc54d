//! Grid addressing shared by every part of the renderer.
//!
//! The level is a fixed 32x32 grid stored row-major: cell `i` lives at
//! `x = i % 32`, `y = i / 32`.

use serde::{Deserialize, Serialize};

use crate::rect::Rect;

pub const GRID_SIDE: u32 = 32;
pub const GRID_CELLS: usize = (GRID_SIDE * GRID_SIDE) as usize;

/// Sprite index into the tile atlas. `0` means "no background tile".
pub type TileIndex = u8;

pub const EMPTY_TILE: TileIndex = 0;

/// Number of sub-tile anchor slots available to trail segments.
pub const SLOT_COUNT: usize = 21;

/// Slot anchors on a 5x5 lattice (corners removed), as offsets from the
/// tile centre in lattice steps. Ordered by distance from the centre.
const SLOT_LATTICE: [(i32, i32); SLOT_COUNT] = [
    (0, 0),
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
    (1, -1),
    (2, 0),
    (0, 2),
    (-2, 0),
    (0, -2),
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

/// Lattice steps per tile edge; the outer lattice ring sits one step inside the tile.
const SLOT_PITCH_DIVISOR: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub fn from_index(index: usize) -> Self {
        Self {
            x: (index % GRID_SIDE as usize) as u32,
            y: (index / GRID_SIDE as usize) as u32,
        }
    }

    pub fn in_grid(self) -> bool {
        self.x < GRID_SIDE && self.y < GRID_SIDE
    }

    /// Linear cell index, or `None` for positions outside the grid.
    pub fn index(self) -> Option<usize> {
        self.in_grid()
            .then(|| (self.y * GRID_SIDE + self.x) as usize)
    }
}

/// Pixel geometry of one tile cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGeometry {
    pub tile_width: u32,
    pub tile_height: u32,
}

impl TileGeometry {
    pub const fn new(tile_width: u32, tile_height: u32) -> Self {
        Self {
            tile_width,
            tile_height,
        }
    }

    pub fn grid_pixel_width(self) -> u32 {
        GRID_SIDE * self.tile_width
    }

    pub fn grid_pixel_height(self) -> u32 {
        GRID_SIDE * self.tile_height
    }

    pub fn cell_rect(self, index: usize) -> Rect {
        let pos = Position::from_index(index);
        self.tile_rect(pos)
    }

    pub fn tile_rect(self, pos: Position) -> Rect {
        Rect::new(
            pos.x * self.tile_width,
            pos.y * self.tile_height,
            self.tile_width,
            self.tile_height,
        )
    }

    /// Pixel coordinate of `slot` inside the tile at `pos`.
    ///
    /// Slots outside `0..SLOT_COUNT` are treated as slot 0.
    pub fn slot_anchor(self, pos: Position, slot: usize) -> (i32, i32) {
        let (dx, dy) = SLOT_LATTICE.get(slot).copied().unwrap_or((0, 0));
        let pitch_x = (self.tile_width / SLOT_PITCH_DIVISOR) as i32;
        let pitch_y = (self.tile_height / SLOT_PITCH_DIVISOR) as i32;
        let rect = self.tile_rect(pos);
        let cx = (rect.x + self.tile_width / 2) as i32;
        let cy = (rect.y + self.tile_height / 2) as i32;
        (cx + dx * pitch_x, cy + dy * pitch_y)
    }

    pub fn center(self, pos: Position) -> (i32, i32) {
        self.slot_anchor(pos, 0)
    }
}
