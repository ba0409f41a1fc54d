//! Per-frame annotations drawn onto a scratch overlay, never onto the persistent layers.

use crate::graphics::{BLACK, Canvas2d, DigitPalette, SMALL_NUMERAL_HEIGHT};
use crate::grid::TileGeometry;
use crate::level::{ConnectionButton, Creature};

/// Number each creature 1..=n at its tile's top-left corner, in list order.
pub fn draw_monster_list(canvas: &mut dyn Canvas2d, geometry: TileGeometry, monsters: &[Creature]) {
    for (i, monster) in monsters.iter().enumerate() {
        let pos = monster.position;
        if !pos.in_grid() {
            continue;
        }
        let rect = geometry.tile_rect(pos);
        canvas.draw_number(i as u32 + 1, DigitPalette::BLACK_DIGITS, rect.x, rect.y);
    }
}

/// Number slipping creatures 1..=n near the bottom edge of their tile, in blue.
pub fn draw_slip_list(canvas: &mut dyn Canvas2d, geometry: TileGeometry, slips: &[Creature]) {
    let y_offset = geometry
        .tile_height
        .saturating_sub(SMALL_NUMERAL_HEIGHT + 2);
    for (i, monster) in slips.iter().enumerate() {
        let pos = monster.position;
        if !pos.in_grid() {
            continue;
        }
        let rect = geometry.tile_rect(pos);
        canvas.draw_number(
            i as u32 + 1,
            DigitPalette::BLUE_DIGITS,
            rect.x,
            rect.y + y_offset,
        );
    }
}

/// Black line from each button's tile centre to its target's tile centre.
pub fn draw_button_connections(
    canvas: &mut dyn Canvas2d,
    geometry: TileGeometry,
    connections: &[ConnectionButton],
) {
    for connection in connections {
        if !connection.button_position.in_grid() || !connection.target_position.in_grid() {
            continue;
        }
        canvas.draw_line(
            geometry.center(connection.button_position),
            geometry.center(connection.target_position),
            BLACK,
        );
    }
}
