mod common;

use common::{TRANSPARENT_TILE, marker_panel, small_config};
use tile_engine::grid::{GRID_CELLS, Position};
use tile_engine::rect::Rect;
use tile_engine::{LevelLayers, PixelSurface, RenderConfig, Renderer};

fn changed_pixels(before: &PixelSurface, after: &PixelSurface) -> Vec<(u32, u32)> {
    let size = before.size();
    let mut out = Vec::new();
    for y in 0..size.height {
        for x in 0..size.width {
            if before.pixel(x, y) != after.pixel(x, y) {
                out.push((x, y));
            }
        }
    }
    out
}

#[test]
fn second_identical_redraw_writes_nothing() {
    let mut panel = marker_panel(small_config());
    let level = LevelLayers::filled(1, 2);

    let first = panel.redraw(Some(&level), true).unwrap();
    assert_eq!(first.cells_redrawn, GRID_CELLS);

    let fg_before = panel.layers().foreground().clone();
    let second = panel.redraw(Some(&level), false).unwrap();
    assert_eq!(second.cells_redrawn, 0);
    assert_eq!(panel.layers().foreground(), &fg_before);
}

#[test]
fn from_scratch_repaints_every_cell() {
    let mut panel = marker_panel(small_config());
    let level = LevelLayers::filled(1, 2);
    panel.redraw(Some(&level), true);

    let stats = panel.redraw(Some(&level), true).unwrap();
    assert_eq!(stats.cells_redrawn, GRID_CELLS);
}

#[test]
fn first_incremental_redraw_compares_against_empty_snapshot() {
    let mut panel = marker_panel(small_config());
    let mut level = LevelLayers::filled(0, 0);
    level.set_foreground(Position::new(4, 4), 9);
    level.set_foreground(Position::new(5, 4), 9);

    let stats = panel.redraw(Some(&level), false).unwrap();
    assert_eq!(stats.cells_redrawn, 2);
}

#[test]
fn one_changed_foreground_cell_repaints_only_that_cell() {
    let mut panel = marker_panel(small_config());
    let mut level = LevelLayers::filled(1, 2);
    panel.redraw(Some(&level), true);

    let bg_before = panel.layers().background().clone();
    let fg_before = panel.layers().foreground().clone();

    let pos = Position::new(7, 3);
    level.set(pos, 4, 5);
    let stats = panel.redraw(Some(&level), false).unwrap();
    assert_eq!(stats.cells_redrawn, 1);

    let cell = panel.geometry().tile_rect(pos);
    let fg_changes = changed_pixels(&fg_before, panel.layers().foreground());
    let bg_changes = changed_pixels(&bg_before, panel.layers().background());
    assert_eq!(fg_changes.len(), 64);
    assert_eq!(bg_changes.len(), 64);
    assert!(fg_changes.iter().all(|&(x, y)| cell.contains(x, y)));
    assert!(bg_changes.iter().all(|&(x, y)| cell.contains(x, y)));

    assert_eq!(panel.layers().foreground().pixel(cell.x, cell.y), Some([5, 0, 0, 255]));
    assert_eq!(panel.layers().background().pixel(cell.x, cell.y), Some([4, 0, 0, 255]));
}

#[test]
fn background_only_change_is_not_repainted() {
    let mut panel = marker_panel(small_config());
    let mut level = LevelLayers::filled(1, 2);
    panel.redraw(Some(&level), true);
    let bg_before = panel.layers().background().clone();

    level.set_background(Position::new(0, 0), 6);
    let stats = panel.redraw(Some(&level), false).unwrap();
    assert_eq!(stats.cells_redrawn, 0);
    assert_eq!(panel.layers().background(), &bg_before);

    // A forced repaint picks it up.
    panel.redraw(Some(&level), true);
    assert_eq!(panel.layers().background().pixel(0, 0), Some([6, 0, 0, 255]));
}

#[test]
fn missing_level_leaves_layers_and_snapshot_untouched() {
    let mut panel = marker_panel(small_config());
    let level = LevelLayers::filled(1, 2);
    panel.redraw(Some(&level), true);

    let fg_before = panel.layers().foreground().clone();
    let snapshot_before = panel.previous_foreground().to_vec();

    assert_eq!(panel.redraw(None, true), None);
    assert_eq!(panel.layers().foreground(), &fg_before);
    assert_eq!(panel.previous_foreground(), snapshot_before.as_slice());
}

#[test]
fn snapshot_is_independent_of_later_level_mutation() {
    let mut panel = marker_panel(small_config());
    let mut level = LevelLayers::filled(0, 2);
    panel.redraw(Some(&level), true);

    level.set_foreground(Position::new(1, 1), 7);
    assert_eq!(panel.previous_foreground()[33], 2);

    let stats = panel.redraw(Some(&level), false).unwrap();
    assert_eq!(stats.cells_redrawn, 1);
}

#[test]
fn transparent_foreground_shows_cropped_background_inside_its_border() {
    let mut panel = marker_panel(small_config());
    let pos = Position::new(2, 2);
    let mut level = LevelLayers::filled(0, 1);
    level.set(pos, 5, TRANSPARENT_TILE);

    let stats = panel.redraw(Some(&level), true).unwrap();
    assert_eq!(stats.background_peeks, 1);

    let cell = panel.geometry().tile_rect(pos);
    let fg = panel.layers().foreground();
    for y in 0..8 {
        for x in 0..8 {
            let px = fg.pixel(cell.x + x, cell.y + y).unwrap();
            let interior = (2..6).contains(&x) && (2..6).contains(&y);
            if interior {
                // Cropped background sprite 5 starts at its own (2, 2).
                assert_eq!(px, [5, x as u8, y as u8, 255], "interior ({x},{y})");
            } else {
                assert_eq!(px, [TRANSPARENT_TILE, x as u8, y as u8, 255], "border ({x},{y})");
            }
        }
    }

    let inner = Rect::new(cell.x + 2, cell.y + 2, 4, 4);
    assert_eq!(
        fg.read_block(inner).unwrap().as_slice(),
        panel.atlas().bg_tile(5)
    );
}

#[test]
fn no_peek_over_empty_background_or_opaque_foreground() {
    let mut panel = marker_panel(small_config());
    let mut level = LevelLayers::filled(0, 1);
    level.set(Position::new(0, 0), 0, TRANSPARENT_TILE);
    level.set(Position::new(1, 0), 5, 1);

    let stats = panel.redraw(Some(&level), true).unwrap();
    assert_eq!(stats.background_peeks, 0);
    assert_eq!(
        panel.layers().foreground().pixel(3, 3),
        Some([TRANSPARENT_TILE, 3, 3, 255])
    );
}

#[test]
fn show_bg_disabled_suppresses_peek() {
    let mut panel = marker_panel(RenderConfig {
        show_bg: false,
        ..small_config()
    });
    let mut level = LevelLayers::filled(0, 1);
    level.set(Position::new(0, 0), 5, TRANSPARENT_TILE);

    let stats = panel.redraw(Some(&level), true).unwrap();
    assert_eq!(stats.background_peeks, 0);

    panel.set_show_bg(true);
    let stats = panel.redraw(Some(&level), true).unwrap();
    assert_eq!(stats.background_peeks, 1);
    assert_eq!(panel.layers().foreground().pixel(3, 3), Some([5, 3, 3, 255]));
}

#[test]
fn composite_stacks_foreground_over_background() {
    let mut panel = marker_panel(small_config());
    let level = LevelLayers::filled(1, 2);
    panel.redraw(Some(&level), true);

    let mut overlay = panel.layers().new_overlay();
    overlay.set_pixel(0, 0, [9, 9, 9, 255]);
    let screen = panel.layers().composite(Some(&overlay));

    assert_eq!(screen.pixel(0, 0), Some([9, 9, 9, 255]));
    assert_eq!(screen.pixel(1, 0), Some([2, 1, 0, 255]));
}
