#![allow(dead_code)]

use image::{Rgba, RgbaImage};
use tile_engine::atlas::{ATLAS_COLUMNS, ATLAS_ROWS};
use tile_engine::{FullscreenPanel, RenderConfig, TransparencyTable};

pub const TRANSPARENT_TILE: u8 = 3;

pub fn small_config() -> RenderConfig {
    RenderConfig {
        tile_width: 8,
        tile_height: 8,
        bg_border: 2,
        show_bg: true,
    }
}

/// Sheet where every pixel encodes `[sprite index, local x, local y, 255]`.
pub fn marker_atlas(config: &RenderConfig) -> RgbaImage {
    let (tw, th) = (config.tile_width, config.tile_height);
    RgbaImage::from_fn(ATLAS_COLUMNS * tw, ATLAS_ROWS * th, |x, y| {
        let index = (x / tw) * ATLAS_ROWS + (y / th);
        Rgba([index as u8, (x % tw) as u8, (y % th) as u8, 255])
    })
}

pub fn marker_panel(config: RenderConfig) -> FullscreenPanel {
    let atlas = marker_atlas(&config);
    FullscreenPanel::from_image(
        &atlas,
        config,
        TransparencyTable::from_transparent([TRANSPARENT_TILE]),
    )
    .expect("marker atlas should slice")
}
