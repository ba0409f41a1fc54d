use image::RgbaImage;
use tracing::info;

use crate::atlas::TileAtlas;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::graphics::CpuCanvas;
use crate::grid::{Position, TileGeometry};
use crate::history::MoveHistory;
use crate::layers::Layers;
use crate::level::{ConnectionButton, Creature, LevelLayers, TileMetadata, TransparencyTable};
use crate::overlay;
use crate::redraw::{RedrawEngine, RedrawOptions, RedrawStats};
use crate::surface::PixelSurface;
use crate::trail;

/// Rendering capabilities the windowing adapter drives each frame.
///
/// The adapter decides *when* to paint. It calls `redraw` to bring the persistent layers up to
/// date, then hands a fresh overlay to whichever annotators it wants, then composites.
pub trait Renderer {
    /// Bring the persistent layers up to date with `level`.
    ///
    /// Returns `None` without touching any surface when there is no level.
    fn redraw(&mut self, level: Option<&LevelLayers>, from_scratch: bool) -> Option<RedrawStats>;

    fn draw_monster_list(&self, monsters: &[Creature], overlay: &mut PixelSurface);

    fn draw_slip_list(&self, slips: &[Creature], overlay: &mut PixelSurface);

    fn draw_button_connections(&self, connections: &[ConnectionButton], overlay: &mut PixelSurface);

    fn draw_position_list(&self, positions: &[Position], overlay: &mut PixelSurface);

    /// Trail of the recorded chip moves ending at the live position.
    fn draw_chip_history(&self, history: &MoveHistory, current: Position, overlay: &mut PixelSurface) {
        self.draw_position_list(&history.with_current(current), overlay);
    }

    fn layers(&self) -> &Layers;
}

/// Full 32x32 view of the level: one sprite per cell, no scrolling.
#[derive(Debug, Clone)]
pub struct FullscreenPanel<M = TransparencyTable> {
    config: RenderConfig,
    atlas: TileAtlas,
    layers: Layers,
    engine: RedrawEngine,
    metadata: M,
}

impl<M: TileMetadata> FullscreenPanel<M> {
    pub fn new(atlas: TileAtlas, config: RenderConfig, metadata: M) -> Self {
        let layers = Layers::initialise(&atlas);
        Self {
            config,
            atlas,
            layers,
            engine: RedrawEngine::new(),
            metadata,
        }
    }

    pub fn from_image(image: &RgbaImage, config: RenderConfig, metadata: M) -> Result<Self> {
        let atlas = TileAtlas::from_image(image, &config)?;
        Ok(Self::new(atlas, config, metadata))
    }

    /// Swap in a new tile sheet. Layers are rebuilt, so the next redraw should be from scratch.
    pub fn reload_atlas(&mut self, image: &RgbaImage) -> Result<()> {
        self.atlas = TileAtlas::from_image(image, &self.config)?;
        self.layers = Layers::initialise(&self.atlas);
        self.engine = RedrawEngine::new();
        info!("reloaded tile atlas");
        Ok(())
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn atlas(&self) -> &TileAtlas {
        &self.atlas
    }

    pub fn geometry(&self) -> TileGeometry {
        self.layers.geometry()
    }

    pub fn show_bg(&self) -> bool {
        self.config.show_bg
    }

    /// Toggle background peeking. Already drawn cells keep their pixels until redrawn.
    pub fn set_show_bg(&mut self, show_bg: bool) {
        self.config.show_bg = show_bg;
    }

    pub fn previous_foreground(&self) -> &[u8] {
        self.engine.previous_foreground()
    }
}

impl<M: TileMetadata> Renderer for FullscreenPanel<M> {
    fn redraw(&mut self, level: Option<&LevelLayers>, from_scratch: bool) -> Option<RedrawStats> {
        self.engine.redraw(
            &mut self.layers,
            &self.atlas,
            &self.metadata,
            level,
            RedrawOptions {
                from_scratch,
                show_bg: self.config.show_bg,
            },
        )
    }

    fn draw_monster_list(&self, monsters: &[Creature], overlay: &mut PixelSurface) {
        overlay::draw_monster_list(&mut CpuCanvas::new(overlay), self.geometry(), monsters);
    }

    fn draw_slip_list(&self, slips: &[Creature], overlay: &mut PixelSurface) {
        overlay::draw_slip_list(&mut CpuCanvas::new(overlay), self.geometry(), slips);
    }

    fn draw_button_connections(&self, connections: &[ConnectionButton], overlay: &mut PixelSurface) {
        overlay::draw_button_connections(&mut CpuCanvas::new(overlay), self.geometry(), connections);
    }

    fn draw_position_list(&self, positions: &[Position], overlay: &mut PixelSurface) {
        trail::draw_trail(&mut CpuCanvas::new(overlay), self.geometry(), positions);
    }

    fn layers(&self) -> &Layers {
        &self.layers
    }
}
