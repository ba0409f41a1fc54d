//! Incremental tile-grid renderer.
//!
//! Slices a tile sheet into sprites, keeps persistent background/foreground layers for a 32x32
//! grid up to date one changed cell at a time, and draws per-frame annotations (creature
//! numbers, button wiring, movement trails) onto scratch overlays.

pub mod atlas;
pub mod config;
pub mod error;
pub mod graphics;
pub mod grid;
pub mod history;
pub mod layers;
pub mod level;
pub mod overlay;
pub mod panel;
pub mod rect;
pub mod redraw;
pub mod regression;
pub mod surface;
pub mod trail;

pub use atlas::TileAtlas;
pub use config::RenderConfig;
pub use error::RenderError;
pub use grid::{Position, TileIndex};
pub use history::MoveHistory;
pub use layers::Layers;
pub use level::{ConnectionButton, Creature, LevelLayers, TileMetadata, TransparencyTable};
pub use panel::{FullscreenPanel, Renderer};
pub use redraw::{RedrawEngine, RedrawStats};
pub use surface::{PixelSurface, SurfaceSize};
