use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("tile atlas is {actual:?} pixels but needs at least {needed:?}")]
    AtlasTooSmall {
        needed: (u32, u32),
        actual: (u32, u32),
    },

    #[error("tile atlas buffer holds {actual} bytes, expected {expected}")]
    AtlasBufferLength { expected: usize, actual: usize },

    #[error("failed to load tile atlas image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("{layer} layer has {actual} cells, expected {expected}")]
    LayerLength {
        layer: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid render config: {0}")]
    InvalidConfig(String),

    #[error("no layer golden at {}; set TILEVIEW_UPDATE_GOLDENS=1 to record it", .0.display())]
    GoldenMissing(PathBuf),

    #[error("layer golden {} differs: {detail}", .path.display())]
    GoldenMismatch { path: PathBuf, detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = RenderError> = std::result::Result<T, E>;
