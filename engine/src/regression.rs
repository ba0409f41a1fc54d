//! Layer hash goldens for render regression tests.
//!
//! A golden records, for every frame of a scripted render, the SHA-256 of the background,
//! foreground and overlay surfaces separately, so a failure names the pass that drifted.
//! Goldens live next to the tests that use them. A missing golden is an error unless
//! `TILEVIEW_UPDATE_GOLDENS=1`, which (re)records it.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::config::env_bool;
use crate::error::{RenderError, Result};
use crate::layers::Layers;
use crate::surface::PixelSurface;

pub const UPDATE_GOLDENS_ENV: &str = "TILEVIEW_UPDATE_GOLDENS";

pub fn update_goldens_enabled() -> bool {
    env_bool(UPDATE_GOLDENS_ENV).unwrap_or(false)
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Hashes of each persistent layer plus the frame's overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerHashes {
    pub background: String,
    pub foreground: String,
    pub overlay: String,
}

impl LayerHashes {
    pub fn capture(layers: &Layers, overlay: &PixelSurface) -> Self {
        Self {
            background: sha256_hex(layers.background().frame()),
            foreground: sha256_hex(layers.foreground().frame()),
            overlay: sha256_hex(overlay.frame()),
        }
    }

    fn first_difference(&self, other: &Self) -> Option<&'static str> {
        [
            ("background", &self.background, &other.background),
            ("foreground", &self.foreground, &other.foreground),
            ("overlay", &self.overlay, &other.overlay),
        ]
        .into_iter()
        .find(|(_, a, b)| a != b)
        .map(|(layer, _, _)| layer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerGolden {
    pub width: u32,
    pub height: u32,
    pub frames: Vec<LayerHashes>,
}

impl LayerGolden {
    /// An empty recording sized to `layers`.
    pub fn new(layers: &Layers) -> Self {
        let size = layers.size();
        Self {
            width: size.width,
            height: size.height,
            frames: Vec::new(),
        }
    }

    pub fn push_frame(&mut self, layers: &Layers, overlay: &PixelSurface) {
        self.frames.push(LayerHashes::capture(layers, overlay));
    }

    /// Compare against the golden at `path`, or overwrite it when `update` is set.
    pub fn check(&self, path: impl AsRef<Path>, update: bool) -> Result<()> {
        let path = path.as_ref();
        if update {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, serde_json::to_string_pretty(self)?)?;
            info!(path = %path.display(), frames = self.frames.len(), "recorded layer golden");
            return Ok(());
        }
        if !path.exists() {
            return Err(RenderError::GoldenMissing(path.to_path_buf()));
        }

        let expected: LayerGolden = serde_json::from_str(&fs::read_to_string(path)?)?;
        match self.first_mismatch(&expected) {
            Some(detail) => Err(RenderError::GoldenMismatch {
                path: path.to_path_buf(),
                detail,
            }),
            None => Ok(()),
        }
    }

    fn first_mismatch(&self, expected: &Self) -> Option<String> {
        if (self.width, self.height) != (expected.width, expected.height) {
            return Some(format!(
                "rendered {}x{}, golden is {}x{}",
                self.width, self.height, expected.width, expected.height
            ));
        }
        if self.frames.len() != expected.frames.len() {
            return Some(format!(
                "rendered {} frames, golden has {}",
                self.frames.len(),
                expected.frames.len()
            ));
        }
        self.frames
            .iter()
            .zip(&expected.frames)
            .enumerate()
            .find_map(|(i, (actual, golden))| {
                actual
                    .first_difference(golden)
                    .map(|layer| format!("frame {i}, {layer} layer"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hashes(tag: &str) -> LayerHashes {
        LayerHashes {
            background: format!("{tag}-bg"),
            foreground: format!("{tag}-fg"),
            overlay: format!("{tag}-ov"),
        }
    }

    fn golden(frames: Vec<LayerHashes>) -> LayerGolden {
        LayerGolden {
            width: 16,
            height: 16,
            frames,
        }
    }

    #[test]
    fn sha256_of_empty_input_is_known() {
        assert_eq!(
            sha256_hex(&[]),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn mismatch_names_frame_and_layer() {
        let expected = golden(vec![hashes("a"), hashes("b")]);
        let mut second = hashes("b");
        second.foreground = "changed".to_string();
        let actual = golden(vec![hashes("a"), second]);

        assert_eq!(actual.first_mismatch(&expected).as_deref(), Some("frame 1, foreground layer"));
        assert_eq!(expected.first_mismatch(&expected), None);
    }

    #[test]
    fn frame_count_change_is_a_mismatch() {
        let expected = golden(vec![hashes("a")]);
        let actual = golden(vec![hashes("a"), hashes("b")]);
        assert!(actual.first_mismatch(&expected).is_some());
    }

    #[test]
    fn missing_golden_fails_unless_updating() {
        let dir = std::env::temp_dir().join(format!("tile-engine-golden-{}", std::process::id()));
        let path = dir.join("missing.json");
        let _ = fs::remove_dir_all(&dir);

        let recording = golden(vec![hashes("a")]);
        assert!(matches!(
            recording.check(&path, false),
            Err(RenderError::GoldenMissing(_))
        ));

        recording.check(&path, true).unwrap();
        recording.check(&path, false).unwrap();

        let _ = fs::remove_dir_all(&dir);
    }
}
