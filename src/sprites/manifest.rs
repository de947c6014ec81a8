//! Sprite manifest loading.
//!
//! The manifest names the player's sprite sheet, its grid, and which sheet
//! cells make up each clip. Without a manifest (or without the sheet image)
//! the player stays a flat-coloured rectangle.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::animation::Clip;

pub const MANIFEST_PATH: &str = "assets/sprites/manifest.json";

/// Raw manifest JSON structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestJson {
    /// Sheet image, relative to assets/.
    pub sheet: String,
    pub frame_size: u32,
    pub columns: u32,
    pub rows: u32,
    /// Clip name to sheet cell indices.
    pub clips: HashMap<String, Vec<usize>>,
}

pub fn parse_manifest(contents: &str) -> Result<ManifestJson, serde_json::Error> {
    serde_json::from_str(contents)
}

/// Frame lists per clip plus the loaded sheet, if any.
#[derive(Resource, Debug, Clone)]
pub struct SpriteManifest {
    pub clips: HashMap<Clip, Vec<usize>>,
    pub sheet: Option<SheetHandles>,
}

#[derive(Debug, Clone)]
pub struct SheetHandles {
    pub image: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
}

const ALL_CLIPS: [Clip; 8] = [
    Clip::Idle,
    Clip::Run,
    Clip::Sprint,
    Clip::Jump,
    Clip::Fall,
    Clip::WallSlide,
    Clip::Climb,
    Clip::ClimbIdle,
];

impl Default for SpriteManifest {
    /// Cell layout of the stock player sheet.
    fn default() -> Self {
        let clips = HashMap::from([
            (Clip::Idle, vec![0, 1, 2, 3]),
            (Clip::Run, vec![4, 5, 6, 7]),
            (Clip::Sprint, vec![4, 5, 6, 7]),
            (Clip::Jump, vec![8]),
            (Clip::Fall, vec![9]),
            (Clip::WallSlide, vec![12]),
            (Clip::Climb, vec![16, 17]),
            (Clip::ClimbIdle, vec![16]),
        ]);
        Self { clips, sheet: None }
    }
}

impl SpriteManifest {
    /// Replace clip frame lists with the manifest's. Clips the manifest
    /// leaves out keep their stock frames.
    pub fn apply(&mut self, manifest: &ManifestJson) {
        for clip in ALL_CLIPS {
            if let Some(frames) = manifest.clips.get(clip.name()) {
                if frames.is_empty() {
                    warn!("Sprite manifest clip '{}' has no frames", clip.name());
                    continue;
                }
                self.clips.insert(clip, frames.clone());
            }
        }
    }

    pub fn frames(&self, clip: Clip) -> &[usize] {
        self.clips.get(&clip).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sheet cell for `frame` of `clip`.
    pub fn cell(&self, clip: Clip, frame: usize) -> Option<usize> {
        let frames = self.frames(clip);
        if frames.is_empty() {
            return None;
        }
        frames.get(frame % frames.len()).copied()
    }

    /// Load the manifest from a JSON file.
    pub fn load_from_file(
        &mut self,
        path: &str,
        asset_server: &AssetServer,
        layouts: &mut Assets<TextureAtlasLayout>,
    ) {
        let manifest_path = Path::new(path);

        if !manifest_path.exists() {
            warn!(
                "Sprite manifest not found at {:?}, using placeholder sprites",
                path
            );
            return;
        }

        let contents = match fs::read_to_string(manifest_path) {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to read sprite manifest: {}", e);
                return;
            }
        };

        let manifest = match parse_manifest(&contents) {
            Ok(m) => m,
            Err(e) => {
                error!("Failed to parse sprite manifest: {}", e);
                return;
            }
        };

        self.apply(&manifest);

        if !Path::new("assets").join(&manifest.sheet).exists() {
            warn!(
                "Sprite sheet {} is missing, using placeholder sprites",
                manifest.sheet
            );
            return;
        }
        let layout = TextureAtlasLayout::from_grid(
            UVec2::splat(manifest.frame_size),
            manifest.columns,
            manifest.rows,
            None,
            None,
        );
        self.sheet = Some(SheetHandles {
            image: asset_server.load(&manifest.sheet),
            layout: layouts.add(layout),
        });

        info!(
            "Loaded sprite manifest with sheet {} ({} clips)",
            manifest.sheet,
            manifest.clips.len()
        );
    }
}
