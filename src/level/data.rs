//! Level domain: the on-disk level format and its loader.
//!
//! Levels are Tiled-like JSON. Tile rows run top to bottom and object
//! rectangles use a y-down origin at the top-left of the map; everything is
//! converted to y-up world space through [`LevelFile::to_world`].

use bevy::math::{Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Error type for level load failures.
#[derive(Debug)]
pub struct LevelLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for LevelLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load level {}: {}", self.file, self.message)
    }
}

impl std::error::Error for LevelLoadError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlopeDirection {
    /// Climbs towards the right.
    Rising,
    /// Descends towards the right.
    Falling,
}

/// Per-tile boolean tags from the tileset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TileProperties {
    pub solid: bool,
    pub oneway: bool,
    pub ladder: bool,
    pub spike: bool,
    pub slope: Option<SlopeDirection>,
}

/// What a tile materialises as. A tile with several tags resolves to the
/// first of ladder, slope, spike, one-way and solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Solid,
    OneWay,
    Spike,
    Ladder,
    Slope(SlopeDirection),
}

impl TileProperties {
    pub fn kind(&self) -> Option<TileKind> {
        if self.ladder {
            Some(TileKind::Ladder)
        } else if let Some(direction) = self.slope {
            Some(TileKind::Slope(direction))
        } else if self.spike {
            Some(TileKind::Spike)
        } else if self.oneway {
            Some(TileKind::OneWay)
        } else if self.solid {
            Some(TileKind::Solid)
        } else {
            None
        }
    }
}

/// A placed object: spawn rect plus free-form properties for its factory.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LevelObject {
    pub id: u32,
    pub class: String,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub properties: HashMap<String, serde_json::Value>,
}

impl LevelObject {
    pub fn float(&self, key: &str) -> Option<f32> {
        self.properties
            .get(key)
            .and_then(serde_json::Value::as_f64)
            .map(|v| v as f32)
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.properties.get(key).and_then(serde_json::Value::as_bool)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(serde_json::Value::as_str)
    }

    /// Id of another object this one points at.
    pub fn reference(&self, key: &str) -> Option<u32> {
        self.properties
            .get(key)
            .and_then(serde_json::Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
    }

    /// Size, falling back to one tile for point objects.
    pub fn size_or(&self, tile_size: f32) -> Vec2 {
        Vec2::new(
            if self.width > 0.0 { self.width } else { tile_size },
            if self.height > 0.0 { self.height } else { tile_size },
        )
    }
}

fn default_tile_size() -> f32 {
    16.0
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LevelFile {
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
    /// Tile ids, rows top to bottom. `0` is empty.
    pub tiles: Vec<Vec<u32>>,
    #[serde(default)]
    pub tileset: HashMap<u32, TileProperties>,
    #[serde(default)]
    pub objects: Vec<LevelObject>,
    #[serde(default)]
    pub song: Option<String>,
}

impl LevelFile {
    pub fn rows(&self) -> usize {
        self.tiles.len()
    }

    pub fn columns(&self) -> usize {
        self.tiles.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.columns() as f32, self.rows() as f32) * self.tile_size
    }

    /// World extents, origin at the bottom-left corner.
    pub fn bounds(&self) -> Rect {
        Rect::from_corners(Vec2::ZERO, self.size())
    }

    /// Map a y-down map point to y-up world space.
    pub fn to_world(&self, map: Vec2) -> Vec2 {
        Vec2::new(map.x, self.size().y - map.y)
    }

    /// World rect covered by the tile at `row` (from the top) and `column`.
    pub fn tile_rect(&self, row: usize, column: usize) -> Rect {
        let min = self.to_world(Vec2::new(
            column as f32 * self.tile_size,
            (row + 1) as f32 * self.tile_size,
        ));
        Rect::from_corners(min, min + Vec2::splat(self.tile_size))
    }

    pub fn tile_kind(&self, row: usize, column: usize) -> Option<TileKind> {
        let id = *self.tiles.get(row)?.get(column)?;
        if id == 0 {
            return None;
        }
        self.tileset.get(&id).and_then(TileProperties::kind)
    }

    /// Centre of an object's rect in world space.
    pub fn object_center(&self, object: &LevelObject) -> Vec2 {
        let size = object.size_or(self.tile_size);
        self.to_world(Vec2::new(object.x, object.y) + size / 2.0)
    }

    pub fn object(&self, id: u32) -> Option<&LevelObject> {
        self.objects.iter().find(|object| object.id == id)
    }
}

pub fn parse_level(contents: &str, file: &str) -> Result<LevelFile, LevelLoadError> {
    let level: LevelFile = serde_json::from_str(contents).map_err(|e| LevelLoadError {
        file: file.to_string(),
        message: format!("Parse error: {}", e),
    })?;
    if level.tiles.is_empty() {
        return Err(LevelLoadError {
            file: file.to_string(),
            message: "level has no tile rows".to_string(),
        });
    }
    if level.tile_size <= 0.0 {
        return Err(LevelLoadError {
            file: file.to_string(),
            message: format!("tile_size must be positive, got {}", level.tile_size),
        });
    }
    Ok(level)
}

pub fn load_level(path: &Path) -> Result<LevelFile, LevelLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| LevelLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;
    parse_level(&contents, &file_name)
}
