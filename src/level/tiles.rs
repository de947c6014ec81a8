//! Level domain: turning the tile grid into collider rectangles.

use bevy::prelude::*;

use crate::level::data::{LevelFile, SlopeDirection, TileKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TileBodyKind {
    Solid,
    OneWay,
    Spikes,
    /// Climbable column sensor.
    Ladder,
    Slope(SlopeDirection),
}

/// One collidable piece of terrain in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileBody {
    pub kind: TileBodyKind,
    pub rect: Rect,
}

impl TileBody {
    /// Walkable edge of a slope, left point first.
    pub fn slope_edge(&self) -> Option<(Vec2, Vec2)> {
        match self.kind {
            TileBodyKind::Slope(SlopeDirection::Rising) => Some((
                self.rect.min,
                self.rect.max,
            )),
            TileBodyKind::Slope(SlopeDirection::Falling) => Some((
                Vec2::new(self.rect.min.x, self.rect.max.y),
                Vec2::new(self.rect.max.x, self.rect.min.y),
            )),
            _ => None,
        }
    }
}

/// Horizontal runs of `kind` in one row, as column ranges.
fn row_runs(level: &LevelFile, row: usize, kind: TileKind) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for column in 0..=level.columns() {
        let matches = column < level.columns() && level.tile_kind(row, column) == Some(kind);
        match (matches, start) {
            (true, None) => start = Some(column),
            (false, Some(first)) => {
                runs.push((first, column - 1));
                start = None;
            }
            _ => {}
        }
    }
    runs
}

/// Vertical ladder runs in one column, as row ranges (top row first).
fn column_runs(level: &LevelFile, column: usize) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for row in 0..=level.rows() {
        let matches = row < level.rows() && level.tile_kind(row, column) == Some(TileKind::Ladder);
        match (matches, start) {
            (true, None) => start = Some(row),
            (false, Some(first)) => {
                runs.push((first, row - 1));
                start = None;
            }
            _ => {}
        }
    }
    runs
}

/// Every collider the grid needs. Solid, one-way and spike tiles merge
/// along rows; ladders merge down columns and get a one-way ledge over their
/// top tile; slopes stay one per tile.
pub fn plan_tile_bodies(level: &LevelFile) -> Vec<TileBody> {
    let mut bodies = Vec::new();

    for row in 0..level.rows() {
        for (kind, body_kind) in [
            (TileKind::Solid, TileBodyKind::Solid),
            (TileKind::OneWay, TileBodyKind::OneWay),
            (TileKind::Spike, TileBodyKind::Spikes),
        ] {
            for (first, last) in row_runs(level, row, kind) {
                bodies.push(TileBody {
                    kind: body_kind,
                    rect: level.tile_rect(row, first).union(level.tile_rect(row, last)),
                });
            }
        }
        for column in 0..level.columns() {
            if let Some(TileKind::Slope(direction)) = level.tile_kind(row, column) {
                bodies.push(TileBody {
                    kind: TileBodyKind::Slope(direction),
                    rect: level.tile_rect(row, column),
                });
            }
        }
    }

    for column in 0..level.columns() {
        for (top, bottom) in column_runs(level, column) {
            let top_tile = level.tile_rect(top, column);
            bodies.push(TileBody {
                kind: TileBodyKind::Ladder,
                rect: top_tile.union(level.tile_rect(bottom, column)),
            });
            bodies.push(TileBody {
                kind: TileBodyKind::OneWay,
                rect: top_tile,
            });
        }
    }

    bodies
}
