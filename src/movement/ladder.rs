//! Movement domain: when to grab, keep and let go of a ladder.

use bevy::prelude::Entity;

use crate::config::LadderTuning;
use crate::input::Vertical;
use crate::movement::components::{Ladder, LadderSpan};
use crate::physics::Bounds;

pub fn is_aligned(bounds: &Bounds, ladder: &Ladder, tolerance: f32) -> bool {
    (bounds.center().x - ladder.center_x).abs() <= tolerance
}

fn overlaps_vertically(bounds: &Bounds, ladder: &Ladder) -> bool {
    bounds.bottom() < ladder.top && bounds.top() > ladder.bottom
}

/// Whether pressing `direction` may attach to `ladder`. Going up needs the
/// feet inside the column below its top; going down needs the feet inside
/// the column or standing right on top of it.
pub fn can_grab(bounds: &Bounds, ladder: &Ladder, direction: Vertical, tuning: &LadderTuning) -> bool {
    if !is_aligned(bounds, ladder, tuning.align_tolerance) {
        return false;
    }
    let feet = bounds.bottom();
    let tolerance = tuning.top_tolerance;
    match direction {
        Vertical::Up => feet >= ladder.bottom - tolerance && feet < ladder.top - tolerance,
        Vertical::Down => feet > ladder.bottom + tolerance && feet <= ladder.top + tolerance,
    }
}

/// Nearest grabbable ladder for `direction`.
pub fn choose_ladder(
    spans: &[LadderSpan],
    bounds: &Bounds,
    direction: Vertical,
    tuning: &LadderTuning,
) -> Option<LadderSpan> {
    let center = bounds.center().x;
    spans
        .iter()
        .filter(|span| can_grab(bounds, &span.ladder, direction, tuning))
        .min_by(|a, b| {
            let da = (a.ladder.center_x - center).abs();
            let db = (b.ladder.center_x - center).abs();
            da.total_cmp(&db)
        })
        .copied()
}

/// The ladder still held this step: the current one while the body overlaps
/// it, else another aligned one it overlaps. `None` means let go.
pub fn continue_climbing(
    spans: &[LadderSpan],
    bounds: &Bounds,
    current: Entity,
    tuning: &LadderTuning,
) -> Option<LadderSpan> {
    spans
        .iter()
        .find(|span| span.entity == current && overlaps_vertically(bounds, &span.ladder))
        .or_else(|| {
            spans.iter().find(|span| {
                is_aligned(bounds, &span.ladder, tuning.align_tolerance)
                    && overlaps_vertically(bounds, &span.ladder)
            })
        })
        .copied()
}

/// Standing on real ground below the ladder top while pressing down.
pub fn should_detach(
    on_ground: bool,
    direction: Option<Vertical>,
    bounds: &Bounds,
    ladder: &Ladder,
    tuning: &LadderTuning,
) -> bool {
    on_ground
        && direction == Some(Vertical::Down)
        && bounds.bottom() < ladder.top - tuning.top_tolerance
}
