//! Core domain: follow camera and the visible-world rect it publishes.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::config::CameraTuning;
use crate::core::resources::{LevelBounds, Viewport};
use crate::movement::Player;

#[derive(Component, Debug)]
pub struct GameCamera;

pub(crate) fn spawn_camera(mut commands: Commands, tuning: Res<CameraTuning>) {
    commands.spawn((
        Camera2d,
        Projection::from(OrthographicProjection {
            scale: 1.0 / tuning.zoom.max(0.01),
            ..OrthographicProjection::default_2d()
        }),
        GameCamera,
    ));
}

/// World rect seen by an orthographic camera at `center`.
pub fn visible_rect(center: Vec2, window_size: Vec2, scale: f32) -> Rect {
    Rect::from_center_size(center, window_size * scale)
}

/// Keep a camera of `view_size` inside `level`. A level smaller than the view
/// is centred on that axis.
pub fn clamp_to_level(center: Vec2, view_size: Vec2, level: Rect) -> Vec2 {
    let half = view_size * 0.5;
    let clamp_axis = |value: f32, min: f32, max: f32, half: f32| {
        if max - min <= half * 2.0 {
            (min + max) * 0.5
        } else {
            value.clamp(min + half, max - half)
        }
    };
    Vec2::new(
        clamp_axis(center.x, level.min.x, level.max.x, half.x),
        clamp_axis(center.y, level.min.y, level.max.y, half.y),
    )
}

pub(crate) fn follow_player(
    time: Res<Time>,
    tuning: Res<CameraTuning>,
    bounds: Res<LevelBounds>,
    window: Query<&Window, With<PrimaryWindow>>,
    player: Query<&Transform, (With<Player>, Without<GameCamera>)>,
    mut camera: Query<(&mut Transform, &Projection), With<GameCamera>>,
    mut viewport: ResMut<Viewport>,
) {
    let Ok((mut transform, projection)) = camera.single_mut() else {
        return;
    };
    let scale = match projection {
        Projection::Orthographic(ortho) => ortho.scale,
        _ => 1.0,
    };
    let window_size = window
        .single()
        .map(|w| Vec2::new(w.width(), w.height()))
        .unwrap_or(Vec2::new(1280.0, 720.0));
    let view_size = window_size * scale;

    let mut center = transform.translation.truncate();
    if let Ok(target) = player.single() {
        let t = (tuning.follow_rate * time.delta_secs()).clamp(0.0, 1.0);
        center = center.lerp(target.translation.truncate(), t);
    }
    if let Some(level) = bounds.0 {
        center = clamp_to_level(center, view_size, level);
    }

    transform.translation.x = center.x;
    transform.translation.y = center.y;
    viewport.0 = visible_rect(center, window_size, scale);
}
