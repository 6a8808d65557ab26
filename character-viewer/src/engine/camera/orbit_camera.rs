use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::render::camera::PerspectiveProjection;
use constants::camera::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, ORBIT_PITCH_LIMIT, ORBIT_SENSITIVITY,
    ZOOM_MAX_DISTANCE, ZOOM_MIN_DISTANCE, ZOOM_STEP,
};

use crate::engine::core::settings::ViewerSettings;
use crate::engine::scene::environment::scene_fog;
use crate::tools::input::PointerCapture;

/// Camera orbiting a fixed target. Directional panning moves the camera only.
#[derive(Component, Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub target: Vec3,
}

pub fn spawn_viewer_camera(mut commands: Commands, settings: Res<ViewerSettings>) {
    commands.spawn((
        Name::new("ViewerCamera"),
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        scene_fog(),
        Transform::from_translation(settings.initial_camera_position)
            .looking_at(settings.orbit_target, Vec3::Y),
        OrbitCamera {
            target: settings.orbit_target,
        },
    ));
}

/// Rotate `offset` (camera minus target) by yaw about +Y and pitch towards the poles.
pub fn orbit_offset(offset: Vec3, yaw_delta: f32, pitch_delta: f32, pitch_limit: f32) -> Vec3 {
    let radius = offset.length();
    if radius <= f32::EPSILON {
        return offset;
    }
    let yaw = offset.x.atan2(offset.z) + yaw_delta;
    let pitch = ((offset.y / radius).clamp(-1.0, 1.0).asin() + pitch_delta)
        .clamp(-pitch_limit, pitch_limit);

    Vec3::new(
        radius * pitch.cos() * yaw.sin(),
        radius * pitch.sin(),
        radius * pitch.cos() * yaw.cos(),
    )
}

/// Scale `offset` by `step^scroll`, keeping its length within `[min, max]`.
pub fn zoom_offset(offset: Vec3, scroll: f32, step: f32, min: f32, max: f32) -> Vec3 {
    let radius = offset.length();
    if radius <= f32::EPSILON {
        return offset;
    }
    let zoomed = (radius * step.powf(scroll)).clamp(min, max);
    offset * (zoomed / radius)
}

/// Left-drag orbits around the target, the wheel zooms along the view ray.
///
/// Input is ignored while the pointer is over the controls panel or the pad.
pub fn orbit_camera_controller(
    mut cameras: Query<(&mut Transform, &OrbitCamera)>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    capture: Res<PointerCapture>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        };
    }

    if capture.is_captured() {
        return;
    }

    let dragging = mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO;
    if !dragging && scroll_accum.abs() <= f32::EPSILON {
        return;
    }

    for (mut transform, orbit) in &mut cameras {
        let mut offset = transform.translation - orbit.target;
        if dragging {
            offset = orbit_offset(
                offset,
                -mouse_delta.x * ORBIT_SENSITIVITY,
                mouse_delta.y * ORBIT_SENSITIVITY,
                ORBIT_PITCH_LIMIT,
            );
        }
        if scroll_accum.abs() > f32::EPSILON {
            offset = zoom_offset(
                offset,
                scroll_accum,
                ZOOM_STEP,
                ZOOM_MIN_DISTANCE,
                ZOOM_MAX_DISTANCE,
            );
        }
        *transform =
            Transform::from_translation(orbit.target + offset).looking_at(orbit.target, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbit_preserves_distance() {
        let offset = Vec3::new(100.0, 100.0, 300.0);
        let rotated = orbit_offset(offset, 0.7, -0.3, 1.55);
        assert!((rotated.length() - offset.length()).abs() < 1e-3);
    }

    #[test]
    fn yaw_rotates_about_vertical_axis() {
        let quarter = std::f32::consts::FRAC_PI_2;
        let rotated = orbit_offset(Vec3::new(0.0, 0.0, 10.0), quarter, 0.0, 1.55);
        assert!(rotated.abs_diff_eq(Vec3::new(10.0, 0.0, 0.0), 1e-4));
    }

    #[test]
    fn pitch_is_clamped_below_the_pole() {
        let rotated = orbit_offset(Vec3::new(0.0, 0.0, 10.0), 0.0, 10.0, 1.55);
        assert!((rotated.y - 10.0 * 1.55_f32.sin()).abs() < 1e-4);
        assert!(rotated.z > 0.0);
    }

    #[test]
    fn zoom_scales_and_clamps() {
        let offset = Vec3::new(0.0, 0.0, 100.0);
        let closer = zoom_offset(offset, 1.0, 0.9, 20.0, 1500.0);
        assert!(closer.abs_diff_eq(Vec3::new(0.0, 0.0, 90.0), 1e-3));
        assert!((zoom_offset(offset, 100.0, 0.9, 20.0, 1500.0).z - 20.0).abs() < 1e-3);
        assert!((zoom_offset(offset, -100.0, 0.9, 20.0, 1500.0).z - 1500.0).abs() < 1e-2);
    }
}
