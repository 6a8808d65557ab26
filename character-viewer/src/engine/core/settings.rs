use std::ops::RangeInclusive;
use std::time::Duration;

use bevy::prelude::*;
use constants::{camera, particles};

/// Runtime tuning for the viewer.
///
/// Defaults come from the `constants` crate. Systems read this resource
/// instead of the constants directly so tests can shrink intervals or cap the
/// particle count.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ViewerSettings {
    /// Directional pan speed, units per second.
    pub move_speed: f32,
    pub fall_speed: f32,
    pub floor_height: f32,
    pub spawn_interval: Duration,
    pub spawn_half_extent: f32,
    pub spheres_per_spawn: usize,
    /// Oldest falling spheres are despawned beyond this count. `None` keeps every sphere.
    pub max_falling_spheres: Option<usize>,
    pub marker_offset: RangeInclusive<i32>,
    pub initial_camera_position: Vec3,
    pub reset_camera_position: Vec3,
    pub orbit_target: Vec3,
    pub max_frame_delta: Duration,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            move_speed: camera::CAMERA_MOVE_SPEED,
            fall_speed: particles::FALL_SPEED,
            floor_height: particles::FLOOR_HEIGHT,
            spawn_interval: Duration::from_secs_f32(particles::SPAWN_INTERVAL_SECS),
            spawn_half_extent: particles::SPAWN_HALF_EXTENT,
            spheres_per_spawn: particles::SPHERES_PER_SPAWN,
            max_falling_spheres: None,
            marker_offset: particles::MARKER_OFFSET_MIN..=particles::MARKER_OFFSET_MAX,
            initial_camera_position: camera::INITIAL_CAMERA_POSITION,
            reset_camera_position: camera::RESET_CAMERA_POSITION,
            orbit_target: camera::ORBIT_TARGET,
            max_frame_delta: Duration::from_secs_f32(camera::MAX_FRAME_DELTA_SECS),
        }
    }
}

/// Clamps the virtual clock so a long stall does not teleport spheres or the camera.
pub fn configure_frame_time(mut time: ResMut<Time<Virtual>>, settings: Res<ViewerSettings>) {
    time.set_max_delta(settings.max_frame_delta);
}
