use bevy::math::Vec3;

/// Position used when the viewer first opens.
pub const INITIAL_CAMERA_POSITION: Vec3 = Vec3::new(100.0, 200.0, 500.0);

/// Position the camera snaps back to after every asset switch.
pub const RESET_CAMERA_POSITION: Vec3 = Vec3::new(100.0, 200.0, 300.0);

/// Point the orbit controls rotate around.
pub const ORBIT_TARGET: Vec3 = Vec3::new(0.0, 100.0, 0.0);

/// Directional pan speed in world units per second.
pub const CAMERA_MOVE_SPEED: f32 = 50.0;

/// Vertical field of view in degrees.
pub const CAMERA_FOV_DEGREES: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 2000.0;

/// Radians of orbit per pixel of pointer drag.
pub const ORBIT_SENSITIVITY: f32 = 0.005;

/// Keeps the orbit away from the poles so `looking_at` stays well defined.
pub const ORBIT_PITCH_LIMIT: f32 = 1.55;

/// Zoom factor applied per wheel line.
pub const ZOOM_STEP: f32 = 0.9;
pub const ZOOM_MIN_DISTANCE: f32 = 20.0;
pub const ZOOM_MAX_DISTANCE: f32 = 1500.0;

/// Largest frame delta fed into integration, in seconds.
pub const MAX_FRAME_DELTA_SECS: f32 = 0.25;
