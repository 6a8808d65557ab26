//! Viewer camera: spawn, orbit/zoom controls and directional panning.

/// Orbit camera component, controller and camera spawn.
pub mod orbit_camera;
