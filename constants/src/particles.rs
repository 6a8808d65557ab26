/// Fall speed of every sphere in world units per second.
pub const FALL_SPEED: f32 = 50.0;

/// Height at which falling spheres come to rest.
pub const FLOOR_HEIGHT: f32 = 2.0;

/// Wall-clock seconds between spawns.
pub const SPAWN_INTERVAL_SECS: f32 = 0.5;

/// Spheres created on every spawn tick.
pub const SPHERES_PER_SPAWN: usize = 1;

/// Spawn positions are drawn from `[-SPAWN_HALF_EXTENT, SPAWN_HALF_EXTENT)` on X and Z.
pub const SPAWN_HALF_EXTENT: f32 = 400.0;

/// Radius shared by the marker and every falling sphere.
pub const SPHERE_RADIUS: f32 = 2.0;

/// UV sphere resolution.
pub const SPHERE_SECTORS: u32 = 32;
pub const SPHERE_STACKS: u32 = 32;

/// Inclusive range for the marker's height above the model.
pub const MARKER_OFFSET_MIN: i32 = 50;
pub const MARKER_OFFSET_MAX: i32 = 70;
