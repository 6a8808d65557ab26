/// Background and fog colour (0xa0a0a0).
pub const BACKGROUND_RGB: [u8; 3] = [0xa0, 0xa0, 0xa0];

/// Linear fog range in world units.
pub const FOG_START: f32 = 200.0;
pub const FOG_END: f32 = 1000.0;

/// Sky colour of the hemisphere fill (light blue, 0xadd8e6).
pub const AMBIENT_SKY_RGB: [u8; 3] = [0xad, 0xd8, 0xe6];
pub const AMBIENT_BRIGHTNESS: f32 = 400.0;

/// Key light colour (0x6095eb).
pub const DIRECTIONAL_LIGHT_RGB: [u8; 3] = [0x60, 0x95, 0xeb];
pub const DIRECTIONAL_LIGHT_ILLUMINANCE: f32 = 8_000.0;
pub const DIRECTIONAL_LIGHT_POSITION: [f32; 3] = [0.0, 200.0, 100.0];

/// Ground plane colour (0x999999) and edge length.
pub const GROUND_RGB: [u8; 3] = [0x99, 0x99, 0x99];
pub const GROUND_SIZE: f32 = 2000.0;

/// Marker and falling spheres are plain white.
pub const SPHERE_RGB: [u8; 3] = [0xff, 0xff, 0xff];
