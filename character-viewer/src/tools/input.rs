use bevy::prelude::*;

use crate::engine::camera::orbit_camera::OrbitCamera;
use crate::engine::core::settings::ViewerSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

impl MoveDirection {
    pub const ALL: [MoveDirection; 4] = [
        MoveDirection::Forward,
        MoveDirection::Backward,
        MoveDirection::Left,
        MoveDirection::Right,
    ];

    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::ArrowUp => Some(Self::Forward),
            KeyCode::ArrowDown => Some(Self::Backward),
            KeyCode::ArrowLeft => Some(Self::Left),
            KeyCode::ArrowRight => Some(Self::Right),
            _ => None,
        }
    }

    /// Stable identifier of the on-screen button for this direction.
    pub fn element_id(self) -> &'static str {
        match self {
            Self::Forward => "key-up",
            Self::Backward => "key-down",
            Self::Left => "key-left",
            Self::Right => "key-right",
        }
    }

    /// Unit camera translation; forward is -Z.
    pub fn axis(self) -> Vec3 {
        match self {
            Self::Forward => Vec3::NEG_Z,
            Self::Backward => Vec3::Z,
            Self::Left => Vec3::NEG_X,
            Self::Right => Vec3::X,
        }
    }
}

/// Directional flags shared by every input source. The last event to touch a
/// flag decides its value.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputFlags {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl InputFlags {
    fn flag_mut(&mut self, direction: MoveDirection) -> &mut bool {
        match direction {
            MoveDirection::Forward => &mut self.forward,
            MoveDirection::Backward => &mut self.backward,
            MoveDirection::Left => &mut self.left,
            MoveDirection::Right => &mut self.right,
        }
    }

    pub fn set(&mut self, direction: MoveDirection, active: bool) {
        *self.flag_mut(direction) = active;
    }

    pub fn is_active(&self, direction: MoveDirection) -> bool {
        match direction {
            MoveDirection::Forward => self.forward,
            MoveDirection::Backward => self.backward,
            MoveDirection::Left => self.left,
            MoveDirection::Right => self.right,
        }
    }

    /// Camera displacement for one frame. Opposite flags cancel.
    pub fn camera_translation(&self, speed: f32, dt: f32) -> Vec3 {
        MoveDirection::ALL
            .into_iter()
            .filter(|direction| self.is_active(*direction))
            .map(MoveDirection::axis)
            .sum::<Vec3>()
            * speed
            * dt
    }
}

/// Whether pointer input belongs to the UI this frame rather than the 3D view.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PointerCapture {
    pub ui_wants_pointer: bool,
    pub over_buttons: bool,
}

impl PointerCapture {
    pub fn is_captured(&self) -> bool {
        self.ui_wants_pointer || self.over_buttons
    }
}

pub fn read_keyboard_input(keys: Res<ButtonInput<KeyCode>>, mut flags: ResMut<InputFlags>) {
    for key in keys.get_just_pressed() {
        if let Some(direction) = MoveDirection::from_key(*key) {
            flags.set(direction, true);
        }
    }
    for key in keys.get_just_released() {
        if let Some(direction) = MoveDirection::from_key(*key) {
            flags.set(direction, false);
        }
    }
}

/// Pan the camera along world axes. The orbit target stays where it is.
pub fn apply_camera_movement(
    time: Res<Time>,
    flags: Res<InputFlags>,
    settings: Res<ViewerSettings>,
    mut cameras: Query<&mut Transform, With<OrbitCamera>>,
) {
    let delta = flags.camera_translation(settings.move_speed, time.delta_secs());
    if delta == Vec3::ZERO {
        return;
    }
    for mut transform in &mut cameras {
        transform.translation += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    #[test]
    fn forward_moves_negative_z() {
        let flags = InputFlags {
            forward: true,
            ..default()
        };
        assert_eq!(flags.camera_translation(50.0, 0.2), Vec3::new(0.0, 0.0, -10.0));
    }

    #[test]
    fn opposite_flags_cancel() {
        let flags = InputFlags {
            forward: true,
            backward: true,
            right: true,
            ..default()
        };
        assert_eq!(flags.camera_translation(50.0, 1.0), Vec3::new(50.0, 0.0, 0.0));
    }

    #[test]
    fn last_writer_wins_across_sources() {
        let mut flags = InputFlags::default();
        // keyboard down, pointer up
        flags.set(MoveDirection::Left, true);
        flags.set(MoveDirection::Left, false);
        assert!(!flags.is_active(MoveDirection::Left));
        // pointer down, keyboard up, pointer down
        flags.set(MoveDirection::Left, true);
        flags.set(MoveDirection::Left, false);
        flags.set(MoveDirection::Left, true);
        assert!(flags.is_active(MoveDirection::Left));
    }

    #[test]
    fn arrow_keys_map_to_directions() {
        assert_eq!(MoveDirection::from_key(KeyCode::ArrowUp), Some(MoveDirection::Forward));
        assert_eq!(MoveDirection::from_key(KeyCode::ArrowRight), Some(MoveDirection::Right));
        assert_eq!(MoveDirection::from_key(KeyCode::KeyW), None);
        let ids: Vec<_> = MoveDirection::ALL.into_iter().map(MoveDirection::element_id).collect();
        assert_eq!(ids, ["key-up", "key-down", "key-left", "key-right"]);
    }

    #[test]
    fn forward_flag_moves_camera_ten_units_in_two_tenths() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(200)))
            .init_resource::<ViewerSettings>()
            .insert_resource(InputFlags {
                forward: true,
                ..default()
            })
            .add_systems(Update, apply_camera_movement);
        let camera = app
            .world_mut()
            .spawn((
                Transform::from_xyz(100.0, 200.0, 300.0),
                OrbitCamera {
                    target: Vec3::new(0.0, 100.0, 0.0),
                },
            ))
            .id();

        // The first update carries a zero delta.
        app.update();
        assert_eq!(app.world().get::<Transform>(camera).unwrap().translation.z, 300.0);

        app.update();
        let translation = app.world().get::<Transform>(camera).unwrap().translation;
        assert!((translation.z - 290.0).abs() < 1e-4, "z = {}", translation.z);
        assert_eq!(translation.x, 100.0);
        assert_eq!(translation.y, 200.0);
    }

    #[test]
    fn keyboard_events_drive_flags() {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<InputFlags>()
            .add_systems(Update, read_keyboard_input);

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::ArrowDown);
        app.update();
        assert!(app.world().resource::<InputFlags>().backward);

        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.clear();
        keys.release(KeyCode::ArrowDown);
        app.update();
        assert!(!app.world().resource::<InputFlags>().backward);
    }
}
