//! Lit environment around the character: background, fog, lights and ground.
use bevy::pbr::CascadeShadowConfigBuilder;
use bevy::prelude::*;
use constants::scene::*;

#[derive(Component)]
pub struct Ground;

pub fn rgb(channels: [u8; 3]) -> Color {
    Color::srgb_u8(channels[0], channels[1], channels[2])
}

/// Linear fog matching the background colour, attached to the viewer camera.
pub fn scene_fog() -> DistanceFog {
    DistanceFog {
        color: rgb(BACKGROUND_RGB),
        falloff: FogFalloff::Linear {
            start: FOG_START,
            end: FOG_END,
        },
        ..default()
    }
}

pub fn spawn_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(ClearColor(rgb(BACKGROUND_RGB)));
    commands.insert_resource(AmbientLight {
        color: rgb(AMBIENT_SKY_RGB),
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });

    let light_position = Vec3::from_array(DIRECTIONAL_LIGHT_POSITION);
    commands.spawn((
        Name::new("DirectionalLight"),
        DirectionalLight {
            color: rgb(DIRECTIONAL_LIGHT_RGB),
            illuminance: DIRECTIONAL_LIGHT_ILLUMINANCE,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(light_position).looking_at(Vec3::ZERO, Vec3::Y),
        CascadeShadowConfigBuilder {
            maximum_distance: FOG_END,
            ..default()
        }
        .build(),
    ));

    // Ground plane at y = 0, receives character and sphere shadows
    commands.spawn((
        Name::new("Ground"),
        Ground,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: rgb(GROUND_RGB),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::default(),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fog_is_linear_between_configured_distances() {
        match scene_fog().falloff {
            FogFalloff::Linear { start, end } => {
                assert_eq!(start, 200.0);
                assert_eq!(end, 1000.0);
            }
            other => panic!("unexpected falloff {other:?}"),
        }
    }

    #[test]
    fn environment_spawns_light_ground_and_background() {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .add_systems(Startup, spawn_environment);
        app.update();

        let world = app.world_mut();
        assert_eq!(world.resource::<ClearColor>().0, rgb([0xa0, 0xa0, 0xa0]));
        assert_eq!(world.query::<&DirectionalLight>().iter(world).count(), 1);
        assert_eq!(world.query::<&Ground>().iter(world).count(), 1);
    }
}
