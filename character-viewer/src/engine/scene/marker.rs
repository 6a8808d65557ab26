use std::ops::RangeInclusive;

use bevy::prelude::*;
use rand::Rng;

use crate::engine::core::settings::ViewerSettings;
use crate::engine::loading::lifecycle::{AssetLifecycle, DisplayedModel, SceneReady};
use crate::engine::particles::SphereAssets;

use super::bounds::subtree_bounds;

/// The persistent sphere floating above the displayed character.
///
/// Falling spheres are spawned at its current height.
#[derive(Component)]
pub struct TargetMarker;

/// Uniform integer offset from the inclusive `range`.
pub fn draw_marker_offset<R: Rng + ?Sized>(rng: &mut R, range: &RangeInclusive<i32>) -> i32 {
    rng.gen_range(range.clone())
}

pub fn marker_translation(model_top: f32, offset: i32) -> Vec3 {
    Vec3::new(0.0, model_top + offset as f32, 0.0)
}

pub fn spawn_target_marker(mut commands: Commands, spheres: Res<SphereAssets>) {
    commands.spawn((
        Name::new("TargetMarker"),
        TargetMarker,
        Mesh3d(spheres.mesh.clone()),
        MeshMaterial3d(spheres.material.clone()),
        Transform::default(),
    ));
}

/// Move the marker above the bounding box of a freshly instantiated character.
pub fn place_marker_above_model(
    ready: Query<Entity, (With<DisplayedModel>, Added<SceneReady>)>,
    lifecycle: Res<AssetLifecycle>,
    children: Query<&Children>,
    nodes: Query<(&Transform, Option<&Mesh3d>), Without<TargetMarker>>,
    meshes: Res<Assets<Mesh>>,
    mut markers: Query<&mut Transform, With<TargetMarker>>,
    settings: Res<ViewerSettings>,
) {
    for root in &ready {
        if !lifecycle.is_displayed(root) {
            continue;
        }

        let model_top = match subtree_bounds(root, &children, &nodes, &meshes) {
            Some(bounds) => {
                debug!("Displayed asset bounds {:?}, size {:?}", bounds, bounds.size());
                bounds.max.y
            }
            None => {
                warn!("Displayed asset has no mesh bounds, placing marker above the origin");
                0.0
            }
        };

        let offset = draw_marker_offset(&mut rand::thread_rng(), &settings.marker_offset);
        let translation = marker_translation(model_top, offset);
        for mut marker in &mut markers {
            marker.translation = translation;
        }
        debug!("Marker placed at y = {} (model top {} + {})", translation.y, model_top, offset);
    }
}
