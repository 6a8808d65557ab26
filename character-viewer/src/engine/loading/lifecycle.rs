use std::collections::HashSet;

use bevy::gltf::Gltf;
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;

use crate::engine::camera::orbit_camera::OrbitCamera;
use crate::engine::core::settings::ViewerSettings;
use crate::engine::scene::hierarchy::collect_subtree;
use crate::tools::morph::MorphBindings;

use super::asset_loader::ModelLoaded;
use super::progress::LoadStatus;

/// Root entity of the character currently on screen.
#[derive(Component, Debug, Default)]
pub struct DisplayedModel;

/// Inserted on a `DisplayedModel` root once its scene has been instantiated.
#[derive(Component, Debug, Default)]
pub struct SceneReady;

#[derive(Debug, Clone)]
pub struct DisplayedAsset {
    pub id: String,
    pub root: Entity,
    pub gltf: Handle<Gltf>,
    pub clip: Option<Handle<AnimationClip>>,
}

impl DisplayedAsset {
    pub fn new(id: impl Into<String>, root: Entity) -> Self {
        Self {
            id: id.into(),
            root,
            gltf: Handle::default(),
            clip: None,
        }
    }
}

/// Owns the single displayed asset. Nothing else holds its root entity.
#[derive(Resource, Default, Debug)]
pub struct AssetLifecycle {
    displayed: Option<DisplayedAsset>,
}

impl AssetLifecycle {
    pub fn displayed(&self) -> Option<&DisplayedAsset> {
        self.displayed.as_ref()
    }

    pub fn is_displayed(&self, root: Entity) -> bool {
        self.displayed.as_ref().is_some_and(|asset| asset.root == root)
    }

    /// Replace the displayed asset, returning the one it supersedes.
    pub fn install(&mut self, asset: DisplayedAsset) -> Option<DisplayedAsset> {
        self.displayed.replace(asset)
    }
}

/// Counts of GPU-side assets removed during a teardown.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReleasedResources {
    pub meshes: usize,
    pub materials: usize,
    pub textures: usize,
}

fn material_textures(material: &StandardMaterial) -> impl Iterator<Item = AssetId<Image>> + '_ {
    [
        &material.base_color_texture,
        &material.emissive_texture,
        &material.metallic_roughness_texture,
        &material.normal_map_texture,
        &material.occlusion_texture,
    ]
    .into_iter()
    .flatten()
    .map(Handle::id)
}

/// Remove every mesh, material and texture referenced under `root`.
///
/// Shared handles are released once. Must run before the root is despawned.
pub fn release_subtree_resources(
    root: Entity,
    children: &Query<&Children>,
    nodes: &Query<(Option<&Mesh3d>, Option<&MeshMaterial3d<StandardMaterial>>)>,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    images: &mut Assets<Image>,
) -> ReleasedResources {
    let mut mesh_ids = HashSet::new();
    let mut material_ids = HashSet::new();
    for entity in collect_subtree(root, children) {
        let Ok((mesh, material)) = nodes.get(entity) else {
            continue;
        };
        if let Some(mesh) = mesh {
            mesh_ids.insert(mesh.0.id());
        }
        if let Some(material) = material {
            material_ids.insert(material.0.id());
        }
    }

    let mut released = ReleasedResources::default();
    let mut texture_ids = HashSet::new();
    for id in material_ids {
        if let Some(material) = materials.remove(id) {
            texture_ids.extend(material_textures(&material));
            released.materials += 1;
        }
    }
    released.meshes = mesh_ids
        .into_iter()
        .filter(|id| meshes.remove(*id).is_some())
        .count();
    released.textures = texture_ids
        .into_iter()
        .filter(|id| images.remove(*id).is_some())
        .count();
    released
}

pub fn mark_scene_ready(trigger: Trigger<SceneInstanceReady>, mut commands: Commands) {
    commands.entity(trigger.target()).insert(SceneReady);
}

/// Swap the displayed character for the most recently completed load.
///
/// Several completions in one frame collapse to the last one. The previous
/// character's resources are released and its root despawned before the new
/// scene is spawned, morph bindings are cleared and the camera goes back to its
/// reset pose. Animation, morph rebuild and marker placement follow once the
/// scene instance is ready.
#[allow(clippy::too_many_arguments)]
pub fn install_loaded_model(
    mut commands: Commands,
    mut loaded: EventReader<ModelLoaded>,
    mut lifecycle: ResMut<AssetLifecycle>,
    children: Query<&Children>,
    nodes: Query<(Option<&Mesh3d>, Option<&MeshMaterial3d<StandardMaterial>>)>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
    mut morphs: ResMut<MorphBindings>,
    mut cameras: Query<(&mut Transform, &OrbitCamera)>,
    settings: Res<ViewerSettings>,
    mut status: ResMut<LoadStatus>,
) {
    let mut completed = loaded.read();
    let Some(mut model) = completed.next() else {
        return;
    };
    for newer in completed {
        info!("Load of `{}` superseded by `{}`", model.id, newer.id);
        model = newer;
    }

    if let Some(previous) = lifecycle.displayed() {
        // Reloading the same glTF reuses its meshes, so only despawn.
        if previous.gltf.id() != model.gltf.id() {
            let released = release_subtree_resources(
                previous.root,
                &children,
                &nodes,
                &mut meshes,
                &mut materials,
                &mut images,
            );
            info!(
                "Released `{}`: {} meshes, {} materials, {} textures",
                previous.id, released.meshes, released.materials, released.textures
            );
        }
        commands.entity(previous.root).despawn();
    }
    morphs.clear();

    let root = commands
        .spawn((
            Name::new(model.id.clone()),
            DisplayedModel,
            SceneRoot(model.scene.clone()),
        ))
        .observe(mark_scene_ready)
        .id();
    lifecycle.install(DisplayedAsset {
        gltf: model.gltf.clone(),
        clip: model.first_clip.clone(),
        ..DisplayedAsset::new(model.id.clone(), root)
    });

    for (mut transform, orbit) in &mut cameras {
        *transform = Transform::from_translation(settings.reset_camera_position)
            .looking_at(orbit.target, Vec3::Y);
    }

    status.record_loaded(&model.id);
    info!("Displaying `{}`", model.id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use crate::engine::loading::asset_loader::ModelLoadFailed;
    use crate::engine::loading::progress::record_load_failures;
    use crate::error::ViewerError;

    fn lifecycle_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<Assets<Image>>()
            .init_resource::<AssetLifecycle>()
            .init_resource::<MorphBindings>()
            .init_resource::<LoadStatus>()
            .init_resource::<ViewerSettings>()
            .add_event::<ModelLoaded>()
            .add_event::<ModelLoadFailed>()
            .add_systems(Update, (record_load_failures, install_loaded_model).chain());
        app
    }

    fn loaded(id: &str, gltf: u128) -> ModelLoaded {
        ModelLoaded {
            id: id.to_string(),
            gltf: Handle::weak_from_u128(gltf),
            scene: Handle::default(),
            first_clip: None,
        }
    }

    fn displayed_roots(app: &mut App) -> Vec<Entity> {
        let mut query = app
            .world_mut()
            .query_filtered::<Entity, With<DisplayedModel>>();
        query.iter(app.world()).collect()
    }

    fn displayed_root(app: &App) -> Entity {
        app.world()
            .resource::<AssetLifecycle>()
            .displayed()
            .map(|asset| asset.root)
            .unwrap()
    }

    /// Attach a textured mesh under the displayed root, as a scene instance would.
    fn attach_textured_mesh(
        app: &mut App,
    ) -> (AssetId<Mesh>, AssetId<StandardMaterial>, AssetId<Image>) {
        let root = displayed_root(app);
        let world = app.world_mut();
        let image = world.resource_mut::<Assets<Image>>().add(Image::default());
        let material = world
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial {
                base_color_texture: Some(image.clone()),
                normal_map_texture: Some(image.clone()),
                ..default()
            });
        let mesh = world
            .resource_mut::<Assets<Mesh>>()
            .add(Mesh::from(Cuboid::default()));
        let ids = (mesh.id(), material.id(), image.id());

        let body = world.spawn((Transform::default(), ChildOf(root))).id();
        world.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            ChildOf(body),
        ));
        world.spawn((Mesh3d(mesh), MeshMaterial3d(material), ChildOf(body)));
        ids
    }

    #[test]
    fn only_one_asset_is_displayed_after_loads() {
        let mut app = lifecycle_app();
        app.world_mut().send_event(loaded("Running", 1));
        app.update();
        let first = displayed_root(&app);

        app.world_mut().send_event(loaded("Walking", 2));
        app.update();

        let roots = displayed_roots(&mut app);
        assert_eq!(roots.len(), 1);
        assert_ne!(roots[0], first);
        assert!(app.world().get_entity(first).is_err());
        let lifecycle = app.world().resource::<AssetLifecycle>();
        assert_eq!(lifecycle.displayed().map(|a| a.id.as_str()), Some("Walking"));
    }

    #[test]
    fn last_completion_in_a_frame_wins() {
        let mut app = lifecycle_app();
        app.world_mut().send_event(loaded("Running", 1));
        app.world_mut().send_event(loaded("Walking", 2));
        app.world_mut().send_event(loaded("Dodging Right", 3));
        app.update();

        assert_eq!(displayed_roots(&mut app).len(), 1);
        let status = app.world().resource::<LoadStatus>();
        assert_eq!(status.last_loaded.as_deref(), Some("Dodging Right"));
    }

    #[test]
    fn teardown_releases_meshes_materials_and_textures() {
        let mut app = lifecycle_app();
        app.world_mut().send_event(loaded("Running", 1));
        app.update();
        let (mesh, material, image) = attach_textured_mesh(&mut app);
        let old_root = displayed_root(&app);

        app.world_mut().send_event(loaded("Walking", 2));
        app.update();

        let world = app.world();
        assert!(!world.resource::<Assets<Mesh>>().contains(mesh));
        assert!(!world.resource::<Assets<StandardMaterial>>().contains(material));
        assert!(!world.resource::<Assets<Image>>().contains(image));
        assert!(world.get_entity(old_root).is_err());
    }

    #[test]
    fn reloading_the_same_gltf_keeps_its_meshes() {
        let mut app = lifecycle_app();
        app.world_mut().send_event(loaded("Running", 1));
        app.update();
        let (mesh, _, _) = attach_textured_mesh(&mut app);

        app.world_mut().send_event(loaded("Running", 1));
        app.update();

        assert!(app.world().resource::<Assets<Mesh>>().contains(mesh));
        assert_eq!(displayed_roots(&mut app).len(), 1);
    }

    #[test]
    fn release_counts_shared_handles_once() {
        let mut app = lifecycle_app();
        app.world_mut().send_event(loaded("Running", 1));
        app.update();
        attach_textured_mesh(&mut app);
        let root = displayed_root(&app);

        let released = app
            .world_mut()
            .run_system_once(
                move |children: Query<&Children>,
                      nodes: Query<(Option<&Mesh3d>, Option<&MeshMaterial3d<StandardMaterial>>)>,
                      mut meshes: ResMut<Assets<Mesh>>,
                      mut materials: ResMut<Assets<StandardMaterial>>,
                      mut images: ResMut<Assets<Image>>| {
                    release_subtree_resources(
                        root,
                        &children,
                        &nodes,
                        &mut meshes,
                        &mut materials,
                        &mut images,
                    )
                },
            )
            .unwrap();
        assert_eq!(
            released,
            ReleasedResources {
                meshes: 1,
                materials: 1,
                textures: 1,
            }
        );
    }

    #[test]
    fn camera_returns_to_reset_pose() {
        let mut app = lifecycle_app();
        let target = Vec3::new(0.0, 100.0, 0.0);
        let camera = app
            .world_mut()
            .spawn((Transform::from_xyz(-40.0, 10.0, 900.0), OrbitCamera { target }))
            .id();

        app.world_mut().send_event(loaded("Running", 1));
        app.update();

        let transform = app.world().get::<Transform>(camera).unwrap();
        assert_eq!(transform.translation, Vec3::new(100.0, 200.0, 300.0));
        let facing = transform.forward().as_vec3();
        let expected = (target - transform.translation).normalize();
        assert!(facing.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn failed_load_leaves_displayed_asset_untouched() {
        let mut app = lifecycle_app();
        app.world_mut().send_event(loaded("Running", 1));
        app.update();
        let (mesh, _, _) = attach_textured_mesh(&mut app);
        let root = displayed_root(&app);

        app.world_mut().send_event(ModelLoadFailed {
            error: ViewerError::AssetLoad {
                id: "Walking".into(),
                path: "models/gltf/Walking.glb".into(),
                reason: "file not found".into(),
            },
        });
        app.update();

        assert_eq!(displayed_root(&app), root);
        assert_eq!(displayed_roots(&mut app), vec![root]);
        assert!(app.world().resource::<Assets<Mesh>>().contains(mesh));
        let status = app.world().resource::<LoadStatus>();
        assert_eq!(status.last_loaded.as_deref(), Some("Running"));
        assert_eq!(
            status.last_error.as_ref().map(ViewerError::asset_id),
            Some("Walking")
        );
    }
}
