use bevy::prelude::*;
use bevy::render::mesh::morph::MorphWeights;

use crate::engine::loading::lifecycle::{AssetLifecycle, DisplayedModel, SceneReady};
use crate::engine::scene::hierarchy::collect_subtree;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphBinding {
    pub name: String,
    pub index: usize,
}

/// Bindings for one morph-capable mesh entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphGroup {
    pub entity: Entity,
    pub label: String,
    pub bindings: Vec<MorphBinding>,
}

/// Current morph controls. Always mirrors the displayed asset's morph targets
/// and is empty while nothing morph-capable is shown.
#[derive(Resource, Debug, Default)]
pub struct MorphBindings {
    groups: Vec<MorphGroup>,
}

impl MorphBindings {
    pub fn groups(&self) -> &[MorphGroup] {
        &self.groups
    }

    pub fn replace(&mut self, groups: Vec<MorphGroup>) {
        self.groups = groups;
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// Morph controls are shown only when at least one binding exists.
    pub fn is_visible(&self) -> bool {
        self.binding_count() > 0
    }

    pub fn binding_count(&self) -> usize {
        self.groups.iter().map(|group| group.bindings.len()).sum()
    }
}

/// One binding per weight, named from the mesh when it carries target names.
pub fn bindings_for(weight_count: usize, names: Option<&[String]>) -> Vec<MorphBinding> {
    (0..weight_count)
        .map(|index| MorphBinding {
            name: names
                .and_then(|names| names.get(index))
                .cloned()
                .unwrap_or_else(|| format!("target {index}")),
            index,
        })
        .collect()
}

pub fn rebuild_morph_bindings(
    ready: Query<Entity, (With<DisplayedModel>, Added<SceneReady>)>,
    lifecycle: Res<AssetLifecycle>,
    children: Query<&Children>,
    weights: Query<(&MorphWeights, Option<&Name>)>,
    meshes: Res<Assets<Mesh>>,
    mut bindings: ResMut<MorphBindings>,
) {
    for root in &ready {
        if !lifecycle.is_displayed(root) {
            continue;
        }

        let mut groups = Vec::new();
        for entity in collect_subtree(root, &children) {
            let Ok((morph, name)) = weights.get(entity) else {
                continue;
            };
            let names = morph
                .first_mesh()
                .and_then(|mesh| meshes.get(mesh))
                .and_then(Mesh::morph_target_names);
            let group_bindings = bindings_for(morph.weights().len(), names);
            if group_bindings.is_empty() {
                continue;
            }
            groups.push(MorphGroup {
                entity,
                label: name.map_or_else(|| format!("{entity}"), |name| name.to_string()),
                bindings: group_bindings,
            });
        }

        bindings.replace(groups);
        info!(
            "Morph bindings rebuilt: {} meshes, {} targets",
            bindings.groups().len(),
            bindings.binding_count()
        );
    }
}
