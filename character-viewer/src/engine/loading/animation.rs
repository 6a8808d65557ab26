use bevy::prelude::*;

use crate::engine::scene::hierarchy::collect_subtree;

use super::lifecycle::{AssetLifecycle, DisplayedModel, SceneReady};

/// Loop the first clip of a freshly instantiated character on every player in its scene.
///
/// Characters without clips are left static. Playback is advanced by Bevy's
/// animation systems from the virtual clock.
pub fn play_first_clip(
    mut commands: Commands,
    ready: Query<Entity, (With<DisplayedModel>, Added<SceneReady>)>,
    lifecycle: Res<AssetLifecycle>,
    children: Query<&Children>,
    mut players: Query<&mut AnimationPlayer>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
) {
    for root in &ready {
        let Some(displayed) = lifecycle.displayed().filter(|asset| asset.root == root) else {
            continue;
        };
        let Some(clip) = displayed.clip.clone() else {
            debug!("`{}` has no animation clips", displayed.id);
            continue;
        };

        let (graph, node) = AnimationGraph::from_clip(clip);
        let graph = graphs.add(graph);

        let mut started = 0;
        for entity in collect_subtree(root, &children) {
            let Ok(mut player) = players.get_mut(entity) else {
                continue;
            };
            player.play(node).repeat();
            commands
                .entity(entity)
                .insert(AnimationGraphHandle(graph.clone()));
            started += 1;
        }

        if started == 0 {
            warn!("`{}` has an animation clip but no animation player", displayed.id);
        } else {
            info!("Looping first clip of `{}`", displayed.id);
        }
    }
}
