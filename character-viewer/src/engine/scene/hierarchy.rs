use bevy::prelude::*;

/// Every entity under `root`, including `root` itself, in depth-first order.
pub fn collect_subtree(root: Entity, children: &Query<&Children>) -> Vec<Entity> {
    let mut result = Vec::new();
    let mut queue = vec![root];
    while let Some(entity) = queue.pop() {
        result.push(entity);
        if let Ok(node_children) = children.get(entity) {
            queue.extend(node_children.iter());
        }
    }
    result
}
