use bevy::math::Affine3A;
use bevy::prelude::*;
use bevy::render::mesh::MeshAabb;
use bevy::render::primitives::Aabb;

/// World-space axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn from_point(point: Vec3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    pub fn include_point(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Grow to contain a local-space box placed by `transform`.
    pub fn include_aabb(&mut self, aabb: &Aabb, transform: &Affine3A) {
        for corner in aabb_corners(aabb) {
            self.include_point(transform.transform_point3(corner));
        }
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

fn aabb_corners(aabb: &Aabb) -> [Vec3; 8] {
    let min = Vec3::from(aabb.min());
    let max = Vec3::from(aabb.max());
    [
        Vec3::new(min.x, min.y, min.z),
        Vec3::new(max.x, min.y, min.z),
        Vec3::new(min.x, max.y, min.z),
        Vec3::new(max.x, max.y, min.z),
        Vec3::new(min.x, min.y, max.z),
        Vec3::new(max.x, min.y, max.z),
        Vec3::new(min.x, max.y, max.z),
        Vec3::new(max.x, max.y, max.z),
    ]
}

fn merge(bounds: &mut Option<Bounds>, aabb: &Aabb, transform: &Affine3A) {
    match bounds {
        Some(bounds) => bounds.include_aabb(aabb, transform),
        None => {
            let mut fresh = Bounds::from_point(transform.transform_point3(Vec3::from(aabb.center)));
            fresh.include_aabb(aabb, transform);
            *bounds = Some(fresh);
        }
    }
}

/// Bounds of every mesh under `root`, composing local transforms down the hierarchy.
///
/// Works from `Transform` rather than `GlobalTransform` so it is valid in the
/// same frame a scene is instantiated, before transform propagation has run.
pub fn subtree_bounds<F: bevy::ecs::query::QueryFilter>(
    root: Entity,
    children: &Query<&Children>,
    nodes: &Query<(&Transform, Option<&Mesh3d>), F>,
    meshes: &Assets<Mesh>,
) -> Option<Bounds> {
    let mut bounds = None;
    let mut stack = vec![(root, Affine3A::IDENTITY)];

    while let Some((entity, parent)) = stack.pop() {
        let local = nodes
            .get(entity)
            .map(|(transform, mesh)| (transform.compute_affine(), mesh))
            .ok();
        let world = match local {
            Some((affine, _)) => parent * affine,
            None => parent,
        };

        if let Some((_, Some(mesh))) = local {
            if let Some(aabb) = meshes.get(&mesh.0).and_then(|mesh| mesh.compute_aabb()) {
                merge(&mut bounds, &aabb, &world);
            }
        }

        if let Ok(node_children) = children.get(entity) {
            let node_children: &[Entity] = node_children;
            stack.extend(node_children.iter().map(|&child| (child, world)));
        }
    }

    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn translated_box_moves_bounds() {
        let aabb = Aabb::from_min_max(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0));
        let mut bounds = Bounds::from_point(Vec3::ZERO);
        bounds.include_aabb(&aabb, &Affine3A::from_translation(Vec3::new(0.0, 10.0, 0.0)));

        assert_eq!(bounds.max, Vec3::new(1.0, 12.0, 1.0));
        assert_eq!(bounds.min, Vec3::new(-1.0, 0.0, -1.0));
    }

    #[test]
    fn scaled_box_scales_extent() {
        let aabb = Aabb::from_min_max(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));
        let mut bounds = Bounds::from_point(Vec3::ZERO);
        bounds.include_aabb(&aabb, &Affine3A::from_scale(Vec3::splat(100.0)));
        assert_eq!(bounds.size(), Vec3::splat(100.0));
    }

    #[test]
    fn composes_nested_transforms() {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>();
        let mesh = app
            .world_mut()
            .resource_mut::<Assets<Mesh>>()
            .add(Mesh::from(Cuboid::new(2.0, 4.0, 2.0)));

        let root = app.world_mut().spawn(Transform::default()).id();
        let pivot = app
            .world_mut()
            .spawn((Transform::from_xyz(0.0, 10.0, 0.0), ChildOf(root)))
            .id();
        app.world_mut().spawn((
            Mesh3d(mesh),
            Transform::from_xyz(0.0, 5.0, 0.0).with_scale(Vec3::splat(2.0)),
            ChildOf(pivot),
        ));

        let result = app
            .world_mut()
            .run_system_once(
                move |children: Query<&Children>,
                      nodes: Query<(&Transform, Option<&Mesh3d>)>,
                      meshes: Res<Assets<Mesh>>| {
                    subtree_bounds(root, &children, &nodes, &meshes)
                },
            )
            .expect("system runs");

        let bounds = result.expect("mesh bounds");
        // Cuboid spans y in [-2, 2]; scaled by 2 and lifted by 5 + 10.
        assert_eq!(bounds.max.y, 19.0);
        assert_eq!(bounds.min.y, 11.0);
        assert_eq!(bounds.max.x, 2.0);
    }

    #[test]
    fn no_meshes_means_no_bounds() {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>();
        let root = app.world_mut().spawn(Transform::default()).id();

        let result = app
            .world_mut()
            .run_system_once(
                move |children: Query<&Children>,
                      nodes: Query<(&Transform, Option<&Mesh3d>)>,
                      meshes: Res<Assets<Mesh>>| {
                    subtree_bounds(root, &children, &nodes, &meshes)
                },
            )
            .expect("system runs");
        assert!(result.is_none());
    }
}
