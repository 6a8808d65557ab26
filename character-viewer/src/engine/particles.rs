//! Falling spheres spawned around the marker and dropped onto the floor.
//!
//! Spawning follows the wall clock (`Time<Real>`) at a fixed interval regardless
//! of frame rate. Integration follows the clamped virtual clock. Spheres stop at
//! the floor and stay there.

use std::collections::VecDeque;
use std::time::Duration;

use bevy::prelude::*;
use constants::particles::{SPHERE_RADIUS, SPHERE_SECTORS, SPHERE_STACKS};
use constants::scene::SPHERE_RGB;
use rand::Rng;

use crate::engine::core::settings::ViewerSettings;
use crate::engine::scene::environment::rgb;
use crate::engine::scene::marker::TargetMarker;

#[derive(Component, Debug, Default)]
pub struct FallingSphere;

/// Mesh and material shared by the marker and every falling sphere.
#[derive(Resource, Clone)]
pub struct SphereAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

pub fn create_sphere_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mesh = meshes.add(
        Sphere::new(SPHERE_RADIUS)
            .mesh()
            .uv(SPHERE_SECTORS, SPHERE_STACKS),
    );
    let material = materials.add(StandardMaterial {
        base_color: rgb(SPHERE_RGB),
        unlit: true,
        ..default()
    });
    commands.insert_resource(SphereAssets { mesh, material });
}

/// Wall-clock spawn cadence plus the spheres alive, oldest first.
#[derive(Resource, Debug)]
pub struct SphereSpawner {
    timer: Timer,
    live: VecDeque<Entity>,
}

impl SphereSpawner {
    pub fn new(interval: Duration) -> Self {
        Self {
            timer: Timer::new(interval, TimerMode::Repeating),
            live: VecDeque::new(),
        }
    }

    /// Advance the cadence by `delta` and return how many spawn ticks elapsed.
    pub fn ticks_due(&mut self, delta: Duration) -> u32 {
        self.timer.tick(delta);
        self.timer.times_finished_this_tick()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    fn track(&mut self, sphere: Entity) {
        self.live.push_back(sphere);
    }

    /// Oldest spheres beyond `cap`, removed from tracking.
    fn evict_over(&mut self, cap: usize) -> Vec<Entity> {
        let excess = self.live.len().saturating_sub(cap);
        self.live.drain(..excess).collect()
    }
}

impl FromWorld for SphereSpawner {
    fn from_world(world: &mut World) -> Self {
        let interval = world
            .get_resource::<ViewerSettings>()
            .map(|settings| settings.spawn_interval)
            .unwrap_or_else(|| ViewerSettings::default().spawn_interval);
        Self::new(interval)
    }
}

/// One integration step: fall at `speed`, clamp at `floor`.
pub fn fall_step(y: f32, dt: f32, speed: f32, floor: f32) -> f32 {
    let next = y - speed * dt;
    if next <= floor { floor } else { next }
}

/// Uniform horizontal position in `[-half_extent, half_extent)` on both axes.
pub fn random_spawn_position<R: Rng + ?Sized>(rng: &mut R, half_extent: f32, height: f32) -> Vec3 {
    Vec3::new(
        rng.gen_range(-half_extent..half_extent),
        height,
        rng.gen_range(-half_extent..half_extent),
    )
}

pub fn spawn_falling_spheres(
    mut commands: Commands,
    real_time: Res<Time<Real>>,
    mut spawner: ResMut<SphereSpawner>,
    spheres: Res<SphereAssets>,
    markers: Query<&Transform, With<TargetMarker>>,
    settings: Res<ViewerSettings>,
) {
    let ticks = spawner.ticks_due(real_time.delta());
    if ticks == 0 {
        return;
    }

    let height = markers
        .iter()
        .next()
        .map_or(0.0, |marker| marker.translation.y)
        .max(settings.floor_height);
    let mut rng = rand::thread_rng();
    let count = ticks as usize * settings.spheres_per_spawn;
    for _ in 0..count {
        let position = random_spawn_position(&mut rng, settings.spawn_half_extent, height);
        let sphere = commands
            .spawn((
                FallingSphere,
                Mesh3d(spheres.mesh.clone()),
                MeshMaterial3d(spheres.material.clone()),
                Transform::from_translation(position),
            ))
            .id();
        spawner.track(sphere);
    }

    if let Some(cap) = settings.max_falling_spheres {
        for sphere in spawner.evict_over(cap) {
            commands.entity(sphere).try_despawn();
        }
    }
}

pub fn integrate_falling_spheres(
    time: Res<Time>,
    settings: Res<ViewerSettings>,
    mut spheres: Query<&mut Transform, With<FallingSphere>>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    for mut transform in &mut spheres {
        let y = transform.translation.y;
        let next = fall_step(y, dt, settings.fall_speed, settings.floor_height);
        if next != y {
            transform.translation.y = next;
        }
    }
}
