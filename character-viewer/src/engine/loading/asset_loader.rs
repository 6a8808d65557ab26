use bevy::asset::{LoadState, RecursiveDependencyLoadState};
use bevy::gltf::Gltf;
use bevy::prelude::*;

use crate::engine::assets::catalog::ActiveCatalog;
use crate::error::ViewerError;

use super::progress::LoadStatus;

/// User request to display a catalog asset.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct LoadAssetRequest {
    pub id: String,
}

/// A glTF finished loading, including its dependencies.
#[derive(Event, Debug, Clone)]
pub struct ModelLoaded {
    pub id: String,
    pub gltf: Handle<Gltf>,
    pub scene: Handle<Scene>,
    pub first_clip: Option<Handle<AnimationClip>>,
}

#[derive(Event, Debug, Clone)]
pub struct ModelLoadFailed {
    pub error: ViewerError,
}

/// Outcome of polling one in-flight load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPoll {
    Pending,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct PendingLoad {
    pub id: String,
    pub path: String,
    pub handle: Handle<Gltf>,
}

/// Every load that has been requested but not yet settled.
///
/// There is no cancellation: each load runs to completion on its own and the
/// last one to complete ends up displayed.
#[derive(Resource, Default)]
pub struct PendingLoads {
    loads: Vec<PendingLoad>,
}

impl PendingLoads {
    pub fn push(&mut self, load: PendingLoad) {
        self.loads.push(load);
    }

    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// Remove every settled load, in request order, with its outcome.
    pub fn take_settled(
        &mut self,
        mut poll: impl FnMut(&PendingLoad) -> LoadPoll,
    ) -> Vec<(PendingLoad, Result<(), String>)> {
        let mut settled = Vec::new();
        let mut still_pending = Vec::with_capacity(self.loads.len());

        for load in self.loads.drain(..) {
            match poll(&load) {
                LoadPoll::Pending => still_pending.push(load),
                LoadPoll::Ready => settled.push((load, Ok(()))),
                LoadPoll::Failed(reason) => settled.push((load, Err(reason))),
            }
        }

        self.loads = still_pending;
        settled
    }
}

/// Combine the root and dependency load states of a glTF handle.
pub fn classify_load(load: &LoadState, dependencies: &RecursiveDependencyLoadState) -> LoadPoll {
    if let LoadState::Failed(err) = load {
        return LoadPoll::Failed(err.to_string());
    }
    match dependencies {
        RecursiveDependencyLoadState::Loaded => LoadPoll::Ready,
        RecursiveDependencyLoadState::Failed(err) => LoadPoll::Failed(err.to_string()),
        _ => LoadPoll::Pending,
    }
}

/// Resolve requested identifiers and start their glTF loads.
pub fn request_asset_loads(
    mut requests: EventReader<LoadAssetRequest>,
    catalog: Res<ActiveCatalog>,
    asset_server: Res<AssetServer>,
    mut pending: ResMut<PendingLoads>,
    mut status: ResMut<LoadStatus>,
    mut failures: EventWriter<ModelLoadFailed>,
) {
    for request in requests.read() {
        let path = match catalog.catalog.model_path(&request.id) {
            Ok(path) => path,
            Err(error) => {
                failures.write(ModelLoadFailed { error });
                continue;
            }
        };

        info!("Loading asset `{}` from {}", request.id, path);
        let handle = asset_server.load::<Gltf>(path.clone());
        pending.push(PendingLoad {
            id: request.id.clone(),
            path,
            handle,
        });
    }
    status.in_flight = pending.len();
}

/// Settle in-flight loads into `ModelLoaded` / `ModelLoadFailed` events.
pub fn poll_pending_loads(
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    mut pending: ResMut<PendingLoads>,
    mut status: ResMut<LoadStatus>,
    mut loaded: EventWriter<ModelLoaded>,
    mut failures: EventWriter<ModelLoadFailed>,
) {
    if pending.is_empty() {
        return;
    }

    let settled = pending.take_settled(|load| {
        let id = load.handle.id();
        match classify_load(
            &asset_server.load_state(id),
            &asset_server.recursive_dependency_load_state(id),
        ) {
            LoadPoll::Ready if !gltfs.contains(id) => LoadPoll::Pending,
            poll => poll,
        }
    });
    status.in_flight = pending.len();

    for (load, outcome) in settled {
        if let Err(reason) = outcome {
            failures.write(ModelLoadFailed {
                error: ViewerError::AssetLoad {
                    id: load.id,
                    path: load.path,
                    reason,
                },
            });
            continue;
        }

        let Some(gltf) = gltfs.get(&load.handle) else {
            continue;
        };
        match model_from_gltf(&load, gltf) {
            Ok(model) => {
                loaded.write(model);
            }
            Err(error) => {
                failures.write(ModelLoadFailed { error });
            }
        }
    }
}

/// Pick the scene and first animation clip out of a loaded glTF.
pub fn model_from_gltf(load: &PendingLoad, gltf: &Gltf) -> Result<ModelLoaded, ViewerError> {
    let scene = gltf
        .default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
        .ok_or_else(|| ViewerError::MissingScene {
            id: load.id.clone(),
        })?;

    Ok(ModelLoaded {
        id: load.id.clone(),
        gltf: load.handle.clone(),
        scene,
        first_clip: gltf.animations.first().cloned(),
    })
}
