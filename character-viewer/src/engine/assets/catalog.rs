use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::catalog::{
    CATALOG_PATH, DEFAULT_ASSET, DEFAULT_ASSETS, MODEL_PATH_PLACEHOLDER, MODEL_PATH_TEMPLATE,
};
use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

/// Enumerated list of selectable character assets. Mirrors `catalog.json` exactly.
#[derive(Asset, TypePath, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetCatalog {
    /// Identifier loaded at startup.
    pub default: String,
    /// Model path convention; `{id}` is replaced by the identifier.
    #[serde(default = "default_path_template")]
    pub path_template: String,
    pub assets: Vec<String>,
}

fn default_path_template() -> String {
    MODEL_PATH_TEMPLATE.to_string()
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self {
            default: DEFAULT_ASSET.to_string(),
            path_template: default_path_template(),
            assets: DEFAULT_ASSETS.iter().map(|id| id.to_string()).collect(),
        }
    }
}

impl AssetCatalog {
    pub fn contains(&self, id: &str) -> bool {
        self.assets.iter().any(|asset| asset == id)
    }

    /// Resolve an identifier to its model path. Identifiers outside the catalog are rejected.
    pub fn model_path(&self, id: &str) -> Result<String, ViewerError> {
        if !self.contains(id) {
            return Err(ViewerError::UnknownAsset { id: id.to_string() });
        }
        Ok(self.path_template.replace(MODEL_PATH_PLACEHOLDER, id))
    }

    /// Startup asset, falling back to the first entry when `default` is not listed.
    pub fn default_asset(&self) -> Option<&str> {
        if self.contains(&self.default) {
            Some(self.default.as_str())
        } else {
            self.assets.first().map(String::as_str)
        }
    }

    /// A catalog is usable when it lists at least one asset and its template
    /// actually varies with the identifier.
    pub fn is_usable(&self) -> bool {
        !self.assets.is_empty() && self.path_template.contains(MODEL_PATH_PLACEHOLDER)
    }
}

/// Catalog currently offered by the selector.
///
/// Starts out with the built-in catalog and is replaced once `catalog.json`
/// has loaded and validated.
#[derive(Resource, Default)]
pub struct ActiveCatalog {
    pub catalog: AssetCatalog,
    handle: Option<Handle<AssetCatalog>>,
    settled: bool,
}

impl ActiveCatalog {
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Swap in a loaded catalog. Unusable catalogs are rejected and the current one kept.
    pub fn apply(&mut self, loaded: &AssetCatalog) -> bool {
        self.settled = true;
        if !loaded.is_usable() {
            return false;
        }
        self.catalog = loaded.clone();
        true
    }
}

pub fn start_catalog_loading(mut active: ResMut<ActiveCatalog>, asset_server: Res<AssetServer>) {
    active.handle = Some(asset_server.load(CATALOG_PATH));
}

pub fn apply_loaded_catalog(
    mut active: ResMut<ActiveCatalog>,
    catalogs: Res<Assets<AssetCatalog>>,
    asset_server: Res<AssetServer>,
) {
    if active.settled {
        return;
    }
    let Some(handle) = active.handle.clone() else {
        return;
    };

    if let Some(loaded) = catalogs.get(&handle) {
        if active.apply(loaded) {
            info!(
                "Loaded asset catalog with {} entries from {}",
                active.catalog.assets.len(),
                CATALOG_PATH
            );
        } else {
            warn!("Ignoring {}: no assets or no `{{id}}` in path template", CATALOG_PATH);
        }
        return;
    }

    if let LoadState::Failed(err) = asset_server.load_state(handle.id()) {
        warn!("Using built-in asset catalog, {} failed to load: {}", CATALOG_PATH, err);
        active.settled = true;
    }
}
