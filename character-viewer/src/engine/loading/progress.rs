use bevy::prelude::*;

use crate::error::ViewerError;

use super::asset_loader::ModelLoadFailed;

#[derive(Resource, Default, Debug)]
pub struct LoadStatus {
    pub in_flight: usize,
    pub last_loaded: Option<String>,
    pub last_error: Option<ViewerError>,
}

impl LoadStatus {
    pub fn record_loaded(&mut self, id: &str) {
        self.last_loaded = Some(id.to_string());
        self.last_error = None;
    }

    pub fn record_failure(&mut self, error: ViewerError) {
        self.last_error = Some(error);
    }
}

/// Logs failed loads. The displayed asset is left untouched and nothing is retried.
pub fn record_load_failures(
    mut failures: EventReader<ModelLoadFailed>,
    mut status: ResMut<LoadStatus>,
) {
    for failure in failures.read() {
        error!(asset = failure.error.asset_id(), "{}", failure.error);
        status.record_failure(failure.error.clone());
    }
}
