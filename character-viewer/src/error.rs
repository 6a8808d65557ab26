use thiserror::Error;

/// Failures surfaced by the asset lifecycle.
///
/// None of these are fatal: the currently displayed asset stays on screen and
/// the error is reported through the log and the stats overlay.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewerError {
    #[error("asset `{id}` is not in the catalog")]
    UnknownAsset { id: String },

    #[error("failed to load asset `{id}` from {path}: {reason}")]
    AssetLoad {
        id: String,
        path: String,
        reason: String,
    },

    #[error("asset `{id}` does not contain a scene")]
    MissingScene { id: String },
}

impl ViewerError {
    /// Identifier of the asset the error refers to.
    pub fn asset_id(&self) -> &str {
        match self {
            Self::UnknownAsset { id } | Self::AssetLoad { id, .. } | Self::MissingScene { id } => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_asset() {
        let err = ViewerError::AssetLoad {
            id: "Running".into(),
            path: "models/gltf/Running.glb".into(),
            reason: "file not found".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to load asset `Running` from models/gltf/Running.glb: file not found"
        );
        assert_eq!(err.asset_id(), "Running");
    }

    #[test]
    fn unknown_asset_reports_id() {
        let err = ViewerError::UnknownAsset { id: "Dancing".into() };
        assert_eq!(err.to_string(), "asset `Dancing` is not in the catalog");
        assert_eq!(err.asset_id(), "Dancing");
    }
}
