//! Asynchronous character loading and the displayed-asset lifecycle.
//!
//! Requests resolve through the catalog into glTF loads, settle into
//! `ModelLoaded` or `ModelLoadFailed` events, and completed loads replace the
//! displayed asset exactly once.

/// First-clip animation playback for newly instantiated characters.
pub mod animation;

/// Loader adapter: catalog lookup, glTF requests and load-state polling.
pub mod asset_loader;

/// Teardown of the previous character and installation of the new one.
///
/// Releases meshes, materials and textures before the old scene is despawned.
pub mod lifecycle;

/// Load status resource shown in the stats overlay.
pub mod progress;
