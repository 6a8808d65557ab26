//! Shared tuning constants for the character viewer.
//!
//! Values are kept literal (spawn square, marker offsets, speeds); the viewer
//! copies them into its runtime settings so they can be overridden in tests.

/// Camera poses, projection and movement speeds.
pub mod camera;

/// Asset catalog defaults and the model path convention.
pub mod catalog;

/// Falling-sphere effect and marker placement ranges.
pub mod particles;

/// Scene colours, lighting and ground plane dimensions.
pub mod scene;
