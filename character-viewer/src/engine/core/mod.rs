//! Core application setup and runtime settings.
//!
//! Builds the Bevy app, registers resources, events and systems, and
//! configures the window for native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the asset lifecycle, particle effect, camera
/// controls and tuning UI.
pub mod app_setup;

/// Tunable values for movement, particles, marker placement and frame timing.
pub mod settings;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
