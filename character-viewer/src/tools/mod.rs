//! User-facing controls layered over the scene.
//!
//! Directional movement (keyboard and on-screen pad), the egui tuning panel and
//! the morph-target bindings it renders.

/// egui window with the asset selector and morph sliders.
///
/// Also reports whether the pointer is captured by the panel.
pub mod controls_panel;

/// On-screen directional buttons (`key-up`, `key-down`, `key-left`, `key-right`).
pub mod directional_pad;

/// Directional input flags shared by keyboard and pointer sources.
pub mod input;

/// Morph-target bindings rebuilt from the displayed asset.
pub mod morph;
