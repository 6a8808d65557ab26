//! Runtime diagnostics.
//!
//! Provides the native stats overlay with frame rate, displayed asset,
//! falling-sphere count and the last load error.

/// Stats overlay spawn and per-frame text update.
pub mod fps_tracking;
