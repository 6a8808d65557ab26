//! Static scene content and scene-graph utilities.
//!
//! Provides the lit environment (fog, lights, ground), the target marker that
//! floats above the character, and bounds/hierarchy helpers used when a new
//! character is installed.

/// Axis-aligned bounds accumulated over a scene sub-tree.
pub mod bounds;

/// Background, fog, lights and ground plane.
pub mod environment;

/// Sub-tree traversal over `Children`.
pub mod hierarchy;

/// Target marker sphere positioned above the displayed character.
pub mod marker;
