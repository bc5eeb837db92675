//! Shadow projection engine.
//!
//! Converts a solar position plus a geometry model into the shadow cast on
//! the ground plane. The sun at or below the horizon is a defined outcome
//! (`None`), not an error.

pub mod projector;
pub mod vector;

pub use projector::{ReferenceHeight, ShadowProjection, ShadowProjector};
pub use vector::{shadow_direction_deg, ShadowVector};
