//! Keyframe evaluation and the property signal algebra.
//!
//! [`signal::PropertySignal`] is the entry point; the other modules supply its pieces.

/// Batch sampling.
pub mod bake;
pub(crate) mod ease;
/// Keyframe records.
pub mod keyframe;
/// Keyframe-backed signals.
pub mod keyframes;
/// Timeline builders.
pub mod ops;
/// Composable signals.
pub mod signal;
/// Interpolation and additive plugins.
pub mod traits;
