//! Keysignal is a keyframe-based property animation engine.
//!
//! A [`PropertySignal`] is an immutable `T`-valued function of integer timeline ticks.
//! Signals are built from keyframes, layered additively, retimed through affine
//! [`TimeTransform`]s and repeated, and every operation returns a new signal that
//! shares unchanged parts with its source.
//!
//! # Evaluation overview
//!
//! 1. **Locate**: binary search finds the keyframe pair around `t`; outside the keyframe
//!    span the boundary value is held.
//! 2. **Blend**: the pair's interpolation kinds pick step, eased linear or quadratic
//!    blending, or a tension-free cubic Bezier that reads one neighbour on each side.
//! 3. **Layer**: composite signals combine their children through the value type's
//!    [`Transformer`].
//!
//! Arithmetic is never required of `T` directly. Each value type names its plugins
//! through [`PropertyValue`] and missing plugins degrade behavior instead of failing:
//!
//! - **No interpolator**: values step at keyframes.
//! - **No transformer**: edits replace the signal instead of layering on it.
//!
//! Reads are pure and signals are `Send + Sync`, so one signal can be sampled from many
//! threads; [`PropertySignal::bake`] does so on a rayon pool.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;
mod transform;

pub use animation::bake::{BakeOpts, MAX_BAKE_SAMPLES};
pub use animation::keyframe::{Interpolation, Keyframe};
pub use animation::keyframes::KeyframeSignal;
pub use animation::ops::{delay, loop_, reverse, speed};
pub use animation::signal::PropertySignal;
pub use animation::traits::{
    AdditiveTransformer, Interpolator, LerpInterpolator, PropertyValue, Transformer,
};
pub use foundation::core::{Rgba8Premul, Time, TimeRange, Transform2D, Vec2};
pub use foundation::error::{SignalError, SignalResult};
pub use foundation::ranges::{RepeatTiles, UnionRanges, repeat_tiles, union_ranges};
pub use transform::time::{TimeScale, TimeTransform};
