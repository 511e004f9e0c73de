//! Per-type arithmetic plugins.
//!
//! Signals never require `T` to support arithmetic directly. Instead each value type
//! names its plugins through [`PropertyValue`]; a type that returns `None` for a plugin
//! gets the degraded behavior instead of an error:
//!
//! - no [`Interpolator`]: evaluation snaps to the governing keyframe (step only);
//! - no [`Transformer`]: edits replace the signal instead of layering on top of it.

use std::fmt::Debug;

use crate::foundation::core::{Rgba8Premul, Transform2D, Vec2};

/// Blend two values of `T`.
///
/// Implementations must satisfy `interpolate(a, b, 0.0) == a` and
/// `interpolate(a, b, 1.0) == b`. Fractions outside `[0, 1]` extrapolate; the cubic
/// evaluator uses that to scale tangent deltas.
pub trait Interpolator<T>: Send + Sync {
    /// Blend from `a` toward `b` by `fraction`.
    fn interpolate(&self, a: &T, b: &T, fraction: f64) -> T;
}

/// Additive algebra over `T`.
///
/// Laws, for all `a`, `b`:
/// `apply(a, difference(a, b)) == b` and
/// `invert(difference(a, b)) == difference(b, a)`.
pub trait Transformer<T>: Send + Sync {
    /// The delta that changes nothing.
    fn identity(&self) -> T;
    /// Delta taking `from` to `to`.
    fn difference(&self, from: &T, to: &T) -> T;
    /// `base` moved by `delta`.
    fn apply(&self, base: &T, delta: &T) -> T;
    /// Delta undoing `delta`.
    fn invert(&self, delta: &T) -> T;
}

/// A value type that can live in a property signal, with its plugin lookup.
///
/// The lookup is resolved per type at compile time; the defaults report both
/// capabilities as missing.
pub trait PropertyValue: Clone + Debug + Send + Sync + 'static {
    /// Blend plugin for this type, if any.
    fn interpolator() -> Option<&'static dyn Interpolator<Self>> {
        None
    }

    /// Additive plugin for this type, if any.
    fn transformer() -> Option<&'static dyn Transformer<Self>> {
        None
    }
}

/// Straight-line blend for numeric and vector types.
#[derive(Clone, Copy, Debug, Default)]
pub struct LerpInterpolator;

/// Component-wise `+`/`-` algebra for numeric and vector types.
#[derive(Clone, Copy, Debug, Default)]
pub struct AdditiveTransformer;

impl Interpolator<f64> for LerpInterpolator {
    fn interpolate(&self, a: &f64, b: &f64, fraction: f64) -> f64 {
        a + (b - a) * fraction
    }
}

impl Interpolator<f32> for LerpInterpolator {
    fn interpolate(&self, a: &f32, b: &f32, fraction: f64) -> f32 {
        (f64::from(*a) + ((f64::from(*b) - f64::from(*a)) * fraction)) as f32
    }
}

impl Interpolator<Vec2> for LerpInterpolator {
    fn interpolate(&self, a: &Vec2, b: &Vec2, fraction: f64) -> Vec2 {
        Vec2::new(a.x + (b.x - a.x) * fraction, a.y + (b.y - a.y) * fraction)
    }
}

impl Interpolator<Transform2D> for LerpInterpolator {
    fn interpolate(&self, a: &Transform2D, b: &Transform2D, fraction: f64) -> Transform2D {
        Transform2D {
            translate: <Self as Interpolator<Vec2>>::interpolate(
                self,
                &a.translate,
                &b.translate,
                fraction,
            ),
            rotation_rad: <Self as Interpolator<f64>>::interpolate(
                self,
                &a.rotation_rad,
                &b.rotation_rad,
                fraction,
            ),
            scale: <Self as Interpolator<Vec2>>::interpolate(self, &a.scale, &b.scale, fraction),
            anchor: <Self as Interpolator<Vec2>>::interpolate(self, &a.anchor, &b.anchor, fraction),
        }
    }
}

impl Interpolator<Rgba8Premul> for LerpInterpolator {
    fn interpolate(&self, a: &Rgba8Premul, b: &Rgba8Premul, fraction: f64) -> Rgba8Premul {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Rgba8Premul {
            r: lerp_u8(a.r, b.r, fraction),
            g: lerp_u8(a.g, b.g, fraction),
            b: lerp_u8(a.b, b.b, fraction),
            a: lerp_u8(a.a, b.a, fraction),
        }
    }
}

impl Transformer<f64> for AdditiveTransformer {
    fn identity(&self) -> f64 {
        0.0
    }

    fn difference(&self, from: &f64, to: &f64) -> f64 {
        to - from
    }

    fn apply(&self, base: &f64, delta: &f64) -> f64 {
        base + delta
    }

    fn invert(&self, delta: &f64) -> f64 {
        -delta
    }
}

impl Transformer<f32> for AdditiveTransformer {
    fn identity(&self) -> f32 {
        0.0
    }

    fn difference(&self, from: &f32, to: &f32) -> f32 {
        to - from
    }

    fn apply(&self, base: &f32, delta: &f32) -> f32 {
        base + delta
    }

    fn invert(&self, delta: &f32) -> f32 {
        -delta
    }
}

// Wrapping keeps both laws exact over the whole domain.
impl Transformer<i64> for AdditiveTransformer {
    fn identity(&self) -> i64 {
        0
    }

    fn difference(&self, from: &i64, to: &i64) -> i64 {
        to.wrapping_sub(*from)
    }

    fn apply(&self, base: &i64, delta: &i64) -> i64 {
        base.wrapping_add(*delta)
    }

    fn invert(&self, delta: &i64) -> i64 {
        delta.wrapping_neg()
    }
}

impl Transformer<Vec2> for AdditiveTransformer {
    fn identity(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn difference(&self, from: &Vec2, to: &Vec2) -> Vec2 {
        *to - *from
    }

    fn apply(&self, base: &Vec2, delta: &Vec2) -> Vec2 {
        *base + *delta
    }

    fn invert(&self, delta: &Vec2) -> Vec2 {
        -*delta
    }
}

// Scale is layered additively as well, so a zero scale never needs a division.
impl Transformer<Transform2D> for AdditiveTransformer {
    fn identity(&self) -> Transform2D {
        Transform2D {
            translate: Vec2::ZERO,
            rotation_rad: 0.0,
            scale: Vec2::ZERO,
            anchor: Vec2::ZERO,
        }
    }

    fn difference(&self, from: &Transform2D, to: &Transform2D) -> Transform2D {
        Transform2D {
            translate: to.translate - from.translate,
            rotation_rad: to.rotation_rad - from.rotation_rad,
            scale: to.scale - from.scale,
            anchor: to.anchor - from.anchor,
        }
    }

    fn apply(&self, base: &Transform2D, delta: &Transform2D) -> Transform2D {
        Transform2D {
            translate: base.translate + delta.translate,
            rotation_rad: base.rotation_rad + delta.rotation_rad,
            scale: base.scale + delta.scale,
            anchor: base.anchor + delta.anchor,
        }
    }

    fn invert(&self, delta: &Transform2D) -> Transform2D {
        Transform2D {
            translate: -delta.translate,
            rotation_rad: -delta.rotation_rad,
            scale: -delta.scale,
            anchor: -delta.anchor,
        }
    }
}

impl PropertyValue for f64 {
    fn interpolator() -> Option<&'static dyn Interpolator<Self>> {
        Some(&LerpInterpolator)
    }

    fn transformer() -> Option<&'static dyn Transformer<Self>> {
        Some(&AdditiveTransformer)
    }
}

impl PropertyValue for f32 {
    fn interpolator() -> Option<&'static dyn Interpolator<Self>> {
        Some(&LerpInterpolator)
    }

    fn transformer() -> Option<&'static dyn Transformer<Self>> {
        Some(&AdditiveTransformer)
    }
}

impl PropertyValue for Vec2 {
    fn interpolator() -> Option<&'static dyn Interpolator<Self>> {
        Some(&LerpInterpolator)
    }

    fn transformer() -> Option<&'static dyn Transformer<Self>> {
        Some(&AdditiveTransformer)
    }
}

impl PropertyValue for Transform2D {
    fn interpolator() -> Option<&'static dyn Interpolator<Self>> {
        Some(&LerpInterpolator)
    }

    fn transformer() -> Option<&'static dyn Transformer<Self>> {
        Some(&AdditiveTransformer)
    }
}

/// Integer counters step between keys but still take additive edits.
impl PropertyValue for i64 {
    fn transformer() -> Option<&'static dyn Transformer<Self>> {
        Some(&AdditiveTransformer)
    }
}

/// Colors blend but edits replace them outright.
impl PropertyValue for Rgba8Premul {
    fn interpolator() -> Option<&'static dyn Interpolator<Self>> {
        Some(&LerpInterpolator)
    }
}

impl PropertyValue for bool {}

impl PropertyValue for String {}

#[cfg(test)]
#[path = "../../tests/unit/animation/traits.rs"]
mod tests;
