use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::foundation::error::{SignalError, SignalResult};

pub use kurbo::Vec2;

/// A point on the timeline, counted in integer ticks.
///
/// Tick arithmetic is exact; it saturates at the `i64` bounds instead of wrapping so
/// open-ended queries built from [`Time::MIN`] / [`Time::MAX`] stay ordered.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Time(pub i64);

impl Time {
    /// The timeline origin.
    pub const ZERO: Self = Self(0);
    /// Earliest representable time.
    pub const MIN: Self = Self(i64::MIN);
    /// Latest representable time.
    pub const MAX: Self = Self(i64::MAX);

    /// Midpoint of two times, rounded toward negative infinity.
    pub fn midpoint(self, other: Self) -> Self {
        Self(((i128::from(self.0) + i128::from(other.0)).div_euclid(2)) as i64)
    }
}

impl Add for Time {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Time {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Time {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Time {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Time {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

/// Closed-open interval `[start, end)` on the timeline.
///
/// Empty ranges (`start == end`) never overlap anything, themselves included. The
/// range-sequence union in [`crate::union_ranges`] relies on that convention to keep
/// touching ranges apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawTimeRange")]
pub struct TimeRange {
    /// Inclusive start.
    pub start: Time,
    /// Exclusive end.
    pub end: Time, // exclusive
}

#[derive(serde::Deserialize)]
struct RawTimeRange {
    start: Time,
    end: Time,
}

impl TryFrom<RawTimeRange> for TimeRange {
    type Error = SignalError;

    fn try_from(raw: RawTimeRange) -> SignalResult<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl TimeRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: Time, end: Time) -> SignalResult<Self> {
        if start > end {
            return Err(SignalError::validation("TimeRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// The range between two times regardless of argument order.
    pub fn spanning(a: Time, b: Time) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Every representable time.
    pub fn all() -> Self {
        Self {
            start: Time::MIN,
            end: Time::MAX,
        }
    }

    /// `end - start`.
    pub fn duration(self) -> Time {
        self.end - self.start
    }

    /// True when the range covers no time.
    pub fn is_empty(self) -> bool {
        self.start >= self.end
    }

    /// True when `t` lies in `[start, end)`.
    pub fn contains(self, t: Time) -> bool {
        self.start <= t && t < self.end
    }

    /// Translate both ends by `delta`.
    pub fn shift(self, delta: Time) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }

    /// Overlapping sub-range, or `None` when the ranges share no time.
    ///
    /// Empty ranges never intersect, and ranges that only touch (`a.end == b.start`)
    /// do not either.
    pub fn intersect(self, other: Self) -> Option<Self> {
        if self.is_empty() || other.is_empty() {
            return None;
        }
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(Self { start, end })
    }

    /// Smallest range containing both. Spans any gap between disjoint ranges, so check
    /// [`TimeRange::intersect`] first when the gap matters.
    pub fn union(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Intersection with `outer`, falling back to an empty range pinned to the nearest
    /// boundary of `outer` when the two are disjoint. An inverted `outer` is treated
    /// as the empty range at its start.
    pub fn clamp(self, outer: Self) -> Self {
        let (lo, hi) = (outer.start, outer.end.max(outer.start));
        Self {
            start: self.start.clamp(lo, hi),
            end: self.end.clamp(lo, hi),
        }
    }

    /// `(t - start) / duration`, unclamped. Empty ranges report `0.0`.
    pub fn fraction(self, t: Time) -> f64 {
        let duration = self.duration().0;
        if duration <= 0 {
            return 0.0;
        }
        ((t - self.start).0 as f64) / (duration as f64)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Premultiply straight-alpha components.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }
}

/// 2D placement of a layer: the value type behind "transform" property tracks.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    /// Translation in canvas units.
    pub translate: Vec2,
    /// Rotation in radians.
    pub rotation_rad: f64,
    /// Per-axis scale.
    pub scale: Vec2, // default (1,1)
    /// Pivot in local space.
    pub anchor: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotation_rad: 0.0,
            scale: Vec2::new(1.0, 1.0),
            anchor: Vec2::ZERO,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
