//! Affine remapping of timeline ticks.

use std::ops::Mul;

use crate::foundation::{
    core::{Time, TimeRange},
    error::{SignalError, SignalResult},
    math::{gcd_i128, mul_div_floor, saturate_i64},
};

/// Non-zero rational time scale, kept reduced with a positive denominator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "(i64, i64)", into = "(i64, i64)")]
pub struct TimeScale {
    num: i64,
    den: i64, // > 0
}

impl TimeScale {
    /// Unit scale.
    pub const ONE: Self = Self { num: 1, den: 1 };
    /// Time reversal.
    pub const NEG_ONE: Self = Self { num: -1, den: 1 };

    /// Build `num / den`. Zero numerators and denominators are rejected.
    pub fn new(num: i64, den: i64) -> SignalResult<Self> {
        if den == 0 {
            return Err(SignalError::validation("TimeScale den must be != 0"));
        }
        if num == 0 {
            return Err(SignalError::validation("TimeScale must be non-zero"));
        }
        Ok(Self::reduced(i128::from(num), i128::from(den)))
    }

    /// Whole-number scale.
    pub fn integer(num: i64) -> SignalResult<Self> {
        Self::new(num, 1)
    }

    fn reduced(num: i128, den: i128) -> Self {
        let sign = if den < 0 { -1 } else { 1 };
        let g = gcd_i128(num, den).max(1);
        Self {
            num: saturate_i64(sign * num / g),
            den: saturate_i64(sign * den / g).max(1),
        }
    }

    /// Numerator (carries the sign).
    pub fn num(self) -> i64 {
        self.num
    }

    /// Denominator, always positive.
    pub fn den(self) -> i64 {
        self.den
    }

    /// True for time-reversing scales.
    pub fn is_negative(self) -> bool {
        self.num < 0
    }

    /// `1 / self`.
    pub fn recip(self) -> Self {
        Self::reduced(i128::from(self.den), i128::from(self.num))
    }

    /// `floor(ticks * self)`.
    pub fn apply(self, ticks: i64) -> i64 {
        mul_div_floor(ticks, self.num, self.den)
    }
}

impl Mul for TimeScale {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::reduced(
            i128::from(self.num) * i128::from(rhs.num),
            i128::from(self.den) * i128::from(rhs.den),
        )
    }
}

impl TryFrom<(i64, i64)> for TimeScale {
    type Error = SignalError;

    fn try_from((num, den): (i64, i64)) -> SignalResult<Self> {
        Self::new(num, den)
    }
}

impl From<TimeScale> for (i64, i64) {
    fn from(s: TimeScale) -> Self {
        (s.num, s.den)
    }
}

/// Affine time remap `t -> floor(t * scale) + offset`.
///
/// Used to delay, stretch and reverse signals, and to place repetitions of a looped
/// signal. `a * b` applies `b` first, then `a`; composition is exact whenever the
/// scaled offsets land on whole ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TimeTransform {
    /// Added after scaling.
    pub offset: Time,
    /// Multiplier applied first.
    pub scale: TimeScale,
}

impl Default for TimeTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TimeTransform {
    /// Leaves every time unchanged.
    pub const IDENTITY: Self = Self {
        offset: Time::ZERO,
        scale: TimeScale::ONE,
    };

    /// Build from parts.
    pub fn new(offset: Time, scale: TimeScale) -> Self {
        Self { offset, scale }
    }

    /// Pure translation by `offset`.
    pub fn offset(offset: Time) -> Self {
        Self {
            offset,
            scale: TimeScale::ONE,
        }
    }

    /// Pure scale around the origin.
    pub fn scaled(scale: TimeScale) -> Self {
        Self {
            offset: Time::ZERO,
            scale,
        }
    }

    /// Remap a single time.
    pub fn apply(self, t: Time) -> Time {
        Time(self.scale.apply(t.0)) + self.offset
    }

    /// Remap both ends of a range. Reversing scales swap the ends so the result is
    /// still ordered.
    pub fn apply_range(self, r: TimeRange) -> TimeRange {
        TimeRange::spanning(self.apply(r.start), self.apply(r.end))
    }

    /// Source time for `t`: `floor((t - offset) / scale)`.
    ///
    /// Unlike [`TimeTransform::inverse`] this is always defined. It undoes `apply`
    /// exactly for integer scales.
    pub fn unapply(self, t: Time) -> Time {
        Time(self.scale.recip().apply((t - self.offset).0))
    }

    /// Range covering `apply(t)` for every tick `t` in `r`. Unlike
    /// [`TimeTransform::apply_range`] this keeps the half-open end correct when the
    /// scale reverses time.
    pub fn apply_ticks(self, r: TimeRange) -> TimeRange {
        if r.is_empty() {
            return TimeRange::spanning(self.apply(r.start), self.apply(r.start));
        }
        let span = TimeRange::spanning(self.apply(r.start), self.apply(r.end - Time(1)));
        TimeRange {
            end: span.end + Time(1),
            ..span
        }
    }

    /// Exact inverse, or `None` when the inverse offset would fall between ticks.
    pub fn inverse(self) -> Option<Self> {
        let scale = self.scale.recip();
        let scaled = -i128::from(self.offset.0) * i128::from(scale.num());
        if scaled % i128::from(scale.den()) != 0 {
            return None;
        }
        let offset = i64::try_from(scaled / i128::from(scale.den())).ok()?;
        Some(Self {
            offset: Time(offset),
            scale,
        })
    }
}

impl Mul for TimeTransform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            offset: Time(self.scale.apply(rhs.offset.0)) + self.offset,
            scale: self.scale * rhs.scale,
        }
    }
}

impl Mul<Time> for TimeTransform {
    type Output = Time;

    fn mul(self, rhs: Time) -> Time {
        self.apply(rhs)
    }
}

impl Mul<TimeRange> for TimeTransform {
    type Output = TimeRange;

    fn mul(self, rhs: TimeRange) -> TimeRange {
        self.apply_range(rhs)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/time.rs"]
mod tests;
