//! Keyframe-array-backed signal evaluation.

use std::{ops::Range, sync::Arc};

use crate::{
    animation::{
        ease::Ease,
        keyframe::{Interpolation, Keyframe},
        traits::{Interpolator, PropertyValue, Transformer},
    },
    foundation::{
        core::{Time, TimeRange},
        error::{SignalError, SignalResult},
    },
    transform::time::TimeTransform,
};

/// Immutable, non-empty, time-ordered keyframes plus the rule that evaluates them.
///
/// Storage is shared: [`KeyframeSignal::reduce`] narrows a view onto the same
/// allocation instead of copying, and cloning a signal is a reference-count bump.
#[derive(Debug)]
pub struct KeyframeSignal<T> {
    keys: Arc<[Keyframe<T>]>,
    span: Range<usize>, // non-empty window into `keys`
}

impl<T> Clone for KeyframeSignal<T> {
    fn clone(&self) -> Self {
        Self {
            keys: Arc::clone(&self.keys),
            span: self.span.clone(),
        }
    }
}

/// Reject empty or time-unordered keyframe lists. Equal times are allowed.
pub(crate) fn validate_order<T>(keys: &[Keyframe<T>]) -> SignalResult<()> {
    if let Some(i) = keys.windows(2).position(|w| w[0].time > w[1].time) {
        return Err(SignalError::keyframes(format!(
            "keyframes must be sorted by time (index {} at {} follows {})",
            i + 1,
            keys[i + 1].time.0,
            keys[i].time.0,
        )));
    }
    Ok(())
}

impl<T> KeyframeSignal<T> {
    /// Build a signal from time-ordered keyframes.
    ///
    /// Fails on an empty list or when a keyframe's time precedes its predecessor's.
    /// Input is never reordered or deduplicated.
    pub fn new(keys: Vec<Keyframe<T>>) -> SignalResult<Self> {
        if keys.is_empty() {
            return Err(SignalError::keyframes(
                "a keyframe signal needs at least one keyframe",
            ));
        }
        validate_order(&keys)?;
        Ok(Self::from_validated(keys))
    }

    pub(crate) fn from_validated(keys: Vec<Keyframe<T>>) -> Self {
        let len = keys.len();
        Self {
            keys: keys.into(),
            span: 0..len,
        }
    }

    /// The keyframes in time order.
    pub fn keyframes(&self) -> &[Keyframe<T>] {
        &self.keys[self.span.clone()]
    }

    /// Number of keyframes (at least one).
    pub fn len(&self) -> usize {
        self.span.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Earliest keyframe.
    pub fn first(&self) -> &Keyframe<T> {
        &self.keys[self.span.start]
    }

    /// Latest keyframe.
    pub fn last(&self) -> &Keyframe<T> {
        &self.keys[self.span.end - 1]
    }

    /// `[first.time, last.time)`.
    pub fn time_range(&self) -> TimeRange {
        TimeRange {
            start: self.first().time,
            end: self.last().time,
        }
    }

    /// True when both signals view the same keyframes of the same allocation.
    pub fn shares_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.keys, &other.keys) && self.span == other.span
    }

    /// Index of the keyframe governing `t`: the last keyframe with `time <= t`,
    /// clamped to `[0, len - 1]`.
    ///
    /// When several keyframes share a time, lookups at that time land on the last
    /// of them.
    pub fn find_index(&self, t: Time) -> usize {
        let keys = self.keyframes();
        keys.partition_point(|k| k.time <= t)
            .saturating_sub(1)
            .min(keys.len() - 1)
    }

    /// Keyframes with `time` in `range`, located by two binary searches.
    pub fn get_keyframes(&self, range: TimeRange) -> std::slice::Iter<'_, Keyframe<T>> {
        let keys = self.keyframes();
        let lo = keys.partition_point(|k| k.time < range.start);
        let hi = keys.partition_point(|k| k.time < range.end).max(lo);
        keys[lo..hi].iter()
    }

    /// Each consecutive keyframe interval intersected with `range`, in order.
    pub fn paint_hints(&self, range: TimeRange) -> impl Iterator<Item = TimeRange> + '_ {
        let keys = self.keyframes();
        let from = if range.is_empty() {
            keys.len()
        } else {
            self.find_index(range.start)
        };
        keys[from.min(keys.len())..]
            .windows(2)
            .take_while(move |w| w[0].time < range.end)
            .filter_map(move |w| {
                TimeRange {
                    start: w[0].time,
                    end: w[1].time,
                }
                .intersect(range)
            })
    }

    /// Equivalent signal over `[start, end]`, sharing storage with `self`.
    ///
    /// `None` leaves that side unbounded. The window is widened by one keyframe at a
    /// boundary whose segment is cubic, since cubic evaluation reads one neighbour
    /// further out. Returns an unchanged clone when nothing can be dropped.
    #[tracing::instrument(level = "trace", skip(self), fields(len = self.len()))]
    pub fn reduce(&self, start: Option<Time>, end: Option<Time>) -> Self {
        let keys = self.keyframes();
        let last = keys.len() - 1;

        let mut lo = start.map_or(0, |t| self.find_index(t));
        if keys[lo].time == keys[0].time {
            lo = 0;
        }
        if lo > 0 && lo < last && segment_is_cubic(keys, lo) {
            lo -= 1;
        }
        // A view must not open on a tie: its leading value would pick the wrong keyframe.
        while lo > 0 && lo < last && keys[lo].time == keys[lo + 1].time {
            lo -= 1;
        }

        let mut hi = end.map_or(last, |t| (self.find_index(t) + 1).min(last));
        hi = hi.max(lo);

        if hi < last && hi > 0 && segment_is_cubic(keys, hi - 1) {
            hi += 1;
        }

        if lo == 0 && hi == last {
            return self.clone();
        }
        Self {
            keys: Arc::clone(&self.keys),
            span: (self.span.start + lo)..(self.span.start + hi + 1),
        }
    }

    /// Retime every keyframe through `transform`; values are untouched.
    ///
    /// Returns `None` for time-reversing transforms: segment kinds are read from the
    /// left keyframe, so a mirrored curve has no keyframe form. Reverse through
    /// [`PropertySignal::transform`](crate::PropertySignal::transform) instead.
    pub fn transform(&self, transform: &TimeTransform) -> Option<Self>
    where
        T: Clone,
    {
        if transform.scale.is_negative() {
            return None;
        }
        let retimed = self
            .keyframes()
            .iter()
            .map(|k| Keyframe {
                time: transform.apply(k.time),
                ..k.clone()
            })
            .collect();
        Some(Self::from_validated(retimed))
    }
}

fn segment_is_cubic<T>(keys: &[Keyframe<T>], i: usize) -> bool {
    keys[i].interpolation == Interpolation::Cubic
        || keys
            .get(i + 1)
            .is_some_and(|k| k.interpolation == Interpolation::Cubic)
}

impl<T: PropertyValue> KeyframeSignal<T> {
    /// Value at `t`. Total: before the first keyframe and after the last one the
    /// signal holds the boundary value.
    pub fn get_value(&self, t: Time) -> T {
        let keys = self.keyframes();
        let first = self.first();
        if t <= first.time {
            return first.value.clone();
        }
        let last = self.last();
        if t >= last.time {
            return last.value.clone();
        }

        let i = self.find_index(t);
        let (a, b) = (&keys[i], &keys[i + 1]);

        let Some(lerp) = T::interpolator() else {
            return a.value.clone();
        };
        if a.interpolation == Interpolation::Step {
            return a.value.clone();
        }

        let fraction = TimeRange {
            start: a.time,
            end: b.time,
        }
        .fraction(t)
        .clamp(0.0, 1.0);

        let cubic = a.interpolation == Interpolation::Cubic
            || b.interpolation == Interpolation::Cubic;
        if cubic && let Some(tr) = T::transformer() {
            return cubic_segment(keys, i, fraction, lerp, tr);
        }

        match Ease::for_segment(a.interpolation, b.interpolation) {
            Some(ease) => lerp.interpolate(&a.value, &b.value, ease.apply(fraction)),
            None => a.value.clone(),
        }
    }
}

/// `span / neighbour`, or 1 when there is no neighbouring segment.
fn segment_ratio(span: f64, neighbour: Time) -> f64 {
    if neighbour.0 > 0 {
        span / (neighbour.0 as f64)
    } else {
        1.0
    }
}

/// Share of the neighbouring slope in a blended tangent.
fn tangent_weight(dt: f64) -> f64 {
    dt / (dt + 1.0 / dt)
}

/// De Casteljau evaluation of segment `i` with tangents estimated from its neighbours.
///
/// Tangent magnitudes are corrected for non-uniform keyframe spacing by the ratio of
/// the segment's duration to each neighbouring segment, split evenly (square root)
/// between the two curves meeting at a keyframe. The `/ 3` places Bézier control
/// points so tangents aligned with the endpoints give constant velocity. Sides whose
/// keyframe is `Linear` or flatter keep their control point on the endpoint.
fn cubic_segment<T: PropertyValue>(
    keys: &[Keyframe<T>],
    i: usize,
    fraction: f64,
    lerp: &dyn Interpolator<T>,
    tr: &dyn Transformer<T>,
) -> T {
    let last = keys.len() - 1;
    let p0 = &keys[i];
    let p1 = &keys[i + 1];
    let prev = &keys[i.saturating_sub(1)];
    let next = &keys[(i + 2).min(last)];

    let span = (p1.time - p0.time).0 as f64;
    let dt_prev = segment_ratio(span, p0.time - prev.time);
    let dt_next = segment_ratio(span, next.time - p1.time);

    let dx_prev = tr.difference(&prev.value, &p0.value);
    let dx_curr = tr.difference(&p0.value, &p1.value);
    let dx_next = tr.difference(&p1.value, &next.value);

    let out_tangent = lerp.interpolate(&dx_curr, &dx_prev, tangent_weight(dt_prev));
    let in_tangent = lerp.interpolate(&dx_curr, &dx_next, tangent_weight(dt_next));

    let zero = tr.identity();
    let out_tangent = lerp.interpolate(&zero, &out_tangent, dt_prev.sqrt() / 3.0);
    let in_tangent = lerp.interpolate(&zero, &in_tangent, dt_next.sqrt() / 3.0);

    let c0 = if p0.interpolation > Interpolation::Linear {
        tr.apply(&p0.value, &out_tangent)
    } else {
        p0.value.clone()
    };
    let c1 = if p1.interpolation > Interpolation::Linear {
        tr.apply(&p1.value, &tr.invert(&in_tangent))
    } else {
        p1.value.clone()
    };

    let q0 = lerp.interpolate(&p0.value, &c0, fraction);
    let q1 = lerp.interpolate(&c0, &c1, fraction);
    let q2 = lerp.interpolate(&c1, &p1.value, fraction);
    let r0 = lerp.interpolate(&q0, &q1, fraction);
    let r1 = lerp.interpolate(&q1, &q2, fraction);
    lerp.interpolate(&r0, &r1, fraction)
}

impl<T: Clone> From<KeyframeSignal<T>> for Vec<Keyframe<T>> {
    fn from(signal: KeyframeSignal<T>) -> Self {
        signal.keyframes().to_vec()
    }
}

impl<T> TryFrom<Vec<Keyframe<T>>> for KeyframeSignal<T> {
    type Error = SignalError;

    fn try_from(keys: Vec<Keyframe<T>>) -> SignalResult<Self> {
        Self::new(keys)
    }
}

impl<T: serde::Serialize> serde::Serialize for KeyframeSignal<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.keyframes())
    }
}

impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for KeyframeSignal<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let keys = Vec::<Keyframe<T>>::deserialize(deserializer)?;
        Self::new(keys).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
