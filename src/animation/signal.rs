use std::{iter::Peekable, ops::Add, sync::Arc};

use crate::{
    animation::{
        keyframe::Keyframe,
        keyframes::{KeyframeSignal, validate_order},
        traits::PropertyValue,
    },
    foundation::{
        core::{Time, TimeRange},
        error::{SignalError, SignalResult},
        ranges::{repeat_tiles, union_ranges},
    },
    transform::time::TimeTransform,
};

/// A `T`-valued function of time.
///
/// Signals are immutable: every operation returns a new signal and children are
/// shared through `Arc`, so an edited signal still points at the untouched original.
/// All reads are pure, which makes a signal safe to evaluate from many threads.
#[derive(Clone, Debug)]
pub enum PropertySignal<T> {
    /// Same value at every time.
    Constant(T),
    /// Evaluated from keyframes.
    Keyframes(KeyframeSignal<T>),
    /// `delta` layered on `base` through the value type's transformer.
    Sum {
        /// Lower layer.
        base: Arc<PropertySignal<T>>,
        /// Layer applied on top of `base`.
        delta: Arc<PropertySignal<T>>,
    },
    /// `inner` looped over `period`.
    Repeat {
        /// Looped signal.
        inner: Arc<PropertySignal<T>>,
        /// One repetition, in `inner`'s time.
        period: TimeRange,
    },
    /// `inner` played through `transform`: the value at `t` is `inner`'s value at
    /// `transform.unapply(t)`. Time-reversing transforms land here.
    Retimed {
        /// Source signal.
        inner: Arc<PropertySignal<T>>,
        /// Maps `inner`'s time onto this signal's time.
        transform: TimeTransform,
    },
}

impl<T> From<KeyframeSignal<T>> for PropertySignal<T> {
    fn from(signal: KeyframeSignal<T>) -> Self {
        Self::Keyframes(signal)
    }
}

impl<T: PropertyValue> PropertySignal<T> {
    /// Signal that always returns `value`.
    pub fn constant(value: T) -> Self {
        Self::Constant(value)
    }

    /// Keyframe-backed signal; see [`KeyframeSignal::new`] for validation.
    pub fn from_keyframes(keys: Vec<Keyframe<T>>) -> SignalResult<Self> {
        KeyframeSignal::new(keys).map(Self::Keyframes)
    }

    /// Layer `delta` on top of `base`. Fails when `T` has no transformer.
    pub fn sum(base: Self, delta: Self) -> SignalResult<Self> {
        if T::transformer().is_none() {
            return Err(SignalError::not_additive::<T>());
        }
        Ok(Self::Sum {
            base: Arc::new(base),
            delta: Arc::new(delta),
        })
    }

    /// Loop `inner` over `period`.
    pub fn repeat(inner: Self, period: TimeRange) -> Self {
        Self::Repeat {
            inner: Arc::new(inner),
            period,
        }
    }

    /// Value at `t`. Never fails.
    pub fn get_value(&self, t: Time) -> T {
        match self {
            Self::Constant(value) => value.clone(),
            Self::Keyframes(kf) => kf.get_value(t),
            Self::Sum { base, delta } => match T::transformer() {
                Some(tr) => tr.apply(&base.get_value(t), &delta.get_value(t)),
                // `sum` refuses to build this; the override wins if one slips through.
                None => delta.get_value(t),
            },
            Self::Repeat { inner, period } => inner.get_value(wrap_into(*period, t)),
            Self::Retimed { inner, transform } => inner.get_value(transform.unapply(t)),
        }
    }

    fn leading_value(&self) -> T {
        match self {
            Self::Constant(value) => value.clone(),
            Self::Keyframes(kf) => kf.first().value.clone(),
            Self::Sum { .. } | Self::Retimed { .. } => self.get_value(Time::MIN),
            Self::Repeat { inner, period } => inner.get_value(period.start),
        }
    }

    /// Apply an edit: a new time-ordered keyframe list for this property.
    ///
    /// With a transformer the edit is additive. Each keyframe is rewritten as the
    /// difference between this signal's value at its time and the requested value, and
    /// that delta layer is stacked on `self`; `self` is shared, never modified. Without
    /// a transformer the keyframes replace the signal. An empty edit collapses to a
    /// constant: the transformer identity, or this signal's leading value.
    #[tracing::instrument(level = "debug", skip(self, keys), fields(keys = keys.len()))]
    pub fn with_keyframes(&self, keys: Vec<Keyframe<T>>) -> SignalResult<Self> {
        validate_order(&keys)?;

        let Some(tr) = T::transformer() else {
            if keys.is_empty() {
                tracing::debug!("empty edit without transformer, holding leading value");
                return Ok(Self::Constant(self.leading_value()));
            }
            tracing::debug!("no transformer, edit replaces the signal");
            return Ok(Self::Keyframes(KeyframeSignal::from_validated(keys)));
        };

        if keys.is_empty() {
            tracing::debug!("empty edit, collapsing to identity");
            return Ok(Self::Constant(tr.identity()));
        }

        let deltas: Vec<Keyframe<T>> = keys
            .iter()
            .map(|k| k.with_value(tr.difference(&self.get_value(k.time), &k.value)))
            .collect();
        Ok(Self::Sum {
            base: Arc::new(self.clone()),
            delta: Arc::new(Self::Keyframes(KeyframeSignal::from_validated(deltas))),
        })
    }

    /// Equivalent signal that only keeps what evaluation over `[start, end]` needs.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn reduce(&self, start: Option<Time>, end: Option<Time>) -> Self {
        match self {
            Self::Constant(_) => self.clone(),
            Self::Keyframes(kf) => Self::Keyframes(kf.reduce(start, end)),
            Self::Sum { base, delta } => Self::Sum {
                base: Arc::new(base.reduce(start, end)),
                delta: Arc::new(delta.reduce(start, end)),
            },
            Self::Repeat { inner, period } => Self::Repeat {
                inner: Arc::new(inner.reduce(Some(period.start), Some(period.end))),
                period: *period,
            },
            Self::Retimed { inner, transform } => {
                let from = start.map(|t| transform.unapply(t));
                let to = end.map(|t| transform.unapply(t));
                let (from, to) = if transform.scale.is_negative() {
                    (to, from)
                } else {
                    (from, to)
                };
                Self::Retimed {
                    inner: Arc::new(inner.reduce(from, to)),
                    transform: *transform,
                }
            }
        }
    }

    /// Retime the whole signal through `transform`; values are untouched.
    ///
    /// Forward transforms are pushed down to the keyframes. Time-reversing transforms,
    /// and anything applied on top of them, wrap the signal in [`Self::Retimed`].
    pub fn transform(&self, transform: &TimeTransform) -> Self {
        let retimed = || Self::Retimed {
            inner: Arc::new(self.clone()),
            transform: *transform,
        };
        if transform.scale.is_negative() {
            return match self {
                Self::Constant(_) => self.clone(),
                _ => retimed(),
            };
        }
        match self {
            Self::Constant(_) => self.clone(),
            Self::Keyframes(kf) => kf.transform(transform).map_or_else(retimed, Self::Keyframes),
            Self::Sum { base, delta } => Self::Sum {
                base: Arc::new(base.transform(transform)),
                delta: Arc::new(delta.transform(transform)),
            },
            Self::Repeat { inner, period } => Self::Repeat {
                inner: Arc::new(inner.transform(transform)),
                period: transform.apply_range(*period),
            },
            Self::Retimed { .. } => retimed(),
        }
    }

    /// Keyframes with time in `range`, in time order, valued on this signal.
    ///
    /// Layered signals report the keyframes of every layer; repeated signals report
    /// the inner keyframes of each repetition.
    pub fn get_keyframes(&self, range: TimeRange) -> Box<dyn Iterator<Item = Keyframe<T>> + '_> {
        match self {
            Self::Constant(_) => Box::new(std::iter::empty()),
            Self::Keyframes(kf) => Box::new(kf.get_keyframes(range).cloned()),
            Self::Sum { base, delta } => Box::new(
                MergeByTime {
                    a: base.get_keyframes(range).peekable(),
                    b: delta.get_keyframes(range).peekable(),
                }
                .map(move |k| k.with_value(self.get_value(k.time))),
            ),
            Self::Repeat { inner, period } => {
                Box::new(repeat_tiles(*period, range).flat_map(move |(tile, shift)| {
                    inner
                        .get_keyframes(tile.shift(-shift.offset))
                        .map(move |k| Keyframe {
                            time: shift.apply(k.time),
                            ..k
                        })
                }))
            }
            Self::Retimed { inner, transform } => {
                let mut keys: Vec<_> = inner
                    .get_keyframes(source_window(transform, range))
                    .map(|k| Keyframe {
                        time: transform.apply(k.time),
                        ..k
                    })
                    .filter(|k| range.contains(k.time))
                    .collect();
                if transform.scale.is_negative() {
                    keys.reverse();
                }
                Box::new(keys.into_iter())
            }
        }
    }

    /// Sub-ranges of `range` whose rendering depends on interpolation, ascending and
    /// non-overlapping.
    pub fn paint_hints(&self, range: TimeRange) -> Box<dyn Iterator<Item = TimeRange> + '_> {
        match self {
            Self::Constant(_) => Box::new(std::iter::empty()),
            Self::Keyframes(kf) => Box::new(kf.paint_hints(range)),
            Self::Sum { base, delta } => Box::new(union_ranges(
                base.paint_hints(range),
                delta.paint_hints(range),
            )),
            Self::Repeat { inner, period } => {
                Box::new(repeat_tiles(*period, range).flat_map(move |(tile, shift)| {
                    inner
                        .paint_hints(tile.shift(-shift.offset))
                        .map(move |hint| shift.apply_range(hint))
                }))
            }
            Self::Retimed { inner, transform } => {
                let mut hints: Vec<_> = inner
                    .paint_hints(source_window(transform, range))
                    .filter_map(|hint| transform.apply_ticks(hint).intersect(range))
                    .collect();
                if transform.scale.is_negative() {
                    hints.reverse();
                }
                // Mapped neighbours can share an edge tick.
                Box::new(union_ranges(hints, std::iter::empty::<TimeRange>()))
            }
        }
    }
}

impl<T: PropertyValue> Add for PropertySignal<T> {
    type Output = SignalResult<Self>;

    fn add(self, rhs: Self) -> Self::Output {
        Self::sum(self, rhs)
    }
}

/// Map `t` into `[period.start, period.end)`; degenerate periods pin to the start.
fn wrap_into(period: TimeRange, t: Time) -> Time {
    let duration = period.duration().0;
    if duration <= 0 {
        return period.start;
    }
    period.start + Time((t - period.start).0.rem_euclid(duration))
}

/// Source-time range holding every tick that `transform` maps into `range`, padded
/// by a tick on each side for rounding.
fn source_window(transform: &TimeTransform, range: TimeRange) -> TimeRange {
    if range.is_empty() {
        return TimeRange {
            start: range.start,
            end: range.start,
        };
    }
    let span = TimeRange::spanning(
        transform.unapply(range.start),
        transform.unapply(range.end - Time(1)),
    );
    TimeRange {
        start: span.start - Time(1),
        end: span.end + Time(2),
    }
}

struct MergeByTime<A: Iterator, B: Iterator> {
    a: Peekable<A>,
    b: Peekable<B>,
}

impl<T, A, B> Iterator for MergeByTime<A, B>
where
    A: Iterator<Item = Keyframe<T>>,
    B: Iterator<Item = Keyframe<T>>,
{
    type Item = Keyframe<T>;

    fn next(&mut self) -> Option<Keyframe<T>> {
        let take_a = match (self.a.peek(), self.b.peek()) {
            (Some(x), Some(y)) => x.time <= y.time,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if take_a { self.a.next() } else { self.b.next() }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/signal.rs"]
mod tests;
