//! Timeline builders for nesting and looping clips.

use crate::{
    animation::{signal::PropertySignal, traits::PropertyValue},
    foundation::{
        core::{Time, TimeRange},
        error::{SignalError, SignalResult},
    },
    transform::time::{TimeScale, TimeTransform},
};

/// `inner` starting `by` ticks later.
pub fn delay<T: PropertyValue>(inner: &PropertySignal<T>, by: Time) -> PropertySignal<T> {
    inner.transform(&TimeTransform::offset(by))
}

/// `inner` played `factor` times as fast. A negative factor also reverses it.
pub fn speed<T: PropertyValue>(inner: &PropertySignal<T>, factor: TimeScale) -> PropertySignal<T> {
    inner.transform(&TimeTransform::scaled(factor.recip()))
}

/// `inner` mirrored within `span`, so `span.start` shows what `span.end` showed.
pub fn reverse<T: PropertyValue>(
    inner: &PropertySignal<T>,
    span: TimeRange,
) -> SignalResult<PropertySignal<T>> {
    if span.is_empty() {
        return Err(SignalError::validation("reverse span must be non-empty"));
    }
    let mirror = TimeTransform::new(span.start + span.end, TimeScale::NEG_ONE);
    Ok(inner.transform(&mirror))
}

/// `period` of `inner` repeated forever in both directions.
pub fn loop_<T: PropertyValue>(
    inner: &PropertySignal<T>,
    period: TimeRange,
) -> SignalResult<PropertySignal<T>> {
    if period.is_empty() {
        return Err(SignalError::validation("loop period must be non-empty"));
    }
    Ok(PropertySignal::repeat(
        inner.reduce(Some(period.start), Some(period.end)),
        period,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ops.rs"]
mod tests;
