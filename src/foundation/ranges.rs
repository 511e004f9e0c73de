//! Set algebra over ascending sequences of [`TimeRange`]s.

use std::iter::Peekable;

use crate::{
    foundation::core::{Time, TimeRange},
    transform::time::TimeTransform,
};

/// Merge two ascending range sequences into one ascending, non-overlapping sequence.
///
/// Two-pointer sweep: the accumulator starts at whichever head begins first and keeps
/// absorbing heads from either side while they intersect it. Ranges that merely touch
/// stay separate (see [`TimeRange::intersect`]); empty input ranges are dropped.
///
/// Each input must be ascending and non-overlapping within itself.
pub fn union_ranges<A, B>(a: A, b: B) -> UnionRanges<A::IntoIter, B::IntoIter>
where
    A: IntoIterator<Item = TimeRange>,
    B: IntoIterator<Item = TimeRange>,
{
    UnionRanges {
        a: a.into_iter().peekable(),
        b: b.into_iter().peekable(),
    }
}

/// Iterator returned by [`union_ranges`].
pub struct UnionRanges<A: Iterator, B: Iterator> {
    a: Peekable<A>,
    b: Peekable<B>,
}

fn skip_empty<I: Iterator<Item = TimeRange>>(it: &mut Peekable<I>) {
    while it.next_if(|r| r.is_empty()).is_some() {}
}

impl<A, B> Iterator for UnionRanges<A, B>
where
    A: Iterator<Item = TimeRange>,
    B: Iterator<Item = TimeRange>,
{
    type Item = TimeRange;

    fn next(&mut self) -> Option<TimeRange> {
        skip_empty(&mut self.a);
        skip_empty(&mut self.b);

        let take_a = match (self.a.peek(), self.b.peek()) {
            (Some(x), Some(y)) => x.start <= y.start,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => return None,
        };
        let mut acc = if take_a { self.a.next() } else { self.b.next() }?;

        loop {
            skip_empty(&mut self.a);
            skip_empty(&mut self.b);
            if let Some(head) = self.a.next_if(|h| acc.intersect(*h).is_some()) {
                acc = acc.union(head);
                continue;
            }
            if let Some(head) = self.b.next_if(|h| acc.intersect(*h).is_some()) {
                acc = acc.union(head);
                continue;
            }
            return Some(acc);
        }
    }
}

/// Tile `outer` with repetitions of `period`.
///
/// Yields, for each repetition index `k` whose copy of `period` overlaps `outer`, the
/// overlap together with the offset transform (`k * duration`) that maps the first
/// repetition onto it. A period without positive duration yields nothing.
pub fn repeat_tiles(period: TimeRange, outer: TimeRange) -> RepeatTiles {
    let duration = period.duration().0;
    if duration <= 0 || outer.is_empty() {
        return RepeatTiles {
            period,
            outer,
            duration: 0,
            next: 1,
            last: 0,
        };
    }

    let first = (outer.start - period.start).0.div_euclid(duration);
    let last = (outer.end - period.start).0.div_euclid(duration);
    RepeatTiles {
        period,
        outer,
        duration,
        next: first,
        last,
    }
}

/// Iterator returned by [`repeat_tiles`].
#[derive(Clone, Debug)]
pub struct RepeatTiles {
    period: TimeRange,
    outer: TimeRange,
    duration: i64,
    next: i64,
    last: i64,
}

impl Iterator for RepeatTiles {
    type Item = (TimeRange, TimeTransform);

    fn next(&mut self) -> Option<Self::Item> {
        while self.next <= self.last {
            let k = self.next;
            self.next = k.checked_add(1)?;
            let shift = Time(k.checked_mul(self.duration)?);
            if let Some(tile) = self.period.shift(shift).intersect(self.outer) {
                return Some((tile, TimeTransform::offset(shift)));
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/ranges.rs"]
mod tests;
