use rayon::prelude::*;

use crate::{
    animation::{signal::PropertySignal, traits::PropertyValue},
    foundation::{
        core::{Time, TimeRange},
        error::{SignalError, SignalResult},
    },
};

/// Upper bound on the number of samples one [`PropertySignal::bake`] call produces.
pub const MAX_BAKE_SAMPLES: usize = 1 << 24;

/// Sampling configuration for [`PropertySignal::bake`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BakeOpts {
    /// Distance between samples; must be positive.
    pub stride: Time,
    /// Sample on a dedicated rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Worker count for the parallel path; `None` lets rayon decide.
    pub threads: Option<usize>,
    /// Minimum number of samples handed to one worker at a time.
    pub chunk_size: usize,
}

impl Default for BakeOpts {
    fn default() -> Self {
        Self {
            stride: Time(1),
            parallel: false,
            threads: None,
            chunk_size: 256,
        }
    }
}

impl<T: PropertyValue> PropertySignal<T> {
    /// Sample `range` every `opts.stride` ticks, in time order.
    ///
    /// The first sample is at `range.start`; the last is the final stride step before
    /// `range.end`. Requests for more than [`MAX_BAKE_SAMPLES`] samples are rejected.
    #[tracing::instrument(level = "debug", skip(self, opts), fields(parallel = opts.parallel))]
    pub fn bake(&self, range: TimeRange, opts: &BakeOpts) -> SignalResult<Vec<(Time, T)>> {
        if opts.stride.0 <= 0 {
            return Err(SignalError::validation("bake stride must be > 0"));
        }
        if range.is_empty() {
            return Err(SignalError::validation("bake range must be non-empty"));
        }

        let times = sample_times(range, opts.stride)?;
        tracing::trace!(samples = times.len(), "baking");

        if !opts.parallel {
            return Ok(times.into_iter().map(|t| (t, self.get_value(t))).collect());
        }

        let pool = build_thread_pool(opts.threads)?;
        let chunk_size = normalized_chunk_size(opts.chunk_size);
        Ok(pool.install(|| {
            times
                .par_iter()
                .with_min_len(chunk_size)
                .map(|&t| (t, self.get_value(t)))
                .collect()
        }))
    }
}

fn sample_times(range: TimeRange, stride: Time) -> SignalResult<Vec<Time>> {
    let span = i128::from(range.end.0) - i128::from(range.start.0);
    let stride = i128::from(stride.0);
    let count = (span + stride - 1) / stride;
    if count > MAX_BAKE_SAMPLES as i128 {
        return Err(SignalError::validation(format!(
            "bake would take {count} samples, more than {MAX_BAKE_SAMPLES}"
        )));
    }
    Ok((0..count)
        .map(|i| Time((i128::from(range.start.0) + i * stride) as i64))
        .collect())
}

fn build_thread_pool(threads: Option<usize>) -> SignalResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SignalError::validation(
            "bake 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SignalError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> usize {
    chunk_size.max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/bake.rs"]
mod tests;
