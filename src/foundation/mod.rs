/// Time, ranges and shared value types.
pub mod core;
/// Error type and result alias.
pub mod error;
pub(crate) mod math;
/// Lazy range-sequence algebra.
pub mod ranges;
