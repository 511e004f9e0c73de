/// Result alias used across the crate.
pub type SignalResult<T> = Result<T, SignalError>;

/// Error type for signal construction, editing and batch evaluation.
///
/// Point evaluation (`get_value`) never fails; errors only surface at the
/// boundaries where callers hand in data or options.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// Invalid ranges, transforms or options.
    #[error("validation error: {0}")]
    Validation(String),

    /// Empty or time-unordered keyframe input.
    #[error("keyframe error: {0}")]
    Keyframes(String),

    /// Additive composition requested for a value type without a transformer.
    #[error("not additive: `{0}` has no transformer")]
    NotAdditive(&'static str),

    /// Batch evaluation could not run.
    #[error("evaluation error: {0}")]
    Evaluation(String),
}

impl SignalError {
    /// Build a [`SignalError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SignalError::Keyframes`].
    pub fn keyframes(msg: impl Into<String>) -> Self {
        Self::Keyframes(msg.into())
    }

    /// Build a [`SignalError::NotAdditive`] naming `T`.
    pub fn not_additive<T: ?Sized>() -> Self {
        Self::NotAdditive(std::any::type_name::<T>())
    }

    /// Build a [`SignalError::Evaluation`].
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
