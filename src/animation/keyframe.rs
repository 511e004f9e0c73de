use crate::foundation::core::Time;

/// How a keyframe shapes the curve on its side of a segment.
///
/// Kinds are ordered by smoothness; the evaluator compares them against
/// [`Interpolation::Linear`] to decide whether a side is flat or eased.
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
pub enum Interpolation {
    /// Hold the value until the next keyframe.
    Step,
    /// Straight line.
    #[default]
    Linear,
    /// Quadratic ease on this side.
    Quadratic,
    /// Smooth cubic through the neighbouring keyframes.
    Cubic,
}

/// One authored control point.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    /// When the value is reached.
    pub time: Time,
    /// Value at `time`.
    pub value: T,
    /// Curve shape on this keyframe's side of its segments.
    #[serde(default)]
    pub interpolation: Interpolation,
}

impl<T> Keyframe<T> {
    /// Build a keyframe.
    pub fn new(time: Time, value: T, interpolation: Interpolation) -> Self {
        Self {
            time,
            value,
            interpolation,
        }
    }

    /// [`Interpolation::Step`] keyframe.
    pub fn step(time: Time, value: T) -> Self {
        Self::new(time, value, Interpolation::Step)
    }

    /// [`Interpolation::Linear`] keyframe.
    pub fn linear(time: Time, value: T) -> Self {
        Self::new(time, value, Interpolation::Linear)
    }

    /// [`Interpolation::Quadratic`] keyframe.
    pub fn quadratic(time: Time, value: T) -> Self {
        Self::new(time, value, Interpolation::Quadratic)
    }

    /// [`Interpolation::Cubic`] keyframe.
    pub fn cubic(time: Time, value: T) -> Self {
        Self::new(time, value, Interpolation::Cubic)
    }

    /// Same time and interpolation, new value.
    pub fn with_value<U>(&self, value: U) -> Keyframe<U> {
        Keyframe {
            time: self.time,
            value,
            interpolation: self.interpolation,
        }
    }
}
