use crate::animation::keyframe::Interpolation;

/// Easing curve applied to a segment fraction before blending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Identity.
    Linear,
    /// Slow start.
    InQuad,
    /// Slow finish.
    OutQuad,
    /// Slow start and finish.
    InOutQuad,
}

impl Ease {
    /// Map `t` (clamped to `[0, 1]`) through the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
        }
    }

    /// Easing for a non-cubic segment from a `left` keyframe to a `right` one.
    ///
    /// `None` means hold: a stepped left keyframe keeps its value until the right
    /// keyframe's time. A side eases when its keyframe is smoother than linear;
    /// `Cubic` counts as quadratic here.
    pub fn for_segment(left: Interpolation, right: Interpolation) -> Option<Self> {
        if left == Interpolation::Step {
            return None;
        }
        let ease_out_of_left = left > Interpolation::Linear;
        let ease_into_right = right > Interpolation::Linear;
        Some(match (ease_out_of_left, ease_into_right) {
            (false, false) => Self::Linear,
            (true, false) => Self::InQuad,
            (false, true) => Self::OutQuad,
            (true, true) => Self::InOutQuad,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
