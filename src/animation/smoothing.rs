use serde::{Deserialize, Serialize};

/// How a smoothed value chases its target each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Smoothing {
    /// Frame-rate independent exponential decay; `rate` is in 1/s.
    Exponential { rate: f32 },
    /// Fixed lerp factor applied once per tick regardless of `dt`.
    /// Motion speed then scales with the host's frame rate.
    PerFrame { factor: f32 },
}

impl Smoothing {
    /// Converts a per-frame lerp factor tuned at `reference_fps` into the
    /// equivalent decay rate.
    #[must_use]
    pub fn from_frame_factor(factor: f32, reference_fps: f32) -> Self {
        let factor = factor.clamp(0.0, 0.999_999);
        Smoothing::Exponential {
            rate: -(1.0 - factor).ln() * reference_fps,
        }
    }

    /// Lerp weight toward the target for a tick of length `dt`, in [0, 1].
    #[must_use]
    pub fn blend(&self, dt: f32) -> f32 {
        match *self {
            Smoothing::Exponential { rate } => {
                if dt <= 0.0 || !dt.is_finite() || rate <= 0.0 {
                    0.0
                } else {
                    1.0 - (-rate * dt).exp()
                }
            }
            Smoothing::PerFrame { factor } => factor.clamp(0.0, 1.0),
        }
    }
}

impl Default for Smoothing {
    fn default() -> Self {
        Smoothing::from_frame_factor(0.17, 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_factor_matches_at_reference_rate() {
        let s = Smoothing::from_frame_factor(0.17, 60.0);
        assert!((s.blend(1.0 / 60.0) - 0.17).abs() < 1e-5);
    }

    #[test]
    fn test_two_half_steps_equal_one_full_step() {
        let s = Smoothing::Exponential { rate: 8.0 };
        let half = s.blend(1.0 / 120.0);
        let remaining_after_two = (1.0 - half) * (1.0 - half);
        let remaining_after_one = 1.0 - s.blend(1.0 / 60.0);
        assert!((remaining_after_two - remaining_after_one).abs() < 1e-6);
    }

    #[test]
    fn test_zero_dt_does_not_move() {
        let s = Smoothing::Exponential { rate: 8.0 };
        assert_eq!(s.blend(0.0), 0.0);
    }
}
