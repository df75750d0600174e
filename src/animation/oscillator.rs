use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

/// `amplitude * sin(time * frequency + phase)`.
///
/// `frequency` is in radians per second. Time is taken as `f64` seconds and
/// the phase is reduced in double precision, so long-lived hosts do not see
/// the wave quantize as the clock grows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    pub frequency: f32,
    pub amplitude: f32,
    #[serde(default)]
    pub phase: f32,
}

impl Oscillator {
    #[must_use]
    pub const fn sine(frequency: f32, amplitude: f32) -> Self {
        Self {
            frequency,
            amplitude,
            phase: 0.0,
        }
    }

    #[must_use]
    pub const fn cosine(frequency: f32, amplitude: f32) -> Self {
        Self {
            frequency,
            amplitude,
            phase: FRAC_PI_2,
        }
    }

    #[must_use]
    pub const fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    #[inline]
    #[must_use]
    pub fn sample(&self, time: f64) -> f32 {
        self.sample_shifted(time, 0.0)
    }

    /// Samples with `shift` radians added to the phase.
    #[inline]
    #[must_use]
    pub fn sample_shifted(&self, time: f64, shift: f32) -> f32 {
        let angle = (time * f64::from(self.frequency)).rem_euclid(std::f64::consts::TAU);
        self.amplitude * (angle as f32 + self.phase + shift).sin()
    }
}

/// One oscillator per rotation axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisOscillators {
    pub x: Oscillator,
    pub y: Oscillator,
    pub z: Oscillator,
}

impl AxisOscillators {
    /// All three axes at rest.
    pub const STILL: Self = Self {
        x: Oscillator::sine(0.0, 0.0),
        y: Oscillator::sine(0.0, 0.0),
        z: Oscillator::sine(0.0, 0.0),
    };

    #[must_use]
    pub fn sample(&self, time: f64) -> Vec3 {
        Vec3::new(self.x.sample(time), self.y.sample(time), self.z.sample(time))
    }
}
