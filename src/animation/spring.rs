//! Damped-spring secondary motion for a single bone.
//!
//! A [`SpringBone`] keeps an angular offset from its bone's rest pose and
//! integrates it with semi-implicit (symplectic) Euler:
//!
//! ```text
//! velocity += (drive * stiffness - offset * return_force - velocity * damping) * h
//! offset   += velocity * h
//! bone.rotation = base_rotation + offset
//! ```
//!
//! `h` is the step length measured in 60 Hz frames and `drive` is the
//! driving rotation change per such frame, so at 60 fps a single step applies
//! the full driving delta. Coefficients live in (0, 1]; long steps are split
//! into sub-steps of at most one reference frame, which keeps the integrator
//! inside its stability region for every coefficient in that range.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, WraithError};
use crate::scene::{BoneHandle, Skeleton};

/// Reference frame rate the unit-range coefficients are tuned at.
pub const REFERENCE_FPS: f32 = 60.0;

/// Longest step the integrator accepts; longer frames (tab switches,
/// hitches) are clamped to this.
pub const MAX_STEP: f32 = 1.0 / 20.0;

const MAX_SUBSTEP: f32 = 1.0 / REFERENCE_FPS;

/// Smallest coefficient [`SpringParams::sanitized`] clamps to.
const MIN_COEFFICIENT: f32 = 1e-3;

/// Spring coefficients, each in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    /// Gain applied to the driving rotation change.
    pub stiffness: f32,
    /// Fraction of velocity removed per reference frame.
    pub damping: f32,
    /// Pull back toward the rest pose.
    pub return_force: f32,
}

impl SpringParams {
    pub fn new(stiffness: f32, damping: f32, return_force: f32) -> Result<Self> {
        let params = Self {
            stiffness,
            damping,
            return_force,
        };
        params.validate()?;
        Ok(params)
    }

    /// Maps the single "velocity" knob of the tuning panel onto
    /// the three coefficients.
    pub fn from_velocity(velocity: f32) -> Result<Self> {
        Self::new(velocity, 0.15, velocity * 0.5)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("stiffness", self.stiffness),
            ("damping", self.damping),
            ("return_force", self.return_force),
        ] {
            if value.is_nan() || value <= 0.0 || value > 1.0 {
                return Err(WraithError::InvalidSpring { name, value });
            }
        }
        Ok(())
    }

    /// Clamps every coefficient into (0, 1]; NaN falls back to the default
    /// coefficient. Valid params come back unchanged.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let fallback = Self::default();
        let clamp = |value: f32, fallback: f32| {
            if value.is_nan() {
                fallback
            } else {
                value.clamp(MIN_COEFFICIENT, 1.0)
            }
        };

        Self {
            stiffness: clamp(self.stiffness, fallback.stiffness),
            damping: clamp(self.damping, fallback.damping),
            return_force: clamp(self.return_force, fallback.return_force),
        }
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 0.4,
            damping: 0.15,
            return_force: 0.2,
        }
    }
}

/// Spring state for one driven bone.
#[derive(Debug, Clone)]
pub struct SpringBone {
    bone: BoneHandle,
    base_rotation: Vec3,
    offset: Vec3,
    velocity: Vec3,
    params: SpringParams,
}

impl SpringBone {
    /// Creates a spring at rest around `base_rotation` (XYZ Euler).
    #[must_use]
    pub fn new(bone: BoneHandle, base_rotation: Vec3, params: SpringParams) -> Self {
        Self {
            bone,
            base_rotation,
            offset: Vec3::ZERO,
            velocity: Vec3::ZERO,
            params,
        }
    }

    /// Creates a spring around the bone's rest rotation, or `None` if the
    /// handle does not resolve in `skeleton`.
    #[must_use]
    pub fn from_rest(skeleton: &Skeleton, bone: BoneHandle, params: SpringParams) -> Option<Self> {
        let rest = skeleton.bone(bone)?.rest_rotation();
        let (x, y, z) = rest.to_euler(glam::EulerRot::XYZ);
        Some(Self::new(bone, Vec3::new(x, y, z), params))
    }

    /// Advances the spring by `dt` seconds under the given driving rotation
    /// change and writes the result onto the bone.
    ///
    /// No-op when the bone is missing or `dt` is not a positive number.
    pub fn step(&mut self, dt: f32, driving_rotation_delta: Vec3, skeleton: &mut Skeleton) {
        let Some(bone) = skeleton.bone_mut(self.bone) else {
            return;
        };
        if dt.is_nan() || dt <= 0.0 || dt.is_infinite() {
            return;
        }

        let dt = dt.min(MAX_STEP);
        let frames = dt * REFERENCE_FPS;
        let drive = if driving_rotation_delta.is_finite() {
            driving_rotation_delta / frames
        } else {
            Vec3::ZERO
        };

        let substeps = (dt / MAX_SUBSTEP).ceil().max(1.0) as u32;
        let h = frames / substeps as f32;
        let SpringParams {
            stiffness,
            damping,
            return_force,
        } = self.params;

        for _ in 0..substeps {
            let accel = drive * stiffness - self.offset * return_force - self.velocity * damping;
            self.velocity += accel * h;
            self.offset += self.velocity * h;
        }

        bone.transform.set_rotation_euler_vec(self.base_rotation + self.offset);
    }

    /// Returns the spring to rest without touching the bone.
    pub fn reset(&mut self) {
        self.offset = Vec3::ZERO;
        self.velocity = Vec3::ZERO;
    }

    #[inline]
    #[must_use]
    pub fn bone(&self) -> BoneHandle {
        self.bone
    }

    #[inline]
    #[must_use]
    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    #[inline]
    #[must_use]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    #[inline]
    #[must_use]
    pub fn params(&self) -> SpringParams {
        self.params
    }

    #[inline]
    #[must_use]
    pub fn base_rotation(&self) -> Vec3 {
        self.base_rotation
    }
}
