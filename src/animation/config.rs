//! Director configuration snapshots.
//!
//! A [`DirectorConfig`] is an immutable value the host passes into every
//! [`tick`](crate::animation::AnimationDirector::tick). Tuning UIs produce a
//! new snapshot instead of mutating engine state; snapshots round-trip
//! through JSON so a tuned setup can be copied out and pasted back in.
//!
//! Four presets cover the look variants the mascot ships with:
//!
//! | Preset        | Rotation target | Sections  | Notes                                   |
//! |---------------|-----------------|-----------|-----------------------------------------|
//! | `studio`      | root bone       | static    | tuning-panel defaults, flipped mapping  |
//! | `clean`       | root bone       | static    | softer smoothing, chrome material       |
//! | `cinematic`   | root bone       | canonical | scroll timeline, section effects, spin  |
//! | `minimal`     | model root      | static    | no bones, direct pointer rotation       |

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::animation::oscillator::{AxisOscillators, Oscillator};
use crate::animation::sections::{SectionTable, VisualState};
use crate::animation::smoothing::Smoothing;
use crate::animation::spring::SpringParams;
use crate::errors::Result;
use crate::scene::{Color, Plane};

/// Which transform receives the smoothed sway and pointer rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationTarget {
    /// The rig's root bone; the wiggle rig follows it.
    #[default]
    RootBone,
    /// The whole model. Used for models without a skeleton.
    Model,
}

/// How pointer coordinates map onto rotation axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerMapping {
    /// Vertical pointer pitches (X), horizontal pointer yaws (Y).
    #[default]
    Standard,
    /// Horizontal pointer pitches (X), vertical pointer yaws (Y).
    Flipped,
}

impl PointerMapping {
    /// Rotation contributed by `ndc`, before multipliers and strength.
    #[must_use]
    pub fn axes(self, ndc: Vec2) -> Vec3 {
        match self {
            PointerMapping::Standard => Vec3::new(-ndc.y, ndc.x, ndc.x),
            PointerMapping::Flipped => Vec3::new(ndc.x, -ndc.y, ndc.x),
        }
    }
}

/// Scales pointer influence by scroll progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InfluenceFalloff {
    /// Full strength before `until`, `outside` afterwards.
    Banded { until: f32, outside: f32 },
    /// Full strength before `until`, then `max(floor, 1 - progress * slope)`.
    Linear { until: f32, slope: f32, floor: f32 },
}

impl InfluenceFalloff {
    #[must_use]
    pub fn factor(&self, progress: f32) -> f32 {
        match *self {
            InfluenceFalloff::Banded { until, outside } => {
                if progress < until {
                    1.0
                } else {
                    outside
                }
            }
            InfluenceFalloff::Linear {
                until,
                slope,
                floor,
            } => {
                if progress < until {
                    1.0
                } else {
                    (1.0 - progress * slope).max(floor)
                }
            }
        }
    }
}

impl Default for InfluenceFalloff {
    fn default() -> Self {
        InfluenceFalloff::Banded {
            until: 0.2,
            outside: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerInfluence {
    pub strength: f32,
    /// Per rotation axis gain, applied after [`PointerMapping::axes`].
    pub multipliers: Vec3,
    pub mapping: PointerMapping,
    pub falloff: InfluenceFalloff,
    /// Aim plane the pointer ray is intersected with.
    pub plane: Plane,
    /// Added to the aim target's Y.
    pub aim_lift: f32,
}

impl PointerInfluence {
    /// Pointer rotation for `ndc` at scroll `progress`.
    #[must_use]
    pub fn rotation(&self, ndc: Vec2, progress: f32) -> Vec3 {
        let influence = self.strength * self.falloff.factor(progress);
        self.mapping.axes(ndc) * self.multipliers * influence
    }
}

impl Default for PointerInfluence {
    fn default() -> Self {
        Self {
            strength: 1.0,
            multipliers: Vec3::new(0.8, 1.2, 0.3),
            mapping: PointerMapping::Standard,
            falloff: InfluenceFalloff::default(),
            plane: Plane::default(),
            aim_lift: 4.0,
        }
    }
}

/// Time-driven motion applied with no input at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdleMotion {
    /// Vertical float of the model.
    pub bob: Oscillator,
    /// Baseline rotation the pointer rotation is added to.
    pub sway: AxisOscillators,
    /// Rotation rate, in radians per reference frame, integrated into the
    /// model root's rotation.
    #[serde(default)]
    pub spin: Option<AxisOscillators>,
}

/// Static offsets layered on top of the load-time framing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

/// Surface overrides written to every material each tick. `None` leaves the
/// loaded value alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialTuning {
    pub metalness: Option<f32>,
    pub roughness: Option<f32>,
    pub env_map_intensity: Option<f32>,
    /// Multiplies the section emissive intensity.
    pub emissive_scale: f32,
    /// Added to the emissive intensity over time.
    pub emissive_pulse: Option<Oscillator>,
}

impl Default for MaterialTuning {
    fn default() -> Self {
        Self {
            metalness: None,
            roughness: None,
            env_map_intensity: None,
            emissive_scale: 1.0,
            emissive_pulse: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WiggleConfig {
    pub bones: Vec<String>,
    pub params: SpringParams,
}

impl Default for WiggleConfig {
    fn default() -> Self {
        Self {
            bones: ["Bone1", "Bone2", "Bone3"].map(String::from).to_vec(),
            params: SpringParams::default(),
        }
    }
}

/// Everything the director needs to animate one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorConfig {
    pub placement: Placement,
    pub idle: IdleMotion,
    pub pointer: PointerInfluence,
    /// Smoothing of the applied rotation toward its target.
    pub smoothing: Smoothing,
    /// Smoothing of the model position toward the section target. `None`
    /// applies the section position directly.
    #[serde(default)]
    pub position_smoothing: Option<Smoothing>,
    pub rotation_target: RotationTarget,
    pub root_bone: String,
    pub wiggle: WiggleConfig,
    pub material: MaterialTuning,
    pub sections: SectionTable,
}

impl DirectorConfig {
    /// Tuning-panel defaults: static pose, flipped pointer mapping, chrome
    /// material without glow.
    #[must_use]
    pub fn studio() -> Self {
        let state = VisualState {
            emissive: Color::from_hex(0x7c3aed),
            emissive_intensity: 0.4,
            ..VisualState::default()
        }
        .with_light("ambient", 2.0)
        .with_light("key", 3.0)
        .with_light("primary", 4.0)
        .with_light("secondary", 4.0)
        .with_light("accent", 3.0);

        Self {
            placement: Placement {
                position: Vec3::new(0.0, -24.2, 0.0),
                rotation: Vec3::new(0.0, -1.391_592_7, -0.251_592_65),
                scale: 3.6,
            },
            idle: IdleMotion {
                bob: Oscillator::sine(1.5, 0.11),
                sway: AxisOscillators {
                    x: Oscillator::sine(0.8, 0.1),
                    y: Oscillator::cosine(0.6, 0.07),
                    z: Oscillator::sine(1.0, 0.04),
                },
                spin: None,
            },
            pointer: PointerInfluence {
                multipliers: Vec3::new(0.8, 0.8, 0.3),
                mapping: PointerMapping::Flipped,
                ..PointerInfluence::default()
            },
            smoothing: Smoothing::from_frame_factor(0.17, 60.0),
            position_smoothing: None,
            rotation_target: RotationTarget::RootBone,
            root_bone: "Root".to_string(),
            wiggle: WiggleConfig {
                params: SpringParams {
                    stiffness: 0.4,
                    damping: 0.15,
                    return_force: 0.2,
                },
                ..WiggleConfig::default()
            },
            material: MaterialTuning {
                metalness: Some(0.9),
                roughness: Some(0.1),
                env_map_intensity: Some(3.0),
                emissive_scale: 0.0,
                emissive_pulse: None,
            },
            sections: SectionTable::uniform(state),
        }
    }

    /// Chrome body with a steady violet glow and gentle smoothing.
    #[must_use]
    pub fn clean() -> Self {
        let state = VisualState {
            emissive: Color::from_hex(0x7c3aed),
            emissive_intensity: 0.4,
            ..VisualState::default()
        };

        Self {
            placement: Placement::default(),
            idle: IdleMotion {
                bob: Oscillator::sine(1.5, 0.2),
                sway: AxisOscillators {
                    x: Oscillator::sine(0.8, 0.15),
                    y: Oscillator::cosine(0.6, 0.12),
                    z: Oscillator::sine(1.0, 0.08),
                },
                spin: None,
            },
            pointer: PointerInfluence::default(),
            smoothing: Smoothing::from_frame_factor(0.08, 60.0),
            position_smoothing: None,
            rotation_target: RotationTarget::RootBone,
            root_bone: "Root".to_string(),
            wiggle: WiggleConfig::default(),
            material: MaterialTuning {
                metalness: Some(0.9),
                roughness: Some(0.1),
                ..MaterialTuning::default()
            },
            sections: SectionTable::uniform(state),
        }
    }

    /// Full scroll timeline with per-section glow and light effects, a slow
    /// idle spin and eased drift between section positions.
    #[must_use]
    pub fn cinematic() -> Self {
        Self {
            placement: Placement::default(),
            idle: IdleMotion {
                bob: Oscillator::sine(1.2, 0.2),
                sway: AxisOscillators {
                    x: Oscillator::sine(0.9, 0.2),
                    y: Oscillator::cosine(0.7, 0.15),
                    z: Oscillator::sine(1.1, 0.1),
                },
                spin: Some(AxisOscillators {
                    x: Oscillator::sine(0.0, 0.0),
                    y: Oscillator::sine(0.4, 0.03),
                    z: Oscillator::cosine(0.6, 0.01),
                }),
            },
            pointer: PointerInfluence {
                multipliers: Vec3::new(1.0, 1.5, 0.4),
                falloff: InfluenceFalloff::Linear {
                    until: 0.2,
                    slope: 1.5,
                    floor: 0.4,
                },
                ..PointerInfluence::default()
            },
            smoothing: Smoothing::from_frame_factor(0.12, 60.0),
            position_smoothing: Some(Smoothing::from_frame_factor(0.08, 60.0)),
            rotation_target: RotationTarget::RootBone,
            root_bone: "Root".to_string(),
            wiggle: WiggleConfig::default(),
            material: MaterialTuning {
                metalness: Some(0.95),
                roughness: Some(0.05),
                env_map_intensity: Some(2.0),
                emissive_scale: 1.0,
                emissive_pulse: None,
            },
            sections: SectionTable::canonical(),
        }
    }

    /// Bone-less fallback: the whole model turns toward the pointer with no
    /// sway and no smoothing.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            placement: Placement::default(),
            idle: IdleMotion {
                bob: Oscillator::sine(1.0, 0.3),
                sway: AxisOscillators::STILL,
                spin: None,
            },
            pointer: PointerInfluence {
                multipliers: Vec3::new(0.3, 0.5, 0.0),
                falloff: InfluenceFalloff::Banded {
                    until: 0.0,
                    outside: 1.0,
                },
                ..PointerInfluence::default()
            },
            smoothing: Smoothing::PerFrame { factor: 1.0 },
            position_smoothing: None,
            rotation_target: RotationTarget::Model,
            root_bone: String::new(),
            wiggle: WiggleConfig {
                bones: Vec::new(),
                params: SpringParams::default(),
            },
            material: MaterialTuning::default(),
            sections: SectionTable::uniform(VisualState::default()),
        }
    }

    /// Serializes the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Only fails if a float field holds a value JSON cannot represent.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a snapshot produced by [`to_json`](Self::to_json).
    ///
    /// # Errors
    ///
    /// Returns [`WraithError::Json`](crate::errors::WraithError::Json) for
    /// malformed input or a section table that fails validation, and
    /// [`WraithError::InvalidSpring`](crate::errors::WraithError::InvalidSpring)
    /// for out-of-range spring coefficients.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.wiggle.params.validate()?;
        Ok(config)
    }
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self::studio()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banded_falloff() {
        let f = InfluenceFalloff::default();
        assert_eq!(f.factor(0.1), 1.0);
        assert_eq!(f.factor(0.2), 0.5);
    }

    #[test]
    fn test_linear_falloff_never_reaches_zero() {
        let f = InfluenceFalloff::Linear {
            until: 0.2,
            slope: 1.5,
            floor: 0.4,
        };
        assert_eq!(f.factor(0.0), 1.0);
        assert!((f.factor(0.3) - 0.55).abs() < 1e-6);
        assert_eq!(f.factor(1.0), 0.4);
    }

    #[test]
    fn test_mappings_swap_axes() {
        let ndc = Vec2::new(0.5, -0.25);
        assert_eq!(PointerMapping::Standard.axes(ndc), Vec3::new(0.25, 0.5, 0.5));
        assert_eq!(PointerMapping::Flipped.axes(ndc), Vec3::new(0.5, 0.25, 0.5));
    }
}
