//! Procedural animation core.
//!
//! - [`spring`]: damped-spring secondary motion for one bone
//! - [`wiggle`]: a set of spring bones following a driving rotation
//! - [`pointer`]: pointer normalization and aim-plane projection
//! - [`sections`]: scroll progress to pose/material/light targets
//! - [`director`]: the per-frame pipeline tying the above together
//! - [`config`]: immutable tuning snapshots and presets

pub mod config;
pub mod director;
pub mod oscillator;
pub mod pointer;
pub mod sections;
pub mod smoothing;
pub mod spring;
pub mod wiggle;

pub use config::{
    DirectorConfig, IdleMotion, InfluenceFalloff, MaterialTuning, Placement, PointerInfluence,
    PointerMapping, RotationTarget, WiggleConfig,
};
pub use director::{AnimationDirector, BindReport, DirectorState};
pub use oscillator::{AxisOscillators, Oscillator};
pub use pointer::{PointerEvents, PointerMove, PointerSubscription, PointerTracker};
pub use sections::{
    HueCycle, SHOWCASE_LIGHTS, Section, SectionBlender, SectionEffects, SectionTable, VisualState,
};
pub use smoothing::Smoothing;
pub use spring::{MAX_STEP, REFERENCE_FPS, SpringBone, SpringParams};
pub use wiggle::{BoundBones, WiggleRig};
