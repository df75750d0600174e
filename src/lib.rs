#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod animation;
pub mod errors;
pub mod scene;

pub use animation::{
    AnimationDirector, BindReport, DirectorConfig, PointerEvents, PointerMove,
    PointerSubscription, PointerTracker, SectionBlender, SectionTable, Smoothing, SpringBone,
    SpringParams, VisualState, WiggleRig,
};
pub use errors::{Result, WraithError};
pub use scene::{Bone, BoneHandle, Camera, Color, Light, LightRig, Model, Skeleton, Stage, Transform};
