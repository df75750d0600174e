//! Scene-side collaborators of the animation core.
//!
//! These types describe what the host application hands to the engine:
//! - Skeleton / Bone: the rig delivered by the model loader
//! - Transform: TRS component shared by bones and the model root
//! - Camera / Ray / Plane: pick-ray construction for pointer tracking
//! - StandardMaterial / Color: surface parameters the director drives
//! - Light / LightRig: named scene lights
//! - Model / Stage: the mutable scene slice written each frame

pub mod camera;
pub mod color;
pub mod light;
pub mod material;
pub mod model;
pub mod ray;
pub mod skeleton;
pub mod transform;

pub use camera::{Camera, ProjectionType};
pub use color::{Color, Hsl};
pub use light::{Light, LightKind, LightRig};
pub use material::StandardMaterial;
pub use model::{BoundingBox, DEFAULT_MAX_EXTENT, Framing, Model, Stage};
pub use ray::{Plane, Ray};
pub use skeleton::{Bone, Skeleton};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct BoneHandle;
}
