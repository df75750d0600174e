use glam::Vec3;
use uuid::Uuid;

use crate::scene::light::LightRig;
use crate::scene::material::StandardMaterial;
use crate::scene::skeleton::Skeleton;
use crate::scene::transform::Transform;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: max.max(min),
        }
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[must_use]
    pub fn max_extent(&self) -> f32 {
        self.size().max_element()
    }
}

/// Load-time normalization of a model: recenters it on the origin and
/// shrinks it so its largest extent does not exceed `max_extent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Framing {
    pub offset: Vec3,
    pub scale: f32,
}

impl Framing {
    /// Models already smaller than `max_extent` keep their size.
    #[must_use]
    pub fn fit(bounds: &BoundingBox, max_extent: f32) -> Self {
        let extent = bounds.max_extent();
        let scale = if extent > max_extent && extent.is_finite() {
            max_extent / extent
        } else {
            1.0
        };

        Self {
            offset: -bounds.center(),
            scale,
        }
    }
}

impl Default for Framing {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

/// Default largest extent a freshly loaded model is normalized to.
pub const DEFAULT_MAX_EXTENT: f32 = 4.0;

/// A loaded, rigged model as handed over by the asset loader.
///
/// Each `Model` gets a fresh id so the director can tell a reload apart from
/// the model it is already bound to.
#[derive(Debug, Clone)]
pub struct Model {
    pub id: Uuid,
    pub name: String,
    /// Root transform of the whole model (the "group" the host renders).
    pub root: Transform,
    pub skeleton: Skeleton,
    pub materials: Vec<StandardMaterial>,
    pub bounds: BoundingBox,
    pub framing: Framing,
}

impl Model {
    #[must_use]
    pub fn new(
        name: &str,
        skeleton: Skeleton,
        materials: Vec<StandardMaterial>,
        bounds: BoundingBox,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            root: Transform::new(),
            skeleton,
            materials,
            framing: Framing::fit(&bounds, DEFAULT_MAX_EXTENT),
            bounds,
        }
    }
}

/// The slice of host scene state the director writes every frame.
///
/// `model` is `None` until the asset loader delivers; every per-frame
/// operation treats that as a normal transient state.
#[derive(Debug, Clone, Default)]
pub struct Stage {
    pub model: Option<Model>,
    pub lights: LightRig,
}

impl Stage {
    #[must_use]
    pub fn new(lights: LightRig) -> Self {
        Self {
            model: None,
            lights,
        }
    }

    pub fn set_model(&mut self, model: Model) {
        self.model = Some(model);
    }
}
