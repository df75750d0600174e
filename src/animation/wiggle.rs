use glam::Vec3;
use log::{debug, info, warn};
use smallvec::SmallVec;

use crate::animation::spring::{SpringBone, SpringParams};
use crate::scene::{BoneHandle, Skeleton};

/// Names of the bones a bind actually resolved.
pub type BoundBones = SmallVec<[String; 4]>;

/// A set of spring bones sharing one driving rotation.
///
/// The rig remembers the names it was asked to bind so a parameter change
/// can rebuild every spring from scratch against the same skeleton.
/// Coefficients are clamped into (0, 1] on the way in.
#[derive(Debug, Clone, Default)]
pub struct WiggleRig {
    springs: Vec<SpringBone>,
    bound: BoundBones,
    requested: Vec<String>,
    driver_bone: Option<BoneHandle>,
    params: SpringParams,
    previous_driver: Option<Vec3>,
}

impl WiggleRig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a spring to every name found in `skeleton`. Names the skeleton
    /// does not contain are skipped; skeletons vary between model assets.
    pub fn bind<S: AsRef<str>>(
        &mut self,
        skeleton: &Skeleton,
        bone_names: &[S],
        params: SpringParams,
    ) -> BoundBones {
        self.bind_around(skeleton, bone_names, params, None)
    }

    /// Like [`bind`](Self::bind), but never puts a spring on `driver`, the
    /// bone whose rotation feeds the rig. A spring there would overwrite the
    /// driving rotation every step.
    pub fn bind_around<S: AsRef<str>>(
        &mut self,
        skeleton: &Skeleton,
        bone_names: &[S],
        params: SpringParams,
        driver: Option<BoneHandle>,
    ) -> BoundBones {
        self.requested = bone_names.iter().map(|n| n.as_ref().to_string()).collect();
        self.driver_bone = driver;
        self.rebuild(skeleton, params);
        self.bound.clone()
    }

    /// Discards all spring state and rebuilds from the bones' rest rotations
    /// with new coefficients.
    pub fn rebind(&mut self, skeleton: &Skeleton, params: SpringParams) -> BoundBones {
        info!(
            "Rebinding wiggle rig ({} bones): stiffness={} damping={} return_force={}",
            self.requested.len(),
            params.stiffness,
            params.damping,
            params.return_force
        );
        self.rebuild(skeleton, params);
        self.bound.clone()
    }

    /// Whether `params` would leave the rig's coefficients unchanged.
    #[must_use]
    pub fn matches(&self, params: SpringParams) -> bool {
        self.params == params.sanitized()
    }

    fn rebuild(&mut self, skeleton: &Skeleton, params: SpringParams) {
        let sanitized = params.sanitized();
        if sanitized != params {
            warn!("Spring parameters {params:?} out of range, clamped to {sanitized:?}");
        }

        self.springs.clear();
        self.bound.clear();
        self.params = sanitized;
        self.previous_driver = None;

        for name in &self.requested {
            let Some(handle) = skeleton.find(name) else {
                debug!("Wiggle bone '{name}' not present in skeleton, skipping");
                continue;
            };
            if Some(handle) == self.driver_bone {
                debug!("Wiggle bone '{name}' drives the rig, skipping");
                continue;
            }
            if let Some(spring) = SpringBone::from_rest(skeleton, handle, sanitized) {
                self.springs.push(spring);
                self.bound.push(name.clone());
            }
        }

        debug!(
            "Wiggle rig bound {}/{} bones",
            self.springs.len(),
            self.requested.len()
        );
    }

    /// Feeds the change in `driving_rotation` since the previous step to
    /// every spring. The first step after a bind sees a zero delta.
    pub fn step(&mut self, dt: f32, driving_rotation: Vec3, skeleton: &mut Skeleton) {
        let delta = self
            .previous_driver
            .map_or(Vec3::ZERO, |previous| driving_rotation - previous);

        for spring in &mut self.springs {
            spring.step(dt, delta, skeleton);
        }

        self.previous_driver = Some(driving_rotation);
    }

    /// Drops every spring, e.g. when the model is unloaded.
    pub fn clear(&mut self) {
        self.springs.clear();
        self.bound.clear();
        self.driver_bone = None;
        self.previous_driver = None;
    }

    #[inline]
    #[must_use]
    pub fn params(&self) -> SpringParams {
        self.params
    }

    #[inline]
    #[must_use]
    pub fn bound_names(&self) -> &[String] {
        &self.bound
    }

    #[inline]
    #[must_use]
    pub fn springs(&self) -> &[SpringBone] {
        &self.springs
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.springs.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.springs.is_empty()
    }
}
