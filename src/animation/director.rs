//! Per-frame orchestration.
//!
//! [`AnimationDirector::tick`] runs the whole pipeline for one frame:
//!
//! 1. evaluate the section table and its effects at the current scroll
//!    progress,
//! 2. sample the idle oscillators,
//! 3. project the pointer and derive the pointer rotation,
//! 4. smooth the combined rotation toward its target,
//! 5. drive the wiggle rig with the applied rotation,
//! 6. write pose, material and light values onto the [`Stage`].
//!
//! The director only ever writes through the `&mut Stage` it is handed, so
//! everything it touches is confined to the host's scene slice for the
//! duration of the call.

use glam::Vec3;
use log::{debug, info, warn};
use uuid::Uuid;

use crate::animation::config::{DirectorConfig, RotationTarget};
use crate::animation::pointer::PointerTracker;
use crate::animation::sections::VisualState;
use crate::animation::spring::REFERENCE_FPS;
use crate::animation::wiggle::{BoundBones, WiggleRig};
use crate::scene::{BoneHandle, Camera, LightRig, Model, Stage};

/// What a bind against a freshly delivered model resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindReport {
    /// The bone the pointer rotation drives, if any.
    pub root_bone: Option<String>,
    pub wiggle_bones: BoundBones,
}

/// Persistent per-director values carried from one tick to the next.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectorState {
    /// Smoothed sway + pointer rotation (Euler XYZ).
    pub applied_rotation: Vec3,
    /// Section position, before the idle bob. X and Z ease when position
    /// smoothing is configured; Y always follows the section.
    pub position: Vec3,
    /// Accumulated idle spin of the model root (Euler XYZ).
    pub idle_spin: Vec3,
    /// Seconds since the director started.
    pub elapsed: f64,
    /// Last projected pointer target, lifted by the configured aim lift.
    pub aim_target: Vec3,
    /// Pointer part of the last desired rotation.
    pub pointer_rotation: Vec3,
    /// Index of the section the last tick evaluated.
    pub section_index: usize,
    position_primed: bool,
}

/// Drives one model from scroll progress, pointer input and time.
#[derive(Debug, Default)]
pub struct AnimationDirector {
    pointer: PointerTracker,
    rig: WiggleRig,
    state: DirectorState,
    root_bone: Option<BoneHandle>,
    attached: Option<Uuid>,
}

impl AnimationDirector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the root bone and the wiggle rig to `model`.
    ///
    /// Called automatically by [`tick`](Self::tick) whenever the stage holds
    /// a model the director has not seen yet; exposed so hosts can inspect
    /// the report right after loading.
    pub fn attach(&mut self, model: &Model, config: &DirectorConfig) -> BindReport {
        let skeleton = &model.skeleton;

        self.root_bone = match config.rotation_target {
            RotationTarget::Model => None,
            RotationTarget::RootBone => skeleton.find(&config.root_bone).or_else(|| {
                // a wiggle bone would have its driving rotation overwritten
                let fallback = skeleton
                    .first_bone_where(|bone| !config.wiggle.bones.contains(&bone.name))
                    .or_else(|| skeleton.first_bone());
                warn!(
                    "Root bone '{}' not found in '{}', falling back to {:?}",
                    config.root_bone,
                    model.name,
                    fallback.and_then(|h| skeleton.bone(h)).map(|b| &b.name)
                );
                fallback
            }),
        };

        let wiggle_bones = self.rig.bind_around(
            skeleton,
            &config.wiggle.bones,
            config.wiggle.params,
            self.root_bone,
        );

        self.attached = Some(model.id);
        self.state.applied_rotation = Vec3::ZERO;
        self.state.position_primed = false;

        let root_bone = self
            .root_bone
            .and_then(|h| skeleton.bone(h))
            .map(|b| b.name.clone());

        info!(
            "Attached to '{}': root bone {:?}, {} wiggle bone(s)",
            model.name,
            root_bone,
            wiggle_bones.len()
        );

        BindReport {
            root_bone,
            wiggle_bones,
        }
    }

    /// Forgets the attached model. The next tick with a model re-binds.
    pub fn detach(&mut self) {
        self.rig.clear();
        self.root_bone = None;
        self.attached = None;
    }

    /// Advances the animation by `dt` seconds.
    ///
    /// Never fails: without a model only the clock advances, missing bones
    /// simply receive no motion, and a pointer ray that misses the aim plane
    /// keeps the previous target. Returns the bind report when this tick
    /// attached to a new model.
    pub fn tick(
        &mut self,
        dt: f32,
        scroll_progress: f32,
        camera: &Camera,
        config: &DirectorConfig,
        stage: &mut Stage,
    ) -> Option<BindReport> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.state.elapsed += f64::from(dt);
        let time = self.state.elapsed;

        let Some(model) = stage.model.as_mut() else {
            if self.attached.is_some() {
                debug!("Model removed from stage, detaching");
                self.detach();
            }
            return None;
        };

        let report = if self.attached == Some(model.id) {
            if !self.rig.matches(config.wiggle.params) {
                self.rig.rebind(&model.skeleton, config.wiggle.params);
            }
            None
        } else {
            Some(self.attach(model, config))
        };

        // 1. section targets
        let progress = if scroll_progress.is_nan() {
            0.0
        } else {
            scroll_progress.clamp(0.0, 1.0)
        };
        let visual = config.sections.evaluate_at(progress, time);
        self.state.section_index = config.sections.index_at(progress);

        // 2. idle motion
        let bob = config.idle.bob.sample(time);
        let sway = config.idle.sway.sample(time);
        if let Some(spin) = config.idle.spin {
            self.state.idle_spin += spin.sample(time) * (dt * REFERENCE_FPS);
        }

        // 3. pointer
        self.pointer.set_plane(config.pointer.plane);
        let aim = self.pointer.project(camera);
        self.state.aim_target = aim + Vec3::Y * config.pointer.aim_lift;
        self.state.pointer_rotation = config.pointer.rotation(self.pointer.ndc(), progress);

        // 4. smoothed rotation
        let desired = sway + self.state.pointer_rotation;
        let blend = config.smoothing.blend(dt);
        self.state.applied_rotation = self.state.applied_rotation.lerp(desired, blend);

        let position = match config.position_smoothing {
            Some(smoothing) if self.state.position_primed => {
                let eased = self
                    .state
                    .position
                    .lerp(visual.position, smoothing.blend(dt));
                Vec3::new(eased.x, visual.position.y, eased.z)
            }
            _ => visual.position,
        };
        self.state.position = position;
        self.state.position_primed = true;

        // 5. root bone and secondary motion
        let applied = self.state.applied_rotation;
        if let Some(bone) = self.root_bone.and_then(|h| model.skeleton.bone_mut(h)) {
            let (x, y, z) = bone.rest_rotation().to_euler(glam::EulerRot::XYZ);
            bone.transform.set_rotation_euler_vec(Vec3::new(x, y, z) + applied);
        }
        self.rig.step(dt, applied, &mut model.skeleton);

        // 6. write-back
        let model_rotation = match config.rotation_target {
            RotationTarget::RootBone => self.state.idle_spin,
            RotationTarget::Model => applied + self.state.idle_spin,
        };
        write_model(model, config, &visual, position, bob, model_rotation);
        write_materials(model, config, &visual, time);
        write_lights(&mut stage.lights, &visual);

        report
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &DirectorState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    #[inline]
    #[must_use]
    pub fn rig(&self) -> &WiggleRig {
        &self.rig
    }

    #[inline]
    #[must_use]
    pub fn root_bone(&self) -> Option<BoneHandle> {
        self.root_bone
    }
}

fn write_model(
    model: &mut Model,
    config: &DirectorConfig,
    visual: &VisualState,
    position: Vec3,
    bob: f32,
    extra_rotation: Vec3,
) {
    let placement = &config.placement;
    let scale = model.framing.scale * placement.scale * visual.scale;

    let root = &mut model.root;
    root.position =
        model.framing.offset * scale + placement.position + position + Vec3::Y * bob;
    root.set_rotation_euler_vec(placement.rotation + visual.rotation + extra_rotation);
    root.set_uniform_scale(scale);
}

fn write_materials(model: &mut Model, config: &DirectorConfig, visual: &VisualState, time: f64) {
    let tuning = &config.material;
    let pulse = tuning.emissive_pulse.map_or(0.0, |osc| osc.sample(time));
    let intensity = (visual.emissive_intensity + pulse).max(0.0) * tuning.emissive_scale;

    for material in &mut model.materials {
        if let Some(metalness) = tuning.metalness {
            material.metalness = metalness;
        }
        if let Some(roughness) = tuning.roughness {
            material.roughness = roughness;
        }
        if let Some(env) = tuning.env_map_intensity {
            material.env_map_intensity = env;
        }
        material.emissive = visual.emissive;
        material.emissive_intensity = intensity;
    }
}

fn write_lights(lights: &mut LightRig, visual: &VisualState) {
    for (name, &intensity) in &visual.lights {
        lights.set_intensity(name, intensity);
    }
}
