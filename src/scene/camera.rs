use glam::{Affine3A, Mat4, Vec2, Vec3};
use std::borrow::Cow;

use crate::scene::ray::Ray;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionType {
    Perspective,
    Orthographic,
}

/// Host camera, read-only from the animation core's point of view.
///
/// Only what is needed to build a pick ray from normalized device
/// coordinates is kept: projection parameters and the cached matrices.
#[derive(Debug, Clone)]
pub struct Camera {
    pub name: Cow<'static, str>,

    // === Projection ===
    pub projection_type: ProjectionType,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub ortho_size: f32,

    // === Cached matrices ===
    world_matrix: Affine3A,
    view_matrix: Mat4,
    projection_matrix: Mat4,
    inverse_view_projection: Mat4,
}

impl Camera {
    /// `fov` is the vertical field of view in degrees.
    #[must_use]
    pub fn new_perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            name: Cow::Borrowed("Camera"),
            projection_type: ProjectionType::Perspective,
            fov: fov.to_radians(),
            aspect,
            near,
            far,
            ortho_size: 10.0,

            world_matrix: Affine3A::IDENTITY,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            inverse_view_projection: Mat4::IDENTITY,
        };

        cam.update_projection_matrix();
        cam
    }

    /// `ortho_size` is the half-height of the view volume.
    #[must_use]
    pub fn new_orthographic(ortho_size: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self::new_perspective(50.0, aspect, near, far);
        cam.projection_type = ProjectionType::Orthographic;
        cam.ortho_size = ortho_size;
        cam.update_projection_matrix();
        cam
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix = match self.projection_type {
            // glam's perspective_rh maps depth to [0, 1]
            ProjectionType::Perspective => {
                Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
            }
            ProjectionType::Orthographic => {
                let w = self.ortho_size * self.aspect;
                let h = self.ortho_size;
                Mat4::orthographic_rh(-w, w, -h, h, self.near, self.far)
            }
        };
        self.refresh_view_projection();
    }

    /// Places the camera. `world_transform` is the camera node's world matrix.
    pub fn update_view_projection(&mut self, world_transform: &Affine3A) {
        self.world_matrix = *world_transform;
        self.view_matrix = Mat4::from(*world_transform).inverse();
        self.refresh_view_projection();
    }

    /// Convenience placement: positions the camera at `eye` looking at `target`.
    pub fn look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        let view = Mat4::look_at_rh(eye, target, up);
        self.update_view_projection(&Affine3A::from_mat4(view.inverse()));
    }

    fn refresh_view_projection(&mut self) {
        self.inverse_view_projection = (self.projection_matrix * self.view_matrix).inverse();
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.world_matrix.translation.into()
    }

    /// World-space point for an NDC coordinate at NDC depth `z` (0 = near, 1 = far).
    #[must_use]
    pub fn unproject(&self, ndc: Vec2, z: f32) -> Vec3 {
        self.inverse_view_projection.project_point3(ndc.extend(z))
    }

    /// Builds the pick ray through an NDC coordinate.
    ///
    /// Perspective rays start at the camera; orthographic rays start on the
    /// near plane and run along the view direction.
    #[must_use]
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        match self.projection_type {
            ProjectionType::Perspective => {
                let origin = self.position();
                let through = self.unproject(ndc, 0.5);
                Ray::new(origin, through - origin)
            }
            ProjectionType::Orthographic => {
                let origin = self.unproject(ndc, 0.0);
                let forward = -Vec3::from(self.world_matrix.matrix3.z_axis);
                Ray::new(origin, forward)
            }
        }
    }
}
