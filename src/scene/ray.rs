use glam::Vec3;
use serde::{Deserialize, Serialize};

const PARALLEL_EPSILON: f32 = 1e-6;

/// A half-line with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    #[inline]
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersection with `plane`, or `None` when the ray runs parallel to the
    /// plane or the plane lies behind the origin.
    #[must_use]
    pub fn intersect_plane(&self, plane: &Plane) -> Option<Vec3> {
        let denom = plane.normal.dot(self.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = -(self.origin.dot(plane.normal) + plane.constant) / denom;
        if t < 0.0 || !t.is_finite() {
            return None;
        }

        Some(self.at(t))
    }
}

/// Plane in Hessian normal form: `normal · p + constant = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vec3,
    pub constant: f32,
}

impl Plane {
    #[must_use]
    pub fn new(normal: Vec3, constant: f32) -> Self {
        Self {
            normal: normal.normalize_or_zero(),
            constant,
        }
    }

    /// Plane facing +Z through `z = offset`.
    #[must_use]
    pub fn facing_z(offset: f32) -> Self {
        Self::new(Vec3::Z, -offset)
    }

    #[inline]
    #[must_use]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::facing_z(2.0)
    }
}
