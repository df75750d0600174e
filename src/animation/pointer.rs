//! Pointer tracking.
//!
//! Raw pointer moves are normalized into device coordinates and stored in a
//! shared slot. Once per frame the render tick projects the latest
//! coordinate through the camera onto a fixed plane to obtain a 3D aim
//! target.
//!
//! The host feeds events either directly through
//! [`PointerTracker::on_pointer_move`] or through a [`PointerEvents`] fan-out,
//! whose subscriptions detach themselves when dropped.

use std::sync::{Arc, Weak};

use glam::{Vec2, Vec3};
use log::trace;
use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::scene::{Camera, Plane};

/// A raw pointer move as delivered by the host UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMove {
    pub client_x: f32,
    pub client_y: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl PointerMove {
    /// Normalized device coordinates, or `None` for an unusable viewport.
    #[must_use]
    pub fn to_ndc(&self) -> Option<Vec2> {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        if !usable(self.viewport_width) || !usable(self.viewport_height) {
            return None;
        }
        if !self.client_x.is_finite() || !self.client_y.is_finite() {
            return None;
        }

        let x = (self.client_x / self.viewport_width) * 2.0 - 1.0;
        let y = -(self.client_y / self.viewport_height) * 2.0 + 1.0;
        Some(Vec2::new(x, y).clamp(Vec2::NEG_ONE, Vec2::ONE))
    }
}

/// Latest-value slot shared between the event producer and the render tick.
/// Both coordinates are written under one lock so a reader never observes a
/// torn pair.
type NdcSlot = Arc<Mutex<Vec2>>;

/// Converts pointer positions into a stable 3D aim target.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    ndc: NdcSlot,
    plane: Plane,
    target: Vec3,
}

impl PointerTracker {
    #[must_use]
    pub fn new(plane: Plane) -> Self {
        Self {
            ndc: Arc::new(Mutex::new(Vec2::ZERO)),
            plane,
            target: Vec3::ZERO,
        }
    }

    pub fn on_pointer_move(
        &self,
        client_x: f32,
        client_y: f32,
        viewport_width: f32,
        viewport_height: f32,
    ) {
        self.apply(PointerMove {
            client_x,
            client_y,
            viewport_width,
            viewport_height,
        });
    }

    pub fn apply(&self, event: PointerMove) {
        if let Some(ndc) = event.to_ndc() {
            *self.ndc.lock() = ndc;
        }
    }

    #[must_use]
    pub fn ndc(&self) -> Vec2 {
        *self.ndc.lock()
    }

    /// Casts the camera ray through the current coordinate and intersects
    /// the reference plane. A ray that misses (parallel, or plane behind the
    /// camera) leaves the previous target in place.
    pub fn project(&mut self, camera: &Camera) -> Vec3 {
        let ray = camera.ray_from_ndc(self.ndc());
        match ray.intersect_plane(&self.plane) {
            Some(point) => self.target = point,
            None => trace!("Pointer ray misses aim plane, keeping previous target"),
        }
        self.target
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub fn set_plane(&mut self, plane: Plane) {
        self.plane = plane;
    }

    /// Returns to the freshly-mounted state: centered pointer, origin target.
    pub fn reset(&mut self) {
        *self.ndc.lock() = Vec2::ZERO;
        self.target = Vec3::ZERO;
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(Plane::default())
    }
}

// ============================================================================
// Scoped event fan-out
// ============================================================================

new_key_type! {
    struct ListenerKey;
}

type Listeners = Mutex<SlotMap<ListenerKey, NdcSlot>>;

/// Host-side pointer event source.
///
/// Trackers subscribe and receive every dispatched move until their
/// [`PointerSubscription`] is dropped.
#[derive(Debug, Default)]
pub struct PointerEvents {
    listeners: Arc<Listeners>,
}

impl PointerEvents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "dropping the subscription immediately unsubscribes"]
    pub fn subscribe(&self, tracker: &PointerTracker) -> PointerSubscription {
        let key = self.listeners.lock().insert(Arc::clone(&tracker.ndc));
        PointerSubscription {
            key,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    pub fn dispatch(&self, event: PointerMove) {
        let Some(ndc) = event.to_ndc() else {
            return;
        };
        for slot in self.listeners.lock().values() {
            *slot.lock() = ndc;
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

/// Live registration of a tracker with a [`PointerEvents`] source.
#[derive(Debug)]
pub struct PointerSubscription {
    key: ListenerKey,
    listeners: Weak<Listeners>,
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.lock().remove(self.key);
        }
    }
}
