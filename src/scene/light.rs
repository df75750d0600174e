use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::scene::color::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Ambient,
    Directional,
    Point,
}

/// A named scene light whose intensity the director may drive.
#[derive(Debug, Clone)]
pub struct Light {
    pub name: String,
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
    pub kind: LightKind,
}

impl Light {
    #[must_use]
    pub fn new_ambient(name: &str, color: Color, intensity: f32) -> Self {
        Self {
            name: name.to_string(),
            color,
            intensity,
            position: Vec3::ZERO,
            kind: LightKind::Ambient,
        }
    }

    #[must_use]
    pub fn new_directional(name: &str, color: Color, intensity: f32, position: Vec3) -> Self {
        Self {
            name: name.to_string(),
            color,
            intensity,
            position,
            kind: LightKind::Directional,
        }
    }

    #[must_use]
    pub fn new_point(name: &str, color: Color, intensity: f32, position: Vec3) -> Self {
        Self {
            name: name.to_string(),
            color,
            intensity,
            position,
            kind: LightKind::Point,
        }
    }
}

/// The set of lights owned by the host scene, addressable by name.
#[derive(Debug, Clone, Default)]
pub struct LightRig {
    lights: Vec<Light>,
    by_name: FxHashMap<String, usize>,
}

impl LightRig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a light. A later light with the same name replaces the earlier one.
    pub fn add(&mut self, light: Light) {
        if let Some(&index) = self.by_name.get(&light.name) {
            self.lights[index] = light;
            return;
        }
        self.by_name.insert(light.name.clone(), self.lights.len());
        self.lights.push(light);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Light> {
        self.by_name.get(name).map(|&i| &self.lights[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Light> {
        self.by_name.get(name).map(|&i| &mut self.lights[i])
    }

    /// Sets a light's intensity. Returns `false` if no light has that name.
    pub fn set_intensity(&mut self, name: &str, intensity: f32) -> bool {
        match self.get_mut(name) {
            Some(light) => {
                light.intensity = intensity;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Light> {
        self.lights.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// The five colored point lights of the page scene plus ambient and key light.
    #[must_use]
    pub fn showcase() -> Self {
        let mut rig = Self::new();
        rig.add(Light::new_ambient("ambient", Color::WHITE, 2.5));
        rig.add(Light::new_directional(
            "key",
            Color::WHITE,
            4.0,
            Vec3::new(12.0, 12.0, 8.0),
        ));
        rig.add(Light::new_point("primary", Color::from_hex(0x7c3aed), 6.0, Vec3::new(-6.0, 3.0, -4.0)));
        rig.add(Light::new_point("secondary", Color::from_hex(0xec4899), 5.0, Vec3::new(6.0, 3.0, -4.0)));
        rig.add(Light::new_point("accent", Color::from_hex(0x3b82f6), 4.5, Vec3::new(0.0, 5.0, 3.0)));
        rig.add(Light::new_point("rim", Color::from_hex(0x06b6d4), 3.5, Vec3::new(-4.0, -2.0, 5.0)));
        rig.add(Light::new_point("fill", Color::from_hex(0xf59e0b), 3.0, Vec3::new(4.0, -2.0, 5.0)));
        rig
    }
}
