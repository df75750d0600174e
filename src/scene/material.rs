use crate::scene::color::Color;

/// Physically based surface parameters that the director is allowed to drive.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardMaterial {
    pub name: String,
    pub color: Color,
    pub metalness: f32,
    pub roughness: f32,
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub env_map_intensity: f32,
}

impl StandardMaterial {
    #[must_use]
    pub fn new(name: &str, color: Color) -> Self {
        Self {
            name: name.to_string(),
            color,
            ..Self::default()
        }
    }
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: Color::WHITE,
            metalness: 0.0,
            roughness: 1.0,
            emissive: Color::BLACK,
            emissive_intensity: 1.0,
            env_map_intensity: 1.0,
        }
    }
}
