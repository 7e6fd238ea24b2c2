//! Directional + ambient lighting rig.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use spaceview_core::GeometryBounds;

use crate::config::LightingConfig;
use crate::constants::light as constants;

/// Light uniform buffer data
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LightUniform {
    /// Direction the light travels (xyz), unused w.
    pub direction: [f32; 4],
    /// Directional color (rgb) and intensity (w).
    pub color: [f32; 4],
    /// Ambient color (rgb) and strength (w).
    pub ambient: [f32; 4],
}

/// The scene's single directional light plus an ambient base term.
///
/// The light sits at a fixed offset from the geometry center, scaled by the
/// characteristic dimension, so shading direction stays consistent from
/// single-room models up to whole buildings.
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub direction: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    pub ambient_color: Vec3,
    pub ambient_strength: f32,
}

impl DirectionalLight {
    /// Create the default rig aimed at the origin.
    pub fn new() -> Self {
        let mut light = Self {
            position: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            color: Vec3::from_array(constants::COLOR),
            intensity: constants::INTENSITY,
            ambient_color: Vec3::from_array(constants::AMBIENT_COLOR),
            ambient_strength: constants::AMBIENT_STRENGTH,
        };
        light.place_for_bounds(&GeometryBounds::empty());
        light
    }

    /// Reposition the light relative to newly loaded geometry.
    pub fn place_for_bounds(&mut self, bounds: &GeometryBounds) {
        let dim = bounds.characteristic_dimension();
        let center = bounds.center();
        let offset = Vec3::from_array(constants::OFFSET_FACTORS) * dim;

        self.position = center + offset;
        self.direction = (center - self.position).normalize_or(Vec3::NEG_Z);
    }

    /// Apply lighting configuration.
    pub fn apply_config(&mut self, config: &LightingConfig) {
        self.color = Vec3::from_array(config.color);
        self.intensity = config.intensity;
        self.ambient_color = Vec3::from_array(config.ambient_color);
        self.ambient_strength = config.ambient_strength;
    }

    /// Get the light uniform data.
    pub fn uniform(&self) -> LightUniform {
        LightUniform {
            direction: [self.direction.x, self.direction.y, self.direction.z, 0.0],
            color: [self.color.x, self.color.y, self.color.z, self.intensity],
            ambient: [
                self.ambient_color.x,
                self.ambient_color.y,
                self.ambient_color.z,
                self.ambient_strength,
            ],
        }
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_scales_with_geometry() {
        let small = GeometryBounds::from_positions(&[[0.0, 0.0, 0.0], [2.0, 2.0, 2.0]]);
        let large = GeometryBounds::from_positions(&[[0.0, 0.0, 0.0], [200.0, 200.0, 200.0]]);

        let mut light = DirectionalLight::new();
        light.place_for_bounds(&small);
        let near = (light.position - small.center()).length();

        light.place_for_bounds(&large);
        let far = (light.position - large.center()).length();

        assert!(far > near * 50.0);
    }

    #[test]
    fn test_direction_points_at_geometry() {
        let bounds = GeometryBounds::from_positions(&[[0.0, 0.0, 0.0], [10.0, 10.0, 4.0]]);
        let mut light = DirectionalLight::new();
        light.place_for_bounds(&bounds);

        let toward_center = (bounds.center() - light.position).normalize();
        assert!((light.direction - toward_center).length() < 1e-5);
        // Light comes from above.
        assert!(light.direction.z < 0.0);
    }
}
