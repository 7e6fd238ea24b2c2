//! Renderer configuration structures
//!
//! Configurable settings for the viewer that can be serialized and loaded
//! from configuration files.

use serde::{Deserialize, Serialize};

/// Viewer surface and overlay configuration supplied by the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewerConfig {
    /// Requested render surface width in pixels.
    pub width: u32,
    /// Requested render surface height in pixels.
    pub height: u32,
    /// Whether room name labels are rendered at all.
    pub show_labels: bool,
    /// Whether cooling/heating figures are added to labels.
    pub show_load_overlay: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            show_labels: true,
            show_load_overlay: false,
        }
    }
}

/// Viewport rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewportConfig {
    /// Background clear color (RGBA)
    pub background_color: [f32; 4],
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self::dark()
    }
}

impl ViewportConfig {
    /// Create dark theme viewport config
    pub fn dark() -> Self {
        Self {
            background_color: [0.15, 0.15, 0.18, 1.0],
        }
    }

    /// Create light theme viewport config
    pub fn light() -> Self {
        Self {
            background_color: [0.92, 0.92, 0.94, 1.0],
        }
    }
}

/// Grid rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridConfig {
    /// Grid line color (RGB)
    pub line_color: [f32; 3],
    /// X-axis color (RGB)
    pub x_axis_color: [f32; 3],
    /// Y-axis color (RGB)
    pub y_axis_color: [f32; 3],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::dark()
    }
}

impl GridConfig {
    /// Create dark theme grid config
    pub fn dark() -> Self {
        Self {
            line_color: [0.3, 0.3, 0.3],
            x_axis_color: [0.8, 0.2, 0.2],
            y_axis_color: [0.2, 0.8, 0.2],
        }
    }

    /// Create light theme grid config
    pub fn light() -> Self {
        Self {
            line_color: [0.7, 0.7, 0.7],
            x_axis_color: [0.8, 0.2, 0.2],
            y_axis_color: [0.2, 0.8, 0.2],
        }
    }
}

/// Lighting configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LightingConfig {
    /// Light color (RGB)
    pub color: [f32; 3],
    /// Light intensity multiplier
    pub intensity: f32,
    /// Ambient light color (RGB)
    pub ambient_color: [f32; 3],
    /// Ambient light strength
    pub ambient_strength: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            color: crate::constants::light::COLOR,
            intensity: crate::constants::light::INTENSITY,
            ambient_color: crate::constants::light::AMBIENT_COLOR,
            ambient_strength: crate::constants::light::AMBIENT_STRENGTH,
        }
    }
}

/// Camera interaction configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CameraConfig {
    /// Field of view in degrees
    pub fov_degrees: f32,
    /// Zoom sensitivity multiplier for scroll input
    pub zoom_sensitivity: f32,
    /// Orbit sensitivity multiplier for pointer drags
    pub orbit_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: crate::constants::camera::DEFAULT_FOV_DEGREES,
            zoom_sensitivity: 0.01,
            orbit_sensitivity: 0.005,
        }
    }
}

/// Complete renderer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RendererConfig {
    /// Surface and overlay settings
    #[serde(default)]
    pub viewer: ViewerConfig,
    /// Viewport settings
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// Grid settings
    #[serde(default)]
    pub grid: GridConfig,
    /// Lighting settings
    #[serde(default)]
    pub lighting: LightingConfig,
    /// Camera settings
    #[serde(default)]
    pub camera: CameraConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips() {
        let config = RendererConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: RendererConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
