//! Rendering constants and configuration
//!
//! This module centralizes the magic numbers used across the renderer.
//! Everything that scales with model size is expressed as a factor of the
//! characteristic dimension computed by the geometry normalizer.

/// Grid rendering constants
pub mod grid {
    /// Grid half-extent as a factor of the characteristic dimension; the
    /// full span is twice the model's largest extent.
    pub const EXTENT_FACTOR: f32 = 1.0;
    /// Target number of grid cells across the half-extent.
    pub const TARGET_DIVISIONS: f32 = 8.0;
    /// Grid line color (gray)
    pub const LINE_COLOR: [f32; 3] = [0.3, 0.3, 0.3];
    /// X-axis color (red)
    pub const X_AXIS_COLOR: [f32; 3] = [0.8, 0.2, 0.2];
    /// Y-axis color (green)
    pub const Y_AXIS_COLOR: [f32; 3] = [0.2, 0.8, 0.2];
}

/// Orientation axis constants
pub mod axis {
    /// Axis length as a factor of the characteristic dimension.
    pub const SCALE_FACTOR: f32 = 0.5;
}

/// Camera default parameters
pub mod camera {
    /// Default field of view in degrees
    pub const DEFAULT_FOV_DEGREES: f32 = 40.0;
    /// Default near clipping plane
    pub const DEFAULT_NEAR: f32 = 0.1;
    /// Far plane as a factor of the characteristic dimension.
    pub const FAR_FACTOR: f32 = 100.0;
    /// Default yaw angle in degrees. Deliberately off the 45-degree
    /// isometric so adjacent walls read differently by default.
    pub const DEFAULT_YAW_DEGREES: f32 = -55.0;
    /// Default pitch angle in degrees (elevated so roof and walls are both
    /// visible).
    pub const DEFAULT_PITCH_DEGREES: f32 = 35.0;
    /// Minimum pitch angle in degrees; the camera never dips below the
    /// ground plane.
    pub const MIN_PITCH_DEGREES: f32 = 0.0;
    /// Maximum pitch angle in degrees
    pub const MAX_PITCH_DEGREES: f32 = 89.0;
    /// Initial orbit distance as a factor of the characteristic dimension.
    pub const DISTANCE_FACTOR: f32 = 1.8;
    /// Closest allowed orbit distance as a factor of the characteristic
    /// dimension.
    pub const MIN_DISTANCE_FACTOR: f32 = 0.5;
    /// Farthest allowed orbit distance as a factor of the characteristic
    /// dimension.
    pub const MAX_DISTANCE_FACTOR: f32 = 5.0;
    /// Pan sensitivity multiplier
    pub const PAN_SCALE: f32 = 0.002;
    /// Zoom sensitivity multiplier
    pub const ZOOM_SCALE: f32 = 0.1;
    /// Fraction of each pending interaction delta consumed per frame tick.
    pub const SMOOTHING: f32 = 0.25;
    /// Pending deltas below this magnitude are snapped to zero.
    pub const MOTION_EPSILON: f32 = 1e-4;
    /// Fit-all radius multiplier
    pub const FIT_ALL_MULTIPLIER: f32 = 2.5;
}

/// Lighting rig constants
pub mod light {
    /// Directional light position offset from the bounds center, as a
    /// factor of the characteristic dimension per axis.
    pub const OFFSET_FACTORS: [f32; 3] = [0.6, -0.8, 1.2];
    /// Directional light color (white)
    pub const COLOR: [f32; 3] = [1.0, 1.0, 1.0];
    /// Directional light intensity multiplier
    pub const INTENSITY: f32 = 0.8;
    /// Ambient light color (white)
    pub const AMBIENT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
    /// Ambient light strength for base visibility
    pub const AMBIENT_STRENGTH: f32 = 0.35;
}

/// Mesh body constants
pub mod body {
    /// Solid body color (RGBA)
    pub const COLOR: [f32; 4] = [0.72, 0.74, 0.78, 1.0];
}

/// Room label constants
pub mod label {
    /// Label height above the room top, as a fraction of room height.
    pub const RAISE_FACTOR: f32 = 0.2;
    /// Panel width as a factor of the smaller footprint dimension.
    pub const WIDTH_FACTOR: f32 = 0.6;
    /// Panel height:width ratio for a name-only label.
    pub const NAME_ASPECT: f32 = 0.3;
    /// Panel height:width ratio when cooling/heating lines are shown.
    pub const LOADS_ASPECT: f32 = 0.55;
}

/// Viewport rendering constants
pub mod viewport {
    /// MSAA sample count for the offscreen target.
    pub const SAMPLE_COUNT: u32 = 4;
    /// Background clear color
    pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
        r: 0.15,
        g: 0.15,
        b: 0.18,
        a: 1.0,
    };
}
