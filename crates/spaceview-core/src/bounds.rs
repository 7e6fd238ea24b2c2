//! Geometry bounds and characteristic dimension.

use glam::Vec3;

/// Characteristic dimension used when a mesh has no measurable extent, so
/// camera framing and grid sizing always work with a positive scale.
pub const FALLBACK_DIMENSION: f32 = 10.0;

/// Axis-aligned bounding box derived from a parsed mesh.
#[derive(Debug, Clone, Copy)]
pub struct GeometryBounds {
    /// Minimum corner of the bounding box.
    pub min: Vec3,
    /// Maximum corner of the bounding box.
    pub max: Vec3,
}

impl GeometryBounds {
    /// Creates an empty (inverted) bounding box.
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    /// Creates bounds that contain all given positions.
    pub fn from_positions(positions: &[[f32; 3]]) -> Self {
        let mut bounds = Self::empty();
        for p in positions {
            let p = Vec3::from_array(*p);
            bounds.min = bounds.min.min(p);
            bounds.max = bounds.max.max(p);
        }
        bounds
    }

    /// Returns true if the bounds contain at least one point.
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// Returns the center of the bounding box, or the origin for empty bounds.
    pub fn center(&self) -> Vec3 {
        if self.is_valid() {
            (self.min + self.max) * 0.5
        } else {
            Vec3::ZERO
        }
    }

    /// Returns the size (full extents) of the bounding box.
    pub fn size(&self) -> Vec3 {
        if self.is_valid() {
            self.max - self.min
        } else {
            Vec3::ZERO
        }
    }

    /// Largest axis-aligned extent, always positive.
    ///
    /// Empty or degenerate (single-point) geometry falls back to
    /// [`FALLBACK_DIMENSION`] so downstream camera and grid sizing never
    /// divide by zero.
    pub fn characteristic_dimension(&self) -> f32 {
        let largest = self.size().max_element();
        if largest > 0.0 {
            largest
        } else {
            FALLBACK_DIMENSION
        }
    }

    /// Height of the lowest point, where the ground grid snaps to.
    pub fn floor_z(&self) -> f32 {
        if self.is_valid() { self.min.z } else { 0.0 }
    }
}

impl Default for GeometryBounds {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_positions() {
        let bounds = GeometryBounds::from_positions(&[
            [-1.0, -2.0, -3.0],
            [1.0, 2.0, 3.0],
            [0.0, 0.0, 0.0],
        ]);
        assert_eq!(bounds.center(), Vec3::ZERO);
        assert_eq!(bounds.size(), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(bounds.characteristic_dimension(), 6.0);
        assert_eq!(bounds.floor_z(), -3.0);
    }

    #[test]
    fn test_empty_bounds_fall_back() {
        let bounds = GeometryBounds::from_positions(&[]);
        assert!(!bounds.is_valid());
        assert_eq!(bounds.characteristic_dimension(), FALLBACK_DIMENSION);
        assert_eq!(bounds.center(), Vec3::ZERO);
        assert_eq!(bounds.floor_z(), 0.0);
    }

    #[test]
    fn test_single_point_falls_back() {
        let bounds = GeometryBounds::from_positions(&[[5.0, 5.0, 5.0]]);
        assert!(bounds.is_valid());
        assert_eq!(bounds.characteristic_dimension(), FALLBACK_DIMENSION);
    }
}
