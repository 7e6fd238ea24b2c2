//! Orbit camera for the 3D viewport

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

use spaceview_core::GeometryBounds;

use crate::constants::camera as constants;

/// Camera uniform buffer data
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
}

/// Orbit camera
///
/// Yaw/pitch/distance around a look-at target, Z up. Orbit limits are
/// derived from the loaded geometry by [`Camera::frame_bounds`] and
/// enforced on every mutation, so no interaction sequence can take the
/// view below the ground plane or outside the zoom range.
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    // Orbit state
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Camera {
    /// Create a new camera with default parameters
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Z,
            fov: constants::DEFAULT_FOV_DEGREES.to_radians(),
            aspect,
            near: constants::DEFAULT_NEAR,
            far: spaceview_core::bounds::FALLBACK_DIMENSION * constants::FAR_FACTOR,
            yaw: constants::DEFAULT_YAW_DEGREES.to_radians(),
            pitch: constants::DEFAULT_PITCH_DEGREES.to_radians(),
            distance: spaceview_core::bounds::FALLBACK_DIMENSION * constants::DISTANCE_FACTOR,
            min_distance: spaceview_core::bounds::FALLBACK_DIMENSION
                * constants::MIN_DISTANCE_FACTOR,
            max_distance: spaceview_core::bounds::FALLBACK_DIMENSION
                * constants::MAX_DISTANCE_FACTOR,
        };
        camera.update_position_from_orbit();
        camera
    }

    /// Frame the camera around newly loaded geometry.
    ///
    /// Resets the orbit to the default elevated angle, looks at the bounds
    /// center, and derives distance plus zoom limits from the
    /// characteristic dimension.
    pub fn frame_bounds(&mut self, bounds: &GeometryBounds) {
        let dim = bounds.characteristic_dimension();

        self.target = bounds.center();
        self.min_distance = dim * constants::MIN_DISTANCE_FACTOR;
        self.max_distance = dim * constants::MAX_DISTANCE_FACTOR;
        self.distance =
            (dim * constants::DISTANCE_FACTOR).clamp(self.min_distance, self.max_distance);
        self.yaw = constants::DEFAULT_YAW_DEGREES.to_radians();
        self.pitch = constants::DEFAULT_PITCH_DEGREES.to_radians();
        self.far = dim * constants::FAR_FACTOR;
        self.update_position_from_orbit();
    }

    /// Update aspect ratio
    pub fn update_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Orbit the camera around the target
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(
            constants::MIN_PITCH_DEGREES.to_radians(),
            constants::MAX_PITCH_DEGREES.to_radians(),
        );
        self.update_position_from_orbit();
    }

    /// Pan the camera (move target)
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        let scale = self.distance * constants::PAN_SCALE;
        self.target += right * (-delta_x * scale) + up * (delta_y * scale);
        self.update_position_from_orbit();
    }

    /// Zoom the camera
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta * constants::ZOOM_SCALE))
            .clamp(self.min_distance, self.max_distance);
        self.update_position_from_orbit();
    }

    fn update_position_from_orbit(&mut self) {
        let x = self.distance * self.pitch.cos() * self.yaw.cos();
        let y = self.distance * self.pitch.cos() * self.yaw.sin();
        let z = self.distance * self.pitch.sin();
        self.position = self.target + Vec3::new(x, y, z);
    }

    /// Fit camera to show the given bounding sphere
    pub fn fit_all(&mut self, center: Vec3, radius: f32) {
        self.target = center;
        self.distance = (radius * constants::FIT_ALL_MULTIPLIER)
            .clamp(self.min_distance, self.max_distance);
        self.update_position_from_orbit();
    }

    /// Set to top view
    pub fn set_top_view(&mut self) {
        self.yaw = 0.0;
        self.pitch = constants::MAX_PITCH_DEGREES.to_radians();
        self.update_position_from_orbit();
    }

    /// Set to front view
    pub fn set_front_view(&mut self) {
        self.yaw = -90.0_f32.to_radians();
        self.pitch = constants::MIN_PITCH_DEGREES.to_radians();
        self.update_position_from_orbit();
    }

    /// Set to side view
    pub fn set_side_view(&mut self) {
        self.yaw = 0.0;
        self.pitch = constants::MIN_PITCH_DEGREES.to_radians();
        self.update_position_from_orbit();
    }

    /// Get view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Get camera uniform data
    pub fn uniform(&self) -> CameraUniform {
        let view = self.view_matrix();
        let proj = self.projection_matrix();
        let view_proj = proj * view;

        CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            eye: [self.position.x, self.position.y, self.position.z, 1.0],
        }
    }

    /// Project a world point to viewport pixel coordinates.
    ///
    /// Returns `None` for points at or behind the camera plane.
    pub fn world_to_screen(&self, point: Vec3, width: f32, height: f32) -> Option<(f32, f32)> {
        let clip = self.projection_matrix() * self.view_matrix() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some((
            (ndc.x + 1.0) * 0.5 * width,
            (1.0 - ndc.y) * 0.5 * height,
        ))
    }

    /// On-screen pixels covered by one world unit at the given point's depth.
    pub fn pixels_per_unit(&self, point: Vec3, viewport_height: f32) -> f32 {
        let view_depth = -(self.view_matrix() * point.extend(1.0)).z;
        if view_depth <= 1e-6 {
            return 0.0;
        }
        (viewport_height * 0.5) / ((self.fov * 0.5).tan() * view_depth)
    }
}

/// Interaction state consumed once per frame tick.
///
/// Pointer and scroll handlers accumulate deltas here instead of mutating
/// the camera directly; [`CameraController::tick`] applies a fraction per
/// frame, which gives the damped motion and keeps event handling free of
/// camera math.
#[derive(Debug, Default)]
pub struct CameraController {
    pending_orbit: Vec2,
    pending_pan: Vec2,
    pending_zoom: f32,
}

impl CameraController {
    /// Create a controller with no pending motion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an orbit rotation from a pointer drag delta.
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.pending_orbit += Vec2::new(delta_yaw, delta_pitch);
    }

    /// Queue a pan from a pointer drag delta.
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        self.pending_pan += Vec2::new(delta_x, delta_y);
    }

    /// Queue a zoom step from a scroll delta.
    pub fn zoom(&mut self, delta: f32) {
        self.pending_zoom += delta;
    }

    /// Returns true while damped motion is still being played out.
    pub fn has_motion(&self) -> bool {
        self.pending_orbit != Vec2::ZERO
            || self.pending_pan != Vec2::ZERO
            || self.pending_zoom != 0.0
    }

    /// Apply one frame's worth of damped motion to the camera.
    pub fn tick(&mut self, camera: &mut Camera) {
        if !self.has_motion() {
            return;
        }

        let factor = constants::SMOOTHING;

        let orbit = self.pending_orbit * factor;
        if orbit != Vec2::ZERO {
            camera.orbit(orbit.x, orbit.y);
        }

        let pan = self.pending_pan * factor;
        if pan != Vec2::ZERO {
            camera.pan(pan.x, pan.y);
        }

        let zoom = self.pending_zoom * factor;
        if zoom != 0.0 {
            camera.zoom(zoom);
        }

        let remaining = 1.0 - factor;
        self.pending_orbit *= remaining;
        self.pending_pan *= remaining;
        self.pending_zoom *= remaining;

        if self.pending_orbit.length_squared() < constants::MOTION_EPSILON {
            self.pending_orbit = Vec2::ZERO;
        }
        if self.pending_pan.length_squared() < constants::MOTION_EPSILON {
            self.pending_pan = Vec2::ZERO;
        }
        if self.pending_zoom.abs() < constants::MOTION_EPSILON {
            self.pending_zoom = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framed_camera() -> Camera {
        let bounds = GeometryBounds::from_positions(&[[0.0, 0.0, 0.0], [20.0, 16.0, 6.0]]);
        let mut camera = Camera::new(1.5);
        camera.frame_bounds(&bounds);
        camera
    }

    #[test]
    fn test_frame_bounds_targets_center() {
        let camera = framed_camera();
        assert_eq!(camera.target, Vec3::new(10.0, 8.0, 3.0));
        assert_eq!(camera.min_distance, 10.0);
        assert_eq!(camera.max_distance, 100.0);
    }

    #[test]
    fn test_zoom_never_leaves_limits() {
        let mut camera = framed_camera();
        for _ in 0..500 {
            camera.zoom(3.0);
        }
        assert!(camera.distance >= camera.min_distance);
        let near = (camera.position - camera.target).length();
        assert!((near - camera.min_distance).abs() < 1e-3);

        for _ in 0..500 {
            camera.zoom(-3.0);
        }
        assert!(camera.distance <= camera.max_distance);
    }

    #[test]
    fn test_pitch_never_goes_below_ground() {
        let mut camera = framed_camera();
        for _ in 0..100 {
            camera.orbit(0.1, -0.5);
        }
        assert!(camera.pitch >= 0.0);
        assert!(camera.position.z >= camera.target.z - 1e-4);

        for _ in 0..100 {
            camera.orbit(0.0, 0.5);
        }
        assert!(camera.pitch <= 89.0_f32.to_radians() + 1e-6);
    }

    #[test]
    fn test_empty_bounds_still_frame() {
        let mut camera = Camera::new(1.0);
        camera.frame_bounds(&GeometryBounds::empty());
        assert!(camera.distance > 0.0);
        assert!(camera.min_distance > 0.0);
    }

    #[test]
    fn test_controller_damps_to_rest() {
        let mut camera = framed_camera();
        let start_yaw = camera.yaw;
        let mut controller = CameraController::new();
        controller.orbit(0.5, 0.0);

        let mut ticks = 0;
        while controller.has_motion() {
            controller.tick(&mut camera);
            ticks += 1;
            assert!(ticks < 1000, "controller never settled");
        }

        // Motion is spread over several frames and converges near the full
        // requested rotation.
        assert!(ticks > 3);
        assert!((camera.yaw - start_yaw - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_controller_zoom_respects_limits() {
        let mut camera = framed_camera();
        let mut controller = CameraController::new();
        for _ in 0..200 {
            controller.zoom(10.0);
            controller.tick(&mut camera);
        }
        assert!(camera.distance >= camera.min_distance - 1e-4);
    }

    #[test]
    fn test_world_to_screen_center_maps_to_viewport_center() {
        let camera = framed_camera();
        let (x, y) = camera.world_to_screen(camera.target, 800.0, 600.0).unwrap();
        assert!((x - 400.0).abs() < 1.0);
        assert!((y - 300.0).abs() < 1.0);
    }

    #[test]
    fn test_world_behind_camera_is_culled() {
        let camera = framed_camera();
        let behind = camera.position + (camera.position - camera.target);
        assert!(camera.world_to_screen(behind, 800.0, 600.0).is_none());
    }
}
