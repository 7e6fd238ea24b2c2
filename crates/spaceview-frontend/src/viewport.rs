//! 3D Viewport panel

use glam::Vec3;

use spaceview_renderer::RoomLabel;
use spaceview_renderer::config::CameraConfig;

use crate::viewport_state::SharedViewportState;

/// Label panel fill, dark enough to contrast with the scene background.
const PANEL_COLOR: egui::Color32 = egui::Color32::from_rgba_premultiplied(28, 30, 36, 230);

/// 3D viewport panel
pub struct ViewportPanel {
    last_size: egui::Vec2,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            last_size: egui::Vec2::ZERO,
        }
    }

    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        render_state: &egui_wgpu::RenderState,
        viewport_state: &SharedViewportState,
        camera_config: &CameraConfig,
    ) {
        // Toolbar
        ui.horizontal(|ui| {
            let mut state = viewport_state.lock();

            ui.label("View:");
            if ui.button("Top").clicked() {
                state.renderer.camera_mut().set_top_view();
            }
            if ui.button("Front").clicked() {
                state.renderer.camera_mut().set_front_view();
            }
            if ui.button("Side").clicked() {
                state.renderer.camera_mut().set_side_view();
            }
            if ui.button("Fit All").clicked() {
                state.renderer.fit_view();
            }

            ui.separator();

            ui.checkbox(&mut state.renderer.show_grid, "Grid");
            ui.checkbox(&mut state.renderer.show_axes, "Axes");
            ui.checkbox(&mut state.renderer.show_labels, "Labels");

            let mut overlay = state.renderer.load_overlay();
            if ui.checkbox(&mut overlay, "Loads").changed() {
                state.renderer.set_load_overlay(overlay);
            }
        });

        // Main viewport area
        let available_size = ui.available_size();
        let width = available_size.x as u32;
        let height = available_size.y as u32;

        if width == 0 || height == 0 {
            return;
        }

        // Ensure texture and render
        let texture_id = {
            let mut state = viewport_state.lock();
            let mut egui_renderer = render_state.renderer.write();
            let tex_id = state.ensure_texture(width, height, &mut egui_renderer);
            state.render();
            tex_id
        };

        // Display the rendered texture
        let response = ui.add(
            egui::Image::new(egui::load::SizedTexture::new(
                texture_id,
                [available_size.x, available_size.y],
            ))
            .sense(egui::Sense::click_and_drag()),
        );

        let mut state = viewport_state.lock();

        // Primary drag orbits, secondary drag pans; both are queued and
        // consumed with damping on the next frame ticks.
        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta();
            state.renderer.queue_orbit(
                -delta.x * camera_config.orbit_sensitivity,
                delta.y * camera_config.orbit_sensitivity,
            );
        }

        if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta();
            state.renderer.queue_pan(delta.x, delta.y);
        }

        // Zoom with scroll
        if response.hovered() {
            let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll_delta != 0.0 {
                state
                    .renderer
                    .queue_zoom(scroll_delta * camera_config.zoom_sensitivity);
            }
        }

        // Screen-space overlays on top of the rendered image.
        let painter = ui.painter_at(response.rect);

        if state.renderer.show_labels {
            for label in state.renderer.labels() {
                paint_label(&painter, response.rect, state.renderer.camera(), label);
            }
        }

        if !state.renderer.has_scene() {
            painter.text(
                response.rect.center(),
                egui::Align2::CENTER_CENTER,
                "No building loaded\nFile → Open Mesh…",
                egui::FontId::proportional(16.0),
                egui::Color32::GRAY,
            );
        }

        let yaw = state.renderer.camera().yaw;
        let pitch = state.renderer.camera().pitch;
        drop(state);

        paint_axes_indicator(&painter, response.rect, yaw, pitch);

        self.last_size = available_size;
    }
}

impl Default for ViewportPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Paint one room label billboard.
///
/// The anchor is projected through the camera and the panel is drawn in
/// screen space, sized by the label's world dimensions at that depth, so
/// it always faces the camera and is never occluded by geometry.
fn paint_label(
    painter: &egui::Painter,
    rect: egui::Rect,
    camera: &spaceview_renderer::Camera,
    label: &RoomLabel,
) {
    let Some((sx, sy)) = camera.world_to_screen(label.anchor, rect.width(), rect.height()) else {
        return;
    };

    let pixels_per_unit = camera.pixels_per_unit(label.anchor, rect.height());
    let panel_width = label.panel_width * pixels_per_unit;
    let panel_height = label.panel_height * pixels_per_unit;
    if panel_width < 4.0 {
        // Too far away to read; skip instead of painting a smudge.
        return;
    }

    let center = rect.min + egui::vec2(sx, sy);
    let panel = egui::Rect::from_center_size(center, egui::vec2(panel_width, panel_height));
    painter.rect_filled(panel, panel_height * 0.2, PANEL_COLOR);

    let has_loads = label.lines.len() > 1;
    let name_size = if has_loads {
        panel_height * 0.32
    } else {
        panel_height * 0.55
    };
    let load_size = name_size * 0.7;

    let line_gap = name_size * 0.2;
    let total = name_size
        + label.lines[1..]
            .iter()
            .map(|_| load_size + line_gap)
            .sum::<f32>();
    let mut y = center.y - total * 0.5;

    for (i, line) in label.lines.iter().enumerate() {
        let (size, color) = match i {
            0 => (name_size, egui::Color32::WHITE),
            1 => (load_size, egui::Color32::from_rgb(120, 180, 255)),
            _ => (load_size, egui::Color32::from_rgb(255, 165, 90)),
        };
        painter.text(
            egui::pos2(center.x, y),
            egui::Align2::CENTER_TOP,
            line,
            egui::FontId::proportional(size),
            color,
        );
        y += size + line_gap;
    }
}

/// Paint the screen-corner orientation indicator.
fn paint_axes_indicator(painter: &egui::Painter, rect: egui::Rect, yaw: f32, pitch: f32) {
    let axes_center = rect.right_bottom() - egui::vec2(50.0, 50.0);
    let axis_len = 30.0;

    // Camera basis vectors from the orbit angles.
    let forward = Vec3::new(
        -pitch.cos() * yaw.cos(),
        -pitch.cos() * yaw.sin(),
        -pitch.sin(),
    );
    let world_up = Vec3::Z;
    let right = forward.cross(world_up).normalize();
    let up = right.cross(forward).normalize();

    let project_axis = |world_axis: Vec3| -> (egui::Vec2, f32) {
        let x = world_axis.dot(right);
        let y = world_axis.dot(up);
        let z = world_axis.dot(forward);
        (egui::vec2(x * axis_len, -y * axis_len), z)
    };

    let (x_dir, x_depth) = project_axis(Vec3::X);
    let (y_dir, y_depth) = project_axis(Vec3::Y);
    let (z_dir, z_depth) = project_axis(Vec3::Z);

    let mut axes = [
        (x_depth, x_dir, "X", egui::Color32::from_rgb(255, 68, 68)),
        (y_depth, y_dir, "Y", egui::Color32::from_rgb(68, 255, 68)),
        (z_depth, z_dir, "Z", egui::Color32::from_rgb(68, 68, 255)),
    ];
    axes.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    for (_depth, dir, label, color) in axes {
        painter.line_segment(
            [axes_center, axes_center + dir],
            egui::Stroke::new(2.0, color),
        );

        let label_offset = dir.normalized() * 8.0;
        painter.text(
            axes_center + dir + label_offset,
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::default(),
            color,
        );
    }
}
