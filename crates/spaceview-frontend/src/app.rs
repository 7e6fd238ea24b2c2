//! Application shell: menu, input loading, viewport hosting.

use std::sync::Arc;

use parking_lot::Mutex;

use spaceview_core::{Room, merge_loads, parse_load_figures, parse_rooms};
use spaceview_renderer::RendererConfig;
use spaceview_renderer::config::{GridConfig, ViewportConfig};

use crate::viewport::ViewportPanel;
use crate::viewport_state::{SharedViewportState, ViewportState};

/// Startup errors surfaced to the caller instead of showing a blank view.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("wgpu render state unavailable; the viewer requires the wgpu backend")]
    RenderStateUnavailable,
}

/// The viewer application.
pub struct SpaceViewApp {
    render_state: egui_wgpu::RenderState,
    viewport_state: SharedViewportState,
    viewport: ViewportPanel,
    /// Mesh text kept so the scene can be rebuilt when rooms change.
    mesh_text: Option<String>,
    rooms: Vec<Room>,
    config: RendererConfig,
    status: String,
}

impl SpaceViewApp {
    /// Create the app. Fails if eframe could not set up a wgpu context;
    /// there is nothing useful this viewer can do without one.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Result<Self, AppError> {
        let render_state = cc
            .wgpu_render_state
            .clone()
            .ok_or(AppError::RenderStateUnavailable)?;

        let config = RendererConfig::default();
        let viewport_state = Arc::new(Mutex::new(ViewportState::new(
            render_state.device.clone(),
            render_state.queue.clone(),
            render_state.target_format,
            &config.viewer,
        )));

        Ok(Self {
            render_state,
            viewport_state,
            viewport: ViewportPanel::new(),
            mesh_text: None,
            rooms: Vec::new(),
            config,
            status: "No building loaded".to_string(),
        })
    }

    fn set_theme(&mut self, ctx: &egui::Context, dark: bool) {
        if dark {
            self.config.viewport = ViewportConfig::dark();
            self.config.grid = GridConfig::dark();
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            self.config.viewport = ViewportConfig::light();
            self.config.grid = GridConfig::light();
            ctx.set_visuals(egui::Visuals::light());
        }

        let mut state = self.viewport_state.lock();
        let device = state.device.clone();
        state.renderer.apply_config(&device, &self.config);
    }

    fn open_mesh(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Mesh text", &["obj", "txt"])
            .pick_file()
        else {
            return;
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => {
                self.mesh_text = Some(text);
                self.rebuild_scene();
                self.status = format!("Loaded mesh from {}", path.display());
            }
            Err(e) => {
                tracing::warn!("Failed to read mesh file: {e}");
                self.status = format!("Failed to read {}: {e}", path.display());
            }
        }
    }

    fn open_rooms(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Room list", &["json"])
            .pick_file()
        else {
            return;
        };

        let parsed = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|text| parse_rooms(&text).map_err(|e| e.to_string()));

        match parsed {
            Ok(rooms) => {
                self.status = format!("Loaded {} rooms", rooms.len());
                self.rooms = rooms;
                self.rebuild_scene();
            }
            Err(e) => {
                tracing::warn!("Failed to load room list: {e}");
                self.status = format!("Failed to load rooms: {e}");
            }
        }
    }

    fn open_load_figures(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Load figures", &["json"])
            .pick_file()
        else {
            return;
        };

        let parsed = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|text| parse_load_figures(&text).map_err(|e| e.to_string()));

        match parsed {
            Ok(figures) => {
                merge_loads(&mut self.rooms, &figures);
                self.status = format!("Merged {} load figures", figures.len());
                self.rebuild_scene();
            }
            Err(e) => {
                tracing::warn!("Failed to load figures: {e}");
                self.status = format!("Failed to load figures: {e}");
            }
        }
    }

    /// Rebuild the scene from the current mesh text and room list.
    fn rebuild_scene(&mut self) {
        if let Some(mesh_text) = &self.mesh_text {
            self.viewport_state.lock().load_scene(mesh_text, &self.rooms);
        }
    }
}

impl eframe::App for SpaceViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Mesh…").clicked() {
                        ui.close_menu();
                        self.open_mesh();
                    }
                    if ui.button("Open Rooms…").clicked() {
                        ui.close_menu();
                        self.open_rooms();
                    }
                    if ui.button("Open Load Figures…").clicked() {
                        ui.close_menu();
                        self.open_load_figures();
                    }
                    ui.separator();
                    if ui.button("Close Building").clicked() {
                        ui.close_menu();
                        self.mesh_text = None;
                        self.rooms.clear();
                        self.viewport_state.lock().renderer.clear_scene();
                        self.status = "No building loaded".to_string();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.button("Dark theme").clicked() {
                        ui.close_menu();
                        self.set_theme(ctx, true);
                    }
                    if ui.button("Light theme").clicked() {
                        ui.close_menu();
                        self.set_theme(ctx, false);
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(&self.status);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.viewport.ui(
                    ui,
                    &self.render_state,
                    &self.viewport_state,
                    &self.config.camera,
                );
            });

        // Continuous frame loop: damped camera motion is applied per frame,
        // so keep redrawing until the window closes.
        ctx.request_repaint();
    }
}
