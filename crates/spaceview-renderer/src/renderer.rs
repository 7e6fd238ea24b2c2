//! Main renderer combining all sub-renderers

use wgpu::util::DeviceExt;

use spaceview_core::{GeometryBounds, Room, parse_mesh};

use crate::axis::AxisRenderer;
use crate::camera::{Camera, CameraController};
use crate::config::RendererConfig;
use crate::constants::viewport::{CLEAR_COLOR, SAMPLE_COUNT};
use crate::grid::GridRenderer;
use crate::label::{RoomLabel, build_labels};
use crate::light::DirectionalLight;
use crate::mesh::{MeshData, MeshRenderer};

/// Renderable state owned by one viewing session.
///
/// Dropping the scene releases its GPU buffers; [`Renderer::load_scene`]
/// always drops the previous scene before building a replacement so no
/// resources from a torn-down session outlive it.
struct Scene {
    mesh: Option<MeshData>,
    rooms: Vec<Room>,
    labels: Vec<RoomLabel>,
    bounds: GeometryBounds,
}

/// Main renderer
pub struct Renderer {
    camera: Camera,
    controller: CameraController,
    camera_buffer: wgpu::Buffer,
    camera_bind_group_layout: wgpu::BindGroupLayout,
    light: DirectionalLight,
    light_buffer: wgpu::Buffer,
    light_bind_group: wgpu::BindGroup,
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
    // MSAA color texture (for multisampling)
    msaa_texture: Option<wgpu::Texture>,
    msaa_view: Option<wgpu::TextureView>,

    // Sub-renderers
    grid_renderer: GridRenderer,
    axis_renderer: AxisRenderer,
    mesh_renderer: MeshRenderer,

    scene: Option<Scene>,

    // Display options
    pub show_grid: bool,
    pub show_axes: bool,
    pub show_labels: bool,
    show_load_overlay: bool,

    clear_color: wgpu::Color,
    format: wgpu::TextureFormat,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let depth_format = wgpu::TextureFormat::Depth32Float;

        let camera = Camera::new(width as f32 / height as f32);
        let camera_uniform = camera.uniform();

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let light = DirectionalLight::new();
        let light_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Buffer"),
            contents: bytemuck::cast_slice(&[light.uniform()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let (depth_texture, depth_view) = Self::create_depth_texture(device, width, height);
        let (msaa_texture, msaa_view) = match Self::create_msaa_texture(device, format, width, height)
        {
            Some((tex, view)) => (Some(tex), Some(view)),
            None => (None, None),
        };

        let grid_renderer = GridRenderer::new(
            device,
            format,
            depth_format,
            &camera_bind_group_layout,
            &camera_buffer,
        );

        let axis_renderer = AxisRenderer::new(
            device,
            format,
            depth_format,
            &camera_bind_group_layout,
            &camera_buffer,
        );

        let mesh_renderer = MeshRenderer::new(
            device,
            format,
            depth_format,
            &camera_bind_group_layout,
            &camera_buffer,
        );

        let light_bind_group = mesh_renderer.create_light_bind_group(device, &light_buffer);

        Self {
            camera,
            controller: CameraController::new(),
            camera_buffer,
            camera_bind_group_layout,
            light,
            light_buffer,
            light_bind_group,
            depth_texture,
            depth_view,
            msaa_texture,
            msaa_view,
            grid_renderer,
            axis_renderer,
            mesh_renderer,
            scene: None,
            show_grid: true,
            show_axes: true,
            show_labels: true,
            show_load_overlay: false,
            clear_color: CLEAR_COLOR,
            format,
            width,
            height,
        }
    }

    /// Apply renderer configuration (theme colors, lighting, camera FOV).
    pub fn apply_config(&mut self, device: &wgpu::Device, config: &RendererConfig) {
        let [r, g, b, a] = config.viewport.background_color;
        self.clear_color = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        };

        self.light.apply_config(&config.lighting);
        self.camera.fov = config.camera.fov_degrees.clamp(10.0, 120.0).to_radians();

        let bounds = self
            .scene
            .as_ref()
            .map(|s| s.bounds)
            .unwrap_or_default();
        self.grid_renderer
            .apply_config(device, config.grid.clone(), &bounds);
    }

    // ========== Scene lifecycle ==========

    /// Load a new mesh and room list, replacing any previous scene.
    ///
    /// The previous scene's GPU buffers are dropped before the new ones are
    /// created, and the camera, grid, axes and light are re-derived from
    /// the new geometry bounds.
    pub fn load_scene(&mut self, device: &wgpu::Device, mesh_text: &str, rooms: &[Room]) {
        // Dispose before rebuild.
        self.scene = None;

        let mesh = parse_mesh(mesh_text);
        let bounds = GeometryBounds::from_positions(&mesh.positions);

        tracing::info!(
            "Loading scene: {} triangles, {} rooms, characteristic dimension {:.2}",
            mesh.triangle_count(),
            rooms.len(),
            bounds.characteristic_dimension()
        );

        self.grid_renderer.rebuild(device, &bounds);
        self.axis_renderer.rebuild(device, &bounds);
        self.light.place_for_bounds(&bounds);
        self.camera.frame_bounds(&bounds);

        self.scene = Some(Scene {
            mesh: MeshData::from_mesh(device, &mesh),
            labels: build_labels(rooms, self.show_load_overlay),
            rooms: rooms.to_vec(),
            bounds,
        });
    }

    /// Drop the current scene and its GPU resources.
    pub fn clear_scene(&mut self) {
        self.scene = None;
    }

    /// Returns true once a scene has been loaded.
    pub fn has_scene(&self) -> bool {
        self.scene.is_some()
    }

    /// Labels for the current scene, name-only or with load lines
    /// depending on the overlay setting at build time.
    pub fn labels(&self) -> &[RoomLabel] {
        self.scene.as_ref().map(|s| s.labels.as_slice()).unwrap_or(&[])
    }

    /// Whether load figures are added to labels.
    pub fn load_overlay(&self) -> bool {
        self.show_load_overlay
    }

    /// Toggle the load overlay; labels are resynthesized from the room
    /// metadata kept with the scene.
    pub fn set_load_overlay(&mut self, enabled: bool) {
        if self.show_load_overlay == enabled {
            return;
        }
        self.show_load_overlay = enabled;
        if let Some(scene) = &mut self.scene {
            scene.labels = build_labels(&scene.rooms, enabled);
        }
    }

    // ========== Camera ==========

    /// Get a reference to the camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Get a mutable reference to the camera.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Queue an orbit rotation; applied with damping on the next frames.
    pub fn queue_orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.controller.orbit(delta_yaw, delta_pitch);
    }

    /// Queue a pan; applied with damping on the next frames.
    pub fn queue_pan(&mut self, delta_x: f32, delta_y: f32) {
        self.controller.pan(delta_x, delta_y);
    }

    /// Queue a zoom step; applied with damping on the next frames.
    pub fn queue_zoom(&mut self, delta: f32) {
        self.controller.zoom(delta);
    }

    /// Frame the whole scene in view.
    pub fn fit_view(&mut self) {
        if let Some(scene) = &self.scene {
            let radius = scene.bounds.size().length() * 0.5;
            let center = scene.bounds.center();
            self.camera
                .fit_all(center, radius.max(scene.bounds.characteristic_dimension() * 0.25));
        }
    }

    // ========== Surface ==========

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        self.camera.update_aspect(width as f32 / height as f32);

        let (depth_texture, depth_view) = Self::create_depth_texture(device, width, height);
        self.depth_texture = depth_texture;
        self.depth_view = depth_view;

        let (msaa_texture, msaa_view) =
            match Self::create_msaa_texture(device, self.format, width, height) {
                Some((tex, view)) => (Some(tex), Some(view)),
                None => (None, None),
            };
        self.msaa_texture = msaa_texture;
        self.msaa_view = msaa_view;
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: SAMPLE_COUNT,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }

    fn create_msaa_texture(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Option<(wgpu::Texture, wgpu::TextureView)> {
        if SAMPLE_COUNT <= 1 {
            return None;
        }
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("MSAA Color Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: SAMPLE_COUNT,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Some((texture, view))
    }

    // ========== Frame ==========

    /// Render one frame.
    ///
    /// Applies one tick of damped camera motion, uploads the camera and
    /// light uniforms, then draws grid, mesh body and axes.
    pub fn render(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        queue: &wgpu::Queue,
    ) {
        self.controller.tick(&mut self.camera);

        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera.uniform()]),
        );
        queue.write_buffer(
            &self.light_buffer,
            0,
            bytemuck::cast_slice(&[self.light.uniform()]),
        );

        // With MSAA enabled, render to the multisample texture and resolve
        // into the output view.
        let color_attachment = if let Some(msaa_view) = &self.msaa_view {
            wgpu::RenderPassColorAttachment {
                view: msaa_view,
                resolve_target: Some(view),
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            }
        } else {
            wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            }
        };

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Main Render Pass"),
            color_attachments: &[Some(color_attachment)],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if self.show_grid {
            self.grid_renderer.render(&mut render_pass);
        }

        if let Some(scene) = &self.scene
            && let Some(mesh) = &scene.mesh
        {
            self.mesh_renderer
                .render(&mut render_pass, mesh, &self.light_bind_group);
        }

        if self.show_axes {
            self.axis_renderer.render(&mut render_pass);
        }
    }

    /// Get camera bind group layout for external use
    pub fn camera_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.camera_bind_group_layout
    }
}
