//! Ground grid renderer
//!
//! The reference grid is regenerated whenever a mesh is loaded: it spans
//! roughly twice the characteristic dimension around the model's footprint
//! and snaps to the lowest point of the geometry.

use wgpu::util::DeviceExt;

use spaceview_core::GeometryBounds;

use crate::config::GridConfig;
use crate::constants::grid as constants;
use crate::pipeline::{PipelineConfig, create_camera_bind_group};
use crate::vertex::PositionColorVertex;

/// Grid renderer
pub struct GridRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    bind_group: wgpu::BindGroup,
    config: GridConfig,
}

impl GridRenderer {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
    ) -> Self {
        let bind_group =
            create_camera_bind_group(device, camera_bind_group_layout, camera_buffer, "Grid");

        let pipeline = PipelineConfig::new(
            "Grid",
            include_str!("shaders/grid.wgsl"),
            format,
            depth_format,
            &[camera_bind_group_layout],
        )
        .with_vertex_layouts(vec![PositionColorVertex::layout()])
        .with_topology(wgpu::PrimitiveTopology::LineList)
        .build(device);

        let config = GridConfig::default();
        let vertices = generate_grid_vertices(&GeometryBounds::empty(), &config);
        let vertex_count = vertices.len() as u32;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grid Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            pipeline,
            vertex_buffer,
            vertex_count,
            bind_group,
            config,
        }
    }

    /// Apply new grid colors (theme change) and regenerate.
    pub fn apply_config(
        &mut self,
        device: &wgpu::Device,
        config: GridConfig,
        bounds: &GeometryBounds,
    ) {
        self.config = config;
        self.rebuild(device, bounds);
    }

    /// Regenerate the grid for newly loaded geometry. The previous vertex
    /// buffer is dropped and released.
    pub fn rebuild(&mut self, device: &wgpu::Device, bounds: &GeometryBounds) {
        let vertices = generate_grid_vertices(bounds, &self.config);
        self.vertex_count = vertices.len() as u32;
        self.vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grid Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
    }

    pub fn render(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.vertex_count, 0..1);
    }
}

/// Pick a grid spacing near `dimension / TARGET_DIVISIONS`, rounded to a
/// 1/2/5 step so the cell size reads as a sensible unit.
pub fn nice_spacing(dimension: f32) -> f32 {
    let target = dimension / constants::TARGET_DIVISIONS;
    let magnitude = 10.0_f32.powf(target.log10().floor());
    let normalized = target / magnitude;

    let step = if normalized < 1.5 {
        1.0
    } else if normalized < 3.5 {
        2.0
    } else if normalized < 7.5 {
        5.0
    } else {
        10.0
    };

    step * magnitude
}

/// Generate grid line vertices centered under the geometry at its lowest
/// point.
pub fn generate_grid_vertices(
    bounds: &GeometryBounds,
    config: &GridConfig,
) -> Vec<PositionColorVertex> {
    let dim = bounds.characteristic_dimension();
    let half_size = dim * constants::EXTENT_FACTOR;
    let spacing = nice_spacing(dim);
    let center = bounds.center();
    let z = bounds.floor_z();

    let num_lines = (half_size / spacing) as i32;
    let mut vertices = Vec::new();

    // Lines parallel to X axis
    for i in -num_lines..=num_lines {
        let y = center.y + i as f32 * spacing;
        let color = if i == 0 {
            config.x_axis_color
        } else {
            config.line_color
        };

        vertices.push(PositionColorVertex {
            position: [center.x - half_size, y, z],
            color,
        });
        vertices.push(PositionColorVertex {
            position: [center.x + half_size, y, z],
            color,
        });
    }

    // Lines parallel to Y axis
    for i in -num_lines..=num_lines {
        let x = center.x + i as f32 * spacing;
        let color = if i == 0 {
            config.y_axis_color
        } else {
            config.line_color
        };

        vertices.push(PositionColorVertex {
            position: [x, center.y - half_size, z],
            color,
        });
        vertices.push(PositionColorVertex {
            position: [x, center.y + half_size, z],
            color,
        });
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_spacing_rounds_to_125() {
        assert!((nice_spacing(8.0) - 1.0).abs() < 1e-5);
        assert!((nice_spacing(16.0) - 2.0).abs() < 1e-5);
        assert!((nice_spacing(40.0) - 5.0).abs() < 1e-5);
        assert!((nice_spacing(80.0) - 10.0).abs() < 1e-4);
        assert!((nice_spacing(0.8) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_grid_spans_twice_the_dimension() {
        let bounds = GeometryBounds::from_positions(&[[0.0, 0.0, 0.0], [20.0, 10.0, 5.0]]);
        let vertices = generate_grid_vertices(&bounds, &GridConfig::default());

        let min_x = vertices
            .iter()
            .map(|v| v.position[0])
            .fold(f32::INFINITY, f32::min);
        let max_x = vertices
            .iter()
            .map(|v| v.position[0])
            .fold(f32::NEG_INFINITY, f32::max);

        assert_eq!(max_x - min_x, 2.0 * bounds.characteristic_dimension());
    }

    #[test]
    fn test_grid_snaps_to_lowest_point() {
        let bounds = GeometryBounds::from_positions(&[[0.0, 0.0, -2.5], [4.0, 4.0, 3.0]]);
        let vertices = generate_grid_vertices(&bounds, &GridConfig::default());
        assert!(vertices.iter().all(|v| v.position[2] == -2.5));
    }

    #[test]
    fn test_empty_bounds_still_produce_a_grid() {
        let vertices = generate_grid_vertices(&GeometryBounds::empty(), &GridConfig::default());
        assert!(!vertices.is_empty());
    }
}
