//! Orientation axis renderer
//!
//! Draws the X/Y/Z orientation triad at the model's footprint center,
//! scaled to half the characteristic dimension. Vertices are regenerated
//! per scene load, the same way the grid is.

use glam::Vec3;
use wgpu::util::DeviceExt;

use spaceview_core::GeometryBounds;

use crate::constants::axis as constants;
use crate::pipeline::{PipelineConfig, create_camera_bind_group};
use crate::vertex::PositionColorVertex;

/// Axis renderer for world orientation
pub struct AxisRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    bind_group: wgpu::BindGroup,
}

impl AxisRenderer {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
    ) -> Self {
        let bind_group =
            create_camera_bind_group(device, camera_bind_group_layout, camera_buffer, "Axis");

        let pipeline = PipelineConfig::new(
            "Axis",
            include_str!("shaders/axis.wgsl"),
            format,
            depth_format,
            &[camera_bind_group_layout],
        )
        .with_vertex_layouts(vec![PositionColorVertex::layout()])
        .with_topology(wgpu::PrimitiveTopology::LineList)
        .build(device);

        let vertices = generate_axis_vertices(&GeometryBounds::empty());
        let vertex_count = vertices.len() as u32;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Axis Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            pipeline,
            vertex_buffer,
            vertex_count,
            bind_group,
        }
    }

    /// Regenerate the axis triad for newly loaded geometry.
    pub fn rebuild(&mut self, device: &wgpu::Device, bounds: &GeometryBounds) {
        let vertices = generate_axis_vertices(bounds);
        self.vertex_count = vertices.len() as u32;
        self.vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Axis Vertex Buffer"),
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

/// Generate axis vertices (X=red, Y=green, Z=blue) at the footprint center.
pub fn generate_axis_vertices(bounds: &GeometryBounds) -> Vec<PositionColorVertex> {
    let scale = bounds.characteristic_dimension() * constants::SCALE_FACTOR;
    let center = bounds.center();
    let origin = Vec3::new(center.x, center.y, bounds.floor_z());

    let axes = [
        (Vec3::X, [1.0, 0.0, 0.0]),
        (Vec3::Y, [0.0, 1.0, 0.0]),
        (Vec3::Z, [0.0, 0.0, 1.0]),
    ];

    let mut vertices = Vec::with_capacity(6);
    for (direction, color) in axes {
        vertices.push(PositionColorVertex {
            position: origin.to_array(),
            color,
        });
        vertices.push(PositionColorVertex {
            position: (origin + direction * scale).to_array(),
            color,
        });
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_scale_to_half_the_dimension() {
        let bounds = GeometryBounds::from_positions(&[[0.0, 0.0, 0.0], [8.0, 6.0, 4.0]]);
        let vertices = generate_axis_vertices(&bounds);
        assert_eq!(vertices.len(), 6);

        // X axis tip sits half the characteristic dimension from the origin.
        let origin = Vec3::from_array(vertices[0].position);
        let tip = Vec3::from_array(vertices[1].position);
        assert!(((tip - origin).length() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_axes_sit_on_the_floor() {
        let bounds = GeometryBounds::from_positions(&[[0.0, 0.0, 1.0], [4.0, 4.0, 4.0]]);
        let vertices = generate_axis_vertices(&bounds);
        assert_eq!(vertices[0].position[2], 1.0);
    }
}
