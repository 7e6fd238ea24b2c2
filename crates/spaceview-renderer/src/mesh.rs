//! Mesh body renderer
//!
//! The building body is drawn in two layers sharing one vertex buffer: an
//! opaque shaded pass and a line-list edge overlay. The edge layer keeps
//! flat walls legible at any zoom, so it is not optional.

use bytemuck::{Pod, Zeroable};
use std::collections::HashSet;
use wgpu::util::DeviceExt;

use spaceview_core::TriangleMesh;

use crate::constants::body;
use crate::pipeline::{PipelineConfig, create_camera_bind_group};
use crate::vertex::MeshVertex;

/// GPU mesh data: the solid body and its edge overlay.
pub struct MeshData {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub edge_index_buffer: wgpu::Buffer,
    pub edge_index_count: u32,
}

impl MeshData {
    /// Upload a parsed mesh. Returns `None` for empty geometry so the
    /// render path can skip the draw entirely.
    pub fn from_mesh(device: &wgpu::Device, mesh: &TriangleMesh) -> Option<Self> {
        if mesh.is_empty() {
            return None;
        }

        tracing::debug!(
            "Creating MeshData: {} vertices, {} triangles",
            mesh.positions.len(),
            mesh.triangle_count()
        );

        let vertices: Vec<MeshVertex> = mesh
            .positions
            .iter()
            .zip(&mesh.normals)
            .map(|(&position, &normal)| MeshVertex {
                position,
                normal,
                color: body::COLOR,
            })
            .collect();

        let edges = extract_edges(&mesh.indices);

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let edge_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Edge Index Buffer"),
            contents: bytemuck::cast_slice(&edges),
            usage: wgpu::BufferUsages::INDEX,
        });

        Some(Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            edge_index_buffer,
            edge_index_count: edges.len() as u32,
        })
    }
}

/// Collect the unique undirected edges of a triangle list as line-list
/// indices.
pub fn extract_edges(indices: &[u32]) -> Vec<u32> {
    let mut seen = HashSet::new();
    let mut edges = Vec::new();

    for chunk in indices.chunks(3) {
        if chunk.len() != 3 {
            continue;
        }
        for (a, b) in [
            (chunk[0], chunk[1]),
            (chunk[1], chunk[2]),
            (chunk[2], chunk[0]),
        ] {
            let key = (a.min(b), a.max(b));
            if seen.insert(key) {
                edges.push(a);
                edges.push(b);
            }
        }
    }

    edges
}

/// Mesh renderer: solid pipeline plus the edge overlay pipeline.
pub struct MeshRenderer {
    solid_pipeline: wgpu::RenderPipeline,
    edge_pipeline: wgpu::RenderPipeline,
    camera_bind_group: wgpu::BindGroup,
    light_bind_group_layout: wgpu::BindGroupLayout,
}

impl MeshRenderer {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
    ) -> Self {
        let camera_bind_group =
            create_camera_bind_group(device, camera_bind_group_layout, camera_buffer, "Mesh");

        let light_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Light Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let solid_pipeline = PipelineConfig::new(
            "Mesh",
            include_str!("shaders/mesh.wgsl"),
            format,
            depth_format,
            &[camera_bind_group_layout, &light_bind_group_layout],
        )
        .with_vertex_layouts(vec![MeshVertex::layout()])
        .build(device);

        // Edges share the mesh vertex buffer; LessEqual lets them win the
        // depth test against the coplanar faces they outline.
        let edge_pipeline = PipelineConfig::new(
            "Mesh Edges",
            include_str!("shaders/edges.wgsl"),
            format,
            depth_format,
            &[camera_bind_group_layout],
        )
        .with_vertex_layouts(vec![MeshVertex::layout()])
        .with_topology(wgpu::PrimitiveTopology::LineList)
        .with_depth(false, wgpu::CompareFunction::LessEqual)
        .build(device);

        Self {
            solid_pipeline,
            edge_pipeline,
            camera_bind_group,
            light_bind_group_layout,
        }
    }

    /// Layout for the light uniform bind group (group 1 of the solid pass).
    pub fn light_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.light_bind_group_layout
    }

    /// Create the light bind group from the renderer's light buffer.
    pub fn create_light_bind_group(
        &self,
        device: &wgpu::Device,
        light_buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Light Bind Group"),
            layout: &self.light_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: light_buffer.as_entire_binding(),
            }],
        })
    }

    pub fn render(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        mesh: &MeshData,
        light_bind_group: &wgpu::BindGroup,
    ) {
        // Solid body
        render_pass.set_pipeline(&self.solid_pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_bind_group(1, light_bind_group, &[]);
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);

        // Edge overlay
        render_pass.set_pipeline(&self.edge_pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        render_pass.set_index_buffer(mesh.edge_index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..mesh.edge_index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_edges_deduplicates_shared_edge() {
        // Two triangles of a quad share the diagonal.
        let edges = extract_edges(&[0, 1, 2, 0, 2, 3]);
        assert_eq!(edges.len(), 5 * 2);
    }

    #[test]
    fn test_extract_edges_single_triangle() {
        let edges = extract_edges(&[0, 1, 2]);
        assert_eq!(edges, vec![0, 1, 1, 2, 2, 0]);
    }

    #[test]
    fn test_extract_edges_empty() {
        assert!(extract_edges(&[]).is_empty());
    }
}
