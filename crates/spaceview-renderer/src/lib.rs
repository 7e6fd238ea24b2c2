//! Space Viewer Renderer
//!
//! WGPU-based 3D rendering for the building space viewer: an orbit camera,
//! a ground grid and orientation axes sized from the loaded geometry, the
//! solid+wireframe mesh body, and screen-space room label placement.

pub mod axis;
pub mod camera;
pub mod config;
pub mod constants;
pub mod grid;
pub mod label;
pub mod light;
pub mod mesh;
pub mod pipeline;
pub mod renderer;
pub mod vertex;

pub use camera::{Camera, CameraController, CameraUniform};
pub use config::{RendererConfig, ViewerConfig};
pub use label::RoomLabel;
pub use light::{DirectionalLight, LightUniform};
pub use renderer::Renderer;
pub use vertex::{MeshVertex, PositionColorVertex};
