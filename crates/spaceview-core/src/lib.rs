//! CPU-side data model for the space viewer.
//!
//! This crate holds everything the renderer consumes but that does not touch
//! the GPU: the mesh text parser, geometry bounds, and the room metadata
//! supplied by the geometry-extraction and load-calculation services.

pub mod bounds;
pub mod mesh;
pub mod room;

pub use bounds::GeometryBounds;
pub use mesh::{TriangleMesh, parse_mesh};
pub use room::{LoadFigures, Room, RoomError, merge_loads, parse_load_figures, parse_rooms};
