//! Mesh text parsing
//!
//! The geometry-extraction service delivers one mesh per building as a text
//! blob of line records: `v x y z` vertex positions and `f a b c ...` faces
//! with 1-based vertex references. Everything else is ignored so newer
//! record kinds can be added upstream without breaking older viewers.

mod normals;

pub use normals::smooth_vertex_normals;

/// Indexed triangle mesh produced by [`parse_mesh`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions in file order.
    pub positions: Vec<[f32; 3]>,
    /// Triangle indices into `positions` (3 per triangle).
    pub indices: Vec<u32>,
    /// Smoothed per-vertex normals (same length as `positions`).
    pub normals: Vec<[f32; 3]>,
}

impl TriangleMesh {
    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns true if the mesh has no renderable geometry.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Parse a mesh text blob into an indexed triangle list.
///
/// Malformed input degrades instead of failing: unparseable vertex lines and
/// faces referencing vertices that do not exist are dropped, and empty input
/// yields an empty mesh. Faces with more than three vertices are
/// fan-triangulated from their first vertex, so a quad splits along its
/// first-to-third diagonal.
pub fn parse_mesh(text: &str) -> TriangleMesh {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut faces: Vec<Vec<u32>> = Vec::new();

    for line in text.lines() {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => {
                if let Some(position) = parse_vertex(tokens) {
                    positions.push(position);
                }
            }
            Some("f") => {
                if let Some(face) = parse_face(tokens) {
                    faces.push(face);
                }
            }
            // Unrecognized record kinds (vn, vt, o, comments, ...) are skipped.
            _ => {}
        }
    }

    let vertex_count = positions.len() as u32;
    let mut indices = Vec::new();

    for face in &faces {
        // A single out-of-range reference invalidates the whole face; the
        // rest of the mesh still renders.
        if face.iter().any(|&i| i >= vertex_count) {
            continue;
        }

        // Fan triangulation from the first vertex. Correct for the convex,
        // roughly planar footprints the extractor produces.
        for i in 1..face.len() - 1 {
            indices.push(face[0]);
            indices.push(face[i]);
            indices.push(face[i + 1]);
        }
    }

    let normals = smooth_vertex_normals(&positions, &indices);

    TriangleMesh {
        positions,
        indices,
        normals,
    }
}

fn parse_vertex<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Option<[f32; 3]> {
    let x = tokens.next()?.parse().ok()?;
    let y = tokens.next()?.parse().ok()?;
    let z = tokens.next()?.parse().ok()?;
    Some([x, y, z])
}

/// Parse face vertex references, converting from 1-based to 0-based.
///
/// A composite reference like `7/2/3` carries texture/normal indices we do
/// not model; only the leading position index is used.
fn parse_face<'a>(tokens: impl Iterator<Item = &'a str>) -> Option<Vec<u32>> {
    let mut face = Vec::new();
    for reference in tokens {
        let leading = reference.split('/').next().unwrap_or(reference);
        let index: u32 = leading.parse().ok()?;
        if index == 0 {
            return None;
        }
        face.push(index - 1);
    }
    if face.len() < 3 { None } else { Some(face) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";

    #[test]
    fn test_triangle_passthrough() {
        let mesh = parse_mesh("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_quad_splits_on_first_to_third_diagonal() {
        let mesh = parse_mesh(QUAD);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_ngon_fan_triangulation() {
        let text = "\
v 0 0 0
v 2 0 0
v 3 1 0
v 2 2 0
v 0 2 0
f 1 2 3 4 5
";
        let mesh = parse_mesh(text);
        assert_eq!(mesh.triangle_count(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3, 0, 3, 4]);
    }

    #[test]
    fn test_triangle_count_formula() {
        // 1 triangle + 1 quad + 1 hexagon = 1 + 2 + 4 triangles.
        let text = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 2 0 0
v 2 1 0
f 1 2 3
f 1 2 3 4
f 1 2 3 4 5 6
";
        let mesh = parse_mesh(text);
        assert_eq!(mesh.triangle_count(), 1 + 2 + 4);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = parse_mesh(QUAD);
        let second = parse_mesh(QUAD);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        let mesh = parse_mesh("");
        assert!(mesh.is_empty());
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.positions.is_empty());
    }

    #[test]
    fn test_out_of_range_face_dropped() {
        let text = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
f 1 2 9
";
        let mesh = parse_mesh(text);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_composite_reference_uses_leading_index() {
        let text = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1/4/2 2/5/2 3/6/2
";
        let mesh = parse_mesh(text);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_unknown_records_ignored() {
        let text = "\
# generated by extractor
o building
v 0 0 0
vn 0 0 1
v 1 0 0
vt 0.5 0.5
v 0 1 0
s off
f 1 2 3
";
        let mesh = parse_mesh(text);
        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_malformed_vertex_line_skipped() {
        let mesh = parse_mesh("v 0 0\nv a b c\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn test_normals_cover_every_vertex() {
        let mesh = parse_mesh(QUAD);
        assert_eq!(mesh.normals.len(), mesh.positions.len());
        for n in &mesh.normals {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }
}
