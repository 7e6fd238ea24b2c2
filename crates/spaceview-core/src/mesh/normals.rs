//! Normal calculation utilities for mesh data

/// Calculate smoothed per-vertex normals from triangle topology.
///
/// Each triangle's unnormalized cross product is accumulated into its three
/// vertices, which weighs contributions by triangle area, then the sums are
/// normalized. Vertices referenced by no triangle get an up-facing normal.
pub fn smooth_vertex_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut normals = vec![[0.0f32; 3]; positions.len()];

    for chunk in indices.chunks(3) {
        if chunk.len() != 3 {
            continue;
        }

        let v0 = positions[chunk[0] as usize];
        let v1 = positions[chunk[1] as usize];
        let v2 = positions[chunk[2] as usize];

        let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
        let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];

        let cross = [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ];

        for &idx in chunk {
            let n = &mut normals[idx as usize];
            n[0] += cross[0];
            n[1] += cross[1];
            n[2] += cross[2];
        }
    }

    for n in &mut normals {
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        if len > 0.0 {
            n[0] /= len;
            n[1] /= len;
            n[2] /= len;
        } else {
            *n = [0.0, 0.0, 1.0];
        }
    }

    normals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_triangle_normal() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let normals = smooth_vertex_normals(&positions, &[0, 1, 2]);
        for n in &normals {
            assert!((n[0]).abs() < 1e-6);
            assert!((n[1]).abs() < 1e-6);
            assert!((n[2] - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_unreferenced_vertex_gets_default_normal() {
        let positions = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [5.0, 5.0, 5.0],
        ];
        let normals = smooth_vertex_normals(&positions, &[0, 1, 2]);
        assert_eq!(normals[3], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_shared_vertex_averages_faces() {
        // Two triangles folded along the Y axis, one facing +Z and one +X;
        // the shared edge vertices end up between the two face normals.
        let positions = [
            [0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 0.0, -1.0],
        ];
        let normals = smooth_vertex_normals(&positions, &[0, 2, 1, 0, 3, 1]);
        let shared = normals[0];
        assert!(shared[0] > 0.0);
        assert!(shared[2] > 0.0);
        let len =
            (shared[0] * shared[0] + shared[1] * shared[1] + shared[2] * shared[2]).sqrt();
        assert!((len - 1.0).abs() < 1e-5);
    }
}
