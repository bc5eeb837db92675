//! Triangle mesh representation.

use crate::vecutils;
use crate::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Type for holding vertex indices for a triangle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriangleIndex(pub usize, pub usize, pub usize);

/// A triangle mesh defined by vertices and optional face indices.
///
/// When `faces` is `None` the mesh represents only points or a polyline
/// (e.g. a shadow ray), with connectivity implied by the consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Point>,
    pub faces: Option<Vec<TriangleIndex>>,
}

impl Mesh {
    /// Creates a new mesh with the given vertices and optional faces.
    pub fn new(vertices: Vec<Point>, faces: Option<Vec<TriangleIndex>>) -> Self {
        Self { vertices, faces }
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces (triangles).
    pub fn face_count(&self) -> usize {
        self.faces.as_ref().map_or(0, |f| f.len())
    }

    /// Returns true if the mesh has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns true if every face index points at an existing vertex.
    ///
    /// Loaders check this before a mesh is allowed anywhere near the
    /// projector; a mesh without faces is trivially in bounds.
    pub fn faces_in_bounds(&self) -> bool {
        let vc = self.vertices.len();
        match &self.faces {
            Some(faces) => faces.iter().all(|t| t.0 < vc && t.1 < vc && t.2 < vc),
            None => true,
        }
    }

    /// Height of the mesh above the ground plane in meters.
    ///
    /// Vertices are ground-referenced (z >= 0), so this is the maximum z
    /// clamped at zero. An empty mesh has zero height.
    pub fn bounding_height(&self) -> f64 {
        if self.vertices.is_empty() {
            return 0.0;
        }
        let zs: Vec<f64> = self.vertices.iter().map(|p| p.z).collect();
        vecutils::max(&zs).max(0.0)
    }

    /// Returns a new mesh with duplicate vertices merged.
    ///
    /// Vertices are considered identical when they quantize to the same
    /// `(i64, i64, i64)` key at 1e9 scale (≈ 1 nm precision). Face indices
    /// are remapped accordingly. If no faces are present, returns self
    /// unchanged.
    pub fn deduplicate_vertices(self) -> Self {
        let faces = match self.faces {
            Some(ref f) => f,
            None => return self,
        };

        const SCALE: f64 = 1e9;

        let mut key_map: HashMap<(i64, i64, i64), usize> = HashMap::new();
        let mut new_vertices: Vec<Point> = Vec::new();
        let mut old_to_new: Vec<usize> = Vec::with_capacity(self.vertices.len());

        for p in &self.vertices {
            let key = (
                (p.x * SCALE).round() as i64,
                (p.y * SCALE).round() as i64,
                (p.z * SCALE).round() as i64,
            );
            let new_idx = match key_map.get(&key) {
                Some(&idx) => idx,
                None => {
                    let idx = new_vertices.len();
                    new_vertices.push(*p);
                    key_map.insert(key, idx);
                    idx
                }
            };
            old_to_new.push(new_idx);
        }

        let new_faces: Vec<TriangleIndex> = faces
            .iter()
            .map(|t| TriangleIndex(old_to_new[t.0], old_to_new[t.1], old_to_new[t.2]))
            .collect();

        Self {
            vertices: new_vertices,
            faces: Some(new_faces),
        }
    }
}

/// Trait for types that can produce a triangulated [`Mesh`].
///
/// Implemented by both geometry model variants so that drawing and shadow
/// projection can work polymorphically.
pub trait HasMesh {
    /// Returns a deep copy of the mesh for this entity.
    fn copy_mesh(&self) -> Mesh;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soup_quad() -> Mesh {
        // Two triangles sharing an edge, stored as an unshared soup.
        let vertices = vec![
            Point::new(0., 0., 0.),
            Point::new(1., 0., 0.),
            Point::new(1., 1., 2.),
            Point::new(0., 0., 0.),
            Point::new(1., 1., 2.),
            Point::new(0., 1., 0.),
        ];
        let faces = vec![TriangleIndex(0, 1, 2), TriangleIndex(3, 4, 5)];
        Mesh::new(vertices, Some(faces))
    }

    #[test]
    fn test_dedup() {
        let mesh = soup_quad();
        assert_eq!(mesh.vertex_count(), 6);
        let deduped = mesh.deduplicate_vertices();
        assert_eq!(deduped.vertex_count(), 4);
        assert_eq!(deduped.face_count(), 2);
        assert!(deduped.faces_in_bounds());
    }

    #[test]
    fn test_no_faces_unchanged() {
        let mesh = Mesh::new(vec![Point::new(0., 0., 0.), Point::new(1., 0., 0.)], None);
        let deduped = mesh.deduplicate_vertices();
        assert_eq!(deduped.vertex_count(), 2);
        assert!(deduped.faces.is_none());
    }

    #[test]
    fn test_bounding_height() {
        assert_eq!(soup_quad().bounding_height(), 2.0);
        let empty = Mesh::new(vec![], None);
        assert_eq!(empty.bounding_height(), 0.0);
    }

    #[test]
    fn test_faces_out_of_bounds() {
        let mesh = Mesh::new(
            vec![Point::new(0., 0., 0.)],
            Some(vec![TriangleIndex(0, 1, 2)]),
        );
        assert!(!mesh.faces_in_bounds());
    }
}
