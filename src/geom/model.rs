//! Geometry models accepted by the shadow projector.
//!
//! Two variants of one polymorphic capability: a rectangular box described
//! by its dimensions, and a free-form triangulated mesh loaded from file.

use crate::geom::rotation::rotate_points_xyz;
use crate::{HasMesh, Mesh, Point, TriangleIndex};

/// A rectangular building box with its base corner at the origin.
///
/// Any dimension is accepted, including zero or negative values: a
/// degenerate box renders as a line or a point but never raises. This keeps
/// the model robust to exploratory input.
#[derive(Debug, Clone, Copy)]
pub struct BoxModel {
    /// Dimension along X [m].
    pub length: f64,
    /// Dimension along Y [m].
    pub width: f64,
    /// Dimension along Z [m].
    pub height: f64,
}

impl BoxModel {
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    /// The 4 base corners at z = 0, counter-clockwise from the origin.
    pub fn base_corners(&self) -> Vec<Point> {
        vec![
            Point::new(0., 0., 0.),
            Point::new(self.length, 0., 0.),
            Point::new(self.length, self.width, 0.),
            Point::new(0., self.width, 0.),
        ]
    }

    /// The 8 box corners: base loop first, then the roof loop above it.
    pub fn corners(&self) -> Vec<Point> {
        let mut pts = self.base_corners();
        pts.extend(
            self.base_corners()
                .iter()
                .map(|p| Point::new(p.x, p.y, self.height)),
        );
        pts
    }

    /// Horizontal center of the footprint, on the ground plane.
    pub fn center(&self) -> Point {
        Point::new(self.length / 2., self.width / 2., 0.)
    }

    /// Wire connectivity for line drawing: the closed base loop, the closed
    /// roof loop, and the 4 vertical edges.
    pub fn outline_strips(&self) -> Vec<Vec<Point>> {
        let c = self.corners();
        let mut base: Vec<Point> = c[0..4].to_vec();
        base.push(c[0]);
        let mut roof: Vec<Point> = c[4..8].to_vec();
        roof.push(c[4]);

        let mut strips = vec![base, roof];
        for i in 0..4 {
            strips.push(vec![c[i], c[i + 4]]);
        }
        strips
    }
}

impl HasMesh for BoxModel {
    fn copy_mesh(&self) -> Mesh {
        // 6 quads, 2 triangles each, over the 8 shared corners.
        let faces = vec![
            TriangleIndex(0, 2, 1), // floor
            TriangleIndex(0, 3, 2),
            TriangleIndex(4, 5, 6), // roof
            TriangleIndex(4, 6, 7),
            TriangleIndex(0, 1, 5), // walls
            TriangleIndex(0, 5, 4),
            TriangleIndex(1, 2, 6),
            TriangleIndex(1, 6, 5),
            TriangleIndex(2, 3, 7),
            TriangleIndex(2, 7, 6),
            TriangleIndex(3, 0, 4),
            TriangleIndex(3, 4, 7),
        ];
        Mesh::new(self.corners(), Some(faces))
    }
}

/// A free-form triangulated mesh, typically loaded from an STL or OBJ file.
///
/// The mesh is immutable once constructed; [`MeshModel::rotated`] returns a
/// transformed copy and leaves the original untouched.
#[derive(Debug, Clone)]
pub struct MeshModel {
    pub name: String,
    mesh: Mesh,
}

impl MeshModel {
    pub fn new(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            mesh,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Applies rotations about the X, then Y, then Z axis (degrees) and
    /// returns the rotated model as a new value.
    pub fn rotated(&self, rx_deg: f64, ry_deg: f64, rz_deg: f64) -> Self {
        let vertices = rotate_points_xyz(&self.mesh.vertices, rx_deg, ry_deg, rz_deg);
        Self {
            name: self.name.clone(),
            mesh: Mesh::new(vertices, self.mesh.faces.clone()),
        }
    }

    /// Height of the mesh above the ground plane.
    pub fn bounding_height(&self) -> f64 {
        self.mesh.bounding_height()
    }
}

impl HasMesh for MeshModel {
    fn copy_mesh(&self) -> Mesh {
        self.mesh.clone()
    }
}

/// Either geometry variant, ready for projection and drawing.
#[derive(Debug, Clone)]
pub enum GeometryModel {
    Box(BoxModel),
    Mesh(MeshModel),
}

impl GeometryModel {
    pub fn name(&self) -> &str {
        match self {
            GeometryModel::Box(_) => "building",
            GeometryModel::Mesh(m) => &m.name,
        }
    }

    /// Height used for shadow length when the projector is configured with
    /// [`crate::ReferenceHeight::ModelHeight`].
    pub fn reference_height(&self) -> f64 {
        match self {
            GeometryModel::Box(b) => b.height,
            GeometryModel::Mesh(m) => m.bounding_height(),
        }
    }
}

impl HasMesh for GeometryModel {
    fn copy_mesh(&self) -> Mesh {
        match self {
            GeometryModel::Box(b) => b.copy_mesh(),
            GeometryModel::Mesh(m) => m.copy_mesh(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_corners_order() {
        let b = BoxModel::new(20., 10., 4.);
        let c = b.corners();
        assert_eq!(c.len(), 8);
        assert!(c[0].is_close(&Point::new(0., 0., 0.)));
        assert!(c[1].is_close(&Point::new(20., 0., 0.)));
        assert!(c[2].is_close(&Point::new(20., 10., 0.)));
        assert!(c[3].is_close(&Point::new(0., 10., 0.)));
        assert!(c[4].is_close(&Point::new(0., 0., 4.)));
        assert!(c[6].is_close(&Point::new(20., 10., 4.)));
    }

    #[test]
    fn test_box_center() {
        let b = BoxModel::new(20., 10., 4.);
        assert!(b.center().is_close(&Point::new(10., 5., 0.)));
    }

    #[test]
    fn test_degenerate_box_is_fine() {
        let b = BoxModel::new(0., 0., 0.);
        assert_eq!(b.corners().len(), 8);
        assert_eq!(b.copy_mesh().face_count(), 12);
        assert_eq!(GeometryModel::Box(b).reference_height(), 0.0);
    }

    #[test]
    fn test_box_outline_strips() {
        let b = BoxModel::new(2., 1., 3.);
        let strips = b.outline_strips();
        assert_eq!(strips.len(), 6); // base, roof, 4 verticals
        assert_eq!(strips[0].len(), 5); // closed loop
        assert_eq!(strips[2].len(), 2);
    }

    #[test]
    fn test_box_mesh_faces_valid() {
        let mesh = BoxModel::new(1., 2., 3.).copy_mesh();
        assert_eq!(mesh.vertex_count(), 8);
        assert!(mesh.faces_in_bounds());
    }

    #[test]
    fn test_mesh_model_rotation_is_a_copy() {
        let mesh = Mesh::new(
            vec![Point::new(1., 0., 0.), Point::new(0., 1., 0.)],
            None,
        );
        let model = MeshModel::new("m", mesh);
        let rotated = model.rotated(0., 0., 90.);
        // Original untouched
        assert!(model.mesh().vertices[0].is_close(&Point::new(1., 0., 0.)));
        assert!((rotated.mesh().vertices[0].y - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_mesh_model_identity_rotation() {
        let mesh = Mesh::new(vec![Point::new(0.1, 0.2, 0.3)], None);
        let model = MeshModel::new("m", mesh);
        let same = model.rotated(0., 0., 0.);
        assert_eq!(same.mesh().vertices, model.mesh().vertices);
    }
}
