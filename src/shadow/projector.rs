use crate::shadow::ShadowVector;
use crate::{GeometryModel, Mesh, Point, SolarPosition, Vector};
use serde::{Deserialize, Serialize};

/// Height that drives the shadow length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReferenceHeight {
    /// The model's true height: box height, or the mesh bounding height.
    /// Physically consistent; the default.
    ModelHeight,
    /// A fixed visualization scale in meters, ignoring the model's real
    /// height. Kept for parity with the legacy mesh display, where it made
    /// the shadow visible regardless of model scale; the resulting length
    /// is cosmetic, not physical.
    Fixed(f64),
}

/// Ground-projected shadow of a geometry model.
///
/// Derived fresh on every query and discarded after rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShadowProjection {
    /// Shadow geometry, all vertices at z = 0.
    ///
    /// For a mesh model this has the same vertex cardinality and the same
    /// triangle indices as the input. For a box model it is the simplified
    /// shadow ray: two vertices from the footprint center, faces `None`.
    pub mesh: Mesh,
    /// The offset applied to the vertices.
    pub vector: ShadowVector,
}

/// Projects geometry models onto the ground plane along the shadow vector.
#[derive(Debug, Clone, Copy)]
pub struct ShadowProjector {
    pub reference_height: ReferenceHeight,
}

impl Default for ShadowProjector {
    fn default() -> Self {
        Self::new()
    }
}

impl ShadowProjector {
    pub fn new() -> Self {
        Self {
            reference_height: ReferenceHeight::ModelHeight,
        }
    }

    /// Projector using a fixed visualization scale instead of the model
    /// height.
    pub fn with_fixed_scale(scale: f64) -> Self {
        Self {
            reference_height: ReferenceHeight::Fixed(scale),
        }
    }

    fn reference_height_for(&self, model: &GeometryModel) -> f64 {
        match self.reference_height {
            ReferenceHeight::ModelHeight => model.reference_height(),
            ReferenceHeight::Fixed(h) => h,
        }
    }

    /// Projects the model's shadow onto the ground plane.
    ///
    /// Returns `None` when the sun is at or below the horizon; callers
    /// surface this as an explicit "no shadow" state, never as a failure.
    /// A model with zero vertices yields an empty projection.
    pub fn project(&self, sun: &SolarPosition, model: &GeometryModel) -> Option<ShadowProjection> {
        let vector = ShadowVector::from_solar(sun, self.reference_height_for(model))?;

        let mesh = match model {
            GeometryModel::Box(b) => {
                // Simplified shadow ray from the footprint center.
                let from = b.center();
                let to = from + Vector::new(vector.dx, vector.dy, 0.0);
                Mesh::new(vec![from, to], None)
            }
            GeometryModel::Mesh(m) => {
                let source = m.mesh();
                let offset = Vector::new(vector.dx, vector.dy, 0.0);
                let vertices: Vec<Point> = source
                    .vertices
                    .iter()
                    .map(|p| (*p + offset).on_ground())
                    .collect();
                Mesh::new(vertices, source.faces.clone())
            }
        };

        Some(ShadowProjection { mesh, vector })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoxModel, HasMesh, MeshModel, TriangleIndex};

    fn sun(altitude: f64, azimuth: f64) -> SolarPosition {
        SolarPosition { altitude, azimuth }
    }

    fn pyramid() -> MeshModel {
        let mesh = Mesh::new(
            vec![
                Point::new(0., 0., 0.),
                Point::new(2., 0., 0.),
                Point::new(1., 2., 0.),
                Point::new(1., 1., 5.),
            ],
            Some(vec![
                TriangleIndex(0, 1, 2),
                TriangleIndex(0, 1, 3),
                TriangleIndex(1, 2, 3),
                TriangleIndex(2, 0, 3),
            ]),
        );
        MeshModel::new("pyramid", mesh)
    }

    #[test]
    fn test_below_horizon_no_shadow() {
        let projector = ShadowProjector::new();
        let model = GeometryModel::Box(BoxModel::new(20., 10., 4.));
        assert!(projector.project(&sun(0.0, 90.0), &model).is_none());
        assert!(projector.project(&sun(-3.0, 90.0), &model).is_none());
    }

    #[test]
    fn test_box_reference_case() {
        // L=20 W=10 H=4, altitude 30°, azimuth 180° (due south):
        // length 4/tan(30°) ≈ 6.93 due north from the center (10, 5).
        let projector = ShadowProjector::new();
        let model = GeometryModel::Box(BoxModel::new(20., 10., 4.));
        let shadow = projector.project(&sun(30.0, 180.0), &model).unwrap();

        assert!((shadow.vector.length - 6.93).abs() < 0.01);
        assert!(shadow.vector.dx.abs() < 1e-9);

        let ray = &shadow.mesh.vertices;
        assert_eq!(ray.len(), 2);
        assert!(ray[0].is_close(&Point::new(10., 5., 0.)));
        assert!((ray[1].x - 10.0).abs() < 1e-9);
        assert!((ray[1].y - (5.0 + shadow.vector.length)).abs() < 1e-9);
        assert_eq!(ray[1].z, 0.0);
    }

    #[test]
    fn test_mesh_topology_preserved() {
        let projector = ShadowProjector::new();
        let model = GeometryModel::Mesh(pyramid());
        let shadow = projector.project(&sun(45.0, 270.0), &model).unwrap();

        let source = model.copy_mesh();
        assert_eq!(shadow.mesh.vertex_count(), source.vertex_count());
        assert_eq!(shadow.mesh.faces, source.faces);
        assert!(shadow.mesh.vertices.iter().all(|p| p.z == 0.0));
    }

    #[test]
    fn test_mesh_displacement_direction() {
        // Sun due west (270°): shadow points due east (+X).
        let projector = ShadowProjector::new();
        let model = GeometryModel::Mesh(pyramid());
        let shadow = projector.project(&sun(45.0, 270.0), &model).unwrap();

        // Bounding height 5, altitude 45° -> length 5.
        assert!((shadow.vector.length - 5.0).abs() < 1e-9);
        assert!((shadow.mesh.vertices[0].x - 5.0).abs() < 1e-9);
        assert!(shadow.mesh.vertices[0].y.abs() < 1e-9);
    }

    #[test]
    fn test_fixed_scale_overrides_height() {
        let projector = ShadowProjector::with_fixed_scale(10.0);
        let model = GeometryModel::Mesh(pyramid());
        let shadow = projector.project(&sun(45.0, 180.0), &model).unwrap();
        assert!((shadow.vector.length - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_mesh_empty_projection() {
        let projector = ShadowProjector::new();
        let model = GeometryModel::Mesh(MeshModel::new("empty", Mesh::new(vec![], None)));
        let shadow = projector.project(&sun(45.0, 180.0), &model).unwrap();
        assert!(shadow.mesh.is_empty());
    }

    #[test]
    fn test_degenerate_box_projects_point() {
        let projector = ShadowProjector::new();
        let model = GeometryModel::Box(BoxModel::new(20., 10., 0.));
        let shadow = projector.project(&sun(30.0, 180.0), &model).unwrap();
        let ray = &shadow.mesh.vertices;
        assert!(ray[0].is_close(&ray[1]));
    }
}
