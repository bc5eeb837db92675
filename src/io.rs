//! Mesh file loading.
//!
//! Readers return a named collection of meshes; [`load_first_mesh`] applies
//! the engine's selection policy on top: the first usable mesh in file
//! order wins, an empty scene is an error, and nothing that fails index
//! validation ever reaches the projector.

pub mod obj;
pub mod stl;

use crate::{Mesh, MeshModel, ShadeError};
use std::path::Path;
use tracing::{debug, warn};

/// One mesh from a scene file, keyed by the name the file gave it.
#[derive(Debug, Clone)]
pub struct NamedMesh {
    pub name: String,
    pub mesh: Mesh,
}

/// Loads every mesh from a file, dispatching on the lowercase extension.
///
/// Unknown extensions fail with [`ShadeError::UnsupportedFormat`].
pub fn load_scene(path: &Path) -> Result<Vec<NamedMesh>, ShadeError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        Some("stl") => stl::read_stl(path),
        Some("obj") => obj::read_obj(path),
        _ => Err(ShadeError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        }),
    }
}

/// Loads the model to be shaded from a scene file.
///
/// Policy: meshes without vertices are discarded; zero usable meshes is
/// [`ShadeError::NoGeometry`]; with several, the first in file order is
/// selected deterministically (logged, since the rest are ignored).
pub fn load_first_mesh(path: &Path) -> Result<MeshModel, ShadeError> {
    let mut scene = load_scene(path)?;
    scene.retain(|m| !m.mesh.is_empty());

    if scene.is_empty() {
        return Err(ShadeError::NoGeometry {
            path: path.to_path_buf(),
        });
    }
    if scene.len() > 1 {
        warn!(
            "{} contains {} meshes; using the first one ({})",
            path.display(),
            scene.len(),
            scene[0].name
        );
    }

    let first = scene.remove(0);
    if !first.mesh.faces_in_bounds() {
        return Err(ShadeError::Parse {
            path: path.to_path_buf(),
            reason: format!("mesh '{}' has a face index out of range", first.name),
        });
    }

    debug!(
        "loaded mesh '{}': {} vertices, {} triangles",
        first.name,
        first.mesh.vertex_count(),
        first.mesh.face_count()
    );
    Ok(MeshModel::new(first.name, first.mesh))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_unknown_extension() {
        let err = load_scene(Path::new("model.gltf")).unwrap_err();
        assert!(matches!(err, ShadeError::UnsupportedFormat { .. }));
        let err = load_scene(Path::new("model")).unwrap_err();
        assert!(matches!(
            err,
            ShadeError::UnsupportedFormat { extension: None, .. }
        ));
    }

    #[test]
    fn test_empty_scene_is_no_geometry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.stl");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "solid nothing").unwrap();
        writeln!(f, "endsolid nothing").unwrap();
        drop(f);

        let err = load_first_mesh(&path).unwrap_err();
        assert!(matches!(err, ShadeError::NoGeometry { .. }));
    }

    #[test]
    fn test_first_of_many_selected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("two.stl");
        let tri = "  facet normal 0 0 1\n    outer loop\n      vertex 0 0 0\n      vertex 1 0 0\n      vertex 0 1 0\n    endloop\n  endfacet\n";
        let content = format!(
            "solid first\n{tri}endsolid first\nsolid second\n{tri}endsolid second\n"
        );
        std::fs::write(&path, content).unwrap();

        let model = load_first_mesh(&path).unwrap();
        assert_eq!(model.name, "first");
        assert_eq!(model.mesh().face_count(), 1);
    }
}
