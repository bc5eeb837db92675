//! STL file reading.
//!
//! STL (STereoLithography) stores raw triangle soup with normals. An ASCII
//! file may hold several `solid` blocks; each becomes one named mesh. A
//! binary file always holds exactly one mesh, named after its header (or
//! the file stem when the header is blank).

use crate::io::NamedMesh;
use crate::{Mesh, Point, ShadeError, TriangleIndex};
use std::path::Path;

/// Reads all meshes from an STL file.
///
/// The whole file is read into memory up front, so the handle is released
/// before any parsing can fail. Vertices are deduplicated.
pub fn read_stl(path: &Path) -> Result<Vec<NamedMesh>, ShadeError> {
    let bytes = std::fs::read(path)?;

    if looks_ascii(&bytes) {
        let text = String::from_utf8_lossy(&bytes);
        parse_ascii(&text, path)
    } else {
        let mesh = parse_binary(&bytes, path)?;
        Ok(vec![mesh])
    }
}

/// Binary files can also start with "solid" in the header, so require an
/// ASCII keyword early in the content as well.
fn looks_ascii(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(1024)];
    let head = String::from_utf8_lossy(head);
    head.trim_start().starts_with("solid") && (head.contains("facet") || head.contains("endsolid"))
}

fn parse_error(path: &Path, reason: impl Into<String>) -> ShadeError {
    ShadeError::Parse {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

fn parse_ascii(text: &str, path: &Path) -> Result<Vec<NamedMesh>, ShadeError> {
    let mut meshes: Vec<NamedMesh> = Vec::new();
    let mut name: Option<String> = None;
    let mut vertices: Vec<Point> = Vec::new();
    let mut faces: Vec<TriangleIndex> = Vec::new();
    let mut loop_vertices: Vec<Point> = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("solid") {
            name = Some(default_name(rest, path));
        } else if let Some(rest) = trimmed.strip_prefix("vertex") {
            let mut coords = rest.split_whitespace().map(str::parse::<f64>);
            let mut next = |axis: &str| {
                coords
                    .next()
                    .and_then(|v| v.ok())
                    .ok_or_else(|| parse_error(path, format!("bad vertex {axis} at line {}", lineno + 1)))
            };
            let x = next("x")?;
            let y = next("y")?;
            let z = next("z")?;
            loop_vertices.push(Point::new(x, y, z));
        } else if trimmed.starts_with("endloop") {
            if loop_vertices.len() != 3 {
                return Err(parse_error(
                    path,
                    format!(
                        "facet with {} vertices at line {}",
                        loop_vertices.len(),
                        lineno + 1
                    ),
                ));
            }
            let base = vertices.len();
            vertices.extend(loop_vertices.drain(..));
            faces.push(TriangleIndex(base, base + 1, base + 2));
        } else if trimmed.starts_with("endsolid") {
            let soup = Mesh::new(std::mem::take(&mut vertices), Some(std::mem::take(&mut faces)));
            meshes.push(NamedMesh {
                name: name.take().unwrap_or_else(|| default_name("", path)),
                mesh: soup.deduplicate_vertices(),
            });
        }
    }

    // Tolerate a missing trailing endsolid.
    if !vertices.is_empty() {
        let soup = Mesh::new(vertices, Some(faces));
        meshes.push(NamedMesh {
            name: name.unwrap_or_else(|| default_name("", path)),
            mesh: soup.deduplicate_vertices(),
        });
    }

    Ok(meshes)
}

/// Binary STL: 80-byte header, u32 triangle count, then 50 bytes per
/// triangle (normal, 3 vertices, attribute count), all little-endian f32.
fn parse_binary(bytes: &[u8], path: &Path) -> Result<NamedMesh, ShadeError> {
    if bytes.len() < 84 {
        return Err(parse_error(path, "binary STL shorter than its header"));
    }

    let header = String::from_utf8_lossy(&bytes[..80]);
    let name = default_name(header.trim_end_matches('\0'), path);

    let count = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]) as usize;
    let expected = 84 + count * 50;
    if bytes.len() < expected {
        return Err(parse_error(
            path,
            format!("binary STL truncated: {} bytes, expected {expected}", bytes.len()),
        ));
    }

    let mut vertices: Vec<Point> = Vec::with_capacity(count * 3);
    let mut faces: Vec<TriangleIndex> = Vec::with_capacity(count);

    for i in 0..count {
        // Skip the 12-byte normal; it is recomputable from the vertices.
        let tri = &bytes[84 + i * 50 + 12..84 + i * 50 + 48];
        let base = vertices.len();
        for v in 0..3 {
            let at = v * 12;
            let coord = |o: usize| {
                f32::from_le_bytes([tri[at + o], tri[at + o + 1], tri[at + o + 2], tri[at + o + 3]])
                    as f64
            };
            vertices.push(Point::new(coord(0), coord(4), coord(8)));
        }
        faces.push(TriangleIndex(base, base + 1, base + 2));
    }

    let soup = Mesh::new(vertices, Some(faces));
    Ok(NamedMesh {
        name,
        mesh: soup.deduplicate_vertices(),
    })
}

/// First token of `raw`, or the file stem when there is none.
fn default_name(raw: &str, path: &Path) -> String {
    match raw.split_whitespace().next() {
        Some(token) => token.to_string(),
        None => path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("mesh")
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const TETRA_ASCII: &str = "\
solid tetra
  facet normal 0 0 -1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0.5 1 0
    endloop
  endfacet
  facet normal 0 -1 0
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0.5 0.5 1
    endloop
  endfacet
  facet normal 1 0 0
    outer loop
      vertex 1 0 0
      vertex 0.5 1 0
      vertex 0.5 0.5 1
    endloop
  endfacet
  facet normal -1 0 0
    outer loop
      vertex 0.5 1 0
      vertex 0 0 0
      vertex 0.5 0.5 1
    endloop
  endfacet
endsolid tetra
";

    fn write_binary_tetra(path: &Path) {
        let verts = [
            [[0f32, 0., 0.], [1., 0., 0.], [0.5, 1., 0.]],
            [[0., 0., 0.], [1., 0., 0.], [0.5, 0.5, 1.]],
            [[1., 0., 0.], [0.5, 1., 0.], [0.5, 0.5, 1.]],
            [[0.5, 1., 0.], [0., 0., 0.], [0.5, 0.5, 1.]],
        ];
        let mut bytes = vec![0u8; 80];
        bytes[..5].copy_from_slice(b"tetra");
        bytes.extend((verts.len() as u32).to_le_bytes());
        for tri in verts {
            bytes.extend([0u8; 12]); // normal
            for v in tri {
                for c in v {
                    bytes.extend(c.to_le_bytes());
                }
            }
            bytes.extend(0u16.to_le_bytes());
        }
        std::fs::write(path, bytes).unwrap();
    }

    #[test]
    fn test_read_ascii() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tetra.stl");
        std::fs::write(&path, TETRA_ASCII).unwrap();

        let meshes = read_stl(&path).unwrap();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].name, "tetra");
        assert_eq!(meshes[0].mesh.face_count(), 4);
        // 12 soup vertices deduplicate to the 4 corners.
        assert_eq!(meshes[0].mesh.vertex_count(), 4);
        assert!(meshes[0].mesh.faces_in_bounds());
    }

    #[test]
    fn test_read_binary() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tetra.stl");
        write_binary_tetra(&path);

        let meshes = read_stl(&path).unwrap();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].name, "tetra");
        assert_eq!(meshes[0].mesh.face_count(), 4);
        assert_eq!(meshes[0].mesh.vertex_count(), 4);
    }

    #[test]
    fn test_binary_truncated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.stl");
        let mut bytes = vec![0u8; 84];
        bytes[80..84].copy_from_slice(&100u32.to_le_bytes());
        std::fs::write(&path, bytes).unwrap();

        let err = read_stl(&path).unwrap_err();
        assert!(matches!(err, ShadeError::Parse { .. }));
    }

    #[test]
    fn test_ascii_bad_vertex() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.stl");
        std::fs::write(
            &path,
            "solid bad\n  facet normal 0 0 1\n    outer loop\n      vertex 0 oops 0\n",
        )
        .unwrap();

        let err = read_stl(&path).unwrap_err();
        assert!(matches!(err, ShadeError::Parse { .. }));
    }
}
