//! Wavefront OBJ reading.
//!
//! Only the geometry subset matters here: `v` lines, `f` lines (fan
//! triangulated, `v/vt/vn` references, negative indices allowed), and
//! `o`/`g` lines delimiting named objects. Vertex indices are file-global
//! in OBJ; each object's mesh gets its own compacted vertex list.

use crate::io::NamedMesh;
use crate::{Mesh, Point, ShadeError, TriangleIndex};
use std::path::Path;

/// Reads all objects from an OBJ file.
pub fn read_obj(path: &Path) -> Result<Vec<NamedMesh>, ShadeError> {
    let text = std::fs::read_to_string(path)?;

    let default = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("mesh")
        .to_string();

    let mut all_vertices: Vec<Point> = Vec::new();
    let mut objects: Vec<(String, Vec<TriangleIndex>)> = Vec::new();
    let mut current: Option<(String, Vec<TriangleIndex>)> = None;

    for (lineno, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        let mut tokens = trimmed.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let mut coord = || {
                    tokens
                        .next()
                        .and_then(|t| t.parse::<f64>().ok())
                        .ok_or_else(|| parse_error(path, lineno, "bad vertex coordinate"))
                };
                let x = coord()?;
                let y = coord()?;
                let z = coord()?;
                all_vertices.push(Point::new(x, y, z));
            }
            Some("o") | Some("g") => {
                if let Some(obj) = current.take() {
                    objects.push(obj);
                }
                let name = tokens.next().unwrap_or(&default).to_string();
                current = Some((name, Vec::new()));
            }
            Some("f") => {
                let mut corners: Vec<usize> = Vec::new();
                for token in tokens {
                    corners.push(resolve_index(token, all_vertices.len(), path, lineno)?);
                }
                if corners.len() < 3 {
                    return Err(parse_error(path, lineno, "face with fewer than 3 vertices"));
                }
                let (_, faces) = current.get_or_insert_with(|| (default.clone(), Vec::new()));
                // Fan triangulation around the first corner.
                for i in 1..corners.len() - 1 {
                    faces.push(TriangleIndex(corners[0], corners[i], corners[i + 1]));
                }
            }
            _ => {} // comments, normals, texture coords, materials
        }
    }
    if let Some(obj) = current.take() {
        objects.push(obj);
    }

    Ok(objects
        .into_iter()
        .map(|(name, faces)| NamedMesh {
            name,
            mesh: compact(&all_vertices, faces),
        })
        .collect())
}

fn parse_error(path: &Path, lineno: usize, reason: &str) -> ShadeError {
    ShadeError::Parse {
        path: path.to_path_buf(),
        reason: format!("{reason} at line {}", lineno + 1),
    }
}

/// Resolves one `f` reference (`7`, `7/1`, `7//3`, `-1`) into a 0-based
/// vertex index.
fn resolve_index(
    token: &str,
    vertex_count: usize,
    path: &Path,
    lineno: usize,
) -> Result<usize, ShadeError> {
    let raw = token.split('/').next().unwrap_or(token);
    let idx: i64 = raw
        .parse()
        .map_err(|_| parse_error(path, lineno, "bad face index"))?;

    let resolved = if idx < 0 {
        vertex_count as i64 + idx
    } else {
        idx - 1
    };
    if resolved < 0 || resolved >= vertex_count as i64 {
        return Err(parse_error(path, lineno, "face index out of range"));
    }
    Ok(resolved as usize)
}

/// Builds a mesh that owns only the vertices its faces reference.
fn compact(all_vertices: &[Point], faces: Vec<TriangleIndex>) -> Mesh {
    let mut remap: Vec<Option<usize>> = vec![None; all_vertices.len()];
    let mut vertices: Vec<Point> = Vec::new();

    let mut local = |idx: usize, vertices: &mut Vec<Point>| {
        *remap[idx].get_or_insert_with(|| {
            vertices.push(all_vertices[idx]);
            vertices.len() - 1
        })
    };

    let faces = faces
        .into_iter()
        .map(|t| {
            TriangleIndex(
                local(t.0, &mut vertices),
                local(t.1, &mut vertices),
                local(t.2, &mut vertices),
            )
        })
        .collect();

    Mesh::new(vertices, Some(faces))
}
