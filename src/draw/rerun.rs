//! Rerun rendering sink.
//!
//! The building and its shadow are logged as two independently colored
//! entity layers under one session root, together with a fixed ±50 m
//! ground frame. Nothing here feeds back into the engine.

use crate::query::ShadeReport;
use crate::{BoxModel, GeometryModel, HasMesh, Mesh, Point, ShadowProjection, TriangleIndex};
use anyhow::Result;
use rerun as rr;

const SESSION_NAME: &str = "shade3d";

/// Half-extent of the ground frame in meters (the original fixed plot
/// bounds were -50..50).
const GROUND_HALF_EXTENT: f64 = 50.0;

const BUILDING_RGBA: (f32, f32, f32, f32) = (0.2, 0.4, 1.0, 0.3);
const SHADOW_RGBA: (f32, f32, f32, f32) = (0.35, 0.35, 0.35, 0.8);
const GROUND_RGBA: (f32, f32, f32, f32) = (0.5, 0.5, 0.5, 0.4);
const SUN_RGBA: (f32, f32, f32, f32) = (1.0, 0.8, 0.1, 1.0);

/// How the building layer is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStyle {
    /// 2D-style outline: box wire edges (or mesh wireframe) plus shadow ray.
    Outline,
    /// 3D wireframe of the triangulation.
    Wireframe,
    /// Translucent triangulated surfaces.
    Surface,
}

/// Converts Point to native format of Rerun
impl From<Point> for rr::Vec3D {
    fn from(val: Point) -> Self {
        rr::Vec3D([val.x as f32, val.y as f32, val.z as f32])
    }
}

/// Converts TriangleIndex to native format of Rerun
impl From<TriangleIndex> for rr::TriangleIndices {
    fn from(val: TriangleIndex) -> Self {
        rr::TriangleIndices(rr::datatypes::UVec3D([
            val.0 as u32,
            val.1 as u32,
            val.2 as u32,
        ]))
    }
}

fn color(rgba: (f32, f32, f32, f32)) -> rr::Color {
    let (r, g, b, a) = rgba;
    rr::Color(rr::Rgba32::from_unmultiplied_rgba(
        (r * 255.0) as u8,
        (g * 255.0) as u8,
        (b * 255.0) as u8,
        (a * 255.0) as u8,
    ))
}

pub fn start_session() -> Result<rr::RecordingStream> {
    // Connect to the Rerun gRPC server using the default address and port: localhost:9876
    let session = rr::RecordingStreamBuilder::new(SESSION_NAME).spawn()?;

    Ok(session)
}

fn entity(name: &str) -> String {
    format!("{SESSION_NAME}/{name}")
}

pub fn draw_faces(
    session: &rr::RecordingStream,
    name: &str,
    mesh: &Mesh,
    rgba: (f32, f32, f32, f32),
) -> Result<()> {
    let vertices: Vec<Point> = mesh.vertices.clone();
    let triangles: Vec<TriangleIndex> = mesh.faces.clone().unwrap_or_default();

    let (r, g, b, a) = rgba;
    session.log_static(
        entity(name),
        &rr::Mesh3D::new(vertices)
            .with_triangle_indices(triangles)
            .with_albedo_factor(rr::Rgba32::from_unmultiplied_rgba(
                (r * 255.0) as u8,
                (g * 255.0) as u8,
                (b * 255.0) as u8,
                (a * 255.0) as u8,
            )),
    )?;

    Ok(())
}

pub fn draw_edges(
    session: &rr::RecordingStream,
    name: &str,
    mesh: &Mesh,
    radius: f32,
    rgba: (f32, f32, f32, f32),
) -> Result<()> {
    let triangles: Vec<TriangleIndex> = mesh.faces.clone().unwrap_or_default();

    let mut lines: Vec<Vec<rr::Vec3D>> = Vec::new();
    for t in triangles.iter() {
        lines.push(vec![
            rr::Vec3D::from(mesh.vertices[t.0]),
            rr::Vec3D::from(mesh.vertices[t.1]),
            rr::Vec3D::from(mesh.vertices[t.2]),
            rr::Vec3D::from(mesh.vertices[t.0]),
        ]);
    }

    draw_strips(session, name, lines, radius, rgba)
}

/// Box wire connectivity: base loop, roof loop and the 4 vertical edges.
pub fn draw_box_outline(
    session: &rr::RecordingStream,
    name: &str,
    bx: &BoxModel,
    radius: f32,
    rgba: (f32, f32, f32, f32),
) -> Result<()> {
    let lines: Vec<Vec<rr::Vec3D>> = bx
        .outline_strips()
        .into_iter()
        .map(|strip| strip.into_iter().map(rr::Vec3D::from).collect())
        .collect();

    draw_strips(session, name, lines, radius, rgba)
}

/// Draws the projected shadow: a translucent footprint mesh when triangle
/// connectivity is present, otherwise a single line strip (the shadow ray).
pub fn draw_shadow(session: &rr::RecordingStream, projection: &ShadowProjection) -> Result<()> {
    if projection.mesh.faces.is_some() {
        draw_faces(session, "shadow", &projection.mesh, SHADOW_RGBA)
    } else {
        let strip: Vec<rr::Vec3D> = projection
            .mesh
            .vertices
            .iter()
            .map(|p| rr::Vec3D::from(*p))
            .collect();
        draw_strips(session, "shadow", vec![strip], 0.06, SHADOW_RGBA)
    }
}

fn draw_ground(session: &rr::RecordingStream) -> Result<()> {
    let e = GROUND_HALF_EXTENT;
    let frame = vec![
        Point::new(-e, -e, 0.),
        Point::new(e, -e, 0.),
        Point::new(e, e, 0.),
        Point::new(-e, e, 0.),
        Point::new(-e, -e, 0.),
    ];
    let strip: Vec<rr::Vec3D> = frame.into_iter().map(rr::Vec3D::from).collect();
    draw_strips(session, "ground", vec![strip], 0.05, GROUND_RGBA)
}

fn draw_strips(
    session: &rr::RecordingStream,
    name: &str,
    lines: Vec<Vec<rr::Vec3D>>,
    radius: f32,
    rgba: (f32, f32, f32, f32),
) -> Result<()> {
    let n = lines.len();
    session.log_static(
        entity(name),
        &rr::LineStrips3D::new(lines)
            .with_radii(vec![radius; n])
            .with_colors(vec![color(rgba); n]),
    )?;

    Ok(())
}

/// Arrow from the direction of the sun toward the scene center.
fn draw_sun_ray(session: &rr::RecordingStream, report: &ShadeReport, center: Point) -> Result<()> {
    if !report.sun.is_above_horizon() {
        return Ok(());
    }
    let toward_sun = report.sun.to_direction() * (GROUND_HALF_EXTENT / 2.0);
    let origin = center + toward_sun;
    session.log_static(
        entity("sun"),
        &rr::Arrows3D::from_vectors([rr::Vec3D([
            -toward_sun.dx as f32,
            -toward_sun.dy as f32,
            -toward_sun.dz as f32,
        ])])
        .with_origins([rr::Vec3D::from(origin)])
        .with_colors([color(SUN_RGBA)]),
    )?;

    Ok(())
}

/// Logs the whole query result: ground frame, building layer in the chosen
/// style, sun ray, and the shadow layer (skipped below the horizon).
pub fn render_scene(
    session: &rr::RecordingStream,
    model: &GeometryModel,
    report: &ShadeReport,
    style: RenderStyle,
) -> Result<()> {
    draw_ground(session)?;

    let mesh = model.copy_mesh();
    match (style, model) {
        (RenderStyle::Outline, GeometryModel::Box(b)) => {
            draw_box_outline(session, model.name(), b, 0.08, BUILDING_RGBA)?
        }
        (RenderStyle::Outline, _) | (RenderStyle::Wireframe, _) => {
            draw_edges(session, model.name(), &mesh, 0.04, BUILDING_RGBA)?
        }
        (RenderStyle::Surface, _) => draw_faces(session, model.name(), &mesh, BUILDING_RGBA)?,
    }

    let center = match model {
        GeometryModel::Box(b) => b.center(),
        GeometryModel::Mesh(_) => Point::new(0., 0., 0.),
    };
    draw_sun_ray(session, report, center)?;

    if let Some(projection) = &report.shadow {
        draw_shadow(session, projection)?;
    }

    Ok(())
}
