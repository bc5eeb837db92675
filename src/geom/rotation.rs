use crate::geom::IsClose;
use crate::Point;
use crate::Vector;
use ndarray as nd;

/// Calculate rotation matrix for a unit vector `u` and angle `phi`.
///
/// A rotation in 3D can be described with an axis and an angle around that
/// axis. The axis is a unit vector `u` (`ux^2 + uy^2 + uz^2 == 1`) and the
/// angle `phi` is in radians.
///
/// Uses the Rodrigues form, which is numerically stabler than composing the
/// basic per-axis matrices directly:
/// https://en.wikipedia.org/wiki/Rodrigues%27_rotation_formula
pub fn rotation_matrix(u: &Vector, phi: f64) -> nd::Array2<f64> {
    if !u.length().is_close(1.) {
        panic!("rotation_matrix() requires u to be a unit vector");
    }

    let w: nd::Array2<f64> = nd::arr2(&[[0., -u.dz, u.dy], [u.dz, 0., -u.dx], [-u.dy, u.dx, 0.]]);

    nd::Array::eye(3) + phi.sin() * &w + (2. * (phi / 2.).sin().powi(2)) * w.dot(&w)
}

fn points_to_array(pts: &[Point]) -> nd::Array2<f64> {
    let mut arr = nd::Array2::zeros((pts.len(), 3));
    for (i, p) in pts.iter().enumerate() {
        arr[[i, 0]] = p.x;
        arr[[i, 1]] = p.y;
        arr[[i, 2]] = p.z;
    }
    arr
}

fn array_to_points(arr: nd::Array2<f64>) -> Vec<Point> {
    arr.rows()
        .into_iter()
        .map(|row| Point::new(row[0], row[1], row[2]))
        .collect()
}

/// Rotate points using the rotation matrix `rot`
pub fn rotate_points(pts: &[Point], rot: &nd::ArrayView2<f64>) -> Vec<Point> {
    let pts = points_to_array(pts);
    let pts = pts.dot(rot);

    array_to_points(pts)
}

/// Rotate points around the unit vector `u` with the angle `phi` (radians).
///
/// Returns the rotated points as a new vector; the input is not modified.
pub fn rotate_points_around_vector(pts: &[Point], u: &Vector, phi: f64) -> Vec<Point> {
    if u.length().is_close(0.) || phi.abs().is_close(0.) {
        // No need to rotate
        return pts.to_vec();
    }
    let rot = rotation_matrix(u, phi);

    rotate_points(pts, &rot.t())
}

/// Rotate points about the three principal axes, in the fixed order
/// X, then Y, then Z. Angles are in degrees.
///
/// A zero angle for an axis skips that axis entirely, so `(0, 0, 0)` is an
/// exact identity and returns the input unchanged.
pub fn rotate_points_xyz(pts: &[Point], rx_deg: f64, ry_deg: f64, rz_deg: f64) -> Vec<Point> {
    let axes = [
        (Vector::new(1., 0., 0.), rx_deg),
        (Vector::new(0., 1., 0.), ry_deg),
        (Vector::new(0., 0., 1.), rz_deg),
    ];
    let mut out = pts.to_vec();
    for (axis, angle_deg) in axes {
        out = rotate_points_around_vector(&out, &axis, angle_deg.to_radians());
    }
    out
}
