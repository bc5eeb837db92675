pub mod mesh;
pub mod model;
pub mod point;
pub mod rotation;
pub mod vector;

/// Geometric precision
pub(crate) const EPS: f64 = 1e-13;

/// Scalar closeness check used across the geometry module.
pub trait IsClose {
    fn is_close(self, other: f64) -> bool;
}

impl IsClose for f64 {
    fn is_close(self, other: f64) -> bool {
        (self - other).abs() < EPS
    }
}
