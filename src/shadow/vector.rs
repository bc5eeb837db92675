use crate::SolarPosition;
use serde::{Deserialize, Serialize};

/// Compass bearing of the cast shadow in degrees: directly opposite the
/// sun's azimuth.
///
/// The two-branch form evaluates to exactly `(azimuth + 180) mod 360` for
/// every azimuth in [0, 360).
pub fn shadow_direction_deg(solar_azimuth_deg: f64) -> f64 {
    if solar_azimuth_deg < 180.0 {
        solar_azimuth_deg + 180.0
    } else {
        solar_azimuth_deg - 180.0
    }
}

/// Horizontal displacement a point at the reference height casts onto the
/// ground for a given solar position.
///
/// Axes follow the azimuth convention: north = +Y, east = +X, bearing
/// clockwise from +Y.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShadowVector {
    pub dx: f64,
    pub dy: f64,
    /// Shadow length [m]: `reference_height / tan(altitude)`.
    pub length: f64,
}

impl ShadowVector {
    /// Computes the shadow vector, or `None` when the sun is at or below
    /// the horizon.
    ///
    /// The horizon check is a hard boundary: shadow length diverges as the
    /// altitude approaches zero and is geometrically meaningless at or
    /// below it. Just above the horizon the length is very large but
    /// finite; no clamping is applied.
    pub fn from_solar(sun: &SolarPosition, reference_height: f64) -> Option<Self> {
        if !sun.is_above_horizon() {
            return None;
        }
        let length = reference_height / sun.altitude.to_radians().tan();
        let direction = shadow_direction_deg(sun.azimuth).to_radians();
        Some(Self {
            dx: length * direction.sin(),
            dy: length * direction.cos(),
            length,
        })
    }

    /// Bearing of the shadow in degrees clockwise from north.
    pub fn direction_deg(&self) -> f64 {
        self.dx.atan2(self.dy).to_degrees().rem_euclid(360.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sun(altitude: f64, azimuth: f64) -> SolarPosition {
        SolarPosition { altitude, azimuth }
    }

    #[test]
    fn test_below_horizon_no_vector() {
        assert!(ShadowVector::from_solar(&sun(0.0, 120.0), 4.0).is_none());
        assert!(ShadowVector::from_solar(&sun(-10.0, 120.0), 4.0).is_none());
    }

    #[test]
    fn test_direction_two_branch_matches_mod() {
        // Exact equality on integer azimuths: all intermediate values are
        // exactly representable.
        for az in 0..360 {
            let az = az as f64;
            assert_eq!(shadow_direction_deg(az), (az + 180.0).rem_euclid(360.0));
        }
        // Tight approximate equality on fractional azimuths.
        for i in 0..720 {
            let az = i as f64 * 0.4997;
            if az >= 360.0 {
                break;
            }
            let diff = shadow_direction_deg(az) - (az + 180.0).rem_euclid(360.0);
            assert!(diff.abs() < 1e-9, "az={az}: {diff}");
        }
    }

    #[test]
    fn test_reference_case() {
        // Sun due south at 30°: shadow points due north, length 4/tan(30°).
        let v = ShadowVector::from_solar(&sun(30.0, 180.0), 4.0).unwrap();
        assert!((v.length - 6.928).abs() < 1e-2);
        assert!(v.dx.abs() < 1e-9);
        assert!((v.dy - v.length).abs() < 1e-9);
        assert!(v.direction_deg().abs() < 1e-9);
    }

    #[test]
    fn test_length_monotonically_decreasing_in_altitude() {
        let mut prev = f64::INFINITY;
        for alt in 1..90 {
            let v = ShadowVector::from_solar(&sun(alt as f64, 90.0), 4.0).unwrap();
            assert!(
                v.length < prev,
                "altitude {alt}: {} not < {prev}",
                v.length
            );
            prev = v.length;
        }
    }

    #[test]
    fn test_near_horizon_finite() {
        let v = ShadowVector::from_solar(&sun(1e-6, 45.0), 4.0).unwrap();
        assert!(v.length.is_finite());
        assert!(v.length > 1e6);
    }
}
