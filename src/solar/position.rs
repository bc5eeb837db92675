use crate::Vector;
use serde::{Deserialize, Serialize};

/// Solar position (azimuth and altitude angles).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SolarPosition {
    /// Solar altitude angle in degrees (0 = horizon, 90 = zenith).
    pub altitude: f64,
    /// Solar azimuth angle in degrees from north, clockwise (0=N, 90=E, 180=S, 270=W).
    pub azimuth: f64,
}

/// Day angle for the Spencer series (radians).
pub(crate) fn day_angle(day_of_year: u16) -> f64 {
    2.0 * std::f64::consts::PI * (day_of_year as f64 - 1.0) / 365.0
}

/// Solar declination (radians), Spencer approximation.
pub(crate) fn declination(gamma: f64) -> f64 {
    0.006918 - 0.399912 * gamma.cos() + 0.070257 * gamma.sin()
        - 0.006758 * (2.0 * gamma).cos()
        + 0.000907 * (2.0 * gamma).sin()
        - 0.002697 * (3.0 * gamma).cos()
        + 0.00148 * (3.0 * gamma).sin()
}

/// Equation of time (minutes), Spencer approximation.
///
/// Positive values mean the sundial runs ahead of the clock.
pub(crate) fn equation_of_time_minutes(gamma: f64) -> f64 {
    229.18
        * (0.000075 + 0.001868 * gamma.cos()
            - 0.032077 * gamma.sin()
            - 0.014615 * (2.0 * gamma).cos()
            - 0.040849 * (2.0 * gamma).sin())
}

/// Converts local clock hours to apparent solar hours.
///
/// `tz_offset_hours` is the UTC offset of the local clock (positive east).
pub(crate) fn solar_hour_from_clock(
    clock_hour: f64,
    longitude_deg: f64,
    tz_offset_hours: f64,
    day_of_year: u16,
) -> f64 {
    let eqtime = equation_of_time_minutes(day_angle(day_of_year));
    clock_hour + eqtime / 60.0 + longitude_deg / 15.0 - tz_offset_hours
}

impl SolarPosition {
    /// Calculates the solar position from solar time.
    ///
    /// - `latitude`: in degrees (positive north)
    /// - `day_of_year`: 1-365
    /// - `solar_hour`: apparent solar time in hours (12.0 = solar noon)
    pub fn from_solar_time(latitude: f64, day_of_year: u16, solar_hour: f64) -> Self {
        let lat = latitude.to_radians();
        let decl = declination(day_angle(day_of_year));

        // Hour angle: 15 degrees per hour from solar noon
        let hour_angle = (solar_hour - 12.0) * 15.0_f64.to_radians();

        // Solar altitude
        let sin_alt = lat.sin() * decl.sin() + lat.cos() * decl.cos() * hour_angle.cos();
        let altitude = sin_alt.asin().to_degrees();

        // Solar azimuth
        let cos_azimuth = (decl.sin() * lat.cos() - decl.cos() * lat.sin() * hour_angle.cos())
            / altitude.to_radians().cos().max(1e-10);

        let mut azimuth = cos_azimuth.clamp(-1.0, 1.0).acos().to_degrees();
        if hour_angle > 0.0 {
            azimuth = 360.0 - azimuth;
        }

        Self { altitude, azimuth }
    }

    /// Returns true if the sun is above the horizon.
    pub fn is_above_horizon(&self) -> bool {
        self.altitude > 0.0
    }

    /// Converts solar position to a unit direction vector pointing toward
    /// the sun (north = +Y, east = +X, up = +Z).
    pub fn to_direction(&self) -> Vector {
        let alt = self.altitude.to_radians();
        let azi = self.azimuth.to_radians();

        let x = alt.cos() * azi.sin();
        let y = alt.cos() * azi.cos();
        let z = alt.sin();

        Vector::new(x, y, z)
    }
}
