//! Sunrise, sunset and solar noon as local clock times.

use crate::solar::position::{day_angle, declination, equation_of_time_minutes};
use crate::{ShadeError, Site};
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Zenith angle of the sun's upper limb at rise/set, including standard
/// atmospheric refraction (degrees).
const RISE_SET_ZENITH_DEG: f64 = 90.833;

/// Mean Earth radius [m], used for the elevation-dependent horizon dip.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Sunrise/sunset/solar-noon triple for one date, in local clock time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SunTimes {
    pub sunrise: NaiveTime,
    pub sunset: NaiveTime,
    pub noon: NaiveTime,
}

impl SunTimes {
    /// Midpoint between sunrise and sunset, the suggested display time.
    pub fn midpoint(&self) -> NaiveTime {
        let rise = seconds_of(self.sunrise);
        let mut set = seconds_of(self.sunset);
        if set < rise {
            set += 86_400; // sunset past local midnight
        }
        clock_from_seconds((rise + set) / 2)
    }
}

/// Horizon dip angle below the geometric horizon for an observer at
/// altitude `elevation_m` (degrees). Zero at sea level.
fn horizon_dip_deg(elevation_m: f64) -> f64 {
    if elevation_m <= 0.0 {
        return 0.0;
    }
    let ratio = EARTH_RADIUS_M / (EARTH_RADIUS_M + elevation_m);
    ratio.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Computes sunrise/sunset/noon for a site and date.
///
/// Uses the hour-angle sunrise equation with the Spencer declination and
/// equation of time, so the result is consistent with
/// [`crate::SolarPosition`]. Polar day/night yields
/// [`ShadeError::EphemerisUnavailable`].
pub fn sun_times(site: &Site, date: NaiveDate, tz_offset_hours: f64) -> Result<SunTimes, ShadeError> {
    let gamma = day_angle(date.ordinal() as u16);
    let decl = declination(gamma);
    let lat = site.latitude.to_radians();

    let zenith = (RISE_SET_ZENITH_DEG + horizon_dip_deg(site.elevation)).to_radians();
    let cos_hour_angle = (zenith.cos() - lat.sin() * decl.sin()) / (lat.cos() * decl.cos());

    if !(-1.0..=1.0).contains(&cos_hour_angle) {
        // Polar day (< -1) or polar night (> 1): no rise/set on this date.
        return Err(ShadeError::EphemerisUnavailable {
            latitude: site.latitude,
            date,
        });
    }

    let half_day_hours = cos_hour_angle.acos().to_degrees() / 15.0;

    // Solar-to-clock correction, the inverse of the clock-to-solar one.
    let correction =
        -equation_of_time_minutes(gamma) / 60.0 - site.longitude / 15.0 + tz_offset_hours;

    let noon = 12.0 + correction;
    Ok(SunTimes {
        sunrise: clock_from_hours(noon - half_day_hours),
        sunset: clock_from_hours(noon + half_day_hours),
        noon: clock_from_hours(noon),
    })
}

fn seconds_of(t: NaiveTime) -> i64 {
    use chrono::Timelike;
    t.num_seconds_from_midnight() as i64
}

fn clock_from_seconds(secs: i64) -> NaiveTime {
    let secs = secs.rem_euclid(86_400) as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap_or(NaiveTime::MIN)
}

fn clock_from_hours(hours: f64) -> NaiveTime {
    clock_from_seconds((hours * 3600.0).round() as i64)
}
