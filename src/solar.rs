//! Solar ephemeris: sun position and sunrise/sunset times.
//!
//! The rest of the crate talks to the ephemeris through the [`Ephemeris`]
//! trait; [`SpencerEphemeris`] is the bundled implementation.

pub mod position;
pub mod suntimes;

pub use position::SolarPosition;
pub use suntimes::SunTimes;

use crate::{ShadeError, Site};
use chrono::{Datelike, NaiveDate, NaiveTime, Offset, TimeZone, Timelike};

/// Source of solar positions and rise/set times for a site.
pub trait Ephemeris {
    /// Apparent solar altitude/azimuth at the given local clock time.
    fn solar_position(&self, site: &Site, date: NaiveDate, time: NaiveTime) -> SolarPosition;

    /// Sunrise, sunset and solar noon as local clock times.
    ///
    /// Fails softly with [`ShadeError::EphemerisUnavailable`] during polar
    /// day or polar night.
    fn sun_times(&self, site: &Site, date: NaiveDate) -> Result<SunTimes, ShadeError>;
}

/// Ephemeris based on the Spencer declination and equation-of-time series.
///
/// Accurate to a fraction of a degree, which is plenty for visual
/// overshadowing checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpencerEphemeris;

impl Ephemeris for SpencerEphemeris {
    fn solar_position(&self, site: &Site, date: NaiveDate, time: NaiveTime) -> SolarPosition {
        let day_of_year = date.ordinal() as u16;
        let clock_hour = time.num_seconds_from_midnight() as f64 / 3600.0;
        let solar_hour = position::solar_hour_from_clock(
            clock_hour,
            site.longitude,
            utc_offset_hours(site, date),
            day_of_year,
        );
        SolarPosition::from_solar_time(site.latitude, day_of_year, solar_hour)
    }

    fn sun_times(&self, site: &Site, date: NaiveDate) -> Result<SunTimes, ShadeError> {
        suntimes::sun_times(site, date, utc_offset_hours(site, date))
    }
}

/// UTC offset of the site's local clock on the given date, in hours.
fn utc_offset_hours(site: &Site, date: NaiveDate) -> f64 {
    site.timezone
        .offset_from_utc_date(&date)
        .fix()
        .local_minus_utc() as f64
        / 3600.0
}
