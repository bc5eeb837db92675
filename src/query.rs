//! One-shot shade query: date + time -> solar position + shadow.
//!
//! Every query is independent and stateless; nothing is cached between
//! calls and nothing is read from ambient globals.

use crate::solar::Ephemeris;
use crate::{
    GeometryModel, ShadowProjection, ShadowProjector, Site, SolarPosition, SunTimes,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// What the caller wants evaluated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShadeQuery {
    pub date: NaiveDate,
    /// Local clock time; when absent, the sunrise/sunset midpoint is used.
    pub time: Option<NaiveTime>,
}

/// Everything the caller needs to display one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShadeReport {
    /// `None` when sunrise/sunset could not be computed (polar cases);
    /// the report still carries a solar position for the fallback time.
    pub sun_times: Option<SunTimes>,
    /// The instant actually evaluated.
    pub display_time: NaiveTime,
    pub sun: SolarPosition,
    /// `None` means the sun is at or below the horizon: an informational
    /// "no shadow" state, not a failure.
    pub shadow: Option<ShadowProjection>,
}

/// Runs one query end to end.
///
/// Sunrise/sunset failures degrade softly: the display time falls back to
/// the wall clock at the site and the solar position still renders, so a
/// missing ephemeris never takes the whole page down.
pub fn run_query(
    site: &Site,
    query: &ShadeQuery,
    model: &GeometryModel,
    projector: &ShadowProjector,
    ephemeris: &dyn Ephemeris,
) -> ShadeReport {
    let sun_times = match ephemeris.sun_times(site, query.date) {
        Ok(times) => Some(times),
        Err(err) => {
            warn!("{err}; falling back to wall-clock time");
            None
        }
    };

    let display_time = query.time.unwrap_or_else(|| match &sun_times {
        Some(times) => times.midpoint(),
        None => Utc::now().with_timezone(&site.timezone).time(),
    });

    let sun = ephemeris.solar_position(site, query.date, display_time);
    debug!(
        "{} {} at {}: altitude {:.2}°, azimuth {:.2}°",
        site.name, query.date, display_time, sun.altitude, sun.azimuth
    );

    let shadow = projector.project(&sun, model);

    ShadeReport {
        sun_times,
        display_time,
        sun,
        shadow,
    }
}
