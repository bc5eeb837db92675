//! Site configuration.
//!
//! All location parameters travel in this struct; nothing is read from
//! ambient globals.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A fixed geographic site for which shade queries are answered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub name: String,
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
    /// IANA timezone of the local clock used for input and display.
    pub timezone: Tz,
    /// Elevation above sea level [m]; affects the sunrise/sunset horizon.
    pub elevation: f64,
}

impl Site {
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        timezone: Tz,
        elevation: f64,
    ) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            timezone,
            elevation,
        }
    }
}

impl Default for Site {
    /// The original study site: Iraqi Kurdistan.
    fn default() -> Self {
        Self::new("Iraq Kurdistan", 36.7, 44.0, chrono_tz::Asia::Baghdad, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_site() {
        let site = Site::default();
        assert_eq!(site.timezone, chrono_tz::Asia::Baghdad);
        assert!((site.latitude - 36.7).abs() < 1e-10);
    }
}
