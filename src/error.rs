use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Error taxonomy for shade queries.
///
/// `NoShadow` is deliberately absent: the sun being at or below the horizon
/// is a defined outcome (`ShadowProjector::project` returns `None`), never
/// a failure.
#[derive(Debug, Error)]
pub enum ShadeError {
    /// The mesh file was readable but contained zero usable geometries.
    #[error("no usable geometry found in {}", path.display())]
    NoGeometry { path: PathBuf },

    /// The file extension does not match any supported mesh format.
    #[error("unsupported geometry format {extension:?} ({})", path.display())]
    UnsupportedFormat {
        path: PathBuf,
        extension: Option<String>,
    },

    /// Sunrise/sunset does not exist for this date and latitude (polar day
    /// or polar night). Soft: callers degrade to a fallback display time.
    #[error("sunrise and sunset are undefined at latitude {latitude}° on {date}")]
    EphemerisUnavailable { latitude: f64, date: NaiveDate },

    /// The mesh file content could not be parsed into valid geometry.
    #[error("failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
