pub mod draw;
mod error;
pub mod geom;
pub mod io;
pub mod query;
pub mod shadow;
pub mod site;
pub mod solar;
pub mod vecutils;

// Prelude
pub use error::ShadeError;
pub use geom::mesh::{HasMesh, Mesh, TriangleIndex};
pub use geom::model::{BoxModel, GeometryModel, MeshModel};
pub use geom::point::Point;
pub use geom::vector::Vector;
pub use query::{run_query, ShadeQuery, ShadeReport};
pub use shadow::{ReferenceHeight, ShadowProjection, ShadowProjector, ShadowVector};
pub use site::Site;
pub use solar::{Ephemeris, SolarPosition, SpencerEphemeris, SunTimes};
