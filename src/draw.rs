pub mod rerun;

pub use rerun::{render_scene, start_session, RenderStyle};
