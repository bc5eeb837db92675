use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use clap::{Parser, Subcommand, ValueEnum};
use shade3d::draw::{self, RenderStyle};
use shade3d::{
    io, run_query, BoxModel, GeometryModel, ShadeQuery, ShadeReport, ShadowProjector, Site,
    SpencerEphemeris,
};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "shade3d", version, about = "Building shade simulation")]
struct Cli {
    /// Site latitude in degrees, positive north
    #[arg(long, global = true, default_value_t = 36.7)]
    latitude: f64,
    /// Site longitude in degrees, positive east
    #[arg(long, global = true, default_value_t = 44.0)]
    longitude: f64,
    /// IANA timezone of the local clock
    #[arg(long, global = true, default_value = "Asia/Baghdad")]
    timezone: Tz,
    /// Site elevation above sea level in meters
    #[arg(long, global = true, default_value_t = 0.0)]
    elevation: f64,
    /// Date to evaluate (YYYY-MM-DD)
    #[arg(long, global = true, default_value = "2024-01-15")]
    date: NaiveDate,
    /// Local time (HH:MM or HH:MM:SS); defaults to the midpoint between
    /// sunrise and sunset
    #[arg(long, global = true)]
    time: Option<String>,
    /// Spawn the Rerun viewer and draw the scene
    #[arg(long, global = true)]
    draw: bool,
    /// How the building layer is drawn
    #[arg(long, global = true, value_enum, default_value = "outline")]
    style: Style,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rectangular building described by its dimensions
    Box {
        /// Building length along X in meters
        #[arg(long, default_value_t = 20.0)]
        length: f64,
        /// Building width along Y in meters
        #[arg(long, default_value_t = 10.0)]
        width: f64,
        /// Building height in meters
        #[arg(long, default_value_t = 4.0)]
        height: f64,
    },
    /// Triangulated building loaded from an STL or OBJ file
    Mesh {
        /// Path to the mesh file
        path: PathBuf,
        /// Rotation about the X axis in degrees, clamped to [-180, 180]
        #[arg(long, default_value_t = 0.0)]
        rotate_x: f64,
        /// Rotation about the Y axis in degrees, clamped to [-180, 180]
        #[arg(long, default_value_t = 0.0)]
        rotate_y: f64,
        /// Rotation about the Z axis in degrees, clamped to [-180, 180]
        #[arg(long, default_value_t = 0.0)]
        rotate_z: f64,
        /// Use a fixed shadow scale in meters instead of the mesh height
        #[arg(long)]
        fixed_scale: Option<f64>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Style {
    Outline,
    Wireframe,
    Surface,
}

impl From<Style> for RenderStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Outline => RenderStyle::Outline,
            Style::Wireframe => RenderStyle::Wireframe,
            Style::Surface => RenderStyle::Surface,
        }
    }
}

fn parse_time(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| anyhow!("invalid time {raw:?}, expected HH:MM or HH:MM:SS"))
}

fn clamp_angle(name: &str, angle: f64) -> f64 {
    let clamped = angle.clamp(-180.0, 180.0);
    if clamped != angle {
        warn!("{name} = {angle}° is out of [-180, 180]; using {clamped}°");
    }
    clamped
}

fn print_report(site: &Site, report: &ShadeReport) {
    println!("Site: {} ({:.2}°N, {:.2}°E)", site.name, site.latitude, site.longitude);
    match &report.sun_times {
        Some(times) => {
            println!("Sunrise: {}", times.sunrise.format("%H:%M:%S"));
            println!("Sunset: {}", times.sunset.format("%H:%M:%S"));
            println!("Suggested time (midday): {}", times.midpoint().format("%H:%M:%S"));
        }
        None => println!("Sunrise/sunset: N/A (polar day or night)"),
    }
    println!("Selected time: {}", report.display_time.format("%H:%M:%S"));
    println!("Solar altitude: {:.2}°", report.sun.altitude);
    println!("Solar azimuth: {:.2}°", report.sun.azimuth);
    match &report.shadow {
        Some(projection) => {
            let v = &projection.vector;
            println!(
                "Shadow: {:.2} m toward {:.1}° (dx = {:.2} m, dy = {:.2} m)",
                v.length,
                v.direction_deg(),
                v.dx,
                v.dy
            );
        }
        None => println!("The sun is below the horizon. No shadow is visible."),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let site = Site::new(
        "site",
        cli.latitude,
        cli.longitude,
        cli.timezone,
        cli.elevation,
    );
    let time = cli.time.as_deref().map(parse_time).transpose()?;
    let query = ShadeQuery {
        date: cli.date,
        time,
    };

    let (model, projector) = match &cli.command {
        Commands::Box {
            length,
            width,
            height,
        } => (
            GeometryModel::Box(BoxModel::new(*length, *width, *height)),
            ShadowProjector::new(),
        ),
        Commands::Mesh {
            path,
            rotate_x,
            rotate_y,
            rotate_z,
            fixed_scale,
        } => {
            let mesh = io::load_first_mesh(path)?;
            let mesh = mesh.rotated(
                clamp_angle("rotate-x", *rotate_x),
                clamp_angle("rotate-y", *rotate_y),
                clamp_angle("rotate-z", *rotate_z),
            );
            let projector = match fixed_scale {
                Some(scale) => ShadowProjector::with_fixed_scale(*scale),
                None => ShadowProjector::new(),
            };
            (GeometryModel::Mesh(mesh), projector)
        }
    };

    let report = run_query(&site, &query, &model, &projector, &SpencerEphemeris);
    print_report(&site, &report);

    if cli.draw {
        let session = draw::start_session()?;
        draw::render_scene(&session, &model, &report, cli.style.into())?;
    }

    Ok(())
}
