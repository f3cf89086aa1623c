use anyhow::Result;
use clap::Parser;
use flightpath_cli::waypoint_file::{DEFAULT_ALTITUDE_M, DEFAULT_OUTPUT_FILE, DEFAULT_WAYPOINT_TYPE};
use flightpath_cli::{plan_mission_file, resolve_planner_config, ConfigOverrides, ExportOptions};
use flightpath_core::PlannerConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Constructs a flight path from given waypoints and obstacles
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input mission data JSON file
    mission: PathBuf,

    /// Output waypoint file
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Planner configuration JSON file (flags below override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Step distance between target points in km
    #[arg(long)]
    step: Option<f64>,

    /// Safety margin added to every obstacle radius in km
    #[arg(long)]
    tolerance: Option<f64>,

    /// Heading tolerance for collinear point removal in radians
    #[arg(long)]
    collinearity_tolerance: Option<f64>,

    /// Altitude written for every point in meters
    #[arg(long, default_value_t = DEFAULT_ALTITUDE_M)]
    altitude: f64,

    /// MAVLink command id written for every point
    #[arg(long, default_value_t = DEFAULT_WAYPOINT_TYPE)]
    waypoint_type: u16,

    /// Keep points that cannot be moved out of overlapping zones instead of failing
    #[arg(long)]
    keep_uncorrected: bool,

    /// Skip collinear point removal
    #[arg(long)]
    no_simplify: bool,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn planner_config(&self) -> Result<PlannerConfig> {
        let overrides = ConfigOverrides {
            step_distance_km: self.step,
            exclusion_tolerance_km: self.tolerance,
            collinearity_tolerance_rad: self.collinearity_tolerance,
            keep_uncorrected: self.keep_uncorrected,
            no_simplify: self.no_simplify,
        };
        resolve_planner_config(self.config.as_deref(), &overrides)
    }

    fn export_options(&self) -> ExportOptions {
        ExportOptions {
            waypoint_type: self.waypoint_type,
            default_altitude_m: self.altitude,
            ..ExportOptions::default()
        }
    }
}

fn init_tracing(json: bool) -> Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive("flightpath=info".parse()?)
        .add_directive("plan_flight=info".parse()?);
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json)?;

    let config = args.planner_config()?;
    tracing::debug!("Planner config: {:?}", config);

    let stats = plan_mission_file(&args.mission, &args.output, &config, &args.export_options())?;
    tracing::info!(
        "Route: {} points, {:.1} km ({} deflected)",
        stats.output_points,
        stats.route_length_km,
        stats.deflected_points
    );

    Ok(())
}
