use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use geofence_cli::{parse_coordinate_pair, render_check, render_distance};
use geofence_lib::config::{DEFAULT_CENTER_LAT, DEFAULT_CENTER_LON, DEFAULT_RADIUS_METERS};
use geofence_lib::{
    haversine_distance, resolve_device_id, EventRecordBuilder, GeoPoint, GeofenceConfig,
    GeofenceEvaluator,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Circular geofence utilities")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one location against the geofence and print the event record.
    #[command(allow_negative_numbers = true)]
    Check {
        /// Latitude in decimal degrees.
        #[arg(long)]
        lat: f64,
        /// Longitude in decimal degrees.
        #[arg(long)]
        lon: f64,
        /// Device identity recorded with the event.
        #[arg(long)]
        device_id: Option<String>,
        /// Print the event record as JSON.
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        geofence: GeofenceArgs,
    },
    /// Great-circle distance in meters between two points.
    Distance {
        /// Starting point as LAT,LON.
        #[arg(long = "from", value_parser = parse_coordinate_pair, allow_hyphen_values = true)]
        from: GeoPoint,
        /// End point as LAT,LON.
        #[arg(long = "to", value_parser = parse_coordinate_pair, allow_hyphen_values = true)]
        to: GeoPoint,
    },
}

#[derive(Args, Debug)]
struct GeofenceArgs {
    /// Geofence center latitude.
    #[arg(long, default_value_t = DEFAULT_CENTER_LAT)]
    center_lat: f64,
    /// Geofence center longitude.
    #[arg(long, default_value_t = DEFAULT_CENTER_LON)]
    center_lon: f64,
    /// Geofence radius in meters.
    #[arg(long, default_value_t = DEFAULT_RADIUS_METERS)]
    radius: f64,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Check {
            lat,
            lon,
            device_id,
            json,
            geofence,
        } => handle_check(lat, lon, device_id.as_deref(), json, &geofence),
        Command::Distance { from, to } => handle_distance(&from, &to),
    }
}

fn handle_check(
    lat: f64,
    lon: f64,
    device_id: Option<&str>,
    json: bool,
    args: &GeofenceArgs,
) -> Result<()> {
    let geofence = GeofenceConfig::from_degrees(args.center_lat, args.center_lon, args.radius)
        .context("invalid geofence")?;
    let point = GeoPoint::new(lat, lon).context("invalid location")?;

    let result = GeofenceEvaluator::new(&geofence)
        .evaluate(&point)
        .context("failed to evaluate location")?;
    debug!(inside = result.inside, distance_m = result.distance_meters, "evaluated");

    let record = EventRecordBuilder::new().build(
        point,
        resolve_device_id(device_id, None),
        &result,
    );

    if json {
        let body =
            serde_json::to_string_pretty(&record).context("failed to serialize event record")?;
        println!("{body}");
    } else {
        print!("{}", render_check(&record));
    }

    Ok(())
}

fn handle_distance(from: &GeoPoint, to: &GeoPoint) -> Result<()> {
    let meters = haversine_distance(from, to);
    println!("{}", render_distance(from, to, meters));
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
