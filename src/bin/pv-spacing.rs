use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use pv_row_spacing::{
    daily_profile, evaluate_at_label, verify_existing_spacing, ConstraintStatus, DailyProfile,
    DesignConditions, DesignResult, GeoLocation, HeightSource, MarginConfig, RegionCatalog,
    ShadowLength, SpacingVerdict,
};

/// Winter-solstice row spacing for fixed-tilt PV arrays
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Region dataset JSON ({"regions": [{"id", "lat", "lon", "nameJa"}]})
    #[arg(long, env = "PV_SPACING_REGIONS")]
    regions: Option<PathBuf>,
    /// Region id to look up in the dataset (defaults to the saved conditions' region)
    #[arg(long)]
    region: Option<String>,
    /// Latitude in decimal degrees; overrides the region dataset
    #[arg(long, allow_hyphen_values = true, requires = "longitude")]
    latitude: Option<f64>,
    /// Longitude in decimal degrees; overrides the region dataset
    #[arg(long, allow_hyphen_values = true, requires = "latitude")]
    longitude: Option<f64>,

    /// Saved design conditions (JSON)
    #[arg(long, env = "PV_SPACING_CONDITIONS")]
    conditions: Option<PathBuf>,
    /// Write the effective design conditions to this file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Design time on the winter-solstice grid (09:00 to 15:00)
    #[arg(long)]
    time: Option<String>,
    /// Panel azimuth in degrees (north = 0, south = 180)
    #[arg(long)]
    panel_azimuth: Option<f64>,
    /// Top-of-panel height above ground in meters, instead of panel dimensions
    #[arg(long)]
    height: Option<f64>,
    /// Margin mode: "factor" or "fixed"
    #[arg(long, requires = "margin_value")]
    margin_mode: Option<String>,
    /// Margin multiplier (factor) or added meters (fixed)
    #[arg(long, requires = "margin_mode", allow_hyphen_values = true)]
    margin_value: Option<f64>,

    /// Existing row spacing in meters to check against the recommendation
    #[arg(long)]
    existing: Option<f64>,
    /// Print JSON instead of a text report
    #[arg(long)]
    json: bool,
    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct Report<'a> {
    result: &'a DesignResult,
    profile: &'a DailyProfile,
    verdict: Option<SpacingVerdict>,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn load_conditions(args: &Args) -> Result<DesignConditions> {
    let mut conditions = match &args.conditions {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading conditions from {}", path.display()))?;
            DesignConditions::from_json_str(&json)
                .with_context(|| format!("parsing conditions in {}", path.display()))?
        }
        None => DesignConditions::default(),
    };
    if let Some(region) = &args.region {
        conditions.region_id = region.clone();
    }
    if let Some(time) = &args.time {
        conditions.time = time.clone();
    }
    if let Some(az) = args.panel_azimuth {
        conditions.panel_azimuth = az;
    }
    if let Some(height_m) = args.height {
        conditions.height = HeightSource::Direct { height_m };
    }
    if let (Some(mode), Some(value)) = (&args.margin_mode, args.margin_value) {
        conditions.margin = MarginConfig::from_mode(mode, value)?;
    }
    Ok(conditions)
}

fn resolve_location(args: &Args, conditions: &DesignConditions) -> Result<(GeoLocation, String)> {
    if let (Some(lat), Some(lon)) = (args.latitude, args.longitude) {
        return Ok((GeoLocation::new(lat, lon)?, format!("{lat:.2}, {lon:.2}")));
    }
    let Some(path) = &args.regions else {
        bail!("no location given: pass --latitude/--longitude or --regions with a region id");
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading region dataset {}", path.display()))?;
    let catalog = RegionCatalog::from_json_str(&json)
        .with_context(|| format!("parsing region dataset {}", path.display()))?;
    let region = catalog.find(&conditions.region_id)?;
    Ok((region.location()?, region.name.clone()))
}

fn print_report(
    place: &str,
    r: &DesignResult,
    profile: &DailyProfile,
    verdict: Option<SpacingVerdict>,
) {
    println!("=== PV Row Spacing (winter solstice) ===");
    println!("Location: {} ({:.2}°, {:.2}°)", place, r.location.latitude, r.location.longitude);
    println!("Time: {}", r.time.format("%H:%M"));
    println!();
    println!("--- Sun ---");
    println!("Altitude: {:.1}°", r.solar_position.altitude);
    println!("Azimuth: {:.1}° (0°=N, 90°=E, 180°=S)", r.solar_position.azimuth);
    println!("Panel azimuth: {:.1}° (ΔA = {:.1}°)", r.panel_azimuth, r.shadow.azimuth_diff);
    println!();
    println!("--- Shadow ---");
    println!("Top GL height: {:.3} m", r.top_height_m);
    match r.shadow.basic {
        ShadowLength::Finite(l) => println!("Basic shadow: {l:.2} m"),
        ShadowLength::Unbounded => println!("Basic shadow: unbounded (sun at or below horizon)"),
    }
    println!("Row-axis shadow: {:.2} m", r.shadow.row);
    match r.spacing.status {
        ConstraintStatus::Valid => println!(
            "Recommended spacing: {:.2} m ({})",
            r.spacing.recommended_spacing, r.margin
        ),
        ConstraintStatus::BacksideNoConstraint => {
            println!("Sun is behind or beside the panels: no shadow reaches the next row")
        }
        ConstraintStatus::NightNoConstraint => println!("Sun is below the horizon: no constraint"),
        ConstraintStatus::InvalidGeometry => println!("Panel dimensions are invalid"),
    }
    if let Some(v) = verdict {
        match v {
            SpacingVerdict::NoConstraint => println!("Existing spacing: no shadow constraint"),
            SpacingVerdict::Ok { .. } => println!("Existing spacing: OK, no shading"),
            SpacingVerdict::Shortfall { missing_m } => {
                println!("Existing spacing: NG, {missing_m:.2} m short")
            }
        }
    }
    println!();
    println!("--- Daily profile ---");
    for p in profile.points() {
        let note = if p.is_backside { "  (backside)" } else { "" };
        println!(
            "{}  {:>6.2} m  row shadow {:>6.2} m{}",
            p.label(),
            p.spacing,
            p.row_shadow,
            note
        );
    }
    let g = profile.governing();
    println!("Governing hour: {} ({:.2} m)", g.label(), g.spacing);
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let conditions = load_conditions(&args)?;
    let (location, place) = resolve_location(&args, &conditions)?;

    let result = evaluate_at_label(&conditions, &location, &conditions.time)?;
    let profile = daily_profile(&conditions, &location);
    let verdict = args
        .existing
        .map(|existing| verify_existing_spacing(existing, &result.spacing));

    if args.json {
        let report = Report {
            result: &result,
            profile: &profile,
            verdict,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&place, &result, &profile, verdict);
    }

    if let Some(path) = &args.save {
        fs::write(path, conditions.to_json_string()?)
            .with_context(|| format!("writing conditions to {}", path.display()))?;
    }
    Ok(())
}
