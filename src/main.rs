use clap::{Parser, Subcommand};
use std::cmp;
use std::fs;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};

use orbiteye::catalog;
use orbiteye::config::Config;
use orbiteye::elements::split_tle_text;
use orbiteye::track::{build_path, Status, TrackSession};
use orbiteye::{OrbitalElements, Propagator};

#[derive(Parser)]
#[command(name = "orbiteye")]
#[command(about = "Real-time satellite ground-track engine")]
struct Cli {
    /// Optional YAML configuration file
    #[arg(long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in satellite catalog
    Catalog,
    /// Run a live tracking session, printing one fix per tick
    Track {
        /// Catalog satellite name (exact or substring)
        #[arg(long)]
        sat: Option<String>,
        /// Path to a TLE file (2- or 3-line block)
        #[arg(long)]
        tle: Option<String>,
        /// Publish cadence, e.g. "1s" or "500ms"
        #[arg(long)]
        cadence: Option<String>,
        /// Stop after this many fixes (runs until killed otherwise)
        #[arg(long)]
        count: Option<u64>,
    },
    /// Precompute a forward ground track and print it
    Path {
        /// Catalog satellite name (exact or substring)
        #[arg(long)]
        sat: Option<String>,
        /// Path to a TLE file (2- or 3-line block)
        #[arg(long)]
        tle: Option<String>,
        /// Sampling window, e.g. "2h"
        #[arg(long)]
        window: Option<String>,
        /// Sampling step, e.g. "20s"
        #[arg(long)]
        step: Option<String>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error reading config: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    match cli.command {
        Commands::Catalog => list_catalog(),
        Commands::Track {
            sat,
            tle,
            cadence,
            count,
        } => track_live(&config, sat, tle, cadence, count).await,
        Commands::Path {
            sat,
            tle,
            window,
            step,
            json,
        } => dump_path(&config, sat, tle, window, step, json),
    }
}

fn list_catalog() -> ExitCode {
    println!("{:<13} {:<18} {:<15} {:>6}", "NAME", "TYPE", "OWNER", "LAUNCH");
    for entry in catalog::entries() {
        println!(
            "{:<13} {:<18} {:<15} {:>6}",
            entry.name, entry.details.kind, entry.details.owner, entry.details.launched
        );
    }
    ExitCode::SUCCESS
}

async fn track_live(
    config: &Config,
    sat: Option<String>,
    tle: Option<String>,
    cadence: Option<String>,
    count: Option<u64>,
) -> ExitCode {
    let (name, line1, line2) = match resolve_elements(config, sat, tle) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let cadence = match cadence.as_deref().map(parse_cadence).transpose() {
        Ok(c) => c.unwrap_or_else(|| StdDuration::from_secs(config.track.cadence_secs)),
        Err(e) => {
            eprintln!("Invalid cadence: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let window = Duration::seconds(config.track.window_secs as i64);
    let step = Duration::seconds(config.track.step_secs as i64);

    let mut session = TrackSession::with_timing(window, step, cadence);
    if let Err(e) = session.load(name.as_deref(), &line1, &line2).await {
        eprintln!("Load failed: {}", e);
        return ExitCode::FAILURE;
    }

    let display_name = session
        .elements()
        .and_then(|e| e.name().map(String::from))
        .unwrap_or_else(|| "unnamed object".to_string());
    let path_samples = session.path().map(|p| p.len()).unwrap_or(0);
    println!("Tracking {} ({} path samples)", display_name, path_samples);

    let feed = match session.fix_feed() {
        Some(f) => f,
        None => {
            eprintln!("No live feed available");
            return ExitCode::FAILURE;
        }
    };

    let poll = cmp::max(cadence / 2, StdDuration::from_millis(1));
    let mut last_tick = None;
    let mut last_status = Status::Tracking;
    let mut printed = 0u64;

    loop {
        tokio::time::sleep(poll).await;

        let status = feed.status();
        if status != last_status {
            println!("status: {}", status);
            last_status = status;
        }

        if let Some(fix) = feed.latest() {
            if last_tick != Some(fix.timestamp) {
                println!(
                    "{}  lat {:>9.4}  lon {:>10.4}  alt {:>9.2} km  vel {:>6.2} km/s",
                    fix.timestamp.format("%H:%M:%S"),
                    fix.latitude_deg,
                    fix.longitude_deg,
                    fix.height_km,
                    fix.speed_km_s
                );
                last_tick = Some(fix.timestamp);
                printed += 1;
                if let Some(n) = count {
                    if printed >= n {
                        break;
                    }
                }
            }
        }
    }

    session.close().await;
    ExitCode::SUCCESS
}

fn dump_path(
    config: &Config,
    sat: Option<String>,
    tle: Option<String>,
    window: Option<String>,
    step: Option<String>,
    json: bool,
) -> ExitCode {
    let (name, line1, line2) = match resolve_elements(config, sat, tle) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let window = match window.as_deref().map(parse_duration).transpose() {
        Ok(w) => w.unwrap_or_else(|| Duration::seconds(config.track.window_secs as i64)),
        Err(e) => {
            eprintln!("Invalid window: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let step = match step.as_deref().map(parse_duration).transpose() {
        Ok(s) => s.unwrap_or_else(|| Duration::seconds(config.track.step_secs as i64)),
        Err(e) => {
            eprintln!("Invalid step: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let elements = match OrbitalElements::parse(name.as_deref(), &line1, &line2) {
        Ok(e) => Arc::new(e),
        Err(e) => {
            eprintln!("Parse error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let propagator = match Propagator::new(elements) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Model rejected elements: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let path = build_path(&propagator, Utc::now(), window, step);

    if json {
        match serde_json::to_string_pretty(path.samples()) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("JSON error: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    println!("Ground track: {} samples", path.len());
    println!("{:<20} {:>9} {:>10} {:>10}", "TIME (UTC)", "LAT", "LON", "ALT KM");
    for sample in path.samples() {
        println!(
            "{:<20} {:>9.4} {:>10.4} {:>10.2}",
            sample.timestamp.format("%Y-%m-%d %H:%M:%S"),
            sample.latitude_deg,
            sample.longitude_deg,
            sample.height_km
        );
    }
    ExitCode::SUCCESS
}

fn resolve_elements(
    config: &Config,
    sat: Option<String>,
    tle: Option<String>,
) -> Result<(Option<String>, String, String), String> {
    if let Some(path) = tle {
        let content =
            fs::read_to_string(&path).map_err(|e| format!("reading {}: {}", path, e))?;
        return split_tle_text(&content).map_err(|e| format!("{}: {}", path, e));
    }

    let name = sat
        .or_else(|| config.default_satellite.clone())
        .ok_or_else(|| "no satellite selected (use --sat or --tle)".to_string())?;

    match catalog::lookup(&name) {
        Some(entry) => Ok((
            Some(entry.name.to_string()),
            entry.line1.to_string(),
            entry.line2.to_string(),
        )),
        None => Err(format!("satellite '{}' not found in catalog", name)),
    }
}

fn parse_duration(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s.trim())
        .map_err(|e| e.to_string())
        .and_then(|d| Duration::from_std(d).map_err(|e| e.to_string()))
}

fn parse_cadence(s: &str) -> Result<StdDuration, String> {
    humantime::parse_duration(s.trim()).map_err(|e| e.to_string())
}
