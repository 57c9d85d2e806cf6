use chrono::{DateTime, Utc};
use clap::Parser;
use elements::parse_element_sets;
use orbtypes::prelude::*;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;
use tracker_lib::{
    ground_track::{generate_ground_track, DEFAULT_WINDOW_MINUTES, MAX_WINDOW_MINUTES},
    model::OrbitalState,
    segment::{segment_ground_track, OrbitDirection},
};

/// Compute the segmented ground track of one satellite from a feed file
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Feed file holding the satellite's element set
    #[arg(long)]
    tle: PathBuf,

    /// The feed uses bare '\n' line endings
    #[arg(long)]
    lf: bool,

    /// Satellite name, the first one in the feed when not provided
    #[arg(short = 's', long)]
    satellite: Option<String>,

    /// RFC 3339 start time, now when not provided
    #[arg(long)]
    start: Option<DateTime<Utc>>,

    /// Minutes of track to compute
    #[arg(
        short = 'w',
        long,
        default_value_t = DEFAULT_WINDOW_MINUTES,
        value_parser = clap::value_parser!(u32).range(1..=MAX_WINDOW_MINUTES as i64)
    )]
    window: u32,

    /// Output file path to write, stdout when not provided
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let opts = Opts::parse();

    let mut feed = fs::read_to_string(&opts.tle)?;
    if opts.lf {
        feed = feed.replace('\n', "\r\n");
    }
    let records = parse_element_sets(&feed);
    let tle = match &opts.satellite {
        Some(name) => records.iter().find(|r| &r.name == name),
        None => records.first(),
    }
    .ok_or("No matching element set in the feed")?;

    let state = OrbitalState::from_tle(tle)?;
    let start = truncate_to_seconds(opts.start.unwrap_or_else(Utc::now));
    let points = generate_ground_track(&state, start, opts.window)?;
    let direction = OrbitDirection::from_inclination(state.inclination());
    let segments = segment_ground_track(points, direction);
    eprintln!(
        "{} ({}): {:?}, {} points in {} segments",
        state.name(),
        state.satnum(),
        direction,
        segments.num_points(),
        segments.len()
    );

    let mut out: Box<dyn Write> = match &opts.output {
        Some(p) => Box::new(File::create(p)?),
        None => Box::new(io::stdout().lock()),
    };
    serde_json::to_writer(&mut out, &segments)?;
    writeln!(out)?;

    Ok(())
}
