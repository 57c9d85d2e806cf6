use clap::Parser;
use elements::parse_element_sets;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

/// Parse an element set feed and print the records as JSON
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// The feed uses bare '\n' line endings (files saved by most editors)
    #[arg(long)]
    lf: bool,

    /// Output file path to write, stdout when not provided
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Feed file to read
    input: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let opts = Opts::parse();

    let mut feed = fs::read_to_string(&opts.input)?;
    if opts.lf {
        feed = feed.replace('\n', "\r\n");
    }
    let records = parse_element_sets(&feed);
    eprintln!("Parsed {} element sets", records.len());

    let mut out: Box<dyn Write> = match &opts.output {
        Some(p) => Box::new(File::create(p)?),
        None => Box::new(io::stdout().lock()),
    };
    serde_json::to_writer_pretty(&mut out, &records)?;
    writeln!(out)?;

    Ok(())
}
