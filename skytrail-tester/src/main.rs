mod report;
mod simulation;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use simulation::{Policy, VoyageRecord, run_voyage};
use skytrail_game::MemoryAtlas;

#[derive(Debug, Parser)]
#[command(name = "skytrail-tester", version = "0.1.0")]
#[command(about = "Automated QA sweeps for the Skytrail game engine")]
struct Args {
    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Destination-picking policy for the scripted pilot
    #[arg(long, value_enum, default_value_t = Policy::Seeker)]
    policy: Policy,

    /// Flight cap per voyage before the run is abandoned
    #[arg(long, default_value_t = 40)]
    max_flights: u32,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Optional atlas JSON to replace the bundled European one
    #[arg(long)]
    atlas: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("{}", "🚀 Skytrail Automated Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());

    let start_time = Instant::now();
    let atlas = load_atlas(args.atlas.as_ref())?;
    let seeds = parse_seeds(&args.seeds)?;

    let mut records = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let record = run_voyage(&atlas, seed, args.policy, args.max_flights)
            .with_context(|| format!("voyage with seed {seed}"))?;
        if args.verbose {
            println!(
                "  seed {}: {} flights, {} parts, {} rests",
                seed, record.flights, record.parts_found, record.rests
            );
        }
        records.push(record);
    }

    write_reports(&args, &records, start_time)?;
    Ok(())
}

fn load_atlas(path: Option<&PathBuf>) -> Result<MemoryAtlas> {
    let json = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => include_str!("../assets/airports.json").to_string(),
    };
    MemoryAtlas::from_json(&json).context("atlas JSON parse")
}

fn parse_seeds(csv: &str) -> Result<Vec<u64>> {
    csv.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid seed: {token}"))
        })
        .collect()
}

fn write_reports(args: &Args, records: &[VoyageRecord], start_time: Instant) -> Result<()> {
    let aggregate = report::aggregate(records);
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report.as_str() {
        "json" => report::write_json_report(output_target.writer(), records, &aggregate)?,
        _ => report::write_console_report(
            output_target.writer(),
            records,
            &aggregate,
            start_time.elapsed(),
        )?,
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}
