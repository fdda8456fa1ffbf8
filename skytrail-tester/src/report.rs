//! Report generation for voyage sweeps.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use crate::simulation::{VoyageOutcome, VoyageRecord};

/// Aggregate statistics over a sweep of seeded voyages.
#[derive(Debug, Clone, Serialize)]
pub struct SweepAggregate {
    pub voyages: usize,
    pub victories: usize,
    pub boss_wins: usize,
    pub grounded: usize,
    pub stalled: usize,
    pub cap_reached: usize,
    pub mean_flights: f64,
    pub mean_parts: f64,
    pub mean_distance_km: f64,
    pub encounter_rate: f64,
}

#[must_use]
pub fn aggregate(records: &[VoyageRecord]) -> SweepAggregate {
    let voyages = records.len();
    let mut agg = SweepAggregate {
        voyages,
        victories: 0,
        boss_wins: 0,
        grounded: 0,
        stalled: 0,
        cap_reached: 0,
        mean_flights: 0.0,
        mean_parts: 0.0,
        mean_distance_km: 0.0,
        encounter_rate: 0.0,
    };
    if voyages == 0 {
        return agg;
    }

    let mut flights = 0u64;
    let mut parts = 0i64;
    let mut distance = 0.0f64;
    let mut encounters = 0u64;
    for record in records {
        match record.outcome {
            VoyageOutcome::Victory { boss_won } => {
                agg.victories += 1;
                agg.boss_wins += usize::from(boss_won);
            }
            VoyageOutcome::Grounded => agg.grounded += 1,
            VoyageOutcome::Stalled => agg.stalled += 1,
            VoyageOutcome::CapReached => agg.cap_reached += 1,
        }
        flights += u64::from(record.flights);
        parts += i64::from(record.parts_found);
        distance += record.distance_km;
        encounters += u64::from(record.encounters);
    }

    let count = voyages as f64;
    agg.mean_flights = flights as f64 / count;
    agg.mean_parts = parts as f64 / count;
    agg.mean_distance_km = distance / count;
    if flights > 0 {
        agg.encounter_rate = encounters as f64 / flights as f64;
    }
    agg
}

/// Human-readable summary, one row per voyage plus the aggregate block.
///
/// # Errors
///
/// Propagates write failures on the output target.
pub fn write_console_report(
    out: &mut dyn Write,
    records: &[VoyageRecord],
    aggregate: &SweepAggregate,
    elapsed: Duration,
) -> Result<()> {
    writeln!(out, "{}", "✈️  Voyage Results".bright_yellow().bold())?;
    writeln!(out, "{}", "-".repeat(60).yellow())?;
    for record in records {
        let (mark, label) = outcome_label(record.outcome);
        writeln!(
            out,
            "{mark} seed {:<12} {:<12} {:>2} flights  {}/4 parts  {:>6.0} km  fuel {:>3}  hp {:>3}",
            record.seed,
            label,
            record.flights,
            record.parts_found,
            record.distance_km,
            record.final_fuel,
            record.final_hp,
        )?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "📊 Sweep Summary".bright_cyan().bold())?;
    writeln!(
        out,
        "  voyages: {}  victories: {} (boss wins {})  grounded: {}  stalled: {}  cap: {}",
        aggregate.voyages,
        aggregate.victories,
        aggregate.boss_wins,
        aggregate.grounded,
        aggregate.stalled,
        aggregate.cap_reached,
    )?;
    writeln!(
        out,
        "  mean flights: {:.1}  mean parts: {:.2}  mean distance: {:.0} km  encounter rate: {:.0}%",
        aggregate.mean_flights,
        aggregate.mean_parts,
        aggregate.mean_distance_km,
        aggregate.encounter_rate * 100.0,
    )?;
    writeln!(out, "🏁 Total time: {elapsed:?}")?;
    Ok(())
}

/// Machine-readable report: records plus their aggregate.
///
/// # Errors
///
/// Propagates serialization and write failures.
pub fn write_json_report(
    out: &mut dyn Write,
    records: &[VoyageRecord],
    aggregate: &SweepAggregate,
) -> Result<()> {
    #[derive(Serialize)]
    struct JsonReport<'a> {
        voyages: &'a [VoyageRecord],
        aggregate: &'a SweepAggregate,
    }
    serde_json::to_writer_pretty(
        &mut *out,
        &JsonReport {
            voyages: records,
            aggregate,
        },
    )?;
    writeln!(out)?;
    Ok(())
}

fn outcome_label(outcome: VoyageOutcome) -> (&'static str, String) {
    match outcome {
        VoyageOutcome::Victory { boss_won: true } => ("✅", "victory".green().to_string()),
        VoyageOutcome::Victory { boss_won: false } => {
            ("✅", "victory*".green().to_string())
        }
        VoyageOutcome::Grounded => ("⛽", "grounded".red().to_string()),
        VoyageOutcome::Stalled => ("🛑", "stalled".red().to_string()),
        VoyageOutcome::CapReached => ("⏱️", "cap".yellow().to_string()),
    }
}
