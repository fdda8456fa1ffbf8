//! Seeded voyage simulation: plays one full session with a scripted
//! policy and records what happened.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeSet;

use skytrail_game::constants::ROCKET_PART_COUNT;
use skytrail_game::{GameError, MemoryAtlas, ReachableDestination, Session};

/// Destination-picking strategy for a scripted voyage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Fly to the nearest country not yet visited, falling back to the
    /// overall nearest option.
    Nearest,
    /// Fly toward hidden rocket parts first (the tester may read the
    /// world state the player never sees), otherwise behave like Nearest.
    Seeker,
}

impl Policy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Seeker => "seeker",
        }
    }

    fn choose<'a>(
        self,
        destinations: &'a [ReachableDestination],
        part_countries: &BTreeSet<String>,
        visited: &BTreeSet<String>,
    ) -> &'a ReachableDestination {
        if self == Self::Seeker
            && let Some(target) = destinations
                .iter()
                .find(|d| part_countries.contains(&d.iso_country))
        {
            return target;
        }
        destinations
            .iter()
            .find(|d| !visited.contains(&d.iso_country))
            .unwrap_or(&destinations[0])
    }
}

/// How one scripted voyage ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoyageOutcome {
    /// All rocket parts collected; `boss_won` records the final fight.
    Victory { boss_won: bool },
    /// Fuel dropped below the flight cost with no way to recover.
    Grounded,
    /// Nothing reachable inside the current range.
    Stalled,
    /// Flight cap hit before any terminal condition.
    CapReached,
}

/// Ledger for one seeded voyage.
#[derive(Debug, Clone, Serialize)]
pub struct VoyageRecord {
    pub seed: u64,
    pub policy: Policy,
    pub flights: u32,
    pub rests: u32,
    pub parts_found: i32,
    pub encounters: u32,
    pub encounters_won: u32,
    pub distance_km: f64,
    pub final_fuel: i32,
    pub final_hp: i32,
    pub final_time_left: i32,
    pub outcome: VoyageOutcome,
}

// Rest whenever hp sinks to this threshold and food remains.
const REST_HP_THRESHOLD: i32 = 50;

/// Play one session to a terminal state or the flight cap.
///
/// # Errors
///
/// Fails when the session reports anything other than the expected
/// gameplay preconditions (fuel/range), which would indicate an engine
/// bug worth surfacing loudly.
pub fn run_voyage(
    atlas: &MemoryAtlas,
    seed: u64,
    policy: Policy,
    max_flights: u32,
) -> Result<VoyageRecord> {
    let mut session = Session::new(atlas.clone(), seed);
    session.start().context("session start")?;
    session.choose_role("pilot").context("role selection")?;

    let mut record = VoyageRecord {
        seed,
        policy,
        flights: 0,
        rests: 0,
        parts_found: 0,
        encounters: 0,
        encounters_won: 0,
        distance_km: 0.0,
        final_fuel: 0,
        final_hp: 0,
        final_time_left: 0,
        outcome: VoyageOutcome::CapReached,
    };
    let mut visited = BTreeSet::new();

    while record.flights < max_flights {
        maybe_rest(&mut session, &mut record)?;

        let destinations = session
            .list_reachable_destinations()
            .context("reachable listing")?;
        if destinations.is_empty() {
            record.outcome = VoyageOutcome::Stalled;
            break;
        }
        let part_countries = session
            .world()
            .context("active world")?
            .rocket_part_countries
            .clone();
        let target = policy.choose(&destinations, &part_countries, &visited);
        let target_ident = target.ident.clone();

        match session.travel(&target_ident) {
            Ok(report) => {
                record.flights += 1;
                record.distance_km += report.effects.distance_km;
                if let Some(outcome) = report.effects.encounter {
                    record.encounters += 1;
                    record.encounters_won += u32::from(outcome.won);
                }
                let character = report.snapshot.character.context("active character")?;
                record.parts_found = character.rocket_parts;
                visited.insert(
                    report
                        .snapshot
                        .world
                        .context("active world")?
                        .location
                        .iso_country
                        .clone(),
                );
                log::debug!(
                    "seed {seed}: flight {} to {target_ident}, {} part(s)",
                    record.flights,
                    record.parts_found
                );
                if record.parts_found as usize >= ROCKET_PART_COUNT {
                    let boss = session.boss_fight().context("boss fight")?;
                    record.outcome = VoyageOutcome::Victory {
                        boss_won: boss.outcome.won,
                    };
                    break;
                }
            }
            Err(GameError::InsufficientFuel { .. }) => {
                record.outcome = VoyageOutcome::Grounded;
                break;
            }
            Err(err) => return Err(err).context("unexpected travel failure"),
        }
    }

    let snapshot = session.snapshot();
    if let Some(character) = snapshot.character {
        record.final_fuel = character.fuel;
        record.final_hp = character.hp;
        record.parts_found = character.rocket_parts;
    }
    if let Some(world) = snapshot.world {
        record.final_time_left = world.time_left_hours;
    }
    Ok(record)
}

fn maybe_rest(session: &mut Session<MemoryAtlas>, record: &mut VoyageRecord) -> Result<()> {
    let Some(character) = session.character() else {
        return Ok(());
    };
    if character.hp <= REST_HP_THRESHOLD && character.food > 0 {
        session.rest().context("rest")?;
        record.rests += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atlas() -> MemoryAtlas {
        MemoryAtlas::from_json(include_str!("../assets/airports.json")).unwrap()
    }

    #[test]
    fn voyage_is_deterministic_per_seed() {
        let atlas = atlas();
        let first = run_voyage(&atlas, 1337, Policy::Seeker, 30).unwrap();
        let second = run_voyage(&atlas, 1337, Policy::Seeker, 30).unwrap();
        assert_eq!(first.flights, second.flights);
        assert_eq!(first.parts_found, second.parts_found);
        assert_eq!(first.outcome, second.outcome);
    }

    #[test]
    fn voyage_respects_the_flight_cap() {
        let atlas = atlas();
        let record = run_voyage(&atlas, 7, Policy::Nearest, 5).unwrap();
        assert!(record.flights <= 5);
        assert!(record.final_time_left >= 168 - 12 * 5 - 1);
    }

    #[test]
    fn seeker_never_records_negative_resources() {
        let atlas = atlas();
        for seed in 0..8 {
            let record = run_voyage(&atlas, seed, Policy::Seeker, 40).unwrap();
            assert!(record.final_fuel >= 0, "seed {seed}");
            assert!((0..=100).contains(&record.final_hp), "seed {seed}");
            assert!((0..=4).contains(&record.parts_found), "seed {seed}");
        }
    }
}
