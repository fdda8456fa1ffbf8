//! Session lifecycle: the single in-memory game a boundary layer drives.
//!
//! The session owns the only random source in the engine (one seeded
//! ChaCha20 stream) and the seam to the geographic collaborator. Every
//! operation is a plain, run-to-completion computation; callers serialize
//! access to one session, and a multi-session deployment keys a map of
//! `Session` values with one lock per entry.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::GeoData;
use crate::character::{Character, Role};
use crate::combat::{EncounterOutcome, boss_fight, resolve_encounter};
use crate::constants::{ROCKET_PART_COUNT, START_AIRPORT_IDENT};
use crate::error::GameError;
use crate::flight::{self, TravelEffects};
use crate::geo::nearest_per_country;
use crate::loot::spawn_rocket_parts;
use crate::world::WorldState;

/// Serializable view of the current session, the payload every operation
/// hands back to the boundary layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionSnapshot {
    pub world: Option<WorldState>,
    pub character: Option<Character>,
}

/// One row of the reachable-destination listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReachableDestination {
    /// Human-readable country name, falling back to the ISO code.
    pub country: String,
    pub iso_country: String,
    pub ident: String,
    pub distance_km: f64,
}

/// Travel result: what the flight did plus the post-flight state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelReport {
    pub effects: TravelEffects,
    pub snapshot: SessionSnapshot,
}

/// Result of an explicitly requested fight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FightReport {
    pub outcome: EncounterOutcome,
    pub snapshot: SessionSnapshot,
}

/// The game session: world and character slots plus the shared RNG.
#[derive(Debug, Clone)]
pub struct Session<G: GeoData> {
    geo: G,
    rng: ChaCha20Rng,
    world: Option<WorldState>,
    character: Option<Character>,
}

impl<G: GeoData> Session<G> {
    /// Create an idle session (no world, no character) over a collaborator
    /// and a reproducible seed.
    #[must_use]
    pub fn new(geo: G, seed: u64) -> Self {
        Self {
            geo,
            rng: ChaCha20Rng::seed_from_u64(seed),
            world: None,
            character: None,
        }
    }

    /// Run one collaborator read, retrying once on failure.
    ///
    /// Collaborator reads are side-effect free, so a single local retry is
    /// safe; a second failure surfaces as `DataUnavailable`.
    fn geo_call<T>(&self, call: impl Fn(&G) -> Result<T, G::Error>) -> Result<T, GameError> {
        match call(&self.geo) {
            Ok(value) => Ok(value),
            Err(first) => {
                log::warn!("geo lookup failed, retrying once: {first}");
                call(&self.geo).map_err(|err| GameError::DataUnavailable(err.to_string()))
            }
        }
    }

    /// Start (or restart) the game: place the player at the starting
    /// airport, hide the rocket parts, and clear any previous character.
    ///
    /// # Errors
    ///
    /// `DestinationNotFound` when the starting airport is missing from the
    /// collaborator's data, `DataUnavailable` on collaborator failure.
    pub fn start(&mut self) -> Result<SessionSnapshot, GameError> {
        let origin = self
            .geo_call(|geo| geo.lookup_location(START_AIRPORT_IDENT))?
            .ok_or_else(|| GameError::DestinationNotFound(START_AIRPORT_IDENT.to_string()))?;
        let codes = self.geo_call(|geo| geo.country_codes(&origin.iso_country))?;
        let parts = spawn_rocket_parts(&codes, &origin.iso_country, ROCKET_PART_COUNT, &mut self.rng);
        log::info!(
            "session started at {} with {} hidden rocket parts",
            origin.ident,
            parts.len()
        );
        self.world = Some(WorldState::new(origin, parts));
        self.character = None;
        Ok(self.snapshot())
    }

    /// Create the session's character from a role name.
    ///
    /// # Errors
    ///
    /// `NoActiveSession` before `start`, `InvalidRole` for unknown input.
    pub fn choose_role(&mut self, role: &str) -> Result<SessionSnapshot, GameError> {
        if self.world.is_none() {
            return Err(GameError::NoActiveSession);
        }
        let role: Role = role.parse()?;
        log::info!("character created with role {role}");
        self.character = Some(Character::new(role));
        Ok(self.snapshot())
    }

    /// List the nearest in-range airport of every foreign country, sorted
    /// by distance, with display names resolved once per country.
    ///
    /// # Errors
    ///
    /// `NoActiveSession` before `start`, `DataUnavailable` on collaborator
    /// failure.
    pub fn list_reachable_destinations(&self) -> Result<Vec<ReachableDestination>, GameError> {
        let world = self.world.as_ref().ok_or(GameError::NoActiveSession)?;
        let candidates =
            self.geo_call(|geo| geo.candidate_locations(&world.location.iso_country))?;
        let nearest = nearest_per_country(
            &world.location,
            &candidates,
            &world.location.iso_country,
            world.range_km,
        );
        let mut destinations = Vec::with_capacity(nearest.len());
        for option in nearest {
            let country = self
                .geo_call(|geo| geo.country_name(&option.iso_country))?
                .unwrap_or_else(|| option.iso_country.clone());
            destinations.push(ReachableDestination {
                country,
                iso_country: option.iso_country,
                ident: option.ident,
                distance_km: option.distance_km,
            });
        }
        Ok(destinations)
    }

    /// Fly to the airport identified by `dest_ident`.
    ///
    /// # Errors
    ///
    /// Session guards (`NoActiveSession`, `NoActiveCharacter`) are checked
    /// first, then `DestinationNotFound`, then the flight preconditions
    /// from [`flight::fly`]. No error path mutates the session.
    pub fn travel(&mut self, dest_ident: &str) -> Result<TravelReport, GameError> {
        if self.world.is_none() {
            return Err(GameError::NoActiveSession);
        }
        if self.character.is_none() {
            return Err(GameError::NoActiveCharacter);
        }
        let destination = self
            .geo_call(|geo| geo.lookup_location(dest_ident))?
            .ok_or_else(|| GameError::DestinationNotFound(dest_ident.to_string()))?;
        let (Some(world), Some(character)) = (self.world.as_mut(), self.character.as_mut()) else {
            return Err(GameError::NoActiveSession);
        };
        let effects = flight::fly(world, character, destination, &mut self.rng)?;
        log::info!(
            "flew {:.1} km to {} ({} part(s) held)",
            effects.distance_km,
            world.location.ident,
            character.rocket_parts
        );
        Ok(TravelReport {
            effects,
            snapshot: self.snapshot(),
        })
    }

    /// Eat one food unit to heal.
    ///
    /// # Errors
    ///
    /// Session guards first, then `FullHealth` / `NoFood` from
    /// [`flight::rest`].
    pub fn rest(&mut self) -> Result<SessionSnapshot, GameError> {
        if self.world.is_none() {
            return Err(GameError::NoActiveSession);
        }
        let character = self
            .character
            .as_mut()
            .ok_or(GameError::NoActiveCharacter)?;
        flight::rest(character)?;
        Ok(self.snapshot())
    }

    /// Fight an enemy on demand, resolved against the ammo supply.
    ///
    /// # Errors
    ///
    /// `NoActiveSession` / `NoActiveCharacter` session guards.
    pub fn fight(&mut self) -> Result<FightReport, GameError> {
        if self.world.is_none() {
            return Err(GameError::NoActiveSession);
        }
        let Some(character) = self.character.as_mut() else {
            return Err(GameError::NoActiveCharacter);
        };
        let outcome = resolve_encounter(character, &mut self.rng);
        Ok(FightReport {
            outcome,
            snapshot: self.snapshot(),
        })
    }

    /// Final confrontation: ammo-gated, no loot.
    ///
    /// # Errors
    ///
    /// `NoActiveSession` / `NoActiveCharacter` session guards.
    pub fn boss_fight(&mut self) -> Result<FightReport, GameError> {
        if self.world.is_none() {
            return Err(GameError::NoActiveSession);
        }
        let Some(character) = self.character.as_mut() else {
            return Err(GameError::NoActiveCharacter);
        };
        let won = boss_fight(character);
        Ok(FightReport {
            outcome: EncounterOutcome { won, loot: None },
            snapshot: self.snapshot(),
        })
    }

    /// Current (world, character) view.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            world: self.world.clone(),
            character: self.character.clone(),
        }
    }

    /// Borrow the active world, if any.
    #[must_use]
    pub const fn world(&self) -> Option<&WorldState> {
        self.world.as_ref()
    }

    /// Borrow the active character, if any.
    #[must_use]
    pub const fn character(&self) -> Option<&Character> {
        self.character.as_ref()
    }
}
