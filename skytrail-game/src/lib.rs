//! Skytrail Game Engine
//!
//! Platform-agnostic core logic for the Skytrail flight survival game: a
//! single character hops between real-world airports, spending fuel and
//! time, collecting randomized loot, fighting off chance encounters, and
//! hunting the rocket parts hidden in four countries. Transport, storage,
//! and the airport database live behind trait seams; this crate provides
//! the simulation only.

pub mod atlas;
pub mod character;
pub mod combat;
pub mod constants;
pub mod error;
pub mod flight;
pub mod geo;
pub mod loot;
pub mod session;
pub mod world;

// Re-export commonly used types
pub use atlas::{AtlasData, MemoryAtlas};
pub use character::{Character, ResourceDelta, Role, RoleStart};
pub use combat::{EncounterOutcome, boss_fight, encounter_chance, resolve_encounter};
pub use error::GameError;
pub use flight::{MessageKeySet, TravelEffects, fly, rest};
pub use geo::{Location, NearestAirport, distance_km, nearest_per_country};
pub use loot::{generate_loot, spawn_rocket_parts};
pub use session::{FightReport, ReachableDestination, Session, SessionSnapshot, TravelReport};
pub use world::WorldState;

/// Trait for abstracting the geographic reference dataset.
///
/// The reference deployment backs this with an airport database; tests
/// and the QA tester use [`MemoryAtlas`]. All operations are synchronous,
/// side-effect-free reads; the session retries each call once before
/// surfacing [`GameError::DataUnavailable`].
pub trait GeoData {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Look up one airport by its unique ident.
    ///
    /// # Errors
    ///
    /// Returns an error when the dataset cannot be reached.
    fn lookup_location(&self, ident: &str) -> Result<Option<geo::Location>, Self::Error>;

    /// Enumerate candidate destinations outside `exclude_country`, with
    /// coordinates and country code populated.
    ///
    /// # Errors
    ///
    /// Returns an error when the dataset cannot be reached.
    fn candidate_locations(
        &self,
        exclude_country: &str,
    ) -> Result<Vec<geo::Location>, Self::Error>;

    /// Human-readable country name for an ISO code, when known.
    ///
    /// # Errors
    ///
    /// Returns an error when the dataset cannot be reached.
    fn country_name(&self, iso_country: &str) -> Result<Option<String>, Self::Error>;

    /// All ISO country codes except `exclude_country`, for rocket-part
    /// placement.
    ///
    /// # Errors
    ///
    /// Returns an error when the dataset cannot be reached.
    fn country_codes(&self, exclude_country: &str) -> Result<Vec<String>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut session = Session::new(
            MemoryAtlas::from_json(
                r#"{
                    "airports": [
                        {"ident": "EFHK", "name": "Helsinki Vantaa", "lat": 60.3172,
                         "lon": 24.9633, "iso_country": "FI", "municipality": "Helsinki"}
                    ],
                    "countries": {"FI": "Finland", "EE": "Estonia"}
                }"#,
            )
            .unwrap(),
            5,
        );
        session.start().unwrap();
        session.choose_role("cook").unwrap();

        let snapshot = session.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);
        assert_eq!(
            restored.character.map(|c| c.role),
            Some(Role::Cook)
        );
    }
}
