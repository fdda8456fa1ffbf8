use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::constants::{START_RANGE_KM, START_TIME_HOURS};
use crate::geo::Location;

/// Mutable per-session world state.
///
/// Created once by `Session::start` and mutated only by the flight state
/// machine. The rocket-part set is fixed at creation and only ever
/// shrinks as parts are discovered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    /// Airport the player is currently at.
    pub location: Location,
    /// Maximum distance the next flight may cover, in kilometres.
    pub range_km: f64,
    /// Remaining time budget in hours.
    pub time_left_hours: i32,
    /// Countries still hiding an undiscovered rocket part.
    pub rocket_part_countries: BTreeSet<String>,
}

impl WorldState {
    /// Fresh world at the starting airport with the documented budgets.
    #[must_use]
    pub const fn new(location: Location, rocket_part_countries: BTreeSet<String>) -> Self {
        Self {
            location,
            range_km: START_RANGE_KM,
            time_left_hours: START_TIME_HOURS,
            rocket_part_countries,
        }
    }

    /// Claim the rocket part hidden in `iso_country`, if any.
    ///
    /// Returns true when a part was present and has now been removed.
    pub fn take_rocket_part(&mut self, iso_country: &str) -> bool {
        self.rocket_part_countries.remove(iso_country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchorage() -> Location {
        Location {
            ident: "PANC".to_string(),
            name: "Ted Stevens Anchorage".to_string(),
            lat: 61.1744,
            lon: -149.996,
            iso_country: "US".to_string(),
            municipality: Some("Anchorage".to_string()),
        }
    }

    #[test]
    fn new_world_uses_start_budgets() {
        let parts: BTreeSet<String> = ["EE", "SE"].iter().map(ToString::to_string).collect();
        let world = WorldState::new(anchorage(), parts.clone());
        assert_eq!(world.range_km, 400.0);
        assert_eq!(world.time_left_hours, 168);
        assert_eq!(world.rocket_part_countries, parts);
    }

    #[test]
    fn rocket_part_set_only_shrinks() {
        let parts: BTreeSet<String> = ["EE", "SE"].iter().map(ToString::to_string).collect();
        let mut world = WorldState::new(anchorage(), parts);
        assert!(world.take_rocket_part("EE"));
        assert!(!world.take_rocket_part("EE"));
        assert!(!world.take_rocket_part("NO"));
        assert_eq!(world.rocket_part_countries.len(), 1);
    }
}
