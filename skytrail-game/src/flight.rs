//! Flight state machine: advances world and character on a travel action
//! and applies the post-travel economy and combat effects.

use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::character::{Character, ResourceDelta};
use crate::combat::{EncounterOutcome, encounter_chance, resolve_encounter};
use crate::constants::{
    FLIGHT_FUEL_COST, FLIGHT_HP_COST, FLIGHT_RANGE_BONUS_KM, FLIGHT_TIME_COST_HOURS, HP_MAX,
    MSG_ENCOUNTER_LOST, MSG_ENCOUNTER_WON, MSG_FLIGHT, MSG_LOOT, MSG_PART_FOUND, REST_FOOD_COST,
    REST_HEAL_HP,
};
use crate::error::GameError;
use crate::geo::{Location, distance_km};
use crate::loot::generate_loot;
use crate::world::WorldState;

/// Message keys attached to one flight, rendered by the boundary layer.
pub type MessageKeySet = SmallVec<[String; 4]>;

/// Structured record of everything one flight did, so the boundary layer
/// can render messages without re-deriving any of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelEffects {
    pub distance_km: f64,
    pub fuel_spent: i32,
    pub loot: ResourceDelta,
    pub rocket_part_found: bool,
    /// Present when the post-flight coin flip produced an enemy.
    pub encounter: Option<EncounterOutcome>,
    pub message_keys: MessageKeySet,
}

/// Fly the character to `destination`, already resolved by the caller.
///
/// Preconditions (range, fuel) are checked before any mutation; on error
/// the world and character are untouched. On success the flight costs,
/// rocket-part pickup, loot draw, and encounter roll are applied in one
/// atomic step, in that fixed order.
///
/// # Errors
///
/// `DestinationUnreachable` when the geodesic distance exceeds the current
/// range, `InsufficientFuel` when fuel is below the flight cost.
pub fn fly<R: Rng>(
    world: &mut WorldState,
    character: &mut Character,
    destination: Location,
    rng: &mut R,
) -> Result<TravelEffects, GameError> {
    let distance = distance_km(&world.location, &destination);
    if distance > world.range_km {
        return Err(GameError::DestinationUnreachable {
            distance_km: distance,
            range_km: world.range_km,
        });
    }
    if character.fuel < FLIGHT_FUEL_COST {
        return Err(GameError::InsufficientFuel {
            have: character.fuel,
            need: FLIGHT_FUEL_COST,
        });
    }

    character.apply_delta(&ResourceDelta {
        fuel: -FLIGHT_FUEL_COST,
        ..ResourceDelta::default()
    });
    character.hp = (character.hp - FLIGHT_HP_COST).max(0);
    world.time_left_hours -= FLIGHT_TIME_COST_HOURS;
    world.range_km += FLIGHT_RANGE_BONUS_KM;
    world.location = destination;

    let mut message_keys = MessageKeySet::new();
    message_keys.push(MSG_FLIGHT.to_string());

    let dest_country = world.location.iso_country.clone();
    let rocket_part_found = world.take_rocket_part(&dest_country);
    if rocket_part_found {
        character.add_rocket_parts(1);
        message_keys.push(MSG_PART_FOUND.to_string());
    }

    let loot = generate_loot(rng);
    character.apply_delta(&loot);
    if !loot.is_empty() {
        message_keys.push(MSG_LOOT.to_string());
    }

    let encounter = if encounter_chance(rng) {
        let outcome = resolve_encounter(character, rng);
        message_keys.push(
            if outcome.won {
                MSG_ENCOUNTER_WON
            } else {
                MSG_ENCOUNTER_LOST
            }
            .to_string(),
        );
        Some(outcome)
    } else {
        None
    };

    Ok(TravelEffects {
        distance_km: distance,
        fuel_spent: FLIGHT_FUEL_COST,
        loot,
        rocket_part_found,
        encounter,
        message_keys,
    })
}

/// Eat one food unit to restore hit points, capped at the maximum.
///
/// # Errors
///
/// `FullHealth` when hit points are already at the cap (checked before the
/// food supply), `NoFood` when no food remains. Neither error mutates the
/// character.
pub fn rest(character: &mut Character) -> Result<(), GameError> {
    if character.hp >= HP_MAX {
        return Err(GameError::FullHealth);
    }
    if character.food < REST_FOOD_COST {
        return Err(GameError::NoFood);
    }
    character.apply_delta(&ResourceDelta {
        food: -REST_FOOD_COST,
        ..ResourceDelta::default()
    });
    character.hp = (character.hp + REST_HEAL_HP).min(HP_MAX);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Role;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::collections::BTreeSet;

    fn airport(ident: &str, lat: f64, lon: f64, iso: &str) -> Location {
        Location {
            ident: ident.to_string(),
            name: format!("{ident} airport"),
            lat,
            lon,
            iso_country: iso.to_string(),
            municipality: None,
        }
    }

    fn helsinki_world(parts: &[&str]) -> WorldState {
        WorldState::new(
            airport("EFHK", 60.3172, 24.9633, "FI"),
            parts.iter().map(ToString::to_string).collect::<BTreeSet<_>>(),
        )
    }

    fn tallinn() -> Location {
        airport("EETN", 59.4133, 24.8328, "EE")
    }

    fn rome() -> Location {
        airport("LIRF", 41.8003, 12.2389, "IT")
    }

    #[test]
    fn reachable_flight_applies_documented_costs() {
        let mut world = helsinki_world(&[]);
        let mut character = Character::new(Role::Cook);
        let mut rng = ChaCha20Rng::seed_from_u64(1);

        let effects = fly(&mut world, &mut character, tallinn(), &mut rng).unwrap();

        assert_eq!(effects.fuel_spent, 30);
        assert!(effects.distance_km < 400.0);
        let encounter_fuel = effects
            .encounter
            .and_then(|outcome| outcome.loot)
            .map_or(0, |loot| loot.fuel);
        assert_eq!(character.fuel, 100 - 30 + effects.loot.fuel + encounter_fuel);
        assert_eq!(world.range_km, 450.0);
        assert_eq!(world.time_left_hours, 168 - 12);
        assert_eq!(world.location.ident, "EETN");
        assert_eq!(effects.message_keys[0], MSG_FLIGHT);
        // Loot never touches hp.
        assert_eq!(character.hp, 90);
    }

    #[test]
    fn out_of_range_flight_mutates_nothing() {
        let mut world = helsinki_world(&["IT"]);
        let mut character = Character::new(Role::Cook);
        let world_before = world.clone();
        let character_before = character.clone();
        let mut rng = ChaCha20Rng::seed_from_u64(2);

        let err = fly(&mut world, &mut character, rome(), &mut rng).unwrap_err();

        assert!(matches!(err, GameError::DestinationUnreachable { .. }));
        assert_eq!(world, world_before);
        assert_eq!(character, character_before);
    }

    #[test]
    fn insufficient_fuel_mutates_nothing() {
        let mut world = helsinki_world(&[]);
        let mut character = Character::new(Role::Cook);
        character.fuel = 29;
        let world_before = world.clone();
        let character_before = character.clone();
        let mut rng = ChaCha20Rng::seed_from_u64(3);

        let err = fly(&mut world, &mut character, tallinn(), &mut rng).unwrap_err();

        assert_eq!(err, GameError::InsufficientFuel { have: 29, need: 30 });
        assert_eq!(world, world_before);
        assert_eq!(character, character_before);
    }

    #[test]
    fn landing_on_hidden_part_claims_it_once() {
        let mut world = helsinki_world(&["EE", "SE"]);
        let mut character = Character::new(Role::Cook);
        let mut rng = ChaCha20Rng::seed_from_u64(4);

        let effects = fly(&mut world, &mut character, tallinn(), &mut rng).unwrap();

        assert!(effects.rocket_part_found);
        assert!(effects.message_keys.contains(&MSG_PART_FOUND.to_string()));
        assert_eq!(character.rocket_parts, 1);
        assert!(!world.rocket_part_countries.contains("EE"));
        assert!(world.rocket_part_countries.contains("SE"));
    }

    #[test]
    fn hp_floors_at_zero_after_repeated_flights() {
        let mut world = helsinki_world(&[]);
        let mut character = Character::new(Role::Cook);
        character.hp = 5;
        character.fuel = 1_000;
        let mut rng = ChaCha20Rng::seed_from_u64(5);

        let hop = tallinn();
        let back = airport("EFHK", 60.3172, 24.9633, "FI");
        fly(&mut world, &mut character, hop, &mut rng).unwrap();
        assert_eq!(character.hp, 0);
        fly(&mut world, &mut character, back, &mut rng).unwrap();
        assert_eq!(character.hp, 0);
    }

    #[test]
    fn rest_heals_ten_capped_at_full() {
        let mut character = Character::new(Role::Cook);
        character.hp = 85;
        character.food = 1;
        rest(&mut character).unwrap();
        assert_eq!(character.hp, 95);
        assert_eq!(character.food, 0);

        character.hp = 96;
        character.food = 2;
        rest(&mut character).unwrap();
        assert_eq!(character.hp, 100);
    }

    #[test]
    fn rest_checks_full_health_before_food() {
        let mut character = Character::new(Role::Cook);
        character.hp = 100;
        character.food = 0;
        assert_eq!(rest(&mut character).unwrap_err(), GameError::FullHealth);

        character.hp = 50;
        assert_eq!(rest(&mut character).unwrap_err(), GameError::NoFood);
        assert_eq!(character.hp, 50);
    }
}
