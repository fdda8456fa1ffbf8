//! Centralized balance and tuning constants for Skytrail game logic.
//!
//! These values define the deterministic math for the core simulation.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! JSON assets.

// Message keys -------------------------------------------------------------
pub const MSG_FLIGHT: &str = "msg.flight";
pub const MSG_PART_FOUND: &str = "msg.part-found";
pub const MSG_LOOT: &str = "msg.loot";
pub const MSG_ENCOUNTER_WON: &str = "msg.encounter.won";
pub const MSG_ENCOUNTER_LOST: &str = "msg.encounter.lost";

// Session start ------------------------------------------------------------
pub const START_AIRPORT_IDENT: &str = "EFHK";
pub const START_RANGE_KM: f64 = 400.0;
pub const START_TIME_HOURS: i32 = 168;
pub const ROCKET_PART_COUNT: usize = 4;

// Flight tuning ------------------------------------------------------------
pub const FLIGHT_FUEL_COST: i32 = 30;
pub const FLIGHT_TIME_COST_HOURS: i32 = 12;
pub const FLIGHT_RANGE_BONUS_KM: f64 = 50.0;
pub const FLIGHT_HP_COST: i32 = 10;

// Rest tuning --------------------------------------------------------------
pub const REST_FOOD_COST: i32 = 1;
pub const REST_HEAL_HP: i32 = 10;
pub const HP_MAX: i32 = 100;

// Loot tuning --------------------------------------------------------------
pub(crate) const LOOT_FOOD_DIE_MAX: i32 = 5;
pub(crate) const LOOT_FOOD_SINGLE_LOW: i32 = 3;
pub(crate) const LOOT_FOOD_SINGLE_HIGH: i32 = 4;
pub(crate) const LOOT_FOOD_DOUBLE: i32 = 5;
pub(crate) const LOOT_FUEL_MIN: i32 = 5;
pub(crate) const LOOT_FUEL_MAX: i32 = 30;
pub(crate) const LOOT_AMMO_DIE_MAX: i32 = 5;
pub(crate) const LOOT_AMMO_HIT_CEILING: i32 = 2;

// Role starting allocations ------------------------------------------------
pub(crate) const COOK_START_FOOD: i32 = 80;
pub(crate) const COOK_START_FUEL: i32 = 100;
pub(crate) const COOK_START_AMMO: i32 = 5;
pub(crate) const PILOT_START_FOOD: i32 = 3;
pub(crate) const PILOT_START_FUEL: i32 = 130;
pub(crate) const PILOT_START_AMMO: i32 = 5;
pub(crate) const FIGHTER_START_FOOD: i32 = 3;
pub(crate) const FIGHTER_START_FUEL: i32 = 100;
pub(crate) const FIGHTER_START_AMMO: i32 = 60;
