use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    COOK_START_AMMO, COOK_START_FOOD, COOK_START_FUEL, FIGHTER_START_AMMO, FIGHTER_START_FOOD,
    FIGHTER_START_FUEL, HP_MAX, PILOT_START_AMMO, PILOT_START_FOOD, PILOT_START_FUEL,
};
use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Cook,
    Pilot,
    Fighter,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cook => "cook",
            Self::Pilot => "pilot",
            Self::Fighter => "fighter",
        }
    }

    /// Fixed starting allocation for this role.
    #[must_use]
    pub const fn start(self) -> RoleStart {
        match self {
            Self::Cook => RoleStart {
                food: COOK_START_FOOD,
                fuel: COOK_START_FUEL,
                ammo: COOK_START_AMMO,
            },
            Self::Pilot => RoleStart {
                food: PILOT_START_FOOD,
                fuel: PILOT_START_FUEL,
                ammo: PILOT_START_AMMO,
            },
            Self::Fighter => RoleStart {
                food: FIGHTER_START_FOOD,
                fuel: FIGHTER_START_FUEL,
                ammo: FIGHTER_START_AMMO,
            },
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = GameError;

    /// Role parsing is case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cook" => Ok(Self::Cook),
            "pilot" => Ok(Self::Pilot),
            "fighter" => Ok(Self::Fighter),
            _ => Err(GameError::InvalidRole(s.to_string())),
        }
    }
}

/// Starting resource allocation attached to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleStart {
    pub food: i32,
    pub fuel: i32,
    pub ammo: i32,
}

/// Per-flight resource adjustment (loot grants, combat rewards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ResourceDelta {
    #[serde(default)]
    pub food: i32,
    #[serde(default)]
    pub fuel: i32,
    #[serde(default)]
    pub ammo: i32,
}

impl ResourceDelta {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.food == 0 && self.fuel == 0 && self.ammo == 0
    }
}

/// The single player character for a session.
///
/// All resource fields stay non-negative and `hp` stays within `0..=100`;
/// mutation helpers clamp rather than fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub role: Role,
    pub food: i32,
    pub fuel: i32,
    pub ammo: i32,
    pub hp: i32,
    pub rocket_parts: i32,
}

impl Character {
    /// Create a character with the role's fixed starting stats.
    #[must_use]
    pub const fn new(role: Role) -> Self {
        let start = role.start();
        Self {
            role,
            food: start.food,
            fuel: start.fuel,
            ammo: start.ammo,
            hp: HP_MAX,
            rocket_parts: 0,
        }
    }

    /// Apply a resource delta component-wise.
    ///
    /// Negative components are permitted and clamp the stored value at zero
    /// so the non-negativity invariant holds.
    pub fn apply_delta(&mut self, delta: &ResourceDelta) {
        self.food = self.food.saturating_add(delta.food).max(0);
        self.fuel = self.fuel.saturating_add(delta.fuel).max(0);
        self.ammo = self.ammo.saturating_add(delta.ammo).max(0);
    }

    /// Grant (or with a negative `n`, revoke) rocket parts, floored at zero.
    pub fn add_rocket_parts(&mut self, n: i32) {
        self.rocket_parts = self.rocket_parts.saturating_add(n).max(0);
    }
}
