//! Enemy encounter resolution against the ammo resource.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::character::{Character, ResourceDelta};
use crate::loot::generate_loot;

/// Result of one resolved encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterOutcome {
    pub won: bool,
    /// Loot granted for a win; `None` on a loss.
    pub loot: Option<ResourceDelta>,
}

/// One fair coin flip deciding whether an enemy shows up after a flight.
///
/// This draw is independent of the ammo check inside
/// [`resolve_encounter`] and consumes exactly one value from the shared
/// random source.
pub fn encounter_chance<R: Rng>(rng: &mut R) -> bool {
    rng.gen_range(0..=1) == 1
}

/// Resolve an encounter against the character's ammo.
///
/// With ammo available the fight is always won: one ammo is spent and one
/// loot draw is granted. Without ammo the fight is lost and the character
/// is left untouched.
pub fn resolve_encounter<R: Rng>(character: &mut Character, rng: &mut R) -> EncounterOutcome {
    if character.ammo == 0 {
        return EncounterOutcome {
            won: false,
            loot: None,
        };
    }
    character.apply_delta(&ResourceDelta {
        ammo: -1,
        ..ResourceDelta::default()
    });
    let loot = generate_loot(rng);
    character.apply_delta(&loot);
    EncounterOutcome {
        won: true,
        loot: Some(loot),
    }
}

/// Final-confrontation variant: ammo-gated like a regular encounter but
/// grants no loot. Exposed for the boundary layer's endgame flow.
pub fn boss_fight(character: &mut Character) -> bool {
    if character.ammo == 0 {
        return false;
    }
    character.apply_delta(&ResourceDelta {
        ammo: -1,
        ..ResourceDelta::default()
    });
    true
}
