//! Units, their combat profiles, and their in-battle status.
//!
//! A unit's profile is fixed data (what the unit can do); its status is
//! the only part the pipeline mutates during a battle.

use serde::{Deserialize, Serialize};

use super::side::Side;

/// Identifies a unit within one battle. Ids are assigned sequentially by
/// the battle state and are stable for the battle's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

/// A territory on the game map. Only an opaque id at this boundary; the
/// map itself belongs to the surrounding game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TerritoryId(pub u16);

/// The fire group a roll/select/notify sub-operation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Volley {
    AntiAir,
    Bombard,
    FirstStrike,
    General,
}

impl Volley {
    /// Returns the lowercase display name used in step names and history.
    pub const fn name(self) -> &'static str {
        match self {
            Volley::AntiAir => "anti-air",
            Volley::Bombard => "bombardment",
            Volley::FirstStrike => "first strike",
            Volley::General => "general combat",
        }
    }
}

/// Fixed combat capabilities of a unit.
///
/// All flags default to off so scenario files only need to name the
/// capabilities a unit actually has.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitProfile {
    /// Hit strength when attacking (die roll must be strictly below this).
    #[serde(default)]
    pub attack: u8,
    /// Hit strength when defending.
    #[serde(default)]
    pub defense: u8,
    /// Production cost; casualty selection takes cheapest first.
    #[serde(default)]
    pub value: u8,
    /// Air unit: targetable by anti-air fire, cannot hit submerged subs.
    #[serde(default)]
    pub is_air: bool,
    /// Non-combat sea transport.
    #[serde(default)]
    pub is_sea_transport: bool,
    /// Non-combatant (factories and the like); withdrawn before combat.
    #[serde(default)]
    pub is_infrastructure: bool,
    /// Fires in the first-strike phase (submarine-like).
    #[serde(default)]
    pub first_strike: bool,
    /// Detects sneak attacks (destroyer-like); denies first-strike units
    /// their sneak attack and blocks submarine withdrawal.
    #[serde(default)]
    pub detects_first_strike: bool,
    /// Fires in the anti-air phase.
    #[serde(default)]
    pub anti_air: bool,
    /// Anti-air hit strength; only meaningful when `anti_air` is set.
    #[serde(default)]
    pub aa_strength: u8,
    /// Supports amphibious assaults with offshore bombardment.
    #[serde(default)]
    pub bombard: bool,
    /// Dies after delivering its first-strike shot.
    #[serde(default)]
    pub suicide: bool,
    /// Can slip out of the battle before general combat (submarine-like).
    #[serde(default)]
    pub can_withdraw_early: bool,
    /// Can submerge when only air units oppose it.
    #[serde(default)]
    pub can_submerge: bool,
    /// Arrives by air drop and must land before fighting.
    #[serde(default)]
    pub paratrooper: bool,
}

impl UnitProfile {
    /// A plain land unit.
    pub fn land(attack: u8, defense: u8, value: u8) -> Self {
        UnitProfile {
            attack,
            defense,
            value,
            ..Default::default()
        }
    }

    /// A first-strike-capable submarine.
    pub fn submarine(attack: u8, defense: u8, value: u8) -> Self {
        UnitProfile {
            attack,
            defense,
            value,
            first_strike: true,
            can_withdraw_early: true,
            can_submerge: true,
            ..Default::default()
        }
    }

    /// A destroyer: detects sneak attacks.
    pub fn destroyer(attack: u8, defense: u8, value: u8) -> Self {
        UnitProfile {
            attack,
            defense,
            value,
            detects_first_strike: true,
            ..Default::default()
        }
    }

    /// An air unit.
    pub fn fighter(attack: u8, defense: u8, value: u8) -> Self {
        UnitProfile {
            attack,
            defense,
            value,
            is_air: true,
            ..Default::default()
        }
    }

    /// An anti-air emplacement firing at strength 1.
    pub fn aa_gun(value: u8) -> Self {
        UnitProfile {
            value,
            anti_air: true,
            aa_strength: 1,
            ..Default::default()
        }
    }

    /// A capital ship that bombards during amphibious assaults.
    pub fn bombard_ship(attack: u8, defense: u8, value: u8) -> Self {
        UnitProfile {
            attack,
            defense,
            value,
            bombard: true,
            ..Default::default()
        }
    }

    /// A non-combat sea transport.
    pub fn transport(value: u8) -> Self {
        UnitProfile {
            value,
            is_sea_transport: true,
            ..Default::default()
        }
    }

    /// An airborne infantry unit that still has to land.
    pub fn paratrooper(attack: u8, defense: u8, value: u8) -> Self {
        UnitProfile {
            attack,
            defense,
            value,
            paratrooper: true,
            ..Default::default()
        }
    }

    /// Hit strength for a unit fighting on `side`.
    pub fn strength(&self, side: Side) -> u8 {
        match side {
            Side::Offense => self.attack,
            Side::Defense => self.defense,
        }
    }
}

/// Where a unit stands in the battle's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitStatus {
    /// Standing and targetable.
    Alive,
    /// Selected as a casualty, not yet cleared; can still return fire.
    WaitingToDie,
    /// Cleared from the board as a casualty.
    Removed,
    /// Left the battle alive (retreated, submerged, or non-combatant).
    Withdrawn,
}

/// A unit committed to the battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub side: Side,
    pub profile: UnitProfile,
    pub status: UnitStatus,
    /// Paratroopers start airborne and must land before fighting.
    pub airborne: bool,
    /// Cleared when the battle marks committed units as spent.
    pub movement_left: bool,
}

impl Unit {
    /// Hit strength of this unit given the side it fights on.
    pub fn strength(&self) -> u8 {
        self.profile.strength(self.side)
    }
}
