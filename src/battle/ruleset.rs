//! Configurable ruleset flags.
//!
//! The flags that alter first-strike and casualty semantics between rule
//! editions. Loaded from JSON scenario files; every field defaults so old
//! fixtures keep parsing when new flags are added.

use serde::{Deserialize, Serialize};

/// Active rule flags for one battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    /// Classic simultaneous-first-strike rule: first-strike units always
    /// sneak-attack, and a sneak-attacking side keeps firing with units
    /// that would otherwise be dead.
    #[serde(default)]
    pub classic_simultaneous_first_strike: bool,

    /// Defending first-strike units always get a sneak attack, independent
    /// of destroyer presence.
    #[serde(default)]
    pub defending_first_strike_sneak_attack: bool,

    /// Non-combat transports may not be taken as casualties while other
    /// units remain, and a helpless all-transport defender denies the
    /// attacker a retreat.
    #[serde(default)]
    pub restrict_transport_casualties: bool,

    /// Number of faces on the combat die.
    #[serde(default = "default_die_sides")]
    pub die_sides: u8,
}

fn default_die_sides() -> u8 {
    6
}

impl Default for Ruleset {
    fn default() -> Self {
        Ruleset {
            classic_simultaneous_first_strike: false,
            defending_first_strike_sneak_attack: false,
            restrict_transport_casualties: false,
            die_sides: default_die_sides(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_are_off() {
        let rules = Ruleset::default();
        assert!(!rules.classic_simultaneous_first_strike);
        assert!(!rules.defending_first_strike_sneak_attack);
        assert!(!rules.restrict_transport_casualties);
        assert_eq!(rules.die_sides, 6);
    }

    #[test]
    fn empty_json_parses_to_defaults() {
        let rules: Ruleset = serde_json::from_str("{}").unwrap();
        assert_eq!(rules, Ruleset::default());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let rules: Ruleset =
            serde_json::from_str(r#"{"classic_simultaneous_first_strike":true}"#).unwrap();
        assert!(rules.classic_simultaneous_first_strike);
        assert_eq!(rules.die_sides, 6);
    }
}
