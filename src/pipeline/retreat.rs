//! Attacker retreat eligibility.
//!
//! Rules:
//! - Amphibious assaults may never retreat.
//! - Under the restricted-transport ruleset, an attacker may not bail out
//!   against a defender reduced to non-combat transports (exploit guard).
//! - Otherwise retreat is legal iff at least one retreat territory exists.
//!   The territory computation is comparatively expensive, so the supplier
//!   is invoked only when the earlier checks pass.

use crate::battle::{Ruleset, TerritoryId, Unit};

/// Decides whether the attacker may legally retreat.
pub fn can_attacker_retreat<F>(
    defenders: &[&Unit],
    ruleset: &Ruleset,
    retreat_territories: F,
    is_amphibious: bool,
) -> bool
where
    F: FnOnce() -> Vec<TerritoryId>,
{
    if is_amphibious {
        return false;
    }
    if ruleset.restrict_transport_casualties
        && !defenders.is_empty()
        && defenders.iter().all(|u| u.profile.is_sea_transport)
    {
        return false;
    }
    !retreat_territories().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use crate::battle::{BattleState, Side, TerritoryId, UnitFilter, UnitProfile};

    fn defenders(profiles: Vec<UnitProfile>) -> BattleState {
        let mut state = BattleState::new(TerritoryId(1), Ruleset::default(), false);
        for profile in profiles {
            state.add_unit(Side::Defense, profile);
        }
        state
    }

    fn alive<'a>(state: &'a BattleState) -> Vec<&'a Unit> {
        state.units(UnitFilter::Alive, Side::Defense).collect()
    }

    #[test]
    fn amphibious_never_retreats() {
        let state = defenders(vec![UnitProfile::land(1, 2, 3)]);
        let called = Cell::new(0);
        let result = can_attacker_retreat(
            &alive(&state),
            &Ruleset::default(),
            || {
                called.set(called.get() + 1);
                vec![TerritoryId(2)]
            },
            true,
        );
        assert!(!result);
        // Supplier must not run when an earlier check already failed.
        assert_eq!(called.get(), 0);
    }

    #[test]
    fn restricted_all_transport_defender_blocks_retreat() {
        let rules = Ruleset {
            restrict_transport_casualties: true,
            ..Ruleset::default()
        };
        let state = defenders(vec![UnitProfile::transport(7), UnitProfile::transport(7)]);
        let called = Cell::new(0);
        let result = can_attacker_retreat(
            &alive(&state),
            &rules,
            || {
                called.set(called.get() + 1);
                vec![TerritoryId(2)]
            },
            false,
        );
        assert!(!result);
        assert_eq!(called.get(), 0);
    }

    #[test]
    fn unrestricted_all_transport_defender_allows_retreat() {
        let state = defenders(vec![UnitProfile::transport(7)]);
        assert!(can_attacker_retreat(
            &alive(&state),
            &Ruleset::default(),
            || vec![TerritoryId(2)],
            false,
        ));
    }

    #[test]
    fn mixed_defender_under_restriction_allows_retreat() {
        let rules = Ruleset {
            restrict_transport_casualties: true,
            ..Ruleset::default()
        };
        let state = defenders(vec![UnitProfile::transport(7), UnitProfile::land(1, 2, 3)]);
        assert!(can_attacker_retreat(
            &alive(&state),
            &rules,
            || vec![TerritoryId(2)],
            false,
        ));
    }

    #[test]
    fn retreat_follows_territory_availability() {
        let state = defenders(vec![UnitProfile::land(1, 2, 3)]);
        let called = Cell::new(0);
        let result = can_attacker_retreat(
            &alive(&state),
            &Ruleset::default(),
            || {
                called.set(called.get() + 1);
                Vec::new()
            },
            false,
        );
        assert!(!result);
        assert_eq!(called.get(), 1);

        assert!(can_attacker_retreat(
            &alive(&state),
            &Ruleset::default(),
            || vec![TerritoryId(2), TerritoryId(3)],
            false,
        ));
    }
}
