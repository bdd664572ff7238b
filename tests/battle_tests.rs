//! End-to-end battle resolution tests.
//!
//! Builds full battles through the public API, resolves them with seeded
//! local dice, and verifies phase ordering, sneak-attack behavior, and
//! determinism.

use cannonade::battle::{
    BattleState, Outcome, Ruleset, Side, TerritoryId, UnitFilter, UnitProfile,
};
use cannonade::bridge::LocalBridge;
use cannonade::pipeline::{
    assemble, first_strike_state, resolve_battles, BattleRunner, FirstStrikeState,
};

/// A submarine raid: one first-strike attacker plus escort against two
/// defending land units, no destroyers anywhere, classic rule off.
fn submarine_raid() -> BattleState {
    let mut state = BattleState::new(TerritoryId(42), Ruleset::default(), false);
    state.add_unit(Side::Offense, UnitProfile::submarine(2, 1, 6));
    state.add_unit(Side::Offense, UnitProfile::land(2, 2, 3));
    state.add_unit(Side::Defense, UnitProfile::land(1, 2, 3));
    state.add_unit(Side::Defense, UnitProfile::land(1, 2, 3));
    state
}

#[test]
fn undetected_first_strike_is_a_sneak_attack() {
    let state = submarine_raid();
    assert_eq!(
        first_strike_state(Side::Offense, &state),
        FirstStrikeState::SneakAttack
    );
    assert_eq!(
        first_strike_state(Side::Defense, &state),
        FirstStrikeState::NotApplicable
    );
}

#[test]
fn destroyer_downgrades_sneak_attack_to_regular() {
    let mut state = submarine_raid();
    state.add_unit(Side::Defense, UnitProfile::destroyer(2, 2, 8));
    assert_eq!(
        first_strike_state(Side::Offense, &state),
        FirstStrikeState::Regular
    );
}

#[test]
fn first_strike_fire_precedes_general_fire_in_the_plan() {
    let names: Vec<String> = assemble(&submarine_raid())
        .into_iter()
        .map(|d| d.name)
        .collect();

    let first_strike = names
        .iter()
        .position(|n| n == "offense first strike fire")
        .unwrap();
    let general = names
        .iter()
        .position(|n| n == "offense general combat fire")
        .unwrap();
    let defense_general = names
        .iter()
        .position(|n| n == "defense general combat fire")
        .unwrap();
    assert!(first_strike < general);
    assert!(general < defense_general);
}

#[test]
fn same_seed_gives_identical_battles() {
    let run = || {
        let mut state = submarine_raid();
        let mut runner = BattleRunner::new(&state);
        let mut bridge = LocalBridge::seeded(1234);
        let outcome = runner.run(&mut state, &mut bridge).unwrap();
        (outcome, bridge.history, state)
    };

    let (outcome_a, history_a, state_a) = run();
    let (outcome_b, history_b, state_b) = run();
    assert_eq!(outcome_a, outcome_b);
    assert_eq!(history_a, history_b);
    assert_eq!(state_a, state_b);
}

#[test]
fn lopsided_battle_resolves_to_offense_win() {
    // Offense always hits, defense never does.
    let mut state = BattleState::new(TerritoryId(1), Ruleset::default(), false);
    state.add_unit(Side::Offense, UnitProfile::land(6, 6, 3));
    state.add_unit(Side::Offense, UnitProfile::land(6, 6, 3));
    state.add_unit(Side::Defense, UnitProfile::land(0, 0, 3));

    let mut runner = BattleRunner::new(&state);
    let mut bridge = LocalBridge::seeded(5);
    let outcome = runner.run(&mut state, &mut bridge).unwrap();

    assert_eq!(outcome, Some(Outcome::OffenseWins));
    assert_eq!(state.count(UnitFilter::Alive, Side::Defense), 0);
    assert_eq!(state.count(UnitFilter::Alive, Side::Offense), 2);
}

#[test]
fn powerless_sides_stalemate() {
    let mut state = BattleState::new(TerritoryId(1), Ruleset::default(), false);
    state.add_unit(Side::Offense, UnitProfile::land(0, 0, 3));
    state.add_unit(Side::Defense, UnitProfile::land(0, 0, 3));

    let mut runner = BattleRunner::new(&state);
    let mut bridge = LocalBridge::seeded(5);
    let outcome = runner.run(&mut state, &mut bridge).unwrap();
    assert_eq!(outcome, Some(Outcome::Stalemate));
}

#[test]
fn standing_retreat_order_is_honored() {
    // Neither side can hit, so the retreat phase is reached intact and
    // resolves before the stalemate check.
    let mut state = BattleState::new(TerritoryId(1), Ruleset::default(), false);
    state.add_unit(Side::Offense, UnitProfile::land(0, 0, 3));
    state.add_unit(Side::Defense, UnitProfile::land(0, 0, 3));
    state.set_retreat_territories(vec![TerritoryId(9)]);
    state.order_retreat(TerritoryId(9));

    let mut runner = BattleRunner::new(&state);
    let mut bridge = LocalBridge::seeded(5);
    let outcome = runner.run(&mut state, &mut bridge).unwrap();
    assert_eq!(outcome, Some(Outcome::OffenseRetreated));
}

#[test]
fn amphibious_attacker_cannot_retreat() {
    let mut state = BattleState::new(TerritoryId(1), Ruleset::default(), true);
    state.add_unit(Side::Offense, UnitProfile::land(0, 0, 3));
    state.add_unit(Side::Defense, UnitProfile::land(0, 0, 3));
    state.set_retreat_territories(vec![TerritoryId(9)]);
    state.order_retreat(TerritoryId(9));

    let mut runner = BattleRunner::new(&state);
    let mut bridge = LocalBridge::seeded(5);
    let outcome = runner.run(&mut state, &mut bridge).unwrap();
    assert_eq!(outcome, Some(Outcome::Stalemate));
}

#[test]
fn batch_resolution_preserves_input_order() {
    let mut battles = vec![
        {
            let mut s = BattleState::new(TerritoryId(1), Ruleset::default(), false);
            s.add_unit(Side::Offense, UnitProfile::land(6, 6, 3));
            s.add_unit(Side::Defense, UnitProfile::land(0, 0, 3));
            s
        },
        {
            let mut s = BattleState::new(TerritoryId(2), Ruleset::default(), false);
            s.add_unit(Side::Offense, UnitProfile::land(0, 0, 3));
            s.add_unit(Side::Defense, UnitProfile::land(6, 6, 3));
            s
        },
    ];

    let outcomes = resolve_battles(&mut battles, 77, true).unwrap();
    assert_eq!(
        outcomes,
        vec![Some(Outcome::OffenseWins), Some(Outcome::DefenseWins)]
    );
}
