//! Scenario files: a JSON description of one or more battles to resolve.
//!
//! Keeps the driver binary and benchmarks data-driven instead of
//! hard-coding unit rosters.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::battle::{BattleState, Ruleset, Side, TerritoryId, UnitProfile};

/// One battle as described in a scenario file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleSetup {
    pub territory: u16,
    #[serde(default)]
    pub amphibious: bool,
    #[serde(default)]
    pub retreat_territories: Vec<u16>,
    pub offense: Vec<UnitProfile>,
    pub defense: Vec<UnitProfile>,
}

/// A full scenario: shared rules plus the battles to fight under them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub ruleset: Ruleset,
    #[serde(default)]
    pub seed: u64,
    pub battles: Vec<BattleSetup>,
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse scenario JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Scenario {
    /// Loads a scenario from a JSON file at the given path.
    pub fn load(path: &Path) -> Result<Scenario, ScenarioError> {
        let data = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Scenario::from_json(&data)?)
    }

    /// Parses a scenario from a JSON string.
    pub fn from_json(json: &str) -> Result<Scenario, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Builds the battle states this scenario describes.
    pub fn battle_states(&self) -> Vec<BattleState> {
        self.battles
            .iter()
            .map(|setup| {
                let mut state = BattleState::new(
                    TerritoryId(setup.territory),
                    self.ruleset.clone(),
                    setup.amphibious,
                );
                state.set_retreat_territories(
                    setup.retreat_territories.iter().map(|&t| TerritoryId(t)).collect(),
                );
                for profile in &setup.offense {
                    state.add_unit(Side::Offense, profile.clone());
                }
                for profile in &setup.defense {
                    state.add_unit(Side::Defense, profile.clone());
                }
                state
            })
            .collect()
    }
}
