//! Cannonade -- a battle resolver for turn-based strategy scenarios.
//!
//! This binary loads a scenario file, prints each battle's planned phase
//! list, resolves the battles with locally seeded dice, and reports the
//! narrated history and outcomes.

use std::env;
use std::path::Path;
use std::process;

use cannonade::bridge::LocalBridge;
use cannonade::pipeline::BattleRunner;
use cannonade::scenario::Scenario;

fn main() {
    let args: Vec<String> = env::args().collect();
    let path = match args.get(1) {
        Some(p) => p,
        None => {
            eprintln!("usage: cannonade <scenario.json>");
            process::exit(2);
        }
    };

    let scenario = match Scenario::load(Path::new(path)) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let mut states = scenario.battle_states();
    for (index, state) in states.iter_mut().enumerate() {
        let mut runner = BattleRunner::new(state);
        let mut bridge = LocalBridge::seeded(scenario.seed.wrapping_add(index as u64));

        println!("battle {} in territory {}", index + 1, state.territory.0);
        for detail in runner.planned_steps() {
            println!("  - {}", detail.name);
        }

        match runner.run(state, &mut bridge) {
            Ok(outcome) => {
                for line in &bridge.history {
                    println!("  {}", line);
                }
                match outcome {
                    Some(o) => println!("  result: {:?}", o),
                    None => println!("  result: unresolved"),
                }
            }
            Err(e) => {
                eprintln!("battle {} failed: {}", index + 1, e);
                process::exit(1);
            }
        }
    }
}
