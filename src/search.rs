// Exhaustive game-tree search over cheese orderings
//
// From a given state the controlled agent may aim for any cheese still on the
// board. Each choice is played out with the simulator and the search recurses
// on the resulting state. Cost grows exponentially with the cheese count; the
// only cut-off is the decided-game check in GameState::is_decided, kept as a
// heuristic rather than a proven bound when scores are split. A search given a
// deadline checks it before every branch and gives up once it has passed.

use log::debug;
use std::time::Instant;

use crate::error::StrategyError;
use crate::position::Position;
use crate::simulation::simulate_until_target;
use crate::state::GameState;

/// Best pursuit order found for the controlled agent and the score it ends with
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPlan {
    pub targets: Vec<Position>,
    pub score: f64,
}

impl SearchPlan {
    /// Plan of doing nothing more: keep the current score
    pub fn idle(score: f64) -> Self {
        SearchPlan {
            targets: Vec::new(),
            score,
        }
    }

    /// Cheese to chase right now, if any
    pub fn first_target(&self) -> Option<&Position> {
        self.targets.first()
    }

    /// Higher score wins; equal scores prefer the shorter plan
    fn beats(&self, other: &SearchPlan) -> bool {
        self.score > other.score
            || (self.score == other.score && self.targets.len() < other.targets.len())
    }
}

/// Recursive search for one controlled agent, counting simulations as it goes
pub struct GameTreeSearch<'a> {
    name: &'a str,
    simulations: u64,
    deadline: Option<Instant>,
}

impl<'a> GameTreeSearch<'a> {
    /// Search that runs to exhaustion
    pub fn new(name: &'a str) -> Self {
        GameTreeSearch {
            name,
            simulations: 0,
            deadline: None,
        }
    }

    /// Search that fails with `DeadlineExceeded` once `deadline` has passed
    pub fn with_deadline(name: &'a str, deadline: Instant) -> Self {
        GameTreeSearch {
            deadline: Some(deadline),
            ..Self::new(name)
        }
    }

    fn check_deadline(&self) -> Result<(), StrategyError> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(StrategyError::DeadlineExceeded {
                simulations: self.simulations,
            }),
            _ => Ok(()),
        }
    }

    /// Number of simulated branches explored so far
    pub fn simulations(&self) -> u64 {
        self.simulations
    }

    /// Best ordering of cheese to chase from `state`
    ///
    /// A decided game yields an empty plan with the current score. Otherwise
    /// every remaining cheese is tried as the next target; the first candidate
    /// with the best (score, shortest length) pair is kept.
    pub fn best_targets(&mut self, state: &GameState) -> Result<SearchPlan, StrategyError> {
        let mut best = SearchPlan::idle(state.score_of(self.name)?);
        if state.is_decided() {
            return Ok(best);
        }

        for target in &state.cheese {
            self.check_deadline()?;
            let end_state = simulate_until_target(target, self.name, state)?;
            self.simulations += 1;

            let rest = self.best_targets(&end_state)?;
            let mut targets = Vec::with_capacity(rest.targets.len() + 1);
            targets.push(*target);
            targets.extend(rest.targets);
            let candidate = SearchPlan {
                targets,
                score: rest.score,
            };

            if candidate.beats(&best) {
                best = candidate;
            }
        }

        Ok(best)
    }
}

/// Convenience wrapper running a fresh search for `name`
pub fn best_targets(name: &str, state: &GameState) -> Result<SearchPlan, StrategyError> {
    let mut search = GameTreeSearch::new(name);
    let plan = search.best_targets(state)?;
    debug!(
        "Search for {} explored {} simulations, plan of {} target(s) scoring {}",
        name,
        search.simulations(),
        plan.targets.len(),
        plan.score
    );
    Ok(plan)
}
