// Per-turn working state shared by the simulator and the search
//
// Every search branch clones the state it starts from, so sibling branches
// never see each other's moves or scores. The action set is immutable and
// shared behind an Arc.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::StrategyError;
use crate::position::Position;
use crate::types::ActionSet;

#[derive(Debug, Clone)]
pub struct GameState {
    pub positions: BTreeMap<String, Position>,
    pub scores: BTreeMap<String, f64>,
    pub cheese: Vec<Position>,
    pub actions: Arc<ActionSet>,
}

impl GameState {
    pub fn position_of(&self, name: &str) -> Result<Position, StrategyError> {
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| StrategyError::UnknownAgent {
                name: name.to_string(),
            })
    }

    pub fn score_of(&self, name: &str) -> Result<f64, StrategyError> {
        self.scores
            .get(name)
            .copied()
            .ok_or_else(|| StrategyError::MissingScore {
                name: name.to_string(),
            })
    }

    pub fn has_cheese(&self, piece: &Position) -> bool {
        self.cheese.contains(piece)
    }

    /// Best score any agent could still reach: cheese left plus points already handed out
    pub fn theoretical_max_score(&self) -> f64 {
        self.cheese.len() as f64 + self.scores.values().sum::<f64>()
    }

    /// The game is decided once the cheese is gone or someone holds more than half
    /// of the theoretical maximum.
    pub fn is_decided(&self) -> bool {
        if self.cheese.is_empty() {
            return true;
        }
        let half = 0.5 * self.theoretical_max_score();
        self.scores.values().any(|&score| score > half)
    }
}
