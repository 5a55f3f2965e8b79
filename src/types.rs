// Turn snapshot and action types
// The host sends one TurnRequest per turn; every field is optional on the wire
// and each policy declares which ones it needs (see policy.rs).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::StrategyError;
use crate::policy::Field;

/// Raw game snapshot received from the host for a single turn
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TurnRequest {
    pub maze_width: Option<i64>,
    pub maze_height: Option<i64>,
    pub name: Option<String>,
    pub player_locations: Option<BTreeMap<String, i64>>,
    pub player_scores: Option<BTreeMap<String, f64>>,
    pub cheese: Option<Vec<i64>>,
    pub possible_actions: Option<Vec<String>>,
}

impl TurnRequest {
    /// Whether the given field was supplied by the host
    pub fn has(&self, field: Field) -> bool {
        match field {
            Field::MazeWidth => self.maze_width.is_some(),
            Field::MazeHeight => self.maze_height.is_some(),
            Field::Name => self.name.is_some(),
            Field::PlayerLocations => self.player_locations.is_some(),
            Field::PlayerScores => self.player_scores.is_some(),
            Field::Cheese => self.cheese.is_some(),
            Field::PossibleActions => self.possible_actions.is_some(),
        }
    }

    pub fn maze_width(&self) -> Result<i64, StrategyError> {
        self.maze_width.ok_or(StrategyError::MissingField(Field::MazeWidth))
    }

    pub fn maze_height(&self) -> Result<i64, StrategyError> {
        self.maze_height.ok_or(StrategyError::MissingField(Field::MazeHeight))
    }

    pub fn name(&self) -> Result<&str, StrategyError> {
        self.name
            .as_deref()
            .ok_or(StrategyError::MissingField(Field::Name))
    }

    pub fn player_locations(&self) -> Result<&BTreeMap<String, i64>, StrategyError> {
        self.player_locations
            .as_ref()
            .ok_or(StrategyError::MissingField(Field::PlayerLocations))
    }

    pub fn player_scores(&self) -> Result<&BTreeMap<String, f64>, StrategyError> {
        self.player_scores
            .as_ref()
            .ok_or(StrategyError::MissingField(Field::PlayerScores))
    }

    pub fn cheese(&self) -> Result<&[i64], StrategyError> {
        self.cheese
            .as_deref()
            .ok_or(StrategyError::MissingField(Field::Cheese))
    }

    pub fn possible_actions(&self) -> Result<&[String], StrategyError> {
        self.possible_actions
            .as_deref()
            .ok_or(StrategyError::MissingField(Field::PossibleActions))
    }
}

/// The five moves an agent can make, in the positional order of `possible_actions`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Nothing,
    Up,
    Right,
    Down,
    Left,
}

impl Move {
    /// Returns all moves in label-list order
    pub fn all() -> [Move; 5] {
        [Move::Nothing, Move::Up, Move::Right, Move::Down, Move::Left]
    }

    /// Position of this move's label inside `possible_actions`
    pub fn index(&self) -> usize {
        match self {
            Move::Nothing => 0,
            Move::Up => 1,
            Move::Right => 2,
            Move::Down => 3,
            Move::Left => 4,
        }
    }

    /// Labels past the first five carry no displacement
    pub fn from_index(index: usize) -> Move {
        match index {
            1 => Move::Up,
            2 => Move::Right,
            3 => Move::Down,
            4 => Move::Left,
            _ => Move::Nothing,
        }
    }
}

/// Caller-defined action labels with fixed positional meaning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSet {
    labels: Vec<String>,
}

impl ActionSet {
    pub const REQUIRED_LABELS: usize = 5;

    pub fn new(labels: Vec<String>) -> Result<Self, StrategyError> {
        if labels.len() < Self::REQUIRED_LABELS {
            return Err(StrategyError::MissingActions {
                required: Self::REQUIRED_LABELS,
                got: labels.len(),
            });
        }
        Ok(ActionSet { labels })
    }

    pub fn from_slice(labels: &[String]) -> Result<Self, StrategyError> {
        Self::new(labels.to_vec())
    }

    /// Label the host expects for a move
    pub fn label(&self, mv: Move) -> &str {
        &self.labels[mv.index()]
    }

    /// Label answered when there is nothing worth doing
    pub fn no_op(&self) -> &str {
        self.label(Move::Nothing)
    }

    /// Resolves a label back to a move, failing for labels the host never offered
    pub fn resolve(&self, label: &str) -> Result<Move, StrategyError> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(Move::from_index)
            .ok_or_else(|| StrategyError::UnknownAction {
                label: label.to_string(),
            })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}
