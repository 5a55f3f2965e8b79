// Agent policies and the adapter that checks their inputs
//
// A policy reads what it needs from the TurnRequest and declares those fields
// up front. PolicyAdapter turns the declaration into a lookup table once, then
// rejects any turn context missing a required field before the policy runs.

use rand::seq::IndexedRandom;
use std::fmt;
use std::time::Instant;

use crate::error::StrategyError;
use crate::greedy::greedy_move;
use crate::position::{GridSize, Position};
use crate::turn::{choose_action, choose_action_within};
use crate::types::{ActionSet, TurnRequest};

/// Named fields of a turn context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    MazeWidth,
    MazeHeight,
    Name,
    PlayerLocations,
    PlayerScores,
    Cheese,
    PossibleActions,
}

impl Field {
    pub const COUNT: usize = 7;

    pub fn all() -> [Field; Field::COUNT] {
        [
            Field::MazeWidth,
            Field::MazeHeight,
            Field::Name,
            Field::PlayerLocations,
            Field::PlayerScores,
            Field::Cheese,
            Field::PossibleActions,
        ]
    }

    fn slot(&self) -> usize {
        match self {
            Field::MazeWidth => 0,
            Field::MazeHeight => 1,
            Field::Name => 2,
            Field::PlayerLocations => 3,
            Field::PlayerScores => 4,
            Field::Cheese => 5,
            Field::PossibleActions => 6,
        }
    }

    /// Key used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::MazeWidth => "maze_width",
            Field::MazeHeight => "maze_height",
            Field::Name => "name",
            Field::PlayerLocations => "player_locations",
            Field::PlayerScores => "player_scores",
            Field::Cheese => "cheese",
            Field::PossibleActions => "possible_actions",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that answers one action label per turn
pub trait Policy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fields the policy reads from the turn context
    fn required_fields(&self) -> &'static [Field];

    fn turn(&self, ctx: &TurnRequest) -> Result<String, StrategyError>;

    /// Same as `turn` but may give up once `deadline` has passed.
    /// Policies that answer in bounded time ignore the deadline.
    fn turn_within(&self, ctx: &TurnRequest, _deadline: Instant) -> Result<String, StrategyError> {
        self.turn(ctx)
    }
}

/// Plans against greedy opponents with the full game-tree search
pub struct GameTheory;

impl Policy for GameTheory {
    fn name(&self) -> &'static str {
        "game_theory"
    }

    fn required_fields(&self) -> &'static [Field] {
        &[
            Field::MazeWidth,
            Field::MazeHeight,
            Field::Name,
            Field::PlayerLocations,
            Field::PlayerScores,
            Field::Cheese,
            Field::PossibleActions,
        ]
    }

    fn turn(&self, ctx: &TurnRequest) -> Result<String, StrategyError> {
        choose_action(ctx)
    }

    fn turn_within(&self, ctx: &TurnRequest, deadline: Instant) -> Result<String, StrategyError> {
        choose_action_within(ctx, deadline)
    }
}

/// Walks toward the closest cheese, the same model the search assumes for opponents
pub struct NearestCheese;

impl Policy for NearestCheese {
    fn name(&self) -> &'static str {
        "nearest_cheese"
    }

    fn required_fields(&self) -> &'static [Field] {
        &[
            Field::MazeWidth,
            Field::MazeHeight,
            Field::Name,
            Field::PlayerLocations,
            Field::Cheese,
            Field::PossibleActions,
        ]
    }

    fn turn(&self, ctx: &TurnRequest) -> Result<String, StrategyError> {
        let grid = GridSize::new(ctx.maze_width()?, ctx.maze_height()?)?;
        let actions = ActionSet::from_slice(ctx.possible_actions()?)?;
        let name = ctx.name()?;

        let raw = ctx
            .player_locations()?
            .get(name)
            .copied()
            .ok_or_else(|| StrategyError::UnknownAgent {
                name: name.to_string(),
            })?;
        let me = Position::on_grid(raw, grid)?;

        let cheese = ctx
            .cheese()?
            .iter()
            .map(|&raw| Position::on_grid(raw, grid))
            .collect::<Result<Vec<_>, _>>()?;

        let mv = greedy_move(&me, &cheese)?;
        Ok(actions.label(mv).to_string())
    }
}

/// Uniformly random choice among the offered actions
pub struct RandomMove;

impl Policy for RandomMove {
    fn name(&self) -> &'static str {
        "random"
    }

    fn required_fields(&self) -> &'static [Field] {
        &[Field::PossibleActions]
    }

    fn turn(&self, ctx: &TurnRequest) -> Result<String, StrategyError> {
        let labels = ctx.possible_actions()?;
        labels
            .choose(&mut rand::rng())
            .cloned()
            .ok_or(StrategyError::MissingActions {
                required: 1,
                got: 0,
            })
    }
}

/// Resolves a configured policy name
pub fn policy_by_name(name: &str) -> Result<Box<dyn Policy>, StrategyError> {
    match name {
        "game_theory" => Ok(Box::new(GameTheory)),
        "nearest_cheese" => Ok(Box::new(NearestCheese)),
        "random" => Ok(Box::new(RandomMove)),
        other => Err(StrategyError::UnknownPolicy(other.to_string())),
    }
}

/// Wraps a policy with its precomputed required-field table
pub struct PolicyAdapter {
    policy: Box<dyn Policy>,
    required: [bool; Field::COUNT],
}

impl PolicyAdapter {
    pub fn new(policy: Box<dyn Policy>) -> Self {
        let mut required = [false; Field::COUNT];
        for field in policy.required_fields() {
            required[field.slot()] = true;
        }
        PolicyAdapter { policy, required }
    }

    pub fn by_name(name: &str) -> Result<Self, StrategyError> {
        Ok(Self::new(policy_by_name(name)?))
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Fields the wrapped policy cannot do without
    pub fn required_fields(&self) -> Vec<Field> {
        Field::all()
            .into_iter()
            .filter(|field| self.required[field.slot()])
            .collect()
    }

    fn check_fields(&self, ctx: &TurnRequest) -> Result<(), StrategyError> {
        match Field::all()
            .into_iter()
            .find(|field| self.required[field.slot()] && !ctx.has(*field))
        {
            Some(missing) => Err(StrategyError::MissingField(missing)),
            None => Ok(()),
        }
    }

    /// Checks the context against the table and runs the policy
    pub fn turn(&self, ctx: &TurnRequest) -> Result<String, StrategyError> {
        self.check_fields(ctx)?;
        self.policy.turn(ctx)
    }

    /// Checks the context and runs the policy against a deadline
    pub fn turn_within(&self, ctx: &TurnRequest, deadline: Instant) -> Result<String, StrategyError> {
        self.check_fields(ctx)?;
        self.policy.turn_within(ctx, deadline)
    }
}
