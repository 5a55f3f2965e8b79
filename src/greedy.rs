// Deterministic opponent model: always walk toward the nearest cheese

use crate::error::StrategyError;
use crate::position::Position;
use crate::state::GameState;
use crate::types::Move;

/// Nearest piece of cheese by taxicab distance
///
/// Ties go to whichever piece comes first in `cheese`.
pub fn nearest_cheese(
    from: &Position,
    cheese: &[Position],
) -> Result<Option<Position>, StrategyError> {
    let mut best: Option<(usize, Position)> = None;
    for piece in cheese {
        let distance = from.distance(piece)?;
        match best {
            Some((closest, _)) if distance >= closest => {}
            _ => best = Some((distance, *piece)),
        }
    }
    Ok(best.map(|(_, piece)| piece))
}

/// Move a greedy agent standing at `from` makes this turn
///
/// With no cheese left the agent stays put.
pub fn greedy_move(from: &Position, cheese: &[Position]) -> Result<Move, StrategyError> {
    match nearest_cheese(from, cheese)? {
        Some(target) => from.direction_toward(&target),
        None => Ok(Move::Nothing),
    }
}

/// Move the opponent model predicts for `name` given the whole game state
pub fn opponent_move(state: &GameState, name: &str) -> Result<Move, StrategyError> {
    let from = state.position_of(name)?;
    greedy_move(&from, &state.cheese)
}
