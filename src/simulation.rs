// Turn-by-turn simulation of every agent until a chosen cheese is eaten
//
// The controlled agent walks straight at the chosen cheese while every other
// agent follows the greedy opponent model against whatever cheese is left.
// All moves of a turn are computed from the same snapshot and then applied
// together, followed by one score update.

use log::trace;

use crate::error::StrategyError;
use crate::greedy::opponent_move;
use crate::position::Position;
use crate::scoring::update_scores;
use crate::state::GameState;

/// Plays turns until `target` is no longer on the board
///
/// Returns a fresh state; `state` itself is never modified. If `target` is
/// already gone the returned state is an unchanged copy.
///
/// # Arguments
/// * `target` - Cheese the controlled agent walks toward
/// * `name` - Controlled agent
/// * `state` - State to start from
pub fn simulate_until_target(
    target: &Position,
    name: &str,
    state: &GameState,
) -> Result<GameState, StrategyError> {
    let mut next = state.clone();

    if next.has_cheese(target) {
        // without the controlled agent nobody is bound to reach the target
        let _controlled = next.position_of(name)?;
    }

    let mut turns = 0usize;
    while next.has_cheese(target) {
        let mut moved = Vec::with_capacity(next.positions.len());
        for (agent, position) in &next.positions {
            let mv = if agent == name {
                position.direction_toward(target)?
            } else {
                opponent_move(&next, agent)?
            };
            moved.push((agent.clone(), position.step(mv)?));
        }

        next.positions.extend(moved);
        next.cheese = update_scores(&next.positions, &mut next.scores, &next.cheese);
        turns += 1;
    }

    trace!(
        "Simulated {} turn(s) toward {}: {} cheese left",
        turns,
        target,
        next.cheese.len()
    );

    Ok(next)
}
