// Cheese consumption and score distribution

use std::collections::BTreeMap;

use crate::position::Position;

/// Points each of `sharing` agents earns for one cheese in a game of `total_agents`
///
/// A lone agent earns a full point; agents arriving together split it so that
/// each gets `1 - (sharing - 1) / total_agents`.
pub fn share_of_cheese(sharing: usize, total_agents: usize) -> f64 {
    1.0 - (sharing as f64 - 1.0) / total_agents as f64
}

/// Awards points for every cheese an agent is standing on and returns the cheese left
///
/// `scores` is updated in place; `cheese` is left untouched and the surviving
/// pieces are returned in their original order.
///
/// # Arguments
/// * `positions` - Current location of every agent in the game
/// * `scores` - Score ledger, keyed like `positions`
/// * `cheese` - Cheese still on the board before this update
pub fn update_scores(
    positions: &BTreeMap<String, Position>,
    scores: &mut BTreeMap<String, f64>,
    cheese: &[Position],
) -> Vec<Position> {
    let total_agents = positions.len();
    let mut remaining = Vec::with_capacity(cheese.len());

    for piece in cheese {
        let eaters: Vec<&String> = positions
            .iter()
            .filter(|(_, position)| *position == piece)
            .map(|(name, _)| name)
            .collect();

        if eaters.is_empty() {
            remaining.push(*piece);
            continue;
        }

        let share = share_of_cheese(eaters.len(), total_agents);
        for name in eaters {
            *scores.entry(name.clone()).or_insert(0.0) += share;
        }
    }

    remaining
}
