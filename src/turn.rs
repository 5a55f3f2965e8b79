// Turn entry point: raw snapshot in, one action label out
//
// Raw integer locations become Positions here and nowhere else. Each call
// searches from scratch; nothing about the plan survives to the next turn.

use log::{debug, info};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crate::error::StrategyError;
use crate::position::{GridSize, Position};
use crate::scoring::update_scores;
use crate::search::{GameTreeSearch, SearchPlan};
use crate::state::GameState;
use crate::types::{ActionSet, TurnRequest};

/// Action chosen for a turn together with the plan behind it
#[derive(Debug, Clone)]
pub struct TurnDecision {
    pub action: String,
    pub plan: SearchPlan,
    pub simulations: u64,
}

impl GameState {
    /// Builds the working state for `request`
    ///
    /// Cheese an agent already stands on is settled with the regular score
    /// update before any planning happens.
    pub fn from_request(request: &TurnRequest) -> Result<Self, StrategyError> {
        let grid = GridSize::new(request.maze_width()?, request.maze_height()?)?;
        let actions = ActionSet::from_slice(request.possible_actions()?)?;
        let scores = request.player_scores()?;

        let mut positions = BTreeMap::new();
        for (name, &raw) in request.player_locations()? {
            if !scores.contains_key(name) {
                return Err(StrategyError::MissingScore { name: name.clone() });
            }
            positions.insert(name.clone(), Position::on_grid(raw, grid)?);
        }

        let mut cheese: Vec<Position> = Vec::new();
        for &raw in request.cheese()? {
            let piece = Position::on_grid(raw, grid)?;
            if !cheese.contains(&piece) {
                cheese.push(piece);
            }
        }

        let mut scores = scores.clone();
        let cheese = update_scores(&positions, &mut scores, &cheese);

        Ok(GameState {
            positions,
            scores,
            cheese,
            actions: Arc::new(actions),
        })
    }
}

/// Runs the search for the controlled agent and maps its first target to a move
pub fn decide(request: &TurnRequest) -> Result<TurnDecision, StrategyError> {
    decide_within(request, None)
}

/// Like `decide`, but the search gives up with `DeadlineExceeded` past `deadline`
pub fn decide_within(
    request: &TurnRequest,
    deadline: Option<Instant>,
) -> Result<TurnDecision, StrategyError> {
    let name = request.name()?;
    let state = GameState::from_request(request)?;
    let me = state.position_of(name)?;

    let mut search = match deadline {
        Some(deadline) => GameTreeSearch::with_deadline(name, deadline),
        None => GameTreeSearch::new(name),
    };
    let plan = search.best_targets(&state)?;

    let action = match plan.first_target() {
        Some(target) => me.next_action_toward(target, &state.actions)?,
        None => state.actions.no_op(),
    }
    .to_string();

    info!(
        "{} heads {} with a {}-target plan scoring {} ({} simulations)",
        name,
        action,
        plan.targets.len(),
        plan.score,
        search.simulations()
    );
    debug!(
        "{} plan: {:?}",
        name,
        plan.targets.iter().map(|p| p.index()).collect::<Vec<_>>()
    );

    Ok(TurnDecision {
        action,
        plan,
        simulations: search.simulations(),
    })
}

/// Next action for the controlled agent. Only the first step of the plan is returned.
pub fn choose_action(request: &TurnRequest) -> Result<String, StrategyError> {
    decide(request).map(|decision| decision.action)
}

pub fn choose_action_within(
    request: &TurnRequest,
    deadline: Instant,
) -> Result<String, StrategyError> {
    decide_within(request, Some(deadline)).map(|decision| decision.action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<String> {
        ["nothing", "up", "right", "down", "left"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn request(
        width: i64,
        height: i64,
        agents: &[(&str, i64, f64)],
        cheese: &[i64],
    ) -> TurnRequest {
        TurnRequest {
            maze_width: Some(width),
            maze_height: Some(height),
            name: Some("rat".to_string()),
            player_locations: Some(
                agents
                    .iter()
                    .map(|(name, at, _)| (name.to_string(), *at))
                    .collect(),
            ),
            player_scores: Some(
                agents
                    .iter()
                    .map(|(name, _, score)| (name.to_string(), *score))
                    .collect(),
            ),
            cheese: Some(cheese.to_vec()),
            possible_actions: Some(labels()),
        }
    }

    #[test]
    fn test_occupied_cheese_settled_up_front() {
        let req = request(1, 2, &[("rat", 0, 0.0), ("python", 1, 0.0)], &[1]);
        let state = GameState::from_request(&req).unwrap();
        assert!(state.cheese.is_empty());
        assert_eq!(state.scores["python"], 1.0);
        assert_eq!(state.scores["rat"], 0.0);
    }

    #[test]
    fn test_duplicate_cheese_collapsed() {
        let req = request(3, 3, &[("rat", 0, 0.0)], &[4, 8, 4]);
        let state = GameState::from_request(&req).unwrap();
        let indices: Vec<usize> = state.cheese.iter().map(|p| p.index()).collect();
        assert_eq!(indices, vec![4, 8]);
    }

    #[test]
    fn test_negative_location_rejected() {
        let req = request(3, 3, &[("rat", -1, 0.0)], &[4]);
        assert_eq!(
            choose_action(&req),
            Err(StrategyError::InvalidLocation { value: -1 })
        );
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let mut req = request(3, 3, &[("rat", 0, 0.0)], &[4]);
        req.maze_width = Some(i64::MAX);
        assert_eq!(
            choose_action(&req),
            Err(StrategyError::InvalidGridSize {
                width: i64::MAX,
                height: 3
            })
        );
    }

    #[test]
    fn test_missing_width_rejected() {
        let mut req = request(3, 3, &[("rat", 0, 0.0)], &[4]);
        req.maze_width = None;
        assert!(matches!(
            choose_action(&req),
            Err(StrategyError::MissingField(_))
        ));
    }

    #[test]
    fn test_agent_without_score_rejected() {
        let mut req = request(3, 3, &[("rat", 0, 0.0)], &[4]);
        if let Some(locations) = req.player_locations.as_mut() {
            locations.insert("python".to_string(), 8);
        }
        assert_eq!(
            choose_action(&req),
            Err(StrategyError::MissingScore {
                name: "python".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_controlled_agent_rejected() {
        let mut req = request(3, 3, &[("python", 0, 0.0)], &[4]);
        req.name = Some("rat".to_string());
        assert_eq!(
            choose_action(&req),
            Err(StrategyError::UnknownAgent {
                name: "rat".to_string()
            })
        );
    }

    #[test]
    fn test_deadline_only_matters_when_searching() {
        // python already sits on the only cheese, nothing left to search
        let req = request(1, 2, &[("rat", 0, 0.0), ("python", 1, 0.0)], &[1]);
        assert_eq!(choose_action_within(&req, Instant::now()).unwrap(), "nothing");

        let req = request(3, 1, &[("rat", 0, 0.0), ("python", 2, 0.0)], &[1]);
        assert!(matches!(
            choose_action_within(&req, Instant::now()),
            Err(StrategyError::DeadlineExceeded { .. })
        ));
    }

    #[test]
    fn test_decision_exposes_plan() {
        let req = request(3, 1, &[("rat", 0, 0.0), ("python", 2, 0.0)], &[1]);
        let decision = decide(&req).unwrap();
        assert_eq!(decision.action, "right");
        assert_eq!(decision.plan.score, 0.5);
        assert_eq!(decision.simulations, 1);
    }
}
