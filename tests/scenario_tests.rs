//! Game-tree search scenario tests
//!
//! End-to-end checks of the planning core: movement arithmetic over whole
//! grids, score splitting, termination, tie-breaking and the two reference
//! games used to sanity-check the turn entry point.

use std::collections::BTreeMap;
use std::sync::Arc;

use cheese_race_bot::position::{GridSize, Position};
use cheese_race_bot::scoring::update_scores;
use cheese_race_bot::search::{best_targets, SearchPlan};
use cheese_race_bot::simulation::simulate_until_target;
use cheese_race_bot::state::GameState;
use cheese_race_bot::turn::choose_action;
use cheese_race_bot::types::{ActionSet, Move, TurnRequest};

fn labels() -> Vec<String> {
    ["nothing", "up", "right", "down", "left"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn request(width: i64, height: i64, agents: &[(&str, i64)], cheese: &[i64]) -> TurnRequest {
    TurnRequest {
        maze_width: Some(width),
        maze_height: Some(height),
        name: Some("rat".to_string()),
        player_locations: Some(
            agents
                .iter()
                .map(|(name, at)| (name.to_string(), *at))
                .collect(),
        ),
        player_scores: Some(agents.iter().map(|(name, _)| (name.to_string(), 0.0)).collect()),
        cheese: Some(cheese.to_vec()),
        possible_actions: Some(labels()),
    }
}

/// Test: every edge move on every small grid is a no-op
#[test]
fn test_moves_clamp_at_every_edge() {
    for width in 1..=5usize {
        for height in 1..=5usize {
            let grid = GridSize::new(width as i64, height as i64).unwrap();
            for index in 0..grid.cells() {
                let p = Position::on_grid(index as i64, grid).unwrap();
                let (x, y) = p.coordinates().unwrap();
                if y == 0 {
                    assert_eq!(p.step(Move::Up).unwrap(), p, "up at {} on {}", p, grid);
                }
                if y == height - 1 {
                    assert_eq!(p.step(Move::Down).unwrap(), p, "down at {} on {}", p, grid);
                }
                if x == 0 {
                    assert_eq!(p.step(Move::Left).unwrap(), p, "left at {} on {}", p, grid);
                }
                if x == width - 1 {
                    assert_eq!(p.step(Move::Right).unwrap(), p, "right at {} on {}", p, grid);
                }
            }
        }
    }
}

/// Test: applying labels goes through the same clamping
#[test]
fn test_apply_action_labels() {
    let actions = ActionSet::new(labels()).unwrap();
    let grid = GridSize::new(3, 3).unwrap();
    let corner = Position::on_grid(0, grid).unwrap();

    assert_eq!(corner.apply_action("up", &actions).unwrap(), corner);
    assert_eq!(corner.apply_action("left", &actions).unwrap(), corner);
    assert_eq!(corner.apply_action("right", &actions).unwrap().index(), 1);
    assert_eq!(corner.apply_action("down", &actions).unwrap().index(), 3);
    assert!(corner.apply_action("teleport", &actions).is_err());
}

/// Test: diagonal targets always produce a vertical move; same cell produces no-op
#[test]
fn test_vertical_precedence_everywhere() {
    let actions = ActionSet::new(labels()).unwrap();
    let grid = GridSize::new(4, 4).unwrap();
    for from in 0..16 {
        for to in 0..16 {
            let a = Position::on_grid(from, grid).unwrap();
            let b = Position::on_grid(to, grid).unwrap();
            let (ax, ay) = a.coordinates().unwrap();
            let (bx, by) = b.coordinates().unwrap();
            let action = a.next_action_toward(&b, &actions).unwrap();

            if from == to {
                assert_eq!(action, "nothing");
            } else if ax != bx && ay != by {
                assert!(
                    action == "up" || action == "down",
                    "{} -> {} gave {}",
                    a,
                    b,
                    action
                );
            }
        }
    }
}

/// Test: total points for one cheese shared by k of N agents is k - k(k-1)/N
#[test]
fn test_score_conservation_per_cheese() {
    let grid = GridSize::new(10, 1).unwrap();
    for total in 1..=6usize {
        for sharing in 1..=total {
            let mut positions = BTreeMap::new();
            let mut scores = BTreeMap::new();
            for agent in 0..total {
                // first `sharing` agents stand on the cheese at 0
                let at = if agent < sharing { 0 } else { agent as i64 + 1 };
                positions.insert(format!("agent_{}", agent), Position::on_grid(at, grid).unwrap());
                scores.insert(format!("agent_{}", agent), 0.0);
            }

            let cheese = vec![Position::on_grid(0, grid).unwrap()];
            let remaining = update_scores(&positions, &mut scores, &cheese);

            let awarded: f64 = scores.values().sum();
            let k = sharing as f64;
            let expected = k - k * (k - 1.0) / total as f64;
            assert!(remaining.is_empty());
            assert!(
                (awarded - expected).abs() < 1e-9,
                "k={} N={} awarded {} expected {}",
                sharing,
                total,
                awarded,
                expected
            );
            if sharing == 1 {
                assert_eq!(awarded, 1.0);
            }
        }
    }
}

/// Test: an empty board ends the search immediately
#[test]
fn test_search_terminates_on_empty_board() {
    let grid = GridSize::new(2, 2).unwrap();
    let state = GameState {
        positions: [("rat".to_string(), Position::on_grid(3, grid).unwrap())]
            .into_iter()
            .collect(),
        scores: [("rat".to_string(), 4.0)].into_iter().collect(),
        cheese: vec![],
        actions: Arc::new(ActionSet::new(labels()).unwrap()),
    };

    assert_eq!(best_targets("rat", &state).unwrap(), SearchPlan::idle(4.0));
}

/// Test: equal scores prefer the shorter pursuit order
#[test]
fn test_shorter_plan_breaks_score_tie() {
    // On a 4x1 strip, heading for 3 eats 1 and 2 on the way
    let state = GameState::from_request(&request(4, 1, &[("rat", 0)], &[1, 2, 3])).unwrap();
    let plan = best_targets("rat", &state).unwrap();

    assert_eq!(plan.score, 3.0);
    assert_eq!(plan.targets.len(), 1);
    assert_eq!(plan.targets[0].index(), 3);
}

/// Test: equal score and equal length keep the first plan found in cheese order
#[test]
fn test_first_plan_wins_full_tie() {
    // From the middle of a 5x1 strip both orders take two targets and score 2
    let state = GameState::from_request(&request(5, 1, &[("rat", 2)], &[0, 4])).unwrap();
    let plan = best_targets("rat", &state).unwrap();
    let order: Vec<usize> = plan.targets.iter().map(|p| p.index()).collect();
    assert_eq!(plan.score, 2.0);
    assert_eq!(order, vec![0, 4]);
    assert_eq!(choose_action(&request(5, 1, &[("rat", 2)], &[0, 4])).unwrap(), "left");

    let state = GameState::from_request(&request(5, 1, &[("rat", 2)], &[4, 0])).unwrap();
    let plan = best_targets("rat", &state).unwrap();
    let order: Vec<usize> = plan.targets.iter().map(|p| p.index()).collect();
    assert_eq!(plan.score, 2.0);
    assert_eq!(order, vec![4, 0]);
    assert_eq!(choose_action(&request(5, 1, &[("rat", 2)], &[4, 0])).unwrap(), "right");
}

/// Test: opponent already on the only cheese leaves nothing to plan for
#[test]
fn test_opponent_sitting_on_cheese() {
    let req = request(1, 2, &[("rat", 0), ("python", 1)], &[1]);
    let state = GameState::from_request(&req).unwrap();

    assert_eq!(state.scores["python"], 1.0);
    assert!(state.cheese.is_empty());
    assert_eq!(best_targets("rat", &state).unwrap(), SearchPlan::idle(0.0));
    assert_eq!(choose_action(&req).unwrap(), "nothing");
}

/// Test: equidistant agents split the cheese in the middle
#[test]
fn test_equidistant_agents_split() {
    let req = request(3, 1, &[("rat", 0), ("python", 2)], &[1]);
    let state = GameState::from_request(&req).unwrap();
    let target = state.cheese[0];

    let end = simulate_until_target(&target, "rat", &state).unwrap();
    assert_eq!(end.positions["rat"].index(), 1);
    assert_eq!(end.positions["python"].index(), 1);
    assert_eq!(end.scores["rat"], 0.5);
    assert_eq!(end.scores["python"], 0.5);

    let plan = best_targets("rat", &state).unwrap();
    assert_eq!(plan.score, 0.5);
    assert_eq!(choose_action(&req).unwrap(), "right");
}

/// Test: the answer is always one of the host's labels, even custom ones
#[test]
fn test_custom_labels_are_respected() {
    let mut req = request(3, 3, &[("rat", 4), ("python", 0)], &[1, 8]);
    let custom: Vec<String> = ["stay", "n", "e", "s", "w"].iter().map(|s| s.to_string()).collect();
    req.possible_actions = Some(custom.clone());

    let action = choose_action(&req).unwrap();
    assert!(custom.contains(&action));
}

/// Test: the same snapshot always yields the same action
#[test]
fn test_search_is_deterministic() {
    let req = request(5, 5, &[("rat", 12), ("python", 0), ("viper", 24)], &[1, 7, 17, 23]);
    let first = choose_action(&req).unwrap();
    for _ in 0..3 {
        assert_eq!(choose_action(&req).unwrap(), first);
    }
}
