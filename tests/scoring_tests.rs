// Score update table tests
//
// Each case lists agent locations, scores before the update and the cheese on
// the board, then the scores and remaining cheese afterwards.

use std::collections::BTreeMap;

use cheese_race_bot::position::Position;
use cheese_race_bot::scoring::{share_of_cheese, update_scores};

struct Case {
    locations: &'static [usize],
    scores: &'static [f64],
    cheese: &'static [usize],
    expected_scores: &'static [f64],
    expected_cheese: &'static [usize],
}

const CASES: &[Case] = &[
    Case {
        locations: &[5, 4],
        scores: &[0.0, 5.0],
        cheese: &[4, 1],
        expected_scores: &[0.0, 6.0],
        expected_cheese: &[1],
    },
    Case {
        locations: &[2, 2],
        scores: &[1.5, 1.5],
        cheese: &[2, 1],
        expected_scores: &[2.0, 2.0],
        expected_cheese: &[1],
    },
    Case {
        locations: &[1, 2, 2],
        scores: &[0.5, 1.0 / 3.0, 4.0 / 3.0],
        cheese: &[1, 2],
        expected_scores: &[1.5, 1.0, 2.0],
        expected_cheese: &[],
    },
    Case {
        locations: &[2, 2, 3, 4],
        scores: &[0.5, 0.75, 1.0, 0.0],
        cheese: &[2, 4, 1],
        expected_scores: &[1.25, 1.5, 1.0, 1.0],
        expected_cheese: &[1],
    },
];

fn agent(i: usize) -> String {
    format!("player_{}", i)
}

#[test]
fn test_update_scores_table() {
    for (case_num, case) in CASES.iter().enumerate() {
        let positions: BTreeMap<String, Position> = case
            .locations
            .iter()
            .enumerate()
            .map(|(i, &at)| (agent(i), Position::bare(at)))
            .collect();
        let mut scores: BTreeMap<String, f64> = case
            .scores
            .iter()
            .enumerate()
            .map(|(i, &s)| (agent(i), s))
            .collect();
        let cheese: Vec<Position> = case.cheese.iter().map(|&i| Position::bare(i)).collect();

        let remaining = update_scores(&positions, &mut scores, &cheese);

        let remaining: Vec<usize> = remaining.iter().map(|p| p.index()).collect();
        assert_eq!(remaining, case.expected_cheese, "case {}: cheese", case_num);
        for (i, expected) in case.expected_scores.iter().enumerate() {
            let actual = scores[&agent(i)];
            assert!(
                (actual - expected).abs() < 1e-9,
                "case {}: {} scored {} expected {}",
                case_num,
                agent(i),
                actual,
                expected
            );
        }
    }
}

#[test]
fn test_inputs_left_untouched() {
    let positions: BTreeMap<String, Position> =
        [("rat".to_string(), Position::bare(3))].into_iter().collect();
    let cheese = vec![Position::bare(3), Position::bare(7)];
    let mut scores = BTreeMap::new();

    let remaining = update_scores(&positions, &mut scores, &cheese);

    assert_eq!(cheese.len(), 2);
    assert_eq!(remaining, vec![Position::bare(7)]);
    assert_eq!(scores["rat"], 1.0);
}

#[test]
fn test_share_values() {
    assert_eq!(share_of_cheese(1, 1), 1.0);
    assert_eq!(share_of_cheese(1, 4), 1.0);
    assert_eq!(share_of_cheese(2, 2), 0.5);
    assert_eq!(share_of_cheese(2, 4), 0.75);
    assert_eq!(share_of_cheese(4, 4), 0.25);
}
