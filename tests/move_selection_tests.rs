//! Move Selection Tests
//!
//! End-to-end decisions on small hand-built arenas: policy choice,
//! food/gold pursuit, dead-end avoidance and tie-breaking.

use gold_snake::bot::Bot;
use gold_snake::config::Config;
use gold_snake::heuristics::Policy;
use gold_snake::types::{Coord, Direction, GameState, Snake};

fn c(x: i32, y: i32) -> Coord {
    Coord::new(x, y)
}

fn our_snake(health: i32, coords: Vec<Coord>) -> Snake {
    Snake {
        id: "our-snake".to_string(),
        name: "gold".to_string(),
        health,
        coords,
    }
}

fn game(width: i32, height: i32, snakes: Vec<Snake>) -> GameState {
    GameState {
        game_id: "test-game".to_string(),
        turn: 0,
        width,
        height,
        food: vec![],
        walls: vec![],
        gold: vec![],
        snakes,
        you: Some("our-snake".to_string()),
    }
}

/// Test: hungry snake on an empty 5x5 board heads for the food two cells west
#[test]
fn test_hungry_snake_moves_toward_food() {
    let bot = Bot::new(Config::default_hardcoded());

    let mut state = game(5, 5, vec![our_snake(50, vec![c(2, 2)])]);
    state.food.push(c(0, 2));

    let decision = bot.decide(&state).expect("turn should be evaluable");

    assert_eq!(decision.policy, Policy::Hungry);
    assert_eq!(decision.chosen, Some(c(1, 2)));
    assert_eq!(decision.direction, Some(Direction::West));

    // Every other candidate sits three cells from the food
    for entry in &decision.scores {
        if entry.candidate == c(1, 2) {
            assert_eq!(entry.score, -1.0);
        } else {
            assert_eq!(entry.score, -3.0, "candidate {:?}", entry.candidate);
        }
    }
}

/// Test: a healthy snake with gold on the board goes for the gold
#[test]
fn test_gold_present_moves_toward_gold() {
    let bot = Bot::new(Config::default_hardcoded());

    let mut state = game(7, 7, vec![our_snake(100, vec![c(3, 3), c(3, 4)])]);
    state.gold.push(c(6, 3));
    state.food.push(c(0, 3));

    let decision = bot.decide(&state).unwrap();

    assert_eq!(decision.policy, Policy::GoldSeeking);
    assert_eq!(decision.chosen, Some(c(4, 3)));
    assert_eq!(decision.direction, Some(Direction::East));
}

/// Test: general movement refuses a small walled pocket and breaks the tie
/// between the two open candidates in enumeration order
#[test]
fn test_general_policy_avoids_pocket() {
    let bot = Bot::new(Config::default_hardcoded());

    // Column x=1 is walled except for a door at (1,2) into a 5-cell pocket
    let mut state = game(7, 5, vec![our_snake(100, vec![c(2, 2), c(2, 3), c(2, 4)])]);
    state.walls = vec![c(1, 0), c(1, 1), c(1, 3), c(1, 4)];

    let decision = bot.decide(&state).unwrap();

    assert_eq!(decision.policy, Policy::General);
    let pocket = decision
        .scores
        .iter()
        .find(|s| s.candidate == c(1, 2))
        .expect("door cell is a legal move");
    assert_eq!(pocket.score, 5.0 - 1000.0);

    // (2,1) and (3,2) both reach 21 empty cells; (2,1) is enumerated first
    assert_eq!(decision.chosen, Some(c(2, 1)));
    assert_eq!(decision.direction, Some(Direction::North));
}

/// Test: hungry with no reachable food leaves every candidate unscorable,
/// so a random legal move is taken
#[test]
fn test_unreachable_food_falls_back_to_random_legal_move() {
    let bot = Bot::new(Config::default_hardcoded());

    // Food is sealed off in the corner
    let mut state = game(6, 6, vec![our_snake(10, vec![c(2, 2)])]);
    state.food.push(c(5, 5));
    state.walls = vec![c(4, 5), c(5, 4), c(4, 4)];

    let decision = bot.decide(&state).unwrap();

    assert!(decision
        .scores
        .iter()
        .all(|s| s.score == f64::NEG_INFINITY));
    let chosen = decision.chosen.expect("a legal move exists");
    assert!(decision.scores.iter().any(|s| s.candidate == chosen));
    assert!(decision.direction.is_some());
}

/// Test: the arena's `you` field wins over the configured id
#[test]
fn test_configured_id_used_when_you_missing() {
    let config = Config::default_hardcoded();
    let bot = Bot::new(config.clone());

    let mut snake = our_snake(100, vec![c(0, 0)]);
    snake.id = config.snake.id.clone();
    let mut state = game(3, 3, vec![snake]);
    state.you = None;

    let decision = bot.decide(&state).unwrap();
    assert!(decision.direction.is_some());
}
