// Turn pipeline: build the board, list legal moves, flood fill from each one,
// score the reports under this turn's policy and pick the best.
//
// Every candidate owns its board, so candidates are scored in parallel on the
// rayon pool without any shared state.

use log::{debug, error, info, warn};
use rand::seq::IndexedRandom;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Instant;

use crate::board::Board;
use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::error::MoveError;
use crate::heuristics::{move_stats, Policy};
use crate::types::{Coord, Direction, GameState, StartRequest};

/// Score of one candidate move. `-inf` is written to the debug log as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidateScore {
    pub candidate: Coord,
    pub score: f64,
}

/// Outcome of one turn evaluation
#[derive(Debug, Clone)]
pub struct Decision {
    /// None when the snake has no legal move at all
    pub direction: Option<Direction>,
    pub chosen: Option<Coord>,
    pub policy: Policy,
    /// One entry per legal move, in enumeration order
    pub scores: Vec<CandidateScore>,
}

/// Snake bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with debug logging disabled
    pub fn new(config: Config) -> Self {
        Bot {
            config,
            debug_logger: DebugLogger::disabled(),
        }
    }

    /// Creates a Bot that records every decision through `debug_logger`
    pub fn with_debug_logger(config: Config, debug_logger: DebugLogger) -> Self {
        Bot {
            config,
            debug_logger,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns bot metadata, appearance and a status taunt
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        json!({
            "name": self.config.snake.name,
            "color": self.config.snake.color,
            "head_url": self.config.snake.head_url,
            "taunt": self.config.snake.taunt_state,
            "state": "alive",
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, start: &StartRequest) -> Value {
        info!(
            "GAME START {} ({}x{})",
            start.game_id, start.width, start.height
        );

        json!({
            "name": self.config.snake.name,
            "color": self.config.snake.color,
            "head_url": self.config.snake.head_url,
            "taunt": self.config.snake.taunt_start,
        })
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game_id: &str) {
        info!("GAME OVER {}", game_id);
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// Never fails: malformed input and trapped snakes both answer the
    /// configured default direction.
    pub async fn get_move(&self, state: &GameState) -> Value {
        let start_time = Instant::now();
        let turn = state.turn;

        info!("Turn {}: Computing move", turn);

        // Clone data needed for the blocking task
        let task_state = state.clone();
        let config = self.config.clone();

        let outcome = tokio::task::spawn_blocking(move || {
            Bot::compute_decision(&task_state, &config)
        })
        .await;

        let default_direction = self.config.fallback.default_direction;
        let decision = match outcome {
            Ok(Ok(decision)) => Some(decision),
            Ok(Err(e)) => {
                error!("Turn {}: Cannot evaluate turn: {}", turn, e);
                None
            }
            Err(e) => {
                error!("Turn {}: Evaluation task failed: {}", turn, e);
                None
            }
        };

        let chosen_move = match &decision {
            Some(decision) => {
                info!(
                    "Turn {}: {:?} policy, scores {:?}",
                    turn, decision.policy, decision.scores
                );
                decision.direction.unwrap_or_else(|| {
                    warn!(
                        "Turn {}: No legal moves, defaulting to {}",
                        turn,
                        default_direction.as_str()
                    );
                    default_direction
                })
            }
            None => default_direction,
        };

        info!(
            "Turn {}: Chose {} (time: {}ms)",
            turn,
            chosen_move.as_str(),
            start_time.elapsed().as_millis()
        );

        self.debug_logger
            .log_move(state.clone(), chosen_move, decision.as_ref());

        json!({
            "move": chosen_move.as_str(),
            "taunt": self.config.snake.taunt_move,
        })
    }

    /// Evaluates one turn with this bot's configuration
    pub fn decide(&self, state: &GameState) -> Result<Decision, MoveError> {
        Self::compute_decision(state, &self.config)
    }

    /// Full turn pipeline, runs on a blocking thread
    pub fn compute_decision(state: &GameState, config: &Config) -> Result<Decision, MoveError> {
        let self_id = state.you.as_deref().unwrap_or(config.snake.id.as_str());

        let snake = state
            .find_snake(self_id)
            .ok_or_else(|| MoveError::SnakeNotFound(self_id.to_string()))?;
        let head = snake
            .head()
            .ok_or_else(|| MoveError::EmptyBody(self_id.to_string()))?;

        let board = Board::from_state(state, self_id)?;
        debug!("Turn {} board:\n{}", state.turn, board);

        let candidates = board.legal_moves(head);
        let policy = Policy::select(snake.health, !state.gold.is_empty(), &config.scores);

        info!(
            "Evaluating {} legal moves (health {}, policy {:?})",
            candidates.len(),
            snake.health,
            policy
        );

        let scores = candidates
            .par_iter()
            .map(|&candidate| -> Result<CandidateScore, MoveError> {
                let report = move_stats(state, self_id, candidate)?;
                debug!("Candidate {:?}: {:?}", candidate, report);
                Ok(CandidateScore {
                    candidate,
                    score: policy.score(&report, &config.scores),
                })
            })
            .collect::<Result<Vec<_>, MoveError>>()?;

        let chosen = match select_move(&scores) {
            Some(best) => Some(best),
            None => {
                let fallback = random_move(&candidates);
                if fallback.is_some() {
                    warn!("No scorable candidate, picking a random legal move");
                }
                fallback
            }
        };

        let direction = match chosen {
            Some(target) => Some(
                direction_between(head, target)
                    .ok_or(MoveError::NonAdjacentTarget { head, target })?,
            ),
            None => None,
        };

        Ok(Decision {
            direction,
            chosen,
            policy,
            scores,
        })
    }
}

/// Arg-max over the scored candidates; ties go to the first one
///
/// Candidates scored `-inf` are unscorable and never chosen, so an all
/// unscorable (or empty) list yields `None`.
pub fn select_move(scores: &[CandidateScore]) -> Option<Coord> {
    let mut best: Option<&CandidateScore> = None;

    for entry in scores {
        if entry.score == f64::NEG_INFINITY || entry.score.is_nan() {
            continue;
        }
        match best {
            Some(current) if entry.score <= current.score => {}
            _ => best = Some(entry),
        }
    }

    best.map(|entry| entry.candidate)
}

/// Uniformly random legal move
pub fn random_move(candidates: &[Coord]) -> Option<Coord> {
    candidates.choose(&mut rand::rng()).copied()
}

/// Direction that takes the snake from `head` to the adjacent `target`
///
/// Works on `head - target`: a target one row below (y + 1) is south.
pub fn direction_between(head: Coord, target: Coord) -> Option<Direction> {
    let delta = head - target;
    match (delta.x, delta.y) {
        (0, -1) => Some(Direction::South),
        (0, 1) => Some(Direction::North),
        (-1, 0) => Some(Direction::East),
        (1, 0) => Some(Direction::West),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(points: &[((i32, i32), f64)]) -> Vec<CandidateScore> {
        points
            .iter()
            .map(|&((x, y), score)| CandidateScore {
                candidate: Coord::new(x, y),
                score,
            })
            .collect()
    }

    #[test]
    fn test_info_reports_taunt_and_state() {
        let bot = Bot::new(Config::default_hardcoded());
        let info = bot.info();

        assert_eq!(info["name"], bot.config().snake.name.as_str());
        assert_eq!(info["taunt"], "Still digging");
        assert_eq!(info["state"], "alive");
    }

    #[test]
    fn test_direction_between_matches_apply() {
        let head = Coord::new(4, 4);
        for dir in Direction::all() {
            let target = dir.apply(&head);
            assert_eq!(direction_between(head, target), Some(dir));
        }
    }

    #[test]
    fn test_direction_between_uses_head_minus_target() {
        let head = Coord::new(2, 2);
        assert_eq!(direction_between(head, Coord::new(2, 3)), Some(Direction::South));
        assert_eq!(direction_between(head, Coord::new(2, 1)), Some(Direction::North));
        assert_eq!(direction_between(head, Coord::new(3, 2)), Some(Direction::East));
        assert_eq!(direction_between(head, Coord::new(1, 2)), Some(Direction::West));
    }

    #[test]
    fn test_direction_between_rejects_non_adjacent() {
        let head = Coord::new(2, 2);
        assert_eq!(direction_between(head, head), None);
        assert_eq!(direction_between(head, Coord::new(3, 3)), None);
        assert_eq!(direction_between(head, Coord::new(2, 4)), None);
    }

    #[test]
    fn test_select_move_ties_go_to_first() {
        let scores = scored(&[((0, 0), 5.0), ((1, 0), 9.0), ((2, 0), 9.0), ((3, 0), 1.0)]);
        assert_eq!(select_move(&scores), Some(Coord::new(1, 0)));
    }

    #[test]
    fn test_select_move_skips_unscorable() {
        let scores = scored(&[((0, 0), f64::NEG_INFINITY), ((1, 0), -2000.0)]);
        assert_eq!(select_move(&scores), Some(Coord::new(1, 0)));

        let scores = scored(&[((0, 0), f64::NEG_INFINITY), ((1, 0), f64::NEG_INFINITY)]);
        assert_eq!(select_move(&scores), None);
        assert_eq!(select_move(&[]), None);
    }

    #[test]
    fn test_random_move_stays_within_candidates() {
        let candidates = vec![Coord::new(0, 1), Coord::new(1, 0)];
        for _ in 0..20 {
            let chosen = random_move(&candidates).unwrap();
            assert!(candidates.contains(&chosen));
        }
        assert_eq!(random_move(&[]), None);
    }
}
