// Move scoring
//
// Each candidate move gets its own board and its own flood fill. The
// resulting Report is turned into a single score by the policy chosen for
// this turn. Higher is better; `f64::NEG_INFINITY` marks a candidate the
// policy cannot score (no reachable food or gold to measure against).

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell};
use crate::config::ScoresConfig;
use crate::error::MoveError;
use crate::flood_fill::{explore, Report};
use crate::types::{Coord, GameState};

/// Scoring policy, chosen once per turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Policy {
    /// Health below the hunger threshold: close in on food
    Hungry,
    /// Gold on the board: close in on gold
    GoldSeeking,
    /// Maximise room to move
    General,
}

impl Policy {
    /// Hunger wins over gold, gold over general movement
    pub fn select(health: i32, gold_present: bool, config: &ScoresConfig) -> Policy {
        if health < config.hunger_threshold {
            Policy::Hungry
        } else if gold_present {
            Policy::GoldSeeking
        } else {
            Policy::General
        }
    }

    pub fn score(&self, report: &Report, config: &ScoresConfig) -> f64 {
        let base = match self {
            Policy::Hungry => negated_distance(report.closest_food_distance()),
            Policy::GoldSeeking => negated_distance(report.closest_gold_distance()),
            Policy::General => report.empty_count() as f64,
        };

        base + dead_end_penalty(report, config) + enemy_head_penalty(report, config)
    }
}

/// Unreachable targets are infinitely far away
fn negated_distance(distance: Option<i32>) -> f64 {
    match distance {
        Some(d) => -(d as f64),
        None => f64::NEG_INFINITY,
    }
}

/// Penalises regions too small to manoeuvre in
pub fn dead_end_penalty(report: &Report, config: &ScoresConfig) -> f64 {
    if report.empty_count() < config.dead_end_min_empty {
        config.dead_end_penalty
    } else {
        0.0
    }
}

/// Linear ramp against closing in on an enemy head
pub fn enemy_head_penalty(report: &Report, config: &ScoresConfig) -> f64 {
    match report.closest_other_head_distance() {
        Some(d) if d <= config.enemy_head_radius => {
            config.enemy_head_penalty * (config.enemy_head_radius - d) as f64
        }
        _ => 0.0,
    }
}

/// Simulates stepping onto `candidate` and floods the rest of the board from there
///
/// The candidate cell is marked `Searched` before the flood, so the fill never
/// records it. If it held food or gold, that is put back into the report
/// afterwards.
pub fn move_stats(state: &GameState, self_id: &str, candidate: Coord) -> Result<Report, MoveError> {
    let mut board = Board::from_state(state, self_id)?;

    let landed_on = board.cell_at(candidate);
    board.set_cell(candidate, Cell::Searched);

    let mut report = explore(board, candidate);

    match landed_on {
        Some(Cell::Food) => {
            report.food.insert(candidate);
        }
        Some(Cell::Gold) => {
            report.gold.insert(candidate);
        }
        _ => {}
    }

    Ok(report)
}
