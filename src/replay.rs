// Replay module for analyzing logged turns and debugging decision-making
//
// This module provides functionality to:
// 1. Parse JSONL debug logs written by DebugLogger
// 2. Re-run the decision pipeline on each logged state
// 3. Compare logged vs replayed moves (and policies) and summarise the match rate

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::bot::Bot;
use crate::config::Config;
use crate::heuristics::Policy;
use crate::types::{Coord, Direction, GameState};

/// Represents a single log entry from the debug JSONL file
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogEntry {
    pub turn: i32,
    pub chosen_move: String,
    #[serde(default)]
    pub policy: Option<Policy>,
    #[serde(default)]
    pub scores: Vec<LoggedScore>,
    pub state: GameState,
    pub timestamp: String,
}

/// Candidate score as written to the log; unscorable candidates come back as `None`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggedScore {
    pub candidate: Coord,
    pub score: Option<f64>,
}

fn best_finite<I: IntoIterator<Item = f64>>(scores: I) -> Option<f64> {
    scores
        .into_iter()
        .filter(|s| s.is_finite())
        .fold(None, |best: Option<f64>, s| Some(best.map_or(s, |b| b.max(s))))
}

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub original_move: Direction,
    pub replayed_move: Direction,
    pub matches: bool,
    pub policy: Policy,
    /// Policy recorded at play time, for logs that carry one
    pub logged_policy: Option<Policy>,
    /// Best finite candidate score, if any candidate was scorable
    pub best_score: Option<f64>,
    pub logged_best_score: Option<f64>,
    pub computation_time_ms: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    bot: Bot,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine {
            bot: Bot::new(config),
            verbose,
        }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line).map_err(|e| {
                format!("Failed to parse JSON on line {}: {}", line_num + 1, e)
            })?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        if self.verbose {
            info!("Replaying turn {}...", entry.turn);
        }

        let original_move = Direction::parse(&entry.chosen_move)
            .ok_or_else(|| format!("Invalid direction: {}", entry.chosen_move))?;

        let start_time = Instant::now();
        let decision = self
            .bot
            .decide(&entry.state)
            .map_err(|e| format!("Turn {} cannot be evaluated: {}", entry.turn, e))?;
        let computation_time_ms = start_time.elapsed().as_millis();

        let replayed_move = decision
            .direction
            .unwrap_or(self.bot.config().fallback.default_direction);
        let best_score = best_finite(decision.scores.iter().map(|s| s.score));
        let logged_best_score = best_finite(entry.scores.iter().filter_map(|s| s.score));

        if let Some(logged) = entry.policy {
            if logged != decision.policy {
                warn!(
                    "Turn {}: policy changed from {:?} to {:?}",
                    entry.turn, logged, decision.policy
                );
            }
        }

        let matches = original_move == replayed_move;

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: MATCH - {} ({:?}, best score: {:?}, time: {}ms)",
                    entry.turn,
                    replayed_move.as_str(),
                    decision.policy,
                    best_score,
                    computation_time_ms
                );
            } else {
                warn!(
                    "Turn {}: MISMATCH - Original: {}, Replayed: {} ({:?}, best score: {:?}, time: {}ms)",
                    entry.turn,
                    original_move.as_str(),
                    replayed_move.as_str(),
                    decision.policy,
                    best_score,
                    computation_time_ms
                );
            }
        }

        Ok(ReplayResult {
            turn: entry.turn,
            original_move,
            replayed_move,
            matches,
            policy: decision.policy,
            logged_policy: entry.policy,
            best_score,
            logged_best_score,
            computation_time_ms,
        })
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        let mut results = Vec::new();

        for entry in entries {
            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                }
            }
        }

        results
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[LogEntry],
        turn_numbers: &[i32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", turn_num, e);
                }
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_turns - matches;
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n===========================================================");
        println!("                    REPLAY REPORT");
        println!("===========================================================");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("===========================================================\n");

        if !results.is_empty() {
            let avg_time: f64 = results.iter().map(|r| r.computation_time_ms as f64).sum::<f64>()
                / results.len() as f64;
            println!("Average Computation Time:   {:.1}ms\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("===========================================================");
            println!("                  DETAILED MISMATCHES");
            println!("===========================================================");

            for result in mismatches {
                println!(
                    "Turn {}: {} -> {} ({:?}, best score: {:?}, time: {}ms)",
                    result.turn,
                    result.original_move.as_str(),
                    result.replayed_move.as_str(),
                    result.policy,
                    result.best_score,
                    result.computation_time_ms
                );
                if result.logged_policy.is_some() {
                    println!(
                        "          logged: {:?}, best score: {:?}",
                        result.logged_policy, result.logged_best_score
                    );
                }
            }
            println!();
        }
    }
}
