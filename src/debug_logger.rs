// Fire-and-forget JSONL log of every turn we answered
//
// One line per turn holding the full payload, the direction we sent back and
// the policy and candidate scores behind it, so the replay tool can re-run the
// decision offline and diff it against what was logged.

use log::{error, info};
use serde::Serialize;
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::bot::{CandidateScore, Decision};
use crate::heuristics::Policy;
use crate::types::{Direction, GameState};

/// Represents a single debug log entry
#[derive(Debug, Serialize)]
struct DebugLogEntry {
    turn: i32,
    chosen_move: String,
    /// Absent when the turn could not be evaluated
    policy: Option<Policy>,
    scores: Vec<CandidateScore>,
    state: GameState,
    timestamp: String,
}

/// Turns arriving concurrently serialise their writes on the file mutex
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Opens the log file (truncating it) when enabled.
    /// A file that cannot be created disables logging instead of failing startup.
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return DebugLogger {
                file: Arc::new(Mutex::new(None)),
                enabled: false,
            };
        }

        // Initialize the log file
        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                DebugLogger {
                    file: Arc::new(Mutex::new(None)),
                    enabled: false,
                }
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    /// Queues one turn for writing on a spawned tokio task
    pub fn log_move(&self, state: GameState, chosen_move: Direction, decision: Option<&Decision>) {
        if !self.enabled {
            return;
        }

        let entry = DebugLogEntry {
            turn: state.turn,
            chosen_move: chosen_move.as_str().to_string(),
            policy: decision.map(|d| d.policy),
            scores: decision.map(|d| d.scores.clone()).unwrap_or_default(),
            state,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        let file_handle = self.file.clone();

        // Spawn fire-and-forget task
        tokio::spawn(async move {
            Self::log_move_internal(file_handle, entry).await;
        });
    }

    async fn log_move_internal(file_handle: Arc<Mutex<Option<File>>>, entry: DebugLogEntry) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {

            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else {
                        if let Err(e) = file.flush().await {
                            error!("Failed to flush debug log: {}", e);
                        }
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coord, Snake};
    use std::time::Duration;

    fn state(turn: i32) -> GameState {
        GameState {
            game_id: "log-test".to_string(),
            turn,
            width: 3,
            height: 3,
            food: vec![Coord::new(0, 0)],
            walls: vec![],
            gold: vec![],
            snakes: vec![Snake {
                id: "me".to_string(),
                name: "me".to_string(),
                health: 90,
                coords: vec![Coord::new(1, 1)],
            }],
            you: Some("me".to_string()),
        }
    }

    #[tokio::test]
    async fn test_writes_one_line_per_turn() {
        let path = std::env::temp_dir().join(format!("gold_snake_log_{}.jsonl", std::process::id()));
        let path_str = path.to_string_lossy().to_string();

        let decision = Decision {
            direction: Some(Direction::West),
            chosen: Some(Coord::new(0, 1)),
            policy: Policy::Hungry,
            scores: vec![
                CandidateScore { candidate: Coord::new(1, 2), score: f64::NEG_INFINITY },
                CandidateScore { candidate: Coord::new(0, 1), score: -1.0 },
            ],
        };

        let logger = DebugLogger::new(true, &path_str).await;
        logger.log_move(state(0), Direction::West, Some(&decision));
        tokio::time::sleep(Duration::from_millis(100)).await;
        logger.log_move(state(1), Direction::North, None);
        tokio::time::sleep(Duration::from_millis(100)).await;

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["turn"], 0);
        assert_eq!(first["chosen_move"], "west");
        assert_eq!(first["state"]["food"][0][0], 0);
        assert_eq!(first["policy"], "Hungry");
        assert_eq!(first["scores"][0]["candidate"], serde_json::json!([1, 2]));
        assert!(first["scores"][0]["score"].is_null());
        assert_eq!(first["scores"][1]["score"], -1.0);

        // A turn that could not be evaluated still gets a line
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["chosen_move"], "north");
        assert!(second["policy"].is_null());
        assert_eq!(second["scores"], serde_json::json!([]));

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_disabled_logger_is_a_no_op() {
        let logger = DebugLogger::disabled();
        logger.log_move(state(0), Direction::South, None);
    }
}
