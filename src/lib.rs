// Library exports for the snake's decision engine
// This allows the replay tool and the integration tests to use the core logic

pub mod board;
pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod error;
pub mod flood_fill;
pub mod heuristics;
pub mod replay;
pub mod types;
