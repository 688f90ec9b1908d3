// Arena API Types
// Coordinates travel on the wire as `[x, y]` pairs; y grows downwards (south).

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// 2D coordinate on the board
#[derive(Deserialize, Serialize, Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// Calculates Manhattan distance between two coordinates
    pub fn manhattan_distance(&self, other: &Coord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl From<[i32; 2]> for Coord {
    fn from(pair: [i32; 2]) -> Self {
        Coord { x: pair[0], y: pair[1] }
    }
}

impl From<Coord> for [i32; 2] {
    fn from(coord: Coord) -> Self {
        [coord.x, coord.y]
    }
}

impl Add for Coord {
    type Output = Coord;

    // Saturating: payload coordinates are untrusted and may sit near i32::MAX
    fn add(self, other: Coord) -> Coord {
        Coord { x: self.x.saturating_add(other.x), y: self.y.saturating_add(other.y) }
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, other: Coord) -> Coord {
        Coord { x: self.x.saturating_sub(other.x), y: self.y.saturating_sub(other.y) }
    }
}

/// Represents the four possible movement directions for a snake
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Returns all possible directions
    pub fn all() -> [Direction; 4] {
        [Direction::North, Direction::South, Direction::East, Direction::West]
    }

    /// Converts direction to string representation for API response
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }

    /// Parses the wire name of a direction (case-insensitive)
    pub fn parse(s: &str) -> Option<Direction> {
        match s.to_lowercase().as_str() {
            "north" => Some(Direction::North),
            "south" => Some(Direction::South),
            "east" => Some(Direction::East),
            "west" => Some(Direction::West),
            _ => None,
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::North => Coord { x: coord.x, y: coord.y - 1 },
            Direction::South => Coord { x: coord.x, y: coord.y + 1 },
            Direction::East => Coord { x: coord.x + 1, y: coord.y },
            Direction::West => Coord { x: coord.x - 1, y: coord.y },
        }
    }
}

fn default_health() -> i32 {
    100
}

/// Snake representation, head first
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Snake {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_health")]
    pub health: i32,
    pub coords: Vec<Coord>,
}

impl Snake {
    pub fn head(&self) -> Option<Coord> {
        self.coords.first().copied()
    }
}

/// Complete per-turn state received from the arena
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GameState {
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub turn: i32,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub food: Vec<Coord>,
    #[serde(default)]
    pub walls: Vec<Coord>,
    #[serde(default)]
    pub gold: Vec<Coord>,
    pub snakes: Vec<Snake>,
    /// Id of the acting snake, when the arena sends it
    #[serde(default)]
    pub you: Option<String>,
}

impl GameState {
    pub fn find_snake(&self, id: &str) -> Option<&Snake> {
        self.snakes.iter().find(|s| s.id == id)
    }
}

/// Start request, only the game id matters to us
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct StartRequest {
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
}
