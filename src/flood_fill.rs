// Reachability analysis ("flood fill")
//
// `explore` takes ownership of a board and walks every cell connected to the
// start through traversable cells, marking visited cells `Searched` on its own
// copy. Whatever borders the region (walls, enemy heads) is recorded once and
// not entered. The board is dropped at the end, so the visited markers never
// escape.

use std::collections::HashSet;

use crate::board::{Board, Cell};
use crate::types::Coord;

/// What a single flood fill found around one candidate move
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Cell the traversal started from (never part of its own sets)
    pub origin: Coord,
    pub food: HashSet<Coord>,
    pub walls: HashSet<Coord>,
    pub gold: HashSet<Coord>,
    pub other_heads: HashSet<Coord>,
    pub empty: HashSet<Coord>,
}

impl Report {
    pub fn new(origin: Coord) -> Self {
        Report {
            origin,
            ..Report::default()
        }
    }

    /// Number of reachable empty cells
    pub fn empty_count(&self) -> usize {
        self.empty.len()
    }

    /// Total number of cells recorded in any category
    pub fn total_recorded(&self) -> usize {
        self.food.len() + self.walls.len() + self.gold.len() + self.other_heads.len() + self.empty.len()
    }

    fn closest(&self, points: &HashSet<Coord>) -> Option<i32> {
        points.iter().map(|p| self.origin.manhattan_distance(p)).min()
    }

    pub fn closest_food_distance(&self) -> Option<i32> {
        self.closest(&self.food)
    }

    pub fn closest_gold_distance(&self) -> Option<i32> {
        self.closest(&self.gold)
    }

    pub fn closest_other_head_distance(&self) -> Option<i32> {
        self.closest(&self.other_heads)
    }

    /// Files `p` under the category of `cell`. Own body, other bodies and
    /// visited cells carry no information and are ignored.
    fn record(&mut self, p: Coord, cell: Option<Cell>) {
        match cell {
            None => {
                self.empty.insert(p);
            }
            Some(Cell::Food) => {
                self.food.insert(p);
            }
            Some(Cell::Wall) => {
                self.walls.insert(p);
            }
            Some(Cell::Gold) => {
                self.gold.insert(p);
            }
            Some(Cell::OtherHead) => {
                self.other_heads.insert(p);
            }
            Some(Cell::OwnBody) | Some(Cell::OtherBody) | Some(Cell::Searched) => {}
        }
    }
}

/// Explores the region reachable from `start`, consuming the board
///
/// Depth-first with an explicit stack so that large arenas cannot overflow
/// the call stack. Each cell is marked `Searched` as soon as it is recorded,
/// which bounds the walk by `width * height`.
pub fn explore(mut board: Board, start: Coord) -> Report {
    let mut report = Report::new(start);
    board.set_cell(start, Cell::Searched);

    let mut stack = vec![start];

    while let Some(position) = stack.pop() {
        for p in board.adjacent_non_self(position) {
            let cell = board.cell_at(p);
            if matches!(cell, Some(Cell::Wall) | Some(Cell::OtherHead)) {
                report.record(p, cell);
                board.set_cell(p, Cell::Searched);
            }
        }

        for p in board.legal_moves(position) {
            report.record(p, board.cell_at(p));
            board.set_cell(p, Cell::Searched);
            stack.push(p);
        }
    }

    report
}
