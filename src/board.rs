// Grid model for one turn
//
// A Board is built fresh from the turn payload for every evaluation. Cells
// that were never stamped are empty, which is why the grid stores
// `Option<Cell>` rather than a dedicated empty variant.

use std::fmt;

use crate::error::MoveError;
use crate::types::{Coord, GameState, Snake};

/// Unit offsets applied during move enumeration, in traversal order
pub const OFFSETS: [Coord; 4] = [
    Coord { x: 0, y: 1 },
    Coord { x: 0, y: -1 },
    Coord { x: 1, y: 0 },
    Coord { x: -1, y: 0 },
];

/// Largest grid we are willing to allocate; anything bigger is not a real arena
pub const MAX_CELLS: usize = 1 << 20;

/// Classification of a non-empty cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Food,
    Wall,
    Gold,
    /// Any segment of the acting snake, head included
    OwnBody,
    OtherBody,
    OtherHead,
    /// Visited marker, only meaningful inside a single flood fill
    Searched,
}

impl Cell {
    fn symbol(cell: Option<Cell>) -> char {
        match cell {
            None => '.',
            Some(Cell::Food) => 'F',
            Some(Cell::Wall) => '#',
            Some(Cell::Gold) => 'G',
            Some(Cell::OwnBody) => 'S',
            Some(Cell::OtherBody) => 'o',
            Some(Cell::OtherHead) => 'H',
            Some(Cell::Searched) => '*',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    cells: Vec<Option<Cell>>,
}

impl Board {
    /// Creates an empty board
    ///
    /// Rejects non-positive dimensions and grids larger than `MAX_CELLS`.
    pub fn new(width: i32, height: i32) -> Result<Self, MoveError> {
        let invalid = MoveError::InvalidDimensions { width, height };
        if width <= 0 || height <= 0 {
            return Err(invalid);
        }

        let cell_count = (width as usize)
            .checked_mul(height as usize)
            .filter(|&n| n <= MAX_CELLS)
            .ok_or(invalid)?;

        Ok(Board {
            width,
            height,
            cells: vec![None; cell_count],
        })
    }

    /// Stamps every entity of a turn onto a new board
    ///
    /// Food, walls and gold are stamped first, then snakes in order. Our own
    /// snake is stamped `OwnBody` end to end; other snakes get an `OtherHead`
    /// followed by `OtherBody` for the remaining segments.
    pub fn build(
        width: i32,
        height: i32,
        food: &[Coord],
        walls: &[Coord],
        gold: &[Coord],
        snakes: &[Snake],
        self_id: &str,
    ) -> Result<Self, MoveError> {
        let mut board = Board::new(width, height)?;

        for &p in food {
            board.set_cell(p, Cell::Food);
        }
        for &p in walls {
            board.set_cell(p, Cell::Wall);
        }
        for &p in gold {
            board.set_cell(p, Cell::Gold);
        }

        for snake in snakes {
            if snake.id == self_id {
                for &p in &snake.coords {
                    board.set_cell(p, Cell::OwnBody);
                }
            } else if let Some((&head, tail)) = snake.coords.split_first() {
                board.set_cell(head, Cell::OtherHead);
                for &p in tail {
                    board.set_cell(p, Cell::OtherBody);
                }
            }
        }

        Ok(board)
    }

    /// Builds the board for a full turn payload
    pub fn from_state(state: &GameState, self_id: &str) -> Result<Self, MoveError> {
        Board::build(
            state.width,
            state.height,
            &state.food,
            &state.walls,
            &state.gold,
            &state.snakes,
            self_id,
        )
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, p: Coord) -> Option<usize> {
        if self.is_in_bounds(p) {
            Some(p.y as usize * self.width as usize + p.x as usize)
        } else {
            None
        }
    }

    /// Checks if a coordinate lies on the board
    pub fn is_in_bounds(&self, p: Coord) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Returns the classification at `p`; off-board lookups read as empty
    pub fn cell_at(&self, p: Coord) -> Option<Cell> {
        self.index(p).and_then(|i| self.cells[i])
    }

    /// True for empty, food and gold cells: the only cells a move may land on.
    /// Off-board points read as empty and are therefore reported traversable;
    /// check `is_in_bounds` first, as `legal_moves` does.
    pub fn is_traversable(&self, p: Coord) -> bool {
        matches!(self.cell_at(p), None | Some(Cell::Food) | Some(Cell::Gold))
    }

    /// Writes a classification in place. Off-board writes are dropped.
    pub fn set_cell(&mut self, p: Coord, cell: Cell) {
        if let Some(i) = self.index(p) {
            self.cells[i] = Some(cell);
        }
    }

    /// Neighbours of `position` the snake could occupy next turn
    pub fn legal_moves(&self, position: Coord) -> Vec<Coord> {
        OFFSETS
            .iter()
            .map(|&offset| position + offset)
            .filter(|&p| self.is_in_bounds(p) && self.is_traversable(p))
            .collect()
    }

    /// Neighbours of `position` that are not part of our own snake.
    /// Walls, heads and off-board cells all pass through.
    pub fn adjacent_non_self(&self, position: Coord) -> Vec<Coord> {
        OFFSETS
            .iter()
            .map(|&offset| position + offset)
            .filter(|&p| self.cell_at(p) != Some(Cell::OwnBody))
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width as usize) {
            let line: String = row.iter().map(|&c| Cell::symbol(c)).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(id: &str, coords: &[(i32, i32)]) -> Snake {
        Snake {
            id: id.to_string(),
            name: id.to_string(),
            health: 100,
            coords: coords.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
        }
    }

    #[test]
    fn test_rejects_empty_dimensions() {
        assert_eq!(
            Board::new(0, 5),
            Err(MoveError::InvalidDimensions { width: 0, height: 5 })
        );
        assert!(Board::new(5, -1).is_err());
    }

    #[test]
    fn test_rejects_oversized_dimensions() {
        assert_eq!(
            Board::new(50_000, 50_000),
            Err(MoveError::InvalidDimensions { width: 50_000, height: 50_000 })
        );
        assert!(Board::new(i32::MAX, i32::MAX).is_err());
        assert!(Board::new(1024, 1024).is_ok());
        assert!(Board::new(1025, 1024).is_err());
    }

    #[test]
    fn test_off_board_points_read_traversable() {
        let board = Board::new(2, 2).unwrap();
        let off = Coord::new(-1, 0);
        assert!(board.is_traversable(off));
        assert!(!board.is_in_bounds(off));
        assert!(!board.legal_moves(Coord::new(0, 0)).contains(&off));
    }

    #[test]
    fn test_out_of_bounds_reads_as_empty() {
        let mut board = Board::new(3, 3).unwrap();
        for x in 0..3 {
            for y in 0..3 {
                board.set_cell(Coord::new(x, y), Cell::Wall);
            }
        }

        for p in [
            Coord::new(-1, 0),
            Coord::new(0, -1),
            Coord::new(3, 0),
            Coord::new(0, 3),
            Coord::new(100, -100),
        ] {
            assert_eq!(board.cell_at(p), None);
            assert!(!board.is_in_bounds(p));
        }
    }

    #[test]
    fn test_traversable_iff_empty_food_or_gold() {
        let mut board = Board::new(8, 1).unwrap();
        let cells = [
            Cell::Food,
            Cell::Wall,
            Cell::Gold,
            Cell::OwnBody,
            Cell::OtherBody,
            Cell::OtherHead,
            Cell::Searched,
        ];
        for (x, &cell) in cells.iter().enumerate() {
            board.set_cell(Coord::new(x as i32, 0), cell);
        }

        for x in 0..8 {
            let p = Coord::new(x, 0);
            let expected = matches!(
                board.cell_at(p),
                None | Some(Cell::Food) | Some(Cell::Gold)
            );
            assert_eq!(board.is_traversable(p), expected, "cell {:?}", board.cell_at(p));
        }
        assert!(board.is_traversable(Coord::new(7, 0)));
    }

    #[test]
    fn test_build_stamps_snakes() {
        let snakes = vec![
            snake("me", &[(1, 1), (1, 2), (1, 3)]),
            snake("them", &[(3, 1), (3, 2)]),
        ];
        let board = Board::build(
            5,
            5,
            &[Coord::new(0, 0)],
            &[Coord::new(4, 4)],
            &[Coord::new(2, 2)],
            &snakes,
            "me",
        )
        .unwrap();

        assert_eq!(board.cell_at(Coord::new(0, 0)), Some(Cell::Food));
        assert_eq!(board.cell_at(Coord::new(4, 4)), Some(Cell::Wall));
        assert_eq!(board.cell_at(Coord::new(2, 2)), Some(Cell::Gold));
        assert_eq!(board.cell_at(Coord::new(1, 1)), Some(Cell::OwnBody));
        assert_eq!(board.cell_at(Coord::new(1, 3)), Some(Cell::OwnBody));
        assert_eq!(board.cell_at(Coord::new(3, 1)), Some(Cell::OtherHead));
        assert_eq!(board.cell_at(Coord::new(3, 2)), Some(Cell::OtherBody));
        assert_eq!(board.cell_at(Coord::new(0, 4)), None);
    }

    #[test]
    fn test_legal_moves_excludes_blocked_and_off_board() {
        let snakes = vec![snake("me", &[(0, 0), (1, 0)])];
        let board = Board::build(3, 3, &[Coord::new(0, 1)], &[], &[], &snakes, "me").unwrap();

        assert_eq!(board.legal_moves(Coord::new(0, 0)), vec![Coord::new(0, 1)]);
    }

    #[test]
    fn test_adjacent_non_self_keeps_walls_and_off_board() {
        let snakes = vec![snake("me", &[(0, 0), (1, 0)])];
        let board = Board::build(3, 3, &[], &[Coord::new(0, 1)], &[], &snakes, "me").unwrap();

        let adjacent = board.adjacent_non_self(Coord::new(0, 0));
        assert_eq!(
            adjacent,
            vec![Coord::new(0, 1), Coord::new(0, -1), Coord::new(-1, 0)]
        );
    }

    #[test]
    fn test_display_renders_rows() {
        let snakes = vec![snake("me", &[(0, 0)]), snake("them", &[(2, 1), (1, 1)])];
        let board = Board::build(3, 2, &[Coord::new(2, 0)], &[], &[], &snakes, "me").unwrap();

        assert_eq!(board.to_string(), "S.F\n.oH\n");
    }
}
