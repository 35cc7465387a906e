//! Square board geometry and the sliding active window

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::game::Player;

/// Board coordinates. `x` is the column, `y` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Step `n` times along `(dx, dy)`, `None` if that leaves the
    /// non-negative quadrant.
    pub fn offset(&self, (dx, dy): (isize, isize), n: isize) -> Option<Coord> {
        let x = self.x.checked_add_signed(dx * n)?;
        let y = self.y.checked_add_signed(dy * n)?;
        Some(Coord::new(x, y))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Line directions checked by win detection: row, column, diagonal,
/// anti-diagonal.
pub const LINE_DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// Window shift direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// Unit vector `(dx, dy)` applied to the window origin
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (1, -1),
            Direction::DownLeft => (-1, 1),
            Direction::DownRight => (1, 1),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::UpLeft => "up-left",
            Direction::UpRight => "up-right",
            Direction::DownLeft => "down-left",
            Direction::DownRight => "down-right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "up" | "n" => Ok(Direction::Up),
            "down" | "s" => Ok(Direction::Down),
            "left" | "w" => Ok(Direction::Left),
            "right" | "e" => Ok(Direction::Right),
            "upleft" | "nw" => Ok(Direction::UpLeft),
            "upright" | "ne" => Ok(Direction::UpRight),
            "downleft" | "sw" => Ok(Direction::DownLeft),
            "downright" | "se" => Ok(Direction::DownRight),
            _ => Err(format!("unknown direction: {}", s)),
        }
    }
}

// ============================================================================
// ACTIVE WINDOW
// ============================================================================

/// K×K playable sub-square, identified by its top-left corner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub x: usize,
    pub y: usize,
    pub size: usize,
}

impl Window {
    pub const fn new(x: usize, y: usize, size: usize) -> Self {
        Self { x, y, size }
    }

    /// Window of `size` centered on a board of `board_size`
    pub fn centered(board_size: usize, size: usize) -> Self {
        let start = board_size.saturating_sub(size) / 2;
        Self::new(start, start, size)
    }

    pub fn contains(&self, c: Coord) -> bool {
        c.x >= self.x && c.x < self.x + self.size && c.y >= self.y && c.y < self.y + self.size
    }

    /// Window cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let Window { x, y, size } = *self;
        (y..y + size).flat_map(move |cy| (x..x + size).map(move |cx| Coord::new(cx, cy)))
    }

    /// The window moved one step, if it stays on a board of `board_size`
    pub fn shifted(&self, direction: Direction, board_size: usize) -> Option<Window> {
        let origin = Coord::new(self.x, self.y).offset(direction.delta(), 1)?;
        if origin.x + self.size <= board_size && origin.y + self.size <= board_size {
            Some(Window::new(origin.x, origin.y, self.size))
        } else {
            None
        }
    }

    /// Directions whose shift keeps the window on the board
    pub fn legal_shifts(&self, board_size: usize) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.shifted(d, board_size).is_some())
            .collect()
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// N×N grid of cells, `None` meaning empty
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Player>>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, c: Coord) -> bool {
        c.x < self.size && c.y < self.size
    }

    /// Cell contents; off-board coordinates read as empty
    pub fn get(&self, c: Coord) -> Option<Player> {
        if self.in_bounds(c) {
            self.cells[c.y * self.size + c.x]
        } else {
            None
        }
    }

    pub fn is_empty(&self, c: Coord) -> bool {
        self.get(c).is_none()
    }

    /// Overwrite a cell. Off-board writes are ignored.
    pub fn set(&mut self, c: Coord, cell: Option<Player>) {
        if self.in_bounds(c) {
            self.cells[c.y * self.size + c.x] = cell;
        }
    }

    /// Coordinates of `player`'s pieces, row-major over the whole board
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = Coord> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, cell)| **cell == Some(player))
            .map(move |(i, _)| Coord::new(i % size, i / size))
    }

    pub fn count(&self, player: Player) -> usize {
        self.pieces(player).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.size.max(1)).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let ch = match cell {
                    Some(p) => p.symbol(),
                    None => '.',
                };
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = String;

    /// Parse rows of `X`, `O` and `.` separated by newlines or `/`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .split(|c| c == '\n' || c == '/')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .collect();

        let size = rows.len();
        let mut board = Board::new(size);
        for (y, row) in rows.iter().enumerate() {
            let chars: Vec<char> = row.chars().collect();
            if chars.len() != size {
                return Err(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    chars.len(),
                    size
                ));
            }
            for (x, ch) in chars.into_iter().enumerate() {
                let cell = match ch {
                    '.' | '_' => None,
                    other => Some(
                        other
                            .to_string()
                            .parse::<Player>()
                            .map_err(|_| format!("bad cell '{}' at ({}, {})", other, x, y))?,
                    ),
                };
                board.set(Coord::new(x, y), cell);
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_window() {
        assert_eq!(Window::centered(5, 3), Window::new(1, 1, 3));
        assert_eq!(Window::centered(6, 3), Window::new(1, 1, 3));
        assert_eq!(Window::centered(3, 3), Window::new(0, 0, 3));
    }

    #[test]
    fn test_window_contains() {
        let w = Window::new(1, 1, 3);
        assert!(w.contains(Coord::new(1, 1)));
        assert!(w.contains(Coord::new(3, 3)));
        assert!(!w.contains(Coord::new(0, 2)));
        assert!(!w.contains(Coord::new(4, 1)));
    }

    #[test]
    fn test_window_cells_row_major() {
        let cells: Vec<_> = Window::new(1, 2, 2).cells().collect();
        assert_eq!(
            cells,
            vec![
                Coord::new(1, 2),
                Coord::new(2, 2),
                Coord::new(1, 3),
                Coord::new(2, 3)
            ]
        );
    }

    #[test]
    fn test_shift_stays_on_board() {
        let w = Window::new(0, 0, 3);
        assert_eq!(w.shifted(Direction::Up, 5), None);
        assert_eq!(w.shifted(Direction::Left, 5), None);
        assert_eq!(w.shifted(Direction::DownRight, 5), Some(Window::new(1, 1, 3)));

        let corner = Window::new(2, 2, 3);
        assert_eq!(corner.shifted(Direction::Right, 5), None);
        assert_eq!(corner.shifted(Direction::UpLeft, 5), Some(Window::new(1, 1, 3)));
    }

    #[test]
    fn test_legal_shifts() {
        assert_eq!(Window::centered(5, 3).legal_shifts(5).len(), 8);
        assert_eq!(Window::new(0, 0, 3).legal_shifts(5).len(), 3);
        assert!(Window::new(0, 0, 3).legal_shifts(3).is_empty());
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("up-left".parse::<Direction>(), Ok(Direction::UpLeft));
        assert_eq!("DownRight".parse::<Direction>(), Ok(Direction::DownRight));
        assert_eq!("ne".parse::<Direction>(), Ok(Direction::UpRight));
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_board_text_roundtrip() {
        let text = "X....\n..O..\n.....\n.....\n....X";
        let board: Board = text.parse().unwrap();
        assert_eq!(board.get(Coord::new(0, 0)), Some(Player::X));
        assert_eq!(board.get(Coord::new(2, 1)), Some(Player::O));
        assert_eq!(board.pieces(Player::X).last(), Some(Coord::new(4, 4)));
        assert_eq!(board.count(Player::X), 2);
        assert_eq!(board.to_string(), text);
    }

    #[test]
    fn test_board_rejects_ragged_rows() {
        assert!("X../..".parse::<Board>().is_err());
        assert!("X?./.../...".parse::<Board>().is_err());
    }

    #[test]
    fn test_off_board_reads_empty() {
        let board = Board::new(3);
        assert!(board.get(Coord::new(7, 0)).is_none());
        assert!(!board.in_bounds(Coord::new(3, 0)));
    }
}
