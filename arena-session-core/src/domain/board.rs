use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the grid
pub const GRID_SIZE: u8 = 3;

/// Number of cells on the board
pub const CELL_COUNT: usize = 9;

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals (row-major indices)
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Content of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum Cell {
    #[default]
    Empty,
    /// Mark of the slot-1 participant
    X,
    /// Mark of the slot-2 participant
    O,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn as_char(&self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }
}

/// 3×3 board, stored row-major (`index = row * 3 + col`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row-major index for in-range coordinates
    pub fn index(row: u8, col: u8) -> Option<usize> {
        (row < GRID_SIZE && col < GRID_SIZE).then(|| (row * GRID_SIZE + col) as usize)
    }

    pub fn get(&self, row: u8, col: u8) -> Option<Cell> {
        Self::index(row, col).map(|i| self.cells[i])
    }

    /// Write a mark, overwriting whatever is there.
    ///
    /// Callers are responsible for the "target cell is empty" rule.
    pub(crate) fn set(&mut self, row: u8, col: u8, mark: Cell) {
        if let Some(i) = Self::index(row, col) {
            self.cells[i] = mark;
        }
    }

    /// Mark owning a completed line, if any
    pub fn winning_mark(&self) -> Option<Cell> {
        WIN_LINES.iter().find_map(|&[a, b, c]| {
            let mark = self.cells[a];
            (!mark.is_empty() && mark == self.cells[b] && mark == self.cells[c]).then_some(mark)
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Multi-line rendering for terminals
    pub fn render_grid(&self) -> String {
        self.cells
            .chunks(GRID_SIZE as usize)
            .map(|row| {
                row.iter()
                    .map(|c| c.as_char().to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Compact 9-character form, e.g. `"X-O-X---O"`
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            write!(f, "{}", cell.as_char())?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Board {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != CELL_COUNT {
            return Err(format!("expected {CELL_COUNT} cells, got {}", chars.len()));
        }

        let mut board = Board::new();
        for (i, c) in chars.into_iter().enumerate() {
            board.cells[i] = Cell::from_char(c).ok_or_else(|| format!("invalid cell {c:?}"))?;
        }
        Ok(board)
    }
}
