use std::fmt;
use anyhow::{Result, anyhow, bail};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Player {
    X,
    O,
}

impl Player {
    pub(crate) fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Spot {
    Empty,
    Filled(Player),
}

/// A board coordinate, both components in `0..3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Move {
    row: usize,
    col: usize,
}

impl Move {
    /// Panics if either component is out of range.
    pub(crate) fn new(row: usize, col: usize) -> Self {
        assert!(row < 3 && col < 3, "move ({}, {}) is off the board", row, col);
        Self { row, col }
    }

    pub(crate) fn try_new(row: usize, col: usize) -> Result<Self> {
        if row >= 3 || col >= 3 {
            bail!("Move ({}, {}) is off the board", row, col);
        }
        Ok(Self { row, col })
    }

    /// Parses "row col" as typed by a human player.
    pub(crate) fn parse(input: &str) -> Result<Self> {
        let mut parts = input.split_whitespace();
        let row: usize = parts.next().ok_or_else(|| anyhow!("Missing row"))?.parse()?;
        let col: usize = parts.next().ok_or_else(|| anyhow!("Missing column"))?.parse()?;
        if parts.next().is_some() {
            bail!("Expected exactly two numbers");
        }
        Self::try_new(row, col)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    InProgress,
    WinX,
    WinO,
    Draw,
}

impl Outcome {
    pub(crate) fn is_over(self) -> bool {
        self != Outcome::InProgress
    }

    pub(crate) fn winner(self) -> Option<Player> {
        match self {
            Outcome::WinX => Some(Player::X),
            Outcome::WinO => Some(Player::O),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }
}

// Rows, then columns, then diagonals.
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct TicTacToe {
    spots: [[Spot; 3]; 3],
}

impl TicTacToe {
    pub fn new() -> Self {
        Self {
            spots: [[Spot::Empty; 3]; 3],
        }
    }

    /// Builds a board from three rows such as `"XO_"`. `_`, `.` and space are empty.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: [&str; 3]) -> Result<Self> {
        let mut board = Self::new();
        for (row, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != 3 {
                bail!("Row {} must have exactly 3 cells, got {:?}", row, line);
            }
            for (col, c) in chars.into_iter().enumerate() {
                board.spots[row][col] = match c.to_ascii_uppercase() {
                    'X' => Spot::Filled(Player::X),
                    'O' => Spot::Filled(Player::O),
                    '_' | '.' | ' ' => Spot::Empty,
                    other => bail!("Unknown cell {:?} at ({}, {})", other, row, col),
                };
            }
        }
        Ok(board)
    }

    pub(crate) fn spot(&self, mv: Move) -> Spot {
        self.spots[mv.row][mv.col]
    }

    pub(crate) fn outcome(&self) -> Outcome {
        for &line in LINES.iter() {
            let [a, b, c] = line.map(|(row, col)| self.spots[row][col]);
            if let Spot::Filled(player) = a {
                if b == a && c == a {
                    return match player {
                        Player::X => Outcome::WinX,
                        Player::O => Outcome::WinO,
                    };
                }
            }
        }

        if self.spots.iter().flatten().all(|spot| *spot != Spot::Empty) {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }

    /// Empty cells in row-major order.
    pub(crate) fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(9);
        for row in 0..3 {
            for col in 0..3 {
                if self.spots[row][col] == Spot::Empty {
                    moves.push(Move::new(row, col));
                }
            }
        }
        moves
    }

    pub(crate) fn apply(&mut self, mv: Move, player: Player) {
        assert_eq!(self.spot(mv), Spot::Empty, "apply on occupied spot {}", mv);
        self.spots[mv.row][mv.col] = Spot::Filled(player);
    }

    pub(crate) fn undo(&mut self, mv: Move) {
        assert_ne!(self.spot(mv), Spot::Empty, "undo on empty spot {}", mv);
        self.spots[mv.row][mv.col] = Spot::Empty;
    }

    /// Validated placement for moves coming from outside the engine.
    pub(crate) fn place(&mut self, mv: Move, player: Player) -> Result<()> {
        match self.spot(mv) {
            Spot::Empty => {
                self.apply(mv, player);
                Ok(())
            }
            Spot::Filled(_) => bail!("Spot {} is already filled", mv),
        }
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in &self.spots {
            let cells: Vec<&str> = row
                .iter()
                .map(|spot| match spot {
                    Spot::Empty => " ",
                    Spot::Filled(Player::X) => "X",
                    Spot::Filled(Player::O) => "O",
                })
                .collect();
            writeln!(f, "{}", cells.join(" | "))?;
            writeln!(f, "{}", "-".repeat(10))?;
        }
        Ok(())
    }
}
