use std::str::FromStr;

use crate::core::{MoveError, Outcome, PlayerMark, WinLine};

/// Every way to get three in a row: 3 rows (top to bottom), 3 columns (left to right)
/// and two diagonals (first the one that points to southeast, then the one to northeast).
pub const WIN_LINES: [WinLine; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub const N_CELLS: usize = 9;

/// Represents a coordinate on the board
///
///  0 1 2
///  3 4 5
///  6 7 8
///
/// invariant: the number inside must be 0-8
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct TTTAddr(usize);

impl TTTAddr {
    /// Panics if `index` is not a cell on the board.
    pub fn new(index: usize) -> Self {
        assert!(index < N_CELLS, "Bad input! Cell index {index} is off the board");
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }

    pub fn row(&self) -> usize {
        self.0 / 3
    }

    pub fn col(&self) -> usize {
        self.0 % 3
    }

    pub fn all() -> impl Iterator<Item = TTTAddr> {
        (0..N_CELLS).map(TTTAddr)
    }
}

impl TryFrom<usize> for TTTAddr {
    type Error = MoveError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        if index < N_CELLS {
            Ok(Self(index))
        } else {
            Err(MoveError::OutOfRange(index))
        }
    }
}

/// Humans count cells 1-9
impl std::fmt::Display for TTTAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0 + 1)
    }
}

/// The board entries from top left row wise to bottom right.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Default)]
pub struct TTTBoard([Option<PlayerMark>; N_CELLS]);

impl TTTBoard {
    pub fn new() -> Self {
        Self([None; N_CELLS])
    }

    pub fn is_empty(&self, a: TTTAddr) -> bool {
        self.0[a.0].is_none()
    }

    pub fn cell(&self, a: TTTAddr) -> Option<PlayerMark> {
        self.0[a.0]
    }

    /// Put `marker` in an empty cell. An occupied cell is left as it is.
    pub fn place(&mut self, a: TTTAddr, marker: PlayerMark) -> Result<(), MoveError> {
        if !self.is_empty(a) {
            return Err(MoveError::CellOccupied(a));
        }
        self.0[a.0] = Some(marker);
        Ok(())
    }

    /// The empty cells, in ascending order.
    pub fn empty_indices(&self) -> Vec<TTTAddr> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(num, &mark)| {
                if mark.is_none() {
                    Some(TTTAddr(num))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Has `mark` completed a line, or is the board full?
    ///
    /// Lines are scanned in [`WIN_LINES`] order and the first complete one is reported.
    /// Only `mark` is looked at, so a full board where the other mark has a line reads as a draw.
    pub fn check_outcome(&self, mark: PlayerMark) -> Outcome {
        let won = WIN_LINES
            .iter()
            .find(|line| line.iter().all(|&i| self.0[i] == Some(mark)));
        if let Some(&line) = won {
            Outcome::Won(mark, line)
        } else if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::Undecided
        }
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(|&q| q.is_some())
    }

    pub fn n_moves_made(&self) -> usize {
        self.0.iter().filter(|&q| q.is_some()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Invalid board string: {_0}")]
pub struct ParseBoardError(String);

impl std::error::Error for ParseBoardError {}

/// Nine characters, row wise. `x` and `o` are marks, a blank or `.` is an empty cell.
impl FromStr for TTTBoard {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != N_CELLS {
            return Err(ParseBoardError(format!(
                "expected {N_CELLS} characters, got {}",
                chars.len()
            )));
        }
        let mut b = Self::new();
        for (num, c) in chars.into_iter().enumerate() {
            b.0[num] = match c.to_ascii_lowercase() {
                'x' => Some(PlayerMark::Cross),
                'o' => Some(PlayerMark::Naught),
                ' ' | '.' => None,
                other => {
                    return Err(ParseBoardError(format!(
                        "may only contain x, o, '.' or blank space, found {other:?}"
                    )))
                }
            };
        }
        Ok(b)
    }
}

impl std::fmt::Display for TTTBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let m = |m| match m {
            None => ' ',
            Some(PlayerMark::Cross) => 'X',
            Some(PlayerMark::Naught) => 'O',
        };
        writeln!(f, " ------- ")?;
        for row in self.0.chunks(3) {
            write!(f, "| ")?;
            row.iter().try_for_each(|&mark| write!(f, "{} ", m(mark)))?;
            writeln!(f, "|")?;
        }
        writeln!(f, " ------- ")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn board(s: &str) -> TTTBoard {
        s.parse().unwrap()
    }

    #[test]
    fn new_board_is_all_empty() {
        let b = TTTBoard::new();
        assert!(TTTAddr::all().all(|a| b.is_empty(a)));
        assert_eq!(b.empty_indices(), TTTAddr::all().collect::<Vec<_>>());
        assert_eq!(b.check_outcome(PlayerMark::Cross), Outcome::Undecided);
    }

    #[test]
    fn addr_maps_row_major() {
        let a = TTTAddr::new(5);
        assert_eq!((a.row(), a.col()), (1, 2));
        assert_eq!(a.to_string(), "6");
        assert_eq!(TTTAddr::try_from(9), Err(MoveError::OutOfRange(9)));
    }

    #[test]
    fn errors_count_cells_from_one() {
        assert_eq!(
            MoveError::OutOfRange(9).to_string(),
            "Cell 10 is outside the board 1-9"
        );
        assert_eq!(
            MoveError::CellOccupied(TTTAddr::new(0)).to_string(),
            "Cell 1 is already occupied"
        );
    }

    #[test]
    #[should_panic]
    fn addr_off_the_board_panics() {
        TTTAddr::new(9);
    }

    #[test]
    fn place_fills_one_cell() {
        let mut b = TTTBoard::new();
        b.place(TTTAddr::new(4), PlayerMark::Naught).unwrap();
        assert_eq!(b.cell(TTTAddr::new(4)), Some(PlayerMark::Naught));
        assert_eq!(b.n_moves_made(), 1);
        assert!(!b.empty_indices().contains(&TTTAddr::new(4)));
    }

    #[test]
    fn place_on_occupied_cell_is_rejected_for_every_occupied_index() {
        let before = board("xo x o xo");
        for a in TTTAddr::all().filter(|&a| !before.is_empty(a)) {
            for mark in enum_iterator::all::<PlayerMark>() {
                let mut b = before;
                assert_eq!(b.place(a, mark), Err(MoveError::CellOccupied(a)));
                assert_eq!(b, before);
            }
        }
    }

    #[test]
    fn place_on_occupied_cell_is_rejected_on_random_boards() {
        use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
        let mut rng = StdRng::seed_from_u64(31);
        for _ in 0..200 {
            let mut order: Vec<_> = TTTAddr::all().collect();
            order.shuffle(&mut rng);
            let n_filled = rng.gen_range(1..=N_CELLS);
            let mut before = TTTBoard::new();
            for &a in &order[..n_filled] {
                let mark = if rng.gen_bool(0.5) {
                    PlayerMark::Cross
                } else {
                    PlayerMark::Naught
                };
                before.place(a, mark).unwrap();
            }
            for a in TTTAddr::all().filter(|&a| !before.is_empty(a)) {
                for mark in enum_iterator::all::<PlayerMark>() {
                    let mut b = before;
                    assert_eq!(b.place(a, mark), Err(MoveError::CellOccupied(a)));
                    assert_eq!(b, before);
                }
            }
            assert_eq!(before.n_moves_made(), n_filled);
        }
    }

    #[test]
    fn every_line_wins_with_its_indices() {
        for line in WIN_LINES {
            for mark in enum_iterator::all::<PlayerMark>() {
                let mut b = TTTBoard::new();
                for i in line {
                    b.place(TTTAddr::new(i), mark).unwrap();
                }
                assert_eq!(b.check_outcome(mark), Outcome::Won(mark, line));
                assert_eq!(b.check_outcome(mark.other()), Outcome::Undecided);
            }
        }
    }

    #[test]
    fn first_line_in_declaration_order_is_reported() {
        // top row and left column both complete
        let b = board("xxxx  x  ");
        assert_eq!(
            b.check_outcome(PlayerMark::Cross),
            Outcome::Won(PlayerMark::Cross, [0, 1, 2])
        );
        // top row and both diagonals
        let b = board("xxx x x x");
        assert_eq!(
            b.check_outcome(PlayerMark::Cross),
            Outcome::Won(PlayerMark::Cross, [0, 1, 2])
        );
        let b = board("o.oxo.oxo");
        assert_eq!(
            b.check_outcome(PlayerMark::Naught),
            Outcome::Won(PlayerMark::Naught, [0, 4, 8])
        );
    }

    #[test]
    fn full_board_without_line_is_a_draw() {
        let b = board("xoxoxooxo");
        assert!(b.empty_indices().is_empty());
        assert_eq!(b.check_outcome(PlayerMark::Cross), Outcome::Draw);
        assert_eq!(b.check_outcome(PlayerMark::Naught), Outcome::Draw);
    }

    #[test]
    fn win_on_last_cell_beats_draw() {
        let b = board("xoxoxooxx");
        assert_eq!(
            b.check_outcome(PlayerMark::Cross),
            Outcome::Won(PlayerMark::Cross, [0, 4, 8])
        );
    }

    #[test]
    fn filling_in_any_order_empties_the_index_list() {
        use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let mut order: Vec<_> = TTTAddr::all().collect();
            order.shuffle(&mut rng);
            let mut b = TTTBoard::new();
            let mut mark = PlayerMark::Cross;
            for a in order {
                b.place(a, mark).unwrap();
                mark = mark.other();
            }
            assert!(b.empty_indices().is_empty());
            assert!(b.is_full());
        }
    }

    #[test]
    fn parse_rejects_bad_strings() {
        assert!("xo".parse::<TTTBoard>().is_err());
        assert!("xoxoxoxoz".parse::<TTTBoard>().is_err());
    }

    #[test]
    fn display_draws_three_rows() {
        let s = board("x   o    ").to_string();
        assert_eq!(s, " ------- \n| X     |\n|   O   |\n|       |\n ------- \n");
    }
}
