//! Variants of the game: the starting layouts, and the text format custom layouts are written in

use core::fmt::Write;

use crate::{Color, Piece, PieceKind, Ruleset};

/// The contents of every slot, indexed as `grid[row][col]`
pub type Grid = [[Option<Piece>; 8]; 8];

/// A grid with nothing on it
pub const EMPTY_GRID: Grid = [[None; 8]; 8];

/// How to fill a board when it is created
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Layout {
    /// The orthodox chess starting position
    Chess,
    /// The checkers starting position: twelve men each, on the dark squares
    Checkers,
    /// Exactly the given slots, which may be partially or entirely empty
    Custom(Grid),
}
impl Layout {
    /// The slots this layout places pieces in
    pub fn grid(&self) -> Grid {
        match self {
            Self::Chess => {
                use PieceKind::*;
                let back_rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
                with_back_ranks(back_rank, back_rank)
            }
            Self::Checkers => {
                let mut grid = EMPTY_GRID;
                for (row, slots) in grid.iter_mut().enumerate() {
                    let color = match row {
                        0..=2 => Color::Black,
                        5..=7 => Color::White,
                        _ => continue,
                    };
                    for (col, slot) in slots.iter_mut().enumerate() {
                        if (row + col) % 2 == 1 {
                            *slot = Some(Piece::man(color));
                        }
                    }
                }
                grid
            }
            Self::Custom(grid) => *grid,
        }
    }
}

/// Pawns on their home rows, and the given pieces behind them, both listed from file a to file h
fn with_back_ranks(black: [PieceKind; 8], white: [PieceKind; 8]) -> Grid {
    let mut grid = EMPTY_GRID;
    for col in 0..8 {
        grid[0][col] = Some(Piece::new(black[col], Color::Black));
        grid[1][col] = Some(Piece::new(PieceKind::Pawn, Color::Black));
        grid[6][col] = Some(Piece::new(PieceKind::Pawn, Color::White));
        grid[7][col] = Some(Piece::new(white[col], Color::White));
    }
    grid
}

/// The games that can be set up and played
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Setup {
    /// Orthodox chess
    Chess,
    /// Chess with dragons, tanks and dancing knights in the back rank
    ModifiedChess,
    /// Two kings and two rooks, for trying out check
    CheckTest,
    /// Checkers
    Checkers,
}
impl Setup {
    /// Every setup there is
    pub const ALL: [Setup; 4] = [
        Self::Chess,
        Self::ModifiedChess,
        Self::CheckTest,
        Self::Checkers,
    ];

    /// The rules this game is played under
    pub const fn ruleset(self) -> Ruleset {
        match self {
            Self::Chess | Self::ModifiedChess | Self::CheckTest => Ruleset::Chess,
            Self::Checkers => Ruleset::Checkers,
        }
    }

    /// The layout the board starts in
    pub fn layout(self) -> Layout {
        use PieceKind::*;
        match self {
            Self::Chess => Layout::Chess,
            Self::ModifiedChess => Layout::Custom(with_back_ranks(
                [Rook, Dragon, Bishop, Queen, King, Tank, Knight, DancingKnight],
                [DancingKnight, Knight, Tank, Queen, King, Bishop, Dragon, Rook],
            )),
            Self::CheckTest => {
                let mut grid = EMPTY_GRID;
                grid[0][0] = Some(Piece::new(Rook, Color::Black));
                grid[0][4] = Some(Piece::new(King, Color::Black));
                grid[7][4] = Some(Piece::new(King, Color::White));
                grid[7][7] = Some(Piece::new(Rook, Color::White));
                Layout::Custom(grid)
            }
            Self::Checkers => Layout::Checkers,
        }
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("expected 8 ranks separated by '/', found {0}")]
    WrongRankCount(usize),
    #[error("rank {rank} describes {squares} squares instead of 8")]
    WrongRankLength { rank: u8, squares: usize },
    #[error("'{0}' is not a piece in this ruleset")]
    UnknownPiece(char),
}

/// Parse a placement string into a grid
///
/// The format is the piece placement field of FEN: ranks from 8 down to 1 separated by `/`, each
/// listing its squares from file a with piece letters (uppercase for white) and digits counting
/// runs of empty squares. Letters are read according to `ruleset`.
///
/// ```
/// use board::{variants::parse_placement, Color, PieceKind, Ruleset};
/// let grid = parse_placement(Ruleset::Chess, "4k3/8/8/8/8/8/8/4K2R").unwrap();
/// assert_eq!(grid[7][7].map(|piece| piece.kind), Some(PieceKind::Rook));
/// assert_eq!(grid[0][4].map(|piece| piece.color), Some(Color::Black));
/// ```
pub fn parse_placement(ruleset: Ruleset, text: &str) -> Result<Grid, PlacementError> {
    let ranks: Vec<&str> = text.trim().split('/').collect();
    if ranks.len() != 8 {
        return Err(PlacementError::WrongRankCount(ranks.len()));
    }
    let mut grid = EMPTY_GRID;
    for (row, rank) in ranks.into_iter().enumerate() {
        let wrong_length = |squares| PlacementError::WrongRankLength {
            rank: 8 - row as u8,
            squares,
        };
        let mut col = 0;
        for c in rank.chars() {
            match c.to_digit(10) {
                Some(run @ 1..=8) => col += run as usize,
                Some(_) => return Err(PlacementError::UnknownPiece(c)),
                None => {
                    let piece = ruleset
                        .piece_from_letter(c)
                        .ok_or(PlacementError::UnknownPiece(c))?;
                    if col >= 8 {
                        return Err(wrong_length(col + 1));
                    }
                    grid[row][col] = Some(piece);
                    col += 1;
                }
            }
        }
        if col != 8 {
            return Err(wrong_length(col));
        }
    }
    Ok(grid)
}

/// Write a grid as a placement string, the inverse of [`parse_placement`]
pub fn to_placement(grid: &Grid) -> String {
    let mut placement = String::with_capacity(72);
    for (row, slots) in grid.iter().enumerate() {
        if row > 0 {
            placement.push('/');
        }
        let mut empty = 0;
        for slot in slots {
            match slot {
                Some(piece) => {
                    if empty > 0 {
                        let _ = write!(placement, "{empty}");
                        empty = 0;
                    }
                    placement.push(piece.letter());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            let _ = write!(placement, "{empty}");
        }
    }
    placement
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(grid: &Grid, color: Color) -> usize {
        grid.iter()
            .flatten()
            .flatten()
            .filter(|piece| piece.color == color)
            .count()
    }

    #[test]
    fn test_setup_placements() {
        #[track_caller]
        fn assert_placement(setup: Setup, expected: &str) {
            let grid = setup.layout().grid();
            assert_eq!(to_placement(&grid), expected, "{setup:?}");
            assert_eq!(parse_placement(setup.ruleset(), expected), Ok(grid));
        }
        assert_placement(
            Setup::Chess,
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
        );
        assert_placement(
            Setup::ModifiedChess,
            "rdbqktnh/pppppppp/8/8/8/8/PPPPPPPP/HNTQKBDR",
        );
        assert_placement(Setup::CheckTest, "r3k3/8/8/8/8/8/8/4K2R");
        assert_placement(
            Setup::Checkers,
            "1o1o1o1o/o1o1o1o1/1o1o1o1o/8/8/O1O1O1O1/1O1O1O1O/O1O1O1O1",
        );
    }

    #[test]
    fn test_setups_are_balanced() {
        for setup in Setup::ALL {
            let grid = setup.layout().grid();
            assert_eq!(count(&grid, Color::White), count(&grid, Color::Black), "{setup:?}");
        }
        assert_eq!(count(&Layout::Checkers.grid(), Color::White), 12);
        assert_eq!(count(&Layout::Chess.grid(), Color::Black), 16);
    }

    #[test]
    fn test_setup_pieces_belong_to_their_ruleset() {
        for setup in Setup::ALL {
            for piece in setup.layout().grid().iter().flatten().flatten() {
                assert_eq!(piece.kind.ruleset(), setup.ruleset(), "{setup:?}");
            }
        }
    }

    #[test]
    fn test_crowned_men_are_read_in_checkers() {
        let grid = parse_placement(Ruleset::Checkers, "8/8/8/3K4/8/8/8/8").unwrap();
        assert_eq!(grid[3][3], Some(Piece::man(Color::White).crown()));
        let grid = parse_placement(Ruleset::Chess, "8/8/8/3K4/8/8/8/8").unwrap();
        assert_eq!(grid[3][3], Some(Piece::new(PieceKind::King, Color::White)));
    }

    #[test]
    fn test_bad_placements() {
        assert_eq!(
            parse_placement(Ruleset::Chess, "8/8/8"),
            Err(PlacementError::WrongRankCount(3))
        );
        assert_eq!(
            parse_placement(Ruleset::Chess, "8/8/8/8/8/8/8/7"),
            Err(PlacementError::WrongRankLength {
                rank: 1,
                squares: 7
            })
        );
        assert_eq!(
            parse_placement(Ruleset::Chess, "9/8/8/8/8/8/8/8"),
            Err(PlacementError::UnknownPiece('9'))
        );
        assert_eq!(
            parse_placement(Ruleset::Chess, "8/8/8/8/8/8/8/8p"),
            Err(PlacementError::WrongRankLength {
                rank: 1,
                squares: 9
            })
        );
        assert_eq!(
            parse_placement(Ruleset::Checkers, "8/8/8/8/8/8/8/p7"),
            Err(PlacementError::UnknownPiece('p'))
        );
    }
}
