//! A board stored as one slot per square, and the rules for moving pieces around on it

use core::fmt;

use board::{
    variants::{self, Grid, Layout, PlacementError},
    BoardSquare, Color, Piece, PieceKind, Ruleset,
};
use log::{debug, trace};

mod captures;
pub mod rules;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("square is not on the board")]
    InvalidSquare,
    #[error("no piece found at move source")]
    EmptySource,
    #[error("given move not allowed for this piece")]
    IllegalMove,
    #[error("move target holds a piece of the moving side")]
    OwnPieceAtTarget,
    #[error("dancing knight has nowhere to take its second step")]
    NoFollowUpStep,
}

/// An 8x8 board, owning whatever pieces stand on it
///
/// Slots are kept in reading order: index 0 is a8, index 7 is h8 and index 63 is h1.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// A board with no pieces on it
    pub const EMPTY: Self = Self {
        squares: [None; 64],
    };

    /// Set up a board in the given layout
    pub fn new(layout: Layout) -> Self {
        Self::from_grid(&layout.grid())
    }

    /// A board with no pieces on it
    pub const fn empty() -> Self {
        Self::EMPTY
    }

    /// A board holding exactly the pieces in `grid`
    pub fn from_grid(grid: &Grid) -> Self {
        let mut squares = [None; 64];
        for (slot, piece) in squares.iter_mut().zip(grid.iter().flatten()) {
            *slot = *piece;
        }
        Self { squares }
    }

    /// Parse a board from a placement string (see [`variants::parse_placement`])
    pub fn from_placement(ruleset: Ruleset, placement: &str) -> Result<Self, PlacementError> {
        variants::parse_placement(ruleset, placement).map(|grid| Self::from_grid(&grid))
    }

    /// The contents of the board as `grid[row][col]`
    pub fn to_grid(&self) -> Grid {
        let mut grid = variants::EMPTY_GRID;
        for (slot, piece) in grid.iter_mut().flatten().zip(self.squares) {
            *slot = piece;
        }
        grid
    }

    /// Convert to a placement string
    pub fn to_placement(&self) -> String {
        variants::to_placement(&self.to_grid())
    }

    /// Find the piece, if any, at the given square
    ///
    /// Returns `None` if the given square is invalid.
    pub fn get(&self, square: BoardSquare) -> Option<Piece> {
        self.squares[square.index()?]
    }

    /// Overwrite the given square, for setting up a position
    ///
    /// This skips every rule; use [`Self::try_move`] to play.
    pub fn set(&mut self, square: BoardSquare, piece: Option<Piece>) -> Result<()> {
        let idx = square.index().ok_or(Error::InvalidSquare)?;
        self.squares[idx] = piece;
        Ok(())
    }

    /// Every piece on the board with the square it stands on, in reading order
    pub fn pieces(&self) -> impl Iterator<Item = (BoardSquare, Piece)> + '_ {
        BoardSquare::all_squares()
            .zip(self.squares)
            .filter_map(|(square, piece)| Some((square, piece?)))
    }

    /// Move the piece at `start` to `end`, if that's legal
    ///
    /// Returns whether the move was made. The board is untouched if it wasn't.
    pub fn move_piece(&mut self, start: BoardSquare, end: BoardSquare) -> bool {
        self.try_move(start, end).is_ok()
    }

    /// Move the piece at `start` to `end`, with all the side effects the move has
    ///
    /// Returns `Ok(())` if the move was made, otherwise `Err(..)` containing the reason why it
    /// wasn't, in which case the board is unchanged. Besides relocating the piece, a move:
    ///  1. crowns a checkers man that reaches the far row,
    ///  2. removes the piece a checkers man jumped over, and
    ///  3. sends a dancing knight on its mandatory second step.
    pub fn try_move(&mut self, start: BoardSquare, end: BoardSquare) -> Result<()> {
        if !start.is_valid() || !end.is_valid() {
            return Err(Error::InvalidSquare);
        }
        let Some(piece) = self.get(start) else {
            debug!("rejected {start}{end}: nothing to move");
            return Err(Error::EmptySource);
        };
        if !rules::can_move(self, piece, start, end) {
            debug!("rejected {start}{end}: {piece:?} can't move like that");
            return Err(Error::IllegalMove);
        }
        if self
            .get(end)
            .is_some_and(|target| target.color == piece.color)
        {
            debug!("rejected {start}{end}: {end} holds a {} piece", piece.color);
            return Err(Error::OwnPieceAtTarget);
        }
        match piece.kind {
            PieceKind::DancingKnight => self.dance(piece, start, end),
            PieceKind::Man => {
                self.relocate(start, end);
                if !piece.crowned
                    && end.to_row_col().map(|(row, _)| row) == Some(piece.color.promotion_row())
                {
                    debug!("{} man on {end} crowned", piece.color);
                    self.squares[slot(end)] = Some(piece.crown());
                }
                let offset = start.offset_to(end);
                if offset.row().abs() == 2 {
                    let jumped = start.offset(offset.row() / 2, offset.col() / 2);
                    if let Some(captured) = self.squares[slot(jumped)].take() {
                        debug!("{captured:?} on {jumped} jumped");
                    }
                }
                Ok(())
            }
            _ => {
                self.relocate(start, end);
                Ok(())
            }
        }
    }

    /// Move whatever is on `start` to `end`, replacing what was there
    ///
    /// Both squares must be valid.
    fn relocate(&mut self, start: BoardSquare, end: BoardSquare) {
        let piece = self.squares[slot(start)].take();
        if let Some(captured) = core::mem::replace(&mut self.squares[slot(end)], piece) {
            debug!("{captured:?} on {end} captured");
        }
        trace!("{piece:?} moved {start} -> {end}");
    }

    /// Make both legs of a dancing knight's move, or neither
    ///
    /// The knight leg is made first. If the knight then has no square to step on to, the board is
    /// restored to how it was before the call.
    fn dance(&mut self, piece: Piece, start: BoardSquare, landing: BoardSquare) -> Result<()> {
        let before = self.squares;
        self.relocate(start, landing);
        match rules::second_step(self, piece.color, landing) {
            Some(step) => {
                self.relocate(landing, step);
                Ok(())
            }
            None => {
                debug!("dancing knight stuck on {landing}, undoing {start}{landing}");
                self.squares = before;
                Err(Error::NoFollowUpStep)
            }
        }
    }

    /// Returns if the king of the given color is attacked by any piece of the other color
    ///
    /// A side without a king is never in check.
    pub fn is_check(&self, color: Color) -> bool {
        let Some((king, _)) = self
            .pieces()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
        else {
            return false;
        };
        self.pieces()
            .filter(|(_, piece)| piece.color != color)
            .any(|(square, attacker)| rules::can_move(self, attacker, square, king))
    }

    /// The board as text, with file letters above and below and rank numbers on both sides
    pub fn render(&self) -> String {
        self.to_string()
    }
}

/// The slot index of a square already known to be valid
fn slot(square: BoardSquare) -> usize {
    debug_assert!(square.is_valid(), "{square:?} is off the board");
    square.index().unwrap_or_default()
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Layout::Chess)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("placement", &self.to_placement())
            .finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const FILES: &str = "  a b c d e f g h";
        writeln!(f, "{FILES}")?;
        for (rank, slots) in (1..=8).rev().zip(self.squares.chunks_exact(8)) {
            write!(f, "{rank}")?;
            for slot in slots {
                write!(f, " {}", slot.map_or('.', Piece::letter))?;
            }
            writeln!(f, " {rank}")?;
        }
        f.write_str(FILES)
    }
}
