//! Finding the jumps a checkers player is obliged to make

use board::{BoardSquare, BoardSquareOffset, Color, Move, PieceKind};

use crate::{rules, Board};

impl Board {
    /// Whether moving the piece on `start` to `end` is a checkers jump over an enemy piece
    ///
    /// A crowned man sliding two squares over an empty square is a legal move but not a capture.
    pub fn is_capture(&self, start: BoardSquare, end: BoardSquare) -> bool {
        self.get(start).is_some_and(|piece| {
            piece.kind == PieceKind::Man
                && rules::can_move(self, piece, start, end)
                && rules::jumps_enemy(self, piece.color, start, end)
        })
    }

    /// The jumps the piece on `square` can make right now
    ///
    /// After a capture, this is asked of the landing square: if it isn't empty, the same piece has
    /// to keep jumping before the turn is over.
    pub fn captures_from(&self, square: BoardSquare) -> Vec<Move> {
        BoardSquareOffset::JUMPS
            .into_iter()
            .map(|jump| Move::new(square, jump.offset(square)))
            .filter(|mv| mv.target.is_valid() && self.is_capture(mv.source, mv.target))
            .collect()
    }

    /// Every jump available to the given side
    ///
    /// When this isn't empty, the side to move has to pick one of these moves.
    pub fn mandatory_captures(&self, color: Color) -> Vec<Move> {
        self.pieces()
            .filter(|(_, piece)| piece.color == color)
            .flat_map(|(square, _)| self.captures_from(square))
            .collect()
    }
}
