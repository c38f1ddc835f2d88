//! Traits for an arbitrary player

use std::error::Error;

use board::{BoardSquare, Color, Move};
use mailbox::Board;

/// Everything a player is shown when asked for a move
#[derive(Clone, Copy, Debug)]
pub struct Turn<'a> {
    /// The board as it stands
    pub board: &'a Board,
    /// The side the move is for
    pub side: Color,
    /// If not empty, the move has to be one of these
    pub forced: &'a [Move],
    /// The square of the piece that is in the middle of a chain of captures, if any
    ///
    /// While this is set, the only thing left to decide is where that piece lands next.
    pub chain_from: Option<BoardSquare>,
}

/// Something happening in the game which the player might want to show
#[derive(Clone, Copy, Debug)]
pub enum Notice<'a> {
    /// The board after a change
    Board(&'a Board),
    /// The last move chosen was not played, for the given reason
    Rejected(&'a dyn Error),
    /// The king of this color is under attack
    Check(Color),
    /// The number of turns completed so far
    MoveCount(u32),
    /// The piece that just captured, now on this square, has to capture again
    ContinueCapture(BoardSquare),
}

/// A player in a game
///
/// This trait is generic over how the player decides what to do, so a person at a terminal and a
/// scripted sequence of moves can both implement this.
pub trait Player {
    /// Decide on a move to make
    ///
    /// Returns `None` if the player has no more moves to give, which ends the game.
    fn choose_move(&mut self, turn: &Turn<'_>) -> Option<Move>;

    /// React to something happening in the game
    fn notify(&mut self, notice: Notice<'_>) {
        let _ = notice;
    }
}
