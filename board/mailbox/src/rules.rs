//! The movement rules of every kind of piece
//!
//! Each rule only looks at the board to see which squares are occupied and by whom; none of them
//! change anything. Whether the destination may hold a piece of the mover's own color is left to
//! [`Board::try_move`](crate::Board::try_move) for the pieces whose rule doesn't mention it.

use board::{BoardSquare, BoardSquareOffset, Color, Piece, PieceKind};

use crate::Board;

/// Whether `piece`, standing on `start`, may move to `end` on this board
///
/// Moving onto the square a piece already stands on is never allowed, and neither is a move to or
/// from a square off the board.
pub fn can_move(board: &Board, piece: Piece, start: BoardSquare, end: BoardSquare) -> bool {
    if start == end || !start.is_valid() || !end.is_valid() {
        return false;
    }
    match piece.kind {
        PieceKind::Pawn => pawn(board, piece.color, start, end),
        PieceKind::Rook => rook(board, start, end),
        PieceKind::Knight => knight(start, end),
        PieceKind::Bishop => bishop(board, start, end),
        PieceKind::Queen => rook(board, start, end) || bishop(board, start, end),
        PieceKind::King => start.offset_to(end).chebyshev_distance() == 1,
        PieceKind::Dragon => knight(start, end) || bishop(board, start, end),
        PieceKind::Tank => tank(board, piece.color, start, end),
        PieceKind::DancingKnight => dancing_knight(board, piece.color, start, end),
        PieceKind::Man if piece.crowned => crowned_man(board, piece.color, start, end),
        PieceKind::Man => man(board, piece.color, start, end),
    }
}

/// Whether the square holds a piece of the other color
fn is_enemy(board: &Board, square: BoardSquare, color: Color) -> bool {
    board.get(square).is_some_and(|piece| piece.color != color)
}

/// Whether the square is empty or holds a piece of the other color
fn is_open_to(board: &Board, square: BoardSquare, color: Color) -> bool {
    board.get(square).map_or(true, |piece| piece.color != color)
}

/// Whether every square strictly between `start` and `end` is empty
///
/// The two squares must share a row, column or diagonal.
fn path_clear(board: &Board, start: BoardSquare, end: BoardSquare) -> bool {
    let step = start.offset_to(end).unit();
    let mut square = step.offset(start);
    while square != end {
        if !square.is_valid() || board.get(square).is_some() {
            return false;
        }
        square = step.offset(square);
    }
    true
}

fn pawn(board: &Board, color: Color, start: BoardSquare, end: BoardSquare) -> bool {
    let offset = start.offset_to(end);
    let forward = color.forward();
    let home_row = match color {
        Color::White => 6,
        Color::Black => 1,
    };
    match (offset.row(), offset.col().abs()) {
        (row, 0) if row == forward => board.get(end).is_none(),
        (row, 0) if row == 2 * forward => {
            start.to_row_col().is_some_and(|(row, _)| row == home_row)
                && board.get(start.offset(forward, 0)).is_none()
                && board.get(end).is_none()
        }
        (row, 1) if row == forward => is_enemy(board, end, color),
        _ => false,
    }
}

fn rook(board: &Board, start: BoardSquare, end: BoardSquare) -> bool {
    start.offset_to(end).is_straight() && path_clear(board, start, end)
}

fn knight(start: BoardSquare, end: BoardSquare) -> bool {
    start.offset_to(end).is_knight_jump()
}

fn bishop(board: &Board, start: BoardSquare, end: BoardSquare) -> bool {
    start.offset_to(end).is_diagonal() && path_clear(board, start, end)
}

fn tank(board: &Board, color: Color, start: BoardSquare, end: BoardSquare) -> bool {
    let offset = start.offset_to(end);
    offset.col() == 0 && offset.row().abs() == 1 && is_open_to(board, end, color)
}

fn dancing_knight(board: &Board, color: Color, start: BoardSquare, end: BoardSquare) -> bool {
    knight(start, end)
        && is_open_to(board, end, color)
        && second_step(board, color, end).is_some()
}

/// The square a dancing knight that landed on `landing` steps on to, if it has anywhere to go
pub(crate) fn second_step(board: &Board, color: Color, landing: BoardSquare) -> Option<BoardSquare> {
    BoardSquareOffset::KING_MOVES
        .into_iter()
        .map(|step| step.offset(landing))
        .find(|&square| square.is_valid() && is_open_to(board, square, color))
}

fn man(board: &Board, color: Color, start: BoardSquare, end: BoardSquare) -> bool {
    if board.get(end).is_some() {
        return false;
    }
    let offset = start.offset_to(end);
    let forward = color.forward();
    match (offset.row(), offset.col().abs()) {
        (row, 1) if row == forward => true,
        (row, 2) if row == 2 * forward => jumps_enemy(board, color, start, end),
        _ => false,
    }
}

fn crowned_man(board: &Board, color: Color, start: BoardSquare, end: BoardSquare) -> bool {
    let offset = start.offset_to(end);
    if board.get(end).is_some() || !offset.is_diagonal() {
        return false;
    }
    path_clear(board, start, end)
        || offset.chebyshev_distance() == 2 && jumps_enemy(board, color, start, end)
}

/// Whether the square halfway between `start` and `end` holds a piece of the other color
pub(crate) fn jumps_enemy(board: &Board, color: Color, start: BoardSquare, end: BoardSquare) -> bool {
    let offset = start.offset_to(end);
    offset.chebyshev_distance() == 2
        && is_enemy(board, start.offset(offset.row() / 2, offset.col() / 2), color)
}

#[cfg(test)]
mod tests {
    use super::*;

    use board::Ruleset;
    use quickcheck::{quickcheck, Arbitrary, Gen};

    #[derive(Clone, Copy, Debug)]
    struct ValidSquare(BoardSquare);

    impl Arbitrary for ValidSquare {
        fn arbitrary(g: &mut Gen) -> Self {
            Self(BoardSquare::from_row_col(
                u8::arbitrary(g) % 8,
                u8::arbitrary(g) % 8,
            ))
        }
    }

    fn chess(placement: &str) -> Board {
        Board::from_placement(Ruleset::Chess, placement).unwrap()
    }

    fn checkers(placement: &str) -> Board {
        Board::from_placement(Ruleset::Checkers, placement).unwrap()
    }

    /// Whether the piece on `start` may go to `end`
    #[track_caller]
    fn allowed(board: &Board, start: BoardSquare, end: BoardSquare) -> bool {
        let piece = board.get(start).expect("no piece on the start square");
        can_move(board, piece, start, end)
    }

    quickcheck! {
        fn test_staying_put_is_never_a_move(square: ValidSquare, white: bool) -> bool {
            let color = if white { Color::White } else { Color::Black };
            let board = Board::new(board::variants::Layout::Chess);
            Piece::all_pieces()
                .map(|piece| Piece { color, ..piece })
                .all(|piece| !can_move(&board, piece, square.0, square.0))
        }

        fn test_sliders_never_pass_through_pieces(start: ValidSquare, end: ValidSquare, white_blocker: bool) -> bool {
            let blocker = if white_blocker { Color::White } else { Color::Black };
            let (start, end) = (start.0, end.0);
            let offset = start.offset_to(end);
            if !(offset.is_straight() || offset.is_diagonal()) || offset.chebyshev_distance() < 2 {
                return true;
            }
            let mut board = Board::empty();
            board
                .set(offset.unit().offset(start), Some(Piece::new(PieceKind::Pawn, blocker)))
                .unwrap();
            [PieceKind::Rook, PieceKind::Bishop, PieceKind::Queen]
                .into_iter()
                .all(|kind| !can_move(&board, Piece::new(kind, Color::White), start, end))
        }

        fn test_queen_moves_are_rook_or_bishop_moves(start: ValidSquare, end: ValidSquare) -> bool {
            let board = Board::new(board::variants::Layout::Chess);
            let queen = can_move(&board, Piece::new(PieceKind::Queen, Color::White), start.0, end.0);
            queen
                == (can_move(&board, Piece::new(PieceKind::Rook, Color::White), start.0, end.0)
                    || can_move(&board, Piece::new(PieceKind::Bishop, Color::White), start.0, end.0))
        }
    }

    #[test]
    fn test_pawn_steps() {
        let board = chess("8/3p4/8/8/3p4/4P3/P7/8");
        assert!(allowed(&board, BoardSquare::A2, BoardSquare::A3));
        assert!(allowed(&board, BoardSquare::A2, BoardSquare::A4));
        assert!(!allowed(&board, BoardSquare::A2, BoardSquare::A5));
        assert!(!allowed(&board, BoardSquare::A2, BoardSquare::A1));
        // off the home row there's no double step
        assert!(!allowed(&board, BoardSquare::E3, BoardSquare::E5));
        assert!(allowed(&board, BoardSquare::E3, BoardSquare::E4));
        assert!(allowed(&board, BoardSquare::E3, BoardSquare::D4));
        assert!(!allowed(&board, BoardSquare::E3, BoardSquare::F4));
        assert!(allowed(&board, BoardSquare::D7, BoardSquare::D5));
        assert!(allowed(&board, BoardSquare::D4, BoardSquare::E3));
        assert!(!allowed(&board, BoardSquare::D4, BoardSquare::D5));
    }

    #[test]
    fn test_pawn_is_blocked() {
        let board = chess("8/8/8/8/8/N7/P1P5/2n5");
        assert!(!allowed(&board, BoardSquare::A2, BoardSquare::A3));
        assert!(!allowed(&board, BoardSquare::A2, BoardSquare::A4));
        let board = chess("8/8/8/8/2n5/8/2P5/8");
        assert!(allowed(&board, BoardSquare::C2, BoardSquare::C3));
        assert!(!allowed(&board, BoardSquare::C2, BoardSquare::C4));
    }

    #[test]
    fn test_pawn_diagonal_needs_an_enemy() {
        for diagonal_target in ["8/8/8/8/8/8/1P6/8", "8/8/8/8/8/2N5/1P6/8"] {
            let board = chess(diagonal_target);
            assert!(!allowed(&board, BoardSquare::B2, BoardSquare::C3));
            assert!(!allowed(&board, BoardSquare::B2, BoardSquare::A3));
        }
    }

    #[test]
    fn test_rook_lines() {
        let board = chess("8/8/8/1p1R2P1/8/8/8/8");
        assert!(allowed(&board, BoardSquare::D5, BoardSquare::D8));
        assert!(allowed(&board, BoardSquare::D5, BoardSquare::D1));
        assert!(allowed(&board, BoardSquare::D5, BoardSquare::B5));
        assert!(!allowed(&board, BoardSquare::D5, BoardSquare::A5));
        assert!(!allowed(&board, BoardSquare::D5, BoardSquare::H5));
        assert!(!allowed(&board, BoardSquare::D5, BoardSquare::E6));
        // the rule itself doesn't care who stands on the destination
        assert!(allowed(&board, BoardSquare::D5, BoardSquare::G5));
    }

    #[test]
    fn test_knight_jumps_over_anything() {
        let board = Board::new(board::variants::Layout::Chess);
        assert!(allowed(&board, BoardSquare::G1, BoardSquare::F3));
        assert!(allowed(&board, BoardSquare::G1, BoardSquare::H3));
        assert!(!allowed(&board, BoardSquare::G1, BoardSquare::G3));
    }

    #[test]
    fn test_bishop_diagonals() {
        let board = chess("8/8/5p2/8/3B4/8/8/8");
        assert!(allowed(&board, BoardSquare::D4, BoardSquare::A7));
        assert!(allowed(&board, BoardSquare::D4, BoardSquare::G1));
        assert!(allowed(&board, BoardSquare::D4, BoardSquare::F6));
        assert!(!allowed(&board, BoardSquare::D4, BoardSquare::G7));
        assert!(!allowed(&board, BoardSquare::D4, BoardSquare::D5));
    }

    #[test]
    fn test_king_steps() {
        let board = chess("8/8/8/8/3K4/8/8/8");
        for end in BoardSquare::all_squares() {
            let near = BoardSquare::D4.offset_to(end).chebyshev_distance() == 1;
            assert_eq!(allowed(&board, BoardSquare::D4, end), near, "{end}");
        }
    }

    #[test]
    fn test_dragon() {
        let board = chess("8/8/5p2/8/3D4/8/8/8");
        assert!(allowed(&board, BoardSquare::D4, BoardSquare::E6));
        assert!(allowed(&board, BoardSquare::D4, BoardSquare::F6));
        assert!(!allowed(&board, BoardSquare::D4, BoardSquare::G7));
        assert!(allowed(&board, BoardSquare::D4, BoardSquare::A1));
        assert!(!allowed(&board, BoardSquare::D4, BoardSquare::D6));
    }

    #[test]
    fn test_tank() {
        let board = chess("8/8/8/3p4/3T4/3P4/8/8");
        assert!(allowed(&board, BoardSquare::D4, BoardSquare::D5));
        assert!(!allowed(&board, BoardSquare::D4, BoardSquare::D3));
        assert!(!allowed(&board, BoardSquare::D4, BoardSquare::C4));
        assert!(!allowed(&board, BoardSquare::D4, BoardSquare::E5));
        let board = chess("8/8/8/8/3T4/8/8/8");
        assert!(allowed(&board, BoardSquare::D4, BoardSquare::D3));
        assert!(!allowed(&board, BoardSquare::D4, BoardSquare::D6));
    }

    #[test]
    fn test_dancing_knight_needs_a_second_step() {
        let board = chess("8/8/8/8/8/8/8/H7");
        assert!(allowed(&board, BoardSquare::A1, BoardSquare::B3));
        assert!(!allowed(&board, BoardSquare::A1, BoardSquare::B2));
        // c2 is surrounded by white pieces
        let board = chess("8/8/8/8/8/1PPP4/1P1P4/HPPP4");
        assert!(!allowed(&board, BoardSquare::A1, BoardSquare::C2));
        // c2 itself holds an enemy, and d1 is free
        let board = chess("8/8/8/8/8/1PPP4/1PnP4/HPP5");
        assert!(allowed(&board, BoardSquare::A1, BoardSquare::C2));
        // landing on a friend is never allowed
        let board = chess("8/8/8/8/8/8/2P5/H7");
        assert!(!allowed(&board, BoardSquare::A1, BoardSquare::C2));
    }

    #[test]
    fn test_second_step_scans_in_reading_order() {
        let board = chess("8/8/8/8/8/PPP5/P1P5/PPP5");
        assert_eq!(second_step(&board, Color::White, BoardSquare::B2), None);
        assert_eq!(second_step(&board, Color::Black, BoardSquare::B2), Some(BoardSquare::A3));
        let board = chess("8/8/8/8/8/PPp5/P1P5/PpP5");
        assert_eq!(second_step(&board, Color::White, BoardSquare::B2), Some(BoardSquare::C3));
        assert_eq!(second_step(&board, Color::White, BoardSquare::A8), Some(BoardSquare::B8));
    }

    #[test]
    fn test_man_steps_forward_only() {
        let board = checkers("8/8/8/8/8/2O5/8/8");
        assert!(allowed(&board, BoardSquare::C3, BoardSquare::B4));
        assert!(allowed(&board, BoardSquare::C3, BoardSquare::D4));
        assert!(!allowed(&board, BoardSquare::C3, BoardSquare::B2));
        assert!(!allowed(&board, BoardSquare::C3, BoardSquare::C4));
        let board = checkers("8/8/8/8/8/2o5/8/8");
        assert!(allowed(&board, BoardSquare::C3, BoardSquare::B2));
        assert!(!allowed(&board, BoardSquare::C3, BoardSquare::B4));
    }

    #[test]
    fn test_man_jumps() {
        let board = checkers("8/8/8/4o3/3o4/2O5/8/8");
        assert!(!allowed(&board, BoardSquare::C3, BoardSquare::E5));
        let board = checkers("8/8/8/8/3o4/2O5/8/8");
        assert!(allowed(&board, BoardSquare::C3, BoardSquare::E5));
        // a friend can't be jumped
        let board = checkers("8/8/8/8/3O4/2O5/8/8");
        assert!(!allowed(&board, BoardSquare::C3, BoardSquare::E5));
        // nor can an empty square
        let board = checkers("8/8/8/8/8/2O5/8/8");
        assert!(!allowed(&board, BoardSquare::C3, BoardSquare::E5));
        // men don't capture backwards
        let board = checkers("8/8/8/8/8/2O5/1o6/8");
        assert!(!allowed(&board, BoardSquare::C3, BoardSquare::A1));
    }

    #[test]
    fn test_crowned_man_flies() {
        let board = checkers("8/8/8/8/8/8/1K6/8");
        assert!(allowed(&board, BoardSquare::B2, BoardSquare::H8));
        assert!(allowed(&board, BoardSquare::B2, BoardSquare::A1));
        assert!(allowed(&board, BoardSquare::B2, BoardSquare::C1));
        assert!(!allowed(&board, BoardSquare::B2, BoardSquare::B4));
        let board = checkers("8/8/8/4o3/8/8/1K6/8");
        assert!(!allowed(&board, BoardSquare::B2, BoardSquare::F6));
        assert!(allowed(&board, BoardSquare::B2, BoardSquare::D4));
        let board = checkers("8/8/8/8/8/8/1K6/o7");
        assert!(allowed(&board, BoardSquare::B2, BoardSquare::C1));
        assert!(!allowed(&board, BoardSquare::B2, BoardSquare::A1));
        // crowned men jump in every direction
        let board = checkers("8/8/8/8/8/8/1o6/2K5");
        assert!(allowed(&board, BoardSquare::C1, BoardSquare::A3));
        assert!(jumps_enemy(&board, Color::White, BoardSquare::C1, BoardSquare::A3));
        let board = checkers("8/8/8/8/8/2K5/1o6/8");
        assert!(allowed(&board, BoardSquare::C3, BoardSquare::A1));
        let board = checkers("8/8/8/8/8/2K5/1O6/8");
        assert!(!allowed(&board, BoardSquare::C3, BoardSquare::A1));
    }
}
