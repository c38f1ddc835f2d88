//! The vocabulary shared by every board implementation: colors, pieces, squares and moves

use core::{fmt, str::FromStr};

pub mod variants;

/// The kinds of pieces there are
///
/// The first nine belong to the chess ruleset (the orthodox six followed by the custom ones), and
/// [`PieceKind::Man`] is the only checkers piece.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
    /// Moves as a knight or as a bishop
    Dragon,
    /// Steps one square up or down its column, capturing only enemies
    Tank,
    /// Jumps like a knight, then must take one king step from where it landed
    DancingKnight,
    /// A checkers piece, which may be crowned (see [`Piece::crowned`])
    Man,
}
impl PieceKind {
    /// All the kinds of pieces there are
    pub const KINDS: [PieceKind; 10] = [
        Self::Pawn,
        Self::Rook,
        Self::Knight,
        Self::Bishop,
        Self::Queen,
        Self::King,
        Self::Dragon,
        Self::Tank,
        Self::DancingKnight,
        Self::Man,
    ];

    /// The capitalized version of the letter used for this piece on a printed board
    pub const fn letter(self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Rook => 'R',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Queen => 'Q',
            Self::King => 'K',
            Self::Dragon => 'D',
            Self::Tank => 'T',
            Self::DancingKnight => 'H',
            Self::Man => 'O',
        }
    }

    /// Which ruleset this kind of piece is played in
    pub const fn ruleset(self) -> Ruleset {
        match self {
            Self::Man => Ruleset::Checkers,
            _ => Ruleset::Chess,
        }
    }
}

/// The colors a piece can have
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub const fn other(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// The row delta of a forward step: white plays up the board (towards row 0), black down
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// The row a piece of this color promotes on, which is the far edge of the board
    pub const fn promotion_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::White => "white",
            Color::Black => "black",
        })
    }
}

/// A piece
///
/// Pieces are plain values: a piece is wherever the board slot holding it is, and moving it
/// means moving the value between slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    /// Whether a checkers man has been promoted. Always `false` for chess pieces.
    pub crowned: bool,
}
impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            crowned: false,
        }
    }

    /// An uncrowned checkers man
    pub const fn man(color: Color) -> Self {
        Self::new(PieceKind::Man, color)
    }

    /// The same piece, promoted
    pub const fn crown(self) -> Self {
        Self {
            crowned: true,
            ..self
        }
    }

    /// The letter shown for this piece: uppercase for white, lowercase for black
    ///
    /// ```
    /// use board::{Color, Piece, PieceKind};
    /// assert_eq!(Piece::new(PieceKind::Dragon, Color::Black).letter(), 'd');
    /// assert_eq!(Piece::man(Color::White).letter(), 'O');
    /// assert_eq!(Piece::man(Color::White).crown().letter(), 'K');
    /// ```
    pub const fn letter(self) -> char {
        let letter = match (self.kind, self.crowned) {
            (PieceKind::Man, true) => 'K',
            (kind, _) => kind.letter(),
        };
        match self.color {
            Color::White => letter.to_ascii_uppercase(),
            Color::Black => letter.to_ascii_lowercase(),
        }
    }

    /// Returns an iterator of all pieces that exist, crowned men included
    pub fn all_pieces() -> impl Iterator<Item = Self> {
        PieceKind::KINDS
            .into_iter()
            .flat_map(|kind| [Self::new(kind, Color::White), Self::new(kind, Color::Black)])
            .chain([Self::man(Color::White).crown(), Self::man(Color::Black).crown()])
    }
}

/// The two families of rules the engine plays
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ruleset {
    /// Chess, including the custom pieces
    Chess,
    /// Checkers, with mandatory captures
    Checkers,
}
impl Ruleset {
    /// Read a piece from the letter printed for it under this ruleset
    ///
    /// The letters overlap between rulesets (`K` is a king in chess but a crowned man in
    /// checkers), hence the need to know which one is meant.
    pub fn piece_from_letter(self, letter: char) -> Option<Piece> {
        let color = if letter.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        match (self, letter.to_ascii_uppercase()) {
            (Self::Checkers, 'O') => Some(Piece::man(color)),
            (Self::Checkers, 'K') => Some(Piece::man(color).crown()),
            (Self::Checkers, _) => None,
            (Self::Chess, upper) => PieceKind::KINDS
                .into_iter()
                .find(|kind| kind.ruleset() == Self::Chess && kind.letter() == upper)
                .map(|kind| Piece::new(kind, color)),
        }
    }
}

/// An index on the board
///
/// Stored in 0x88 method:
/// ```text
/// 0b12345678
///        +-+ Column (file a is 0)
///    +-+ Row (rank 8 is 0)
///   +   + Must be zero, invalid position if 1
/// ```
///
/// Rows count down the board as it is printed, so row 0 is rank 8 and row 7 is rank 1. Each
/// square fits in one byte, and the format makes it cheap to offset a square and then check
/// whether it fell off the board.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSquare(pub u8);
impl BoardSquare {
    /// An invalid square
    ///
    /// Please use this instead of making your own so it's obvious if a deliberately-invalid square
    /// appeared.
    pub const INVALID: Self = Self(0xee);

    pub const A8: Self = Self(0x00);
    pub const B8: Self = Self(0x01);
    pub const C8: Self = Self(0x02);
    pub const D8: Self = Self(0x03);
    pub const E8: Self = Self(0x04);
    pub const F8: Self = Self(0x05);
    pub const G8: Self = Self(0x06);
    pub const H8: Self = Self(0x07);
    pub const A7: Self = Self(0x10);
    pub const B7: Self = Self(0x11);
    pub const C7: Self = Self(0x12);
    pub const D7: Self = Self(0x13);
    pub const E7: Self = Self(0x14);
    pub const F7: Self = Self(0x15);
    pub const G7: Self = Self(0x16);
    pub const H7: Self = Self(0x17);
    pub const A6: Self = Self(0x20);
    pub const B6: Self = Self(0x21);
    pub const C6: Self = Self(0x22);
    pub const D6: Self = Self(0x23);
    pub const E6: Self = Self(0x24);
    pub const F6: Self = Self(0x25);
    pub const G6: Self = Self(0x26);
    pub const H6: Self = Self(0x27);
    pub const A5: Self = Self(0x30);
    pub const B5: Self = Self(0x31);
    pub const C5: Self = Self(0x32);
    pub const D5: Self = Self(0x33);
    pub const E5: Self = Self(0x34);
    pub const F5: Self = Self(0x35);
    pub const G5: Self = Self(0x36);
    pub const H5: Self = Self(0x37);
    pub const A4: Self = Self(0x40);
    pub const B4: Self = Self(0x41);
    pub const C4: Self = Self(0x42);
    pub const D4: Self = Self(0x43);
    pub const E4: Self = Self(0x44);
    pub const F4: Self = Self(0x45);
    pub const G4: Self = Self(0x46);
    pub const H4: Self = Self(0x47);
    pub const A3: Self = Self(0x50);
    pub const B3: Self = Self(0x51);
    pub const C3: Self = Self(0x52);
    pub const D3: Self = Self(0x53);
    pub const E3: Self = Self(0x54);
    pub const F3: Self = Self(0x55);
    pub const G3: Self = Self(0x56);
    pub const H3: Self = Self(0x57);
    pub const A2: Self = Self(0x60);
    pub const B2: Self = Self(0x61);
    pub const C2: Self = Self(0x62);
    pub const D2: Self = Self(0x63);
    pub const E2: Self = Self(0x64);
    pub const F2: Self = Self(0x65);
    pub const G2: Self = Self(0x66);
    pub const H2: Self = Self(0x67);
    pub const A1: Self = Self(0x70);
    pub const B1: Self = Self(0x71);
    pub const C1: Self = Self(0x72);
    pub const D1: Self = Self(0x73);
    pub const E1: Self = Self(0x74);
    pub const F1: Self = Self(0x75);
    pub const G1: Self = Self(0x76);
    pub const H1: Self = Self(0x77);

    /// Returns if this square is valid
    ///
    /// ```
    /// # use board::BoardSquare;
    /// assert!(!BoardSquare::INVALID.is_valid());
    /// assert!(BoardSquare::E2.is_valid());
    /// ```
    pub const fn is_valid(self) -> bool {
        self.0 & 0x88 == 0
    }

    /// Produce a board square from the row and column, returning [`Self::INVALID`] if they are
    /// not on the board.
    pub const fn from_row_col(row: u8, col: u8) -> Self {
        if row < 8 && col < 8 {
            Self(row << 4 | col)
        } else {
            Self::INVALID
        }
    }

    /// Returns the `(row, col)` tuple if this position is valid
    pub const fn to_row_col(self) -> Option<(u8, u8)> {
        if self.is_valid() {
            Some((self.0 >> 4, self.0 & 0x07))
        } else {
            None
        }
    }

    /// The index of this square in a row-major array of 64 slots
    pub const fn index(self) -> Option<usize> {
        match self.to_row_col() {
            Some((row, col)) => Some(row as usize * 8 + col as usize),
            None => None,
        }
    }

    /// Offset the given number of rows and columns.
    ///
    /// ```rust
    /// use board::BoardSquare;
    /// assert_eq!(BoardSquare::E4, BoardSquare::E2.offset(-2, 0));
    /// assert_eq!(BoardSquare::A8, BoardSquare::B7.offset(-1, -1));
    /// assert!(!BoardSquare::D8.offset(-1, 0).is_valid());
    /// assert!(!BoardSquare::D1.offset(1, 0).is_valid());
    /// assert!(!BoardSquare::A4.offset(0, -1).is_valid());
    /// assert!(!BoardSquare::H4.offset(0, 1).is_valid());
    /// ```
    pub const fn offset(self, row: i8, col: i8) -> Self {
        BoardSquareOffset::from_row_col(row, col).offset(self)
    }

    /// An iterator over all valid squares on the board, in reading order (a8, b8, ..., h1)
    ///
    /// ```
    /// assert_eq!(board::BoardSquare::all_squares().count(), 64);
    /// assert_eq!(board::BoardSquare::all_squares().next(), Some(board::BoardSquare::A8));
    /// ```
    pub fn all_squares() -> impl Iterator<Item = Self> {
        (0..64u8).map(|idx| Self((idx >> 3) << 4 | (idx & 0x07)))
    }

    /// Gets the offset that leads from this square to `other`
    ///
    /// If either input is invalid, then [`BoardSquareOffset::INVALID`] is returned.
    pub const fn offset_to(self, other: Self) -> BoardSquareOffset {
        let (Some((self_row, self_col)), Some((other_row, other_col))) =
            (self.to_row_col(), other.to_row_col())
        else {
            return BoardSquareOffset::INVALID;
        };
        BoardSquareOffset::from_row_col(
            other_row as i8 - self_row as i8,
            other_col as i8 - self_col as i8,
        )
    }
}
impl fmt::Debug for BoardSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("BoardSquare");
        debug.field("repr", &format_args!("{:X}", self.0));
        if self.is_valid() {
            debug.field("readable", &format_args!("{self}"));
        } else {
            debug.field("readable", &"illegal");
        }
        debug.finish()
    }
}
impl fmt::Display for BoardSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_row_col() {
            Some((row, col)) => write!(f, "{}{}", (b'a' + col) as char, (b'8' - row) as char),
            None => f.write_str("XX"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("board position string was invalid")]
pub struct BoardSquareFromStrErr;

impl FromStr for BoardSquare {
    type Err = BoardSquareFromStrErr;

    /// Parse a coordinate such as `e2`: a file letter `a`-`h` followed by a rank digit `1`-`8`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let &[file, rank] = s.as_bytes() else {
            return Err(BoardSquareFromStrErr);
        };
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(BoardSquareFromStrErr);
        }
        Ok(Self::from_row_col(b'8' - rank, file - b'a'))
    }
}

/// Read a coordinate typed by a player, or `None` if it doesn't name a square
///
/// ```
/// use board::{parse_coordinate, BoardSquare};
/// assert_eq!(parse_coordinate("e2"), Some(BoardSquare::E2));
/// assert_eq!(parse_coordinate("e9"), None);
/// assert_eq!(parse_coordinate("e22"), None);
/// ```
pub fn parse_coordinate(text: &str) -> Option<BoardSquare> {
    text.parse().ok()
}

/// An offset on a board
///
/// This struct stores any possible offset in both row and column between any two squares, using
/// only one byte of space.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BoardSquareOffset(u8);
impl BoardSquareOffset {
    /// The offsets corresponding to all possible king moves
    ///
    /// The order matters: a dancing knight takes its second step into the first of these that it
    /// can, scanning rows top to bottom and columns left to right.
    pub const KING_MOVES: [BoardSquareOffset; 8] = [
        Self::from_row_col(-1, -1),
        Self::from_row_col(-1, 0),
        Self::from_row_col(-1, 1),
        Self::from_row_col(0, -1),
        Self::from_row_col(0, 1),
        Self::from_row_col(1, -1),
        Self::from_row_col(1, 0),
        Self::from_row_col(1, 1),
    ];

    /// The two-square diagonal jumps of checkers, in the order captures are listed
    pub const JUMPS: [BoardSquareOffset; 4] = [
        Self::from_row_col(-2, -2),
        Self::from_row_col(2, -2),
        Self::from_row_col(-2, 2),
        Self::from_row_col(2, 2),
    ];

    /// This is an invalid offset that, when applied to any [`BoardSquare`], invalidates it.
    pub const INVALID: Self = Self(0x88);

    /// Produce a new offset from the given row and column amounts
    ///
    /// In debug mode, we assert that the row and column are both on the interval [-7,7] (which
    /// are the only possible offsets). In release mode, we wrap modulo 16 and allow for -8, which
    /// invalidates any square.
    pub const fn from_row_col(row: i8, col: i8) -> Self {
        debug_assert!(-8 < row && row < 8);
        debug_assert!(-8 < col && col < 8);
        Self(((row as u8) << 4) & 0xF0 | (col as u8) & 0x0F)
    }

    /// Offset the given board square
    ///
    /// If the square is already invalid, then the same square is returned unchanged.
    pub const fn offset(self, square: BoardSquare) -> BoardSquare {
        if square.is_valid() {
            BoardSquare(((self.0 & 0x77) + square.0) ^ (self.0 & 0x88))
        } else {
            square
        }
    }

    /// Gets the signed number of columns associated with this offset
    pub const fn col(self) -> i8 {
        (self.0 as i8) << 4 >> 4
    }

    /// Gets the signed number of rows associated with this offset
    pub const fn row(self) -> i8 {
        (self.0 as i8) >> 4
    }

    /// Whether this offset moves along a single row or column
    pub const fn is_straight(self) -> bool {
        (self.row() == 0) != (self.col() == 0)
    }

    /// Whether this offset moves along a diagonal
    pub const fn is_diagonal(self) -> bool {
        self.row() != 0 && self.row().unsigned_abs() == self.col().unsigned_abs()
    }

    /// Whether this offset is the L-shaped jump of a knight
    pub const fn is_knight_jump(self) -> bool {
        self.row().unsigned_abs() * self.col().unsigned_abs() == 2
    }

    /// The single step in the direction of this offset, with each component reduced to its sign
    pub const fn unit(self) -> Self {
        Self::from_row_col(self.row().signum(), self.col().signum())
    }

    /// Gets the Chebyshev distance for this offset
    ///
    /// This is the number of squares moved in one direction, for whichever direction is larger.
    pub const fn chebyshev_distance(self) -> u8 {
        let row = self.row().unsigned_abs();
        let col = self.col().unsigned_abs();
        if row > col {
            row
        } else {
            col
        }
    }
}
impl fmt::Debug for BoardSquareOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardSquareOffset")
            .field("row", &self.row())
            .field("col", &self.col())
            .finish()
    }
}

/// A move as a player names it: the square a piece leaves and the square it is sent to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub source: BoardSquare,
    pub target: BoardSquare,
}
impl Move {
    pub const fn new(source: BoardSquare, target: BoardSquare) -> Self {
        Self { source, target }
    }
}
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source, self.target)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("move string was invalid, expected two squares such as \"e2e4\"")]
pub struct MoveFromStrErr;

impl From<BoardSquareFromStrErr> for MoveFromStrErr {
    fn from(_: BoardSquareFromStrErr) -> Self {
        MoveFromStrErr
    }
}

impl FromStr for Move {
    type Err = MoveFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 || !s.is_ascii() {
            return Err(MoveFromStrErr);
        }
        Ok(Self {
            source: s[..2].parse()?,
            target: s[2..].parse()?,
        })
    }
}
