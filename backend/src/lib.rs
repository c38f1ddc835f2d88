use board::{variants::Setup, BoardSquare, Color, Move, Ruleset};
use log::{debug, info};
use mailbox::Board;
use players::{Notice, Player, Turn};

/// Why a move was refused before or while being played
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("there is no piece on {0}")]
    EmptySource(BoardSquare),
    #[error("the piece on {0} belongs to the other side")]
    NotYourPiece(BoardSquare),
    #[error("a capture is available and must be made")]
    CaptureRequired,
    #[error("the piece on {0} has to keep capturing")]
    ChainInProgress(BoardSquare),
    #[error(transparent)]
    Illegal(#[from] mailbox::Error),
}

/// What happened after a move was played
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The turn is over and it's the other side's move
    TurnPassed {
        /// Whether the side now to move has its king attacked
        opponent_in_check: bool,
    },
    /// The piece that captured can capture again, so the same side moves it once more
    CaptureContinues {
        /// Where that piece now stands
        from: BoardSquare,
    },
}

/// The state of one game: the board and whose turn it is
///
/// This enforces the parts of the rules that depend on the turn: who may move, that captures in
/// checkers are mandatory, and that a capturing piece keeps going while it can.
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    ruleset: Ruleset,
    current_player: Color,
    move_counter: u32,
    /// The square of the piece that must make the next capture, while a chain is open
    chain: Option<BoardSquare>,
}

impl GameSession {
    /// Start the given game, white to move
    pub fn new(setup: Setup) -> Self {
        Self::with_board(Board::new(setup.layout()), setup.ruleset())
    }

    /// Start a game from an arbitrary position, white to move
    pub const fn with_board(board: Board, ruleset: Ruleset) -> Self {
        Self {
            board,
            ruleset,
            current_player: Color::White,
            move_counter: 0,
            chain: None,
        }
    }

    pub const fn board(&self) -> &Board {
        &self.board
    }

    pub const fn ruleset(&self) -> Ruleset {
        self.ruleset
    }

    /// The side to move
    pub const fn current_player(&self) -> Color {
        self.current_player
    }

    /// The number of turns completed so far
    pub const fn move_counter(&self) -> u32 {
        self.move_counter
    }

    /// The square of the piece in the middle of a capture chain, if any
    pub const fn chain(&self) -> Option<BoardSquare> {
        self.chain
    }

    /// The moves the side to move is restricted to, or an empty list if any legal move will do
    pub fn forced_moves(&self) -> Vec<Move> {
        match (self.ruleset, self.chain) {
            (Ruleset::Chess, _) => Vec::new(),
            (Ruleset::Checkers, Some(from)) => self.board.captures_from(from),
            (Ruleset::Checkers, None) => self.board.mandatory_captures(self.current_player),
        }
    }

    /// Play a move for the side to move
    ///
    /// On an error, nothing changed and the same side is still to move.
    pub fn play(&mut self, mv: Move) -> Result<TurnOutcome, SessionError> {
        if let Some(from) = self.chain {
            if mv.source != from {
                return Err(SessionError::ChainInProgress(from));
            }
        }
        if !mv.source.is_valid() || !mv.target.is_valid() {
            return Err(mailbox::Error::InvalidSquare.into());
        }
        let piece = self
            .board
            .get(mv.source)
            .ok_or(SessionError::EmptySource(mv.source))?;
        if piece.color != self.current_player {
            return Err(SessionError::NotYourPiece(mv.source));
        }
        let forced = self.forced_moves();
        if !forced.is_empty() && !forced.contains(&mv) {
            return Err(SessionError::CaptureRequired);
        }

        let captures =
            self.ruleset == Ruleset::Checkers && self.board.is_capture(mv.source, mv.target);
        self.board.try_move(mv.source, mv.target)?;
        if captures && !self.board.captures_from(mv.target).is_empty() {
            debug!("{} keeps capturing from {}", self.current_player, mv.target);
            self.chain = Some(mv.target);
            return Ok(TurnOutcome::CaptureContinues { from: mv.target });
        }

        self.chain = None;
        self.current_player = self.current_player.other();
        self.move_counter += 1;
        let opponent_in_check =
            self.ruleset == Ruleset::Chess && self.board.is_check(self.current_player);
        info!(
            "move {} played {mv}, {} to move",
            self.move_counter, self.current_player
        );
        Ok(TurnOutcome::TurnPassed { opponent_in_check })
    }
}

/// A backend which queries moves from the player until the input runs out
///
/// Both sides are played by the same [`Player`], as two people sharing one terminal would.
pub struct Backend<P> {
    session: GameSession,
    player: P,
}

impl<P: Player> Backend<P> {
    /// Create a new instance with the given game set up
    pub fn new(setup: Setup, player: P) -> Self {
        Self::with_session(GameSession::new(setup), player)
    }

    pub const fn with_session(session: GameSession, player: P) -> Self {
        Self { session, player }
    }

    /// Get the state of the game right now
    pub const fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn into_player(self) -> P {
        self.player
    }

    /// Query the side to move for a move and play it
    ///
    /// The player is told what came of it: the new board, or why the move was refused. Returns
    /// `false` if the player had no move to give.
    pub fn play_half_move(&mut self) -> bool {
        let forced = self.session.forced_moves();
        let turn = Turn {
            board: &self.session.board,
            side: self.session.current_player,
            forced: &forced,
            chain_from: self.session.chain,
        };
        let Some(mv) = self.player.choose_move(&turn) else {
            return false;
        };
        match self.session.play(mv) {
            Ok(TurnOutcome::CaptureContinues { from }) => {
                self.player.notify(Notice::ContinueCapture(from));
                self.player.notify(Notice::Board(&self.session.board));
            }
            Ok(TurnOutcome::TurnPassed { opponent_in_check }) => {
                self.player.notify(Notice::Board(&self.session.board));
                if opponent_in_check {
                    self.player.notify(Notice::Check(self.session.current_player));
                }
                self.player.notify(Notice::MoveCount(self.session.move_counter));
            }
            Err(e) => {
                debug!("refused {mv}: {e}");
                self.player.notify(Notice::Rejected(&e));
            }
        }
        true
    }

    /// Show the starting board, then play until the player stops giving moves
    pub fn play_game(&mut self) {
        self.player.notify(Notice::Board(&self.session.board));
        while self.play_half_move() {}
        info!("game stopped after {} moves", self.session.move_counter);
    }
}
