//! A player for a human typing coordinates into a terminal

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use board::{parse_coordinate, BoardSquare, Move};
use log::warn;
use players::{Notice, Player, Turn};

/// An input for a human typing in the terminal
///
/// Moves are read as one coordinate per line (`e2`, then `e4`). When captures are mandatory, the
/// player picks one of them by number instead.
pub struct TerminalUIPlayer<R, W> {
    input: R,
    output: W,
}

impl TerminalUIPlayer<StdinLock<'static>, Stdout> {
    /// A player reading from stdin and writing to stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalUIPlayer<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Take back the output, to look at what was written to it
    pub fn into_output(self) -> W {
        self.output
    }

    /// Show the prompt and read one line, without its line ending
    ///
    /// Returns `None` once the input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        let _ = write!(self.output, "{prompt}");
        let _ = self.output.flush();
        let mut buffer = String::new();
        match self.input.read_line(&mut buffer) {
            Ok(0) => None,
            Ok(_) => Some(buffer.trim().to_owned()),
            Err(e) => {
                warn!("Error reading human input: {e}");
                None
            }
        }
    }

    fn read_square(&mut self, prompt: &str) -> Option<Option<BoardSquare>> {
        self.read_line(prompt).map(|line| parse_coordinate(&line))
    }

    fn choose_forced(&mut self, forced: &[Move]) -> Option<Move> {
        let _ = writeln!(self.output, "You have mandatory captures:");
        for (i, mv) in forced.iter().enumerate() {
            let _ = writeln!(self.output, "{}. {} -> {}", i + 1, mv.source, mv.target);
        }
        loop {
            let line = self.read_line("Choose a move number: ")?;
            match line.parse::<usize>() {
                Ok(choice @ 1..) if choice <= forced.len() => return Some(forced[choice - 1]),
                Ok(_) => {
                    let _ = writeln!(self.output, "Invalid choice. Try again.");
                }
                Err(_) => {
                    let _ = writeln!(self.output, "Enter a number.");
                }
            }
        }
    }

    fn continue_chain(&mut self, from: BoardSquare) -> Option<Move> {
        loop {
            match self.read_square(&format!("Square to capture onto from {from} (e.g. a4): "))? {
                Some(target) => return Some(Move::new(from, target)),
                None => {
                    let _ = writeln!(self.output, "Invalid coordinates. Try again.");
                }
            }
        }
    }
}

impl<R: BufRead, W: Write> Player for TerminalUIPlayer<R, W> {
    fn choose_move(&mut self, turn: &Turn<'_>) -> Option<Move> {
        if let Some(from) = turn.chain_from {
            return self.continue_chain(from);
        }
        let _ = writeln!(self.output, "{} to move.", capitalized(turn.side));
        if !turn.forced.is_empty() {
            return self.choose_forced(turn.forced);
        }
        loop {
            let source = self.read_square("Square of the piece to move (e.g. a2): ")?;
            let target = self.read_square("Square to move it to (e.g. a4): ")?;
            match (source, target) {
                (Some(source), Some(target)) => return Some(Move::new(source, target)),
                _ => {
                    let _ = writeln!(self.output, "Invalid coordinates. Try again.");
                }
            }
        }
    }

    fn notify(&mut self, notice: Notice<'_>) {
        let _ = match notice {
            Notice::Board(board) => writeln!(self.output, "\n{board}"),
            Notice::Rejected(reason) => writeln!(self.output, "Move rejected: {reason}. Try again."),
            Notice::Check(color) => writeln!(self.output, "The {color} king is in check!"),
            Notice::MoveCount(count) => writeln!(self.output, "Moves played: {count}"),
            Notice::ContinueCapture(square) => {
                writeln!(self.output, "Another capture is possible from {square}.")
            }
        };
    }
}

fn capitalized(color: board::Color) -> &'static str {
    match color {
        board::Color::White => "White",
        board::Color::Black => "Black",
    }
}
