use backend::Backend;
use board::variants::Setup;
use clap::Parser;
use terminal_ui::TerminalUIPlayer;

/// Play chess, chess with custom pieces, or checkers at the terminal
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// The game to set up
    #[arg(long, value_enum, default_value_t = Setup::Chess)]
    setup: Setup,
}

fn main() {
    // No logger is installed, so the `log` records of the libraries are discarded here.
    let args = Args::parse();
    let mut backend = Backend::new(args.setup, TerminalUIPlayer::stdio());
    backend.play_game();
}
