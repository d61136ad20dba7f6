//! Play tic-tac-toe in the terminal against a computer that moves at random.

use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use solo_ttt::{
    core::{Player, PlayerMark, WinLine},
    game::{MoveResult, TTTAddr, TTTBoard, TicTacToe},
    player::RandomAi,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum MarkArg {
    X,
    O,
}

impl From<MarkArg> for PlayerMark {
    fn from(m: MarkArg) -> Self {
        match m {
            MarkArg::X => PlayerMark::Cross,
            MarkArg::O => PlayerMark::Naught,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// A Tic-Tac-Toe game for the command line, against a computer with no skill at all!
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The mark you play. Can also be switched in game, before the first move
    #[arg(long, default_value = "x")]
    mark: MarkArg,

    /// The seed for the computer's random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// How long the computer pretends to think before it moves, in milliseconds
    #[arg(long, default_value = "1000")]
    think_ms: u64,

    #[arg(long, default_value = "warn")]
    log_level: LogLevel,
}

enum Command {
    Cell(usize),
    Choose(PlayerMark),
    Restart,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "x" => Some(Command::Choose(PlayerMark::Cross)),
        "o" => Some(Command::Choose(PlayerMark::Naught)),
        "r" | "restart" => Some(Command::Restart),
        "q" | "quit" => Some(Command::Quit),
        other => other.parse::<usize>().ok().map(Command::Cell),
    }
}

/// The board, with the cells of a winning line put in brackets
fn render(b: &TTTBoard, highlight: Option<WinLine>) -> String {
    let mut out = String::new();
    for a in TTTAddr::all() {
        let c = match b.cell(a) {
            None => a.to_string(),
            Some(mark) => mark.to_string(),
        };
        if highlight.is_some_and(|line| line.contains(&a.index())) {
            out.push_str(&format!("[{c}]"));
        } else {
            out.push_str(&format!(" {c} "));
        }
        out.push(if a.col() == 2 { '\n' } else { '|' });
    }
    out
}

fn title(game: &TicTacToe) -> String {
    if game.is_finished() {
        let outcome = game.outcome();
        match outcome.winner() {
            Some(mark) if mark == game.human_mark() => format!("{outcome} - you beat the computer"),
            Some(_) => format!("{outcome} - the computer got lucky"),
            None => outcome.to_string(),
        }
    } else if !game.started() {
        format!("Choose (you are {})", game.human_mark())
    } else {
        format!("{} to play", game.current_mark())
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    SimpleLogger::new()
        .with_level(args.log_level.into())
        .init()
        .context("Could not install the logger")?;

    let opponent: Box<dyn Player> = match args.seed {
        Some(seed) => Box::new(RandomAi::new(seed)),
        None => Box::new(RandomAi::from_entropy()),
    };
    let mut game = TicTacToe::with_starting_mark(opponent, args.mark.into());
    let think_time = Duration::from_millis(args.think_ms);

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        println!("\n{}", title(&game));
        print!("{}", render(game.board(), game.winning_line()));
        if game.is_finished() {
            print!("r = restart, q = quit > ");
        } else {
            print!("1-9 = place mark, x/o = choose mark, r = restart, q = quit > ");
        }
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line.context("Could not read from stdin")?;
        match parse_command(&line) {
            Some(Command::Cell(n)) => {
                let addr = match n.checked_sub(1).map(TTTAddr::try_from) {
                    Some(Ok(a)) => a,
                    _ => {
                        eprintln!("Number not in range 1-9");
                        continue;
                    }
                };
                match game.attempt_move(addr) {
                    Ok(MoveResult::AwaitingReply { .. }) => {
                        print!("{}", render(game.board(), None));
                        println!("Computer is thinking...");
                        std::thread::sleep(think_time);
                        if let Some(reply) = game.opponent_reply()? {
                            info!("Computer played {}", reply.played);
                            println!("Computer plays {}", reply.played);
                        }
                    }
                    Ok(MoveResult::Finished { .. }) => {}
                    Err(e) => eprintln!("{e}"),
                }
            }
            Some(Command::Choose(mark)) => {
                if !game.select_starting_mark(mark) {
                    eprintln!("The game has started, finish or restart it to switch marks");
                }
            }
            Some(Command::Restart) => game.reset(),
            Some(Command::Quit) => break,
            None => eprintln!("Did not understand {:?}", line.trim()),
        }
    }
    Ok(())
}
