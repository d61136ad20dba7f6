//! A program that lets a random "human" play many games against the random computer.
//! It records every result to a csv file (default "arena.csv") and can summarize that file.
//!

use std::io::Seek;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info, LevelFilter};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use simple_logger::SimpleLogger;
use solo_ttt::{
    core::{GameEndStatus, Player, PlayerMark},
    game::TicTacToe,
    player::RandomAi,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Where results are appended to, and read from
    #[arg(short, long, default_value = "arena.csv")]
    outfile: PathBuf,

    /// Print debug logs of every move
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate games and record them
    Run {
        #[arg(short, long, default_value = "100")]
        games: usize,

        /// The seed for all random choices in the run
        #[arg(short, long)]
        seed: Option<u64>,

        /// The mark of the simulated human
        #[arg(short, long, default_value = "x")]
        mark: MarkArg,
    },
    /// Summarize the recorded games
    Report {
        /// Print the summary as json
        #[arg(long)]
        json: bool,
    },
}

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

#[derive(Serialize, Deserialize)]
struct GameRecord {
    human_mark: PlayerMark,
    result: GameEndStatus,
    moves: usize,
    played_at: chrono::DateTime<chrono::Local>,
}

#[derive(Debug, Default, Serialize)]
struct Tally {
    human_mark: PlayerMark,
    games: usize,
    human_wins: usize,
    computer_wins: usize,
    draws: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new()
        .with_level(level)
        .init()
        .context("Could not install the logger")?;
    match args.command {
        Commands::Run { games, seed, mark } => {
            let seed = seed.unwrap_or(StdRng::from_entropy().gen());
            info!("Arena seed: {}", seed);
            let mut rng = StdRng::seed_from_u64(seed);
            let records = (0..games)
                .map(|_| play_one(mark.into(), &mut rng))
                .collect::<anyhow::Result<Vec<_>>>()?;
            record_results(&args.outfile, &records)
        }
        Commands::Report { json } => print_out_report(&args.outfile, json),
    }
}

fn play_one(human_mark: PlayerMark, rng: &mut StdRng) -> anyhow::Result<GameRecord> {
    let mut game =
        TicTacToe::with_starting_mark(Box::new(RandomAi::new(rng.gen())), human_mark);
    let mut human = RandomAi::new(rng.gen());
    while !game.is_finished() {
        let addr = human
            .play(game.board())
            .context("Unfinished game with a full board")?;
        game.play_round(addr)?;
    }
    let result = game
        .outcome()
        .end_status()
        .context("Finished game without a result")?;
    debug!("Game ended with {} after {} moves", result, game.board().n_moves_made());
    Ok(GameRecord {
        human_mark,
        result,
        moves: game.board().n_moves_made(),
        played_at: chrono::Local::now(),
    })
}

fn record_results(outfile: &Path, records: &[GameRecord]) -> anyhow::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(outfile)
        .with_context(|| format!("Could not open {}", outfile.display()))?;
    let needs_headers = file.seek(std::io::SeekFrom::End(0))? == 0;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    info!("Recorded {} games to {}", records.len(), outfile.display());
    Ok(())
}

fn print_out_report(outfile: &Path, json: bool) -> anyhow::Result<()> {
    let mut tallies: Vec<Tally> = enum_iterator::all::<PlayerMark>()
        .map(|human_mark| Tally {
            human_mark,
            ..Default::default()
        })
        .collect();

    let file = std::fs::File::open(outfile)
        .with_context(|| format!("The report file {} does not exist", outfile.display()))?;
    let mut rdr = csv::Reader::from_reader(file);
    for line in rdr.deserialize::<GameRecord>() {
        let GameRecord {
            human_mark, result, ..
        } = line?;
        let Some(tally) = tallies.iter_mut().find(|t| t.human_mark == human_mark) else {
            continue;
        };
        tally.games += 1;
        if result == GameEndStatus::Draw {
            tally.draws += 1;
        } else if result == GameEndStatus::from(human_mark) {
            tally.human_wins += 1;
        } else {
            tally.computer_wins += 1;
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&tallies)?);
    } else {
        for t in &tallies {
            println!(
                "Human as {}: {} games, {} won, {} lost, {} drawn",
                t.human_mark, t.games, t.human_wins, t.computer_wins, t.draws
            );
        }
    }
    Ok(())
}
