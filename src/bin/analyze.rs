//! Analyze a scrabble position from the command line: load a word list,
//! read the board from a file, and print the ranked moves for a rack.

use anyhow::{Context, Result};
use log::info;
use scrabble_analyzer::{
    remaining_tiles, Board, Evaluator, Generator, Lexicon, Rack,
};
use std::fs::read_to_string;
use std::path::PathBuf;
use std::time::Instant;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "analyze", about = "Rank the legal moves for a scrabble position.")]
struct Opt {
    /// Word list with one word per line
    #[structopt(short, long, parse(from_os_str))]
    wordlist: PathBuf,

    /// Board state: 15 lines of 15 characters, '.' for empty squares,
    /// lowercase for blanks. Empty board when omitted.
    #[structopt(short, long, parse(from_os_str))]
    board: Option<PathBuf>,

    /// Rack letters, '?' for a blank
    #[structopt(short, long)]
    rack: String,

    /// Number of moves to show
    #[structopt(short, long, default_value = "10")]
    top: usize,
}

fn main() -> Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;
    let opt = Opt::from_args();

    let start = Instant::now();
    let lexicon = Lexicon::from_file(&opt.wordlist.to_string_lossy())
        .with_context(|| format!("loading word list {}", opt.wordlist.display()))?;
    info!("built {} in {:?}", lexicon, start.elapsed());

    let board = match &opt.board {
        Some(path) => {
            let rows: Vec<String> = read_to_string(path)
                .with_context(|| format!("reading board {}", path.display()))?
                .lines()
                .map(String::from)
                .collect();
            Board::new().with_rows(&rows)?
        }
        None => Board::new(),
    };
    let rack = Rack::from_letters(&opt.rack)?;

    let start = Instant::now();
    let moves = Generator::new(&lexicon, &board).moves(&rack);
    info!("{} legal moves in {:?}", moves.len(), start.elapsed());

    let remaining = remaining_tiles(&board, &rack.tiles());
    let best = Evaluator::new(remaining).top_moves(moves, &rack.tiles(), opt.top);

    println!("{}\n", board);
    for (i, mv) in best.iter().enumerate() {
        let placed: String = mv
            .tiles_placed
            .iter()
            .map(|p| p.tile.to_string())
            .collect();
        println!(
            "{:2}. {:15} {:>7} {} {:3} points (placing {})",
            i + 1,
            mv.word,
            mv.position.to_string(),
            mv.direction,
            mv.score,
            placed,
        );
    }
    Ok(())
}
