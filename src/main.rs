use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn, Level};
#[macro_use]
extern crate text_io;

use crate::boggle::{Board, BoardSolver, BoggleResult, Solution};
use crate::utils::wordlist::read_word_list;

mod boggle;
mod utils;

/// Find every dictionary word on a Boggle board
#[derive(Parser, Debug)]
#[command(name = "boggle")]
struct Args {
    /// Word list, whitespace separated
    #[arg(short, long, default_value = "dictionary-yawl.txt")]
    dictionary: PathBuf,

    /// Board files in the text format, or JSON when ending in .json
    boards: Vec<PathBuf>,

    /// Solve a random board of the given size, e.g. 5x5
    #[arg(long, value_parser = parse_dims)]
    random: Option<(usize, usize)>,

    /// Solve a 4x4 board rolled from the retail dice
    #[arg(long)]
    hasbro: bool,

    /// Seed for random boards
    #[arg(long)]
    seed: Option<u64>,

    /// Type boards in at the prompt
    #[arg(short, long)]
    interactive: bool,

    /// Print the score of each of these words and exit
    #[arg(long, num_args = 1..)]
    score: Vec<String>,

    /// List the dictionary words starting with this prefix and exit. An empty
    /// prefix lists the whole dictionary.
    #[arg(long)]
    prefix: Option<String>,

    /// Print solutions as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_dims(s: &str) -> Result<(usize, usize), String> {
    let (rows, cols) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected ROWSxCOLS, got {:?}", s))?;
    let rows = rows.trim().parse::<usize>().map_err(|e| e.to_string())?;
    let cols = cols.trim().parse::<usize>().map_err(|e| e.to_string())?;
    Ok((rows, cols))
}

fn report(solution: &Solution, json: bool) -> BoggleResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(solution)?);
        return Ok(());
    }
    for w in solution.words.iter() {
        println!("{:>2}  {}", w.score, w.word);
    }
    println!("Words found = {}, total score = {}", solution.words.len(), solution.total);
    Ok(())
}

fn solve_and_report(solver: &BoardSolver, board: &Board, json: bool) -> BoggleResult<()> {
    if !json {
        print!("{}", board);
    }
    report(&solver.solve(board), json)
}

fn lookup(solver: &BoardSolver, words: &[String], prefix: Option<&str>) {
    let dictionary = solver.dictionary();
    for word in words.iter().map(|w| w.to_ascii_uppercase()) {
        if dictionary.contains(&word) {
            println!("{:>2}  {}", solver.score_of(&word), word);
        } else {
            println!(" -  {} (not in dictionary)", word);
        }
    }
    if let Some(prefix) = prefix {
        let keys = if prefix.is_empty() {
            dictionary.keys()
        } else {
            dictionary.keys_with_prefix(&prefix.to_ascii_uppercase())
        };
        for word in keys {
            println!("{:>2}  {}", dictionary.score_of(&word), word);
        }
    }
}

/// Reads rows of tiles until a blank line. Returns `None` once the user is done.
fn read_board() -> BoggleResult<Option<Board>> {
    println!("Enter board rows, tiles separated by spaces. Blank line to solve, blank board to quit:");
    let mut rows = Vec::new();
    loop {
        let line: String = match try_read!("{}\n") {
            Ok(line) => line,
            Err(_) => break,
        };
        let tiles = line
            .split_whitespace()
            .map(str::to_string)
            .collect::<Vec<_>>();
        if tiles.is_empty() {
            break;
        }
        rows.push(tiles);
    }
    if rows.is_empty() {
        return Ok(None);
    }
    Board::new(rows).map(Some)
}

fn play_interactive(solver: &BoardSolver, json: bool) -> BoggleResult<()> {
    loop {
        match read_board() {
            Ok(Some(board)) => solve_and_report(solver, &board, json)?,
            Ok(None) => return Ok(()),
            Err(e) => println!("Invalid board: {}", e),
        }
    }
}

fn main() -> BoggleResult<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let words = read_word_list(&args.dictionary)?;
    let solver = BoardSolver::new(&words);
    info!(
        path = %args.dictionary.display(),
        words = solver.dictionary().len(),
        "loaded dictionary"
    );
    if solver.dictionary().is_empty() {
        warn!("dictionary has no words of three or more letters, every board scores 0");
    }

    if !args.score.is_empty() || args.prefix.is_some() {
        lookup(&solver, &args.score, args.prefix.as_deref());
        return Ok(());
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for path in args.boards.iter() {
        let board = Board::from_file(path)?;
        info!(path = %path.display(), "solving board");
        solve_and_report(&solver, &board, args.json)?;
    }
    if let Some((rows, cols)) = args.random {
        solve_and_report(&solver, &Board::random(rows, cols, &mut rng)?, args.json)?;
    }
    if args.hasbro {
        solve_and_report(&solver, &Board::hasbro(&mut rng), args.json)?;
    }
    if args.interactive {
        play_interactive(&solver, args.json)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dims() {
        assert_eq!(parse_dims("5x5"), Ok((5, 5)));
        assert_eq!(parse_dims("4X6"), Ok((4, 6)));
        assert_eq!(parse_dims(" 3 x 2 "), Ok((3, 2)));
    }

    #[test]
    fn test_parse_dims_rejects() {
        assert!(parse_dims("5-5").is_err());
        assert!(parse_dims("x5").is_err());
        assert!(parse_dims("5x").is_err());
        assert!(parse_dims("ax5").is_err());
    }

    #[test]
    fn test_args_random_dims() {
        let args = Args::try_parse_from(["boggle", "--random", "5x4", "--seed", "3"]).unwrap();
        assert_eq!(args.random, Some((5, 4)));
        assert!(Args::try_parse_from(["boggle", "--random", "5-5"]).is_err());
    }
}
