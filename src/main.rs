use std::io::Read;
use std::path::PathBuf;

use aoc2025::{Params, Part, PuzzleError};
use clap::Parser;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Solve one part of one Advent of Code 2025 puzzle.
#[derive(Parser)]
#[command(name = "aoc2025")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Puzzle day
    #[arg(value_parser = clap::value_parser!(u8).range(1..=12))]
    day: u8,

    /// Puzzle part
    #[arg(value_parser = clap::value_parser!(u8).range(1..=2))]
    part: u8,

    /// Read `day{DAY}test{N}.in` instead of `day{DAY}.in`
    #[arg(short, long, value_name = "N")]
    test: Option<u32>,

    /// Read the puzzle input from PATH, `-` for stdin
    #[arg(short, long, value_name = "PATH", conflicts_with = "test")]
    input: Option<PathBuf>,

    /// Closest pairs to join in day 8 part 1
    #[arg(long, default_value_t = Params::default().connections)]
    connections: usize,
}

fn read_input(cli: &Cli) -> Result<String, PuzzleError> {
    let path = match (&cli.input, cli.test) {
        (Some(path), _) => path.clone(),
        (None, Some(test)) => PathBuf::from(format!("day{}test{}.in", cli.day, test)),
        (None, None) => PathBuf::from(format!("day{}.in", cli.day))
    };
    if path.as_os_str() == "-" {
        info!("reading input from stdin");
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        Ok(input)
    } else {
        info!(path = %path.display(), "reading input");
        Ok(std::fs::read_to_string(path)?)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let input = read_input(&cli)?;
    let params = Params {connections: cli.connections};

    let time = std::time::Instant::now();
    let answer = aoc2025::solve(cli.day.into(), Part::try_from(cli.part)?, &input, &params)?;
    info!(day = cli.day, part = cli.part, seconds = time.elapsed().as_secs_f32(), "solved");
    println!("{}", answer);
    Ok(())
}
