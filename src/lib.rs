//! Solutions to the twelve Advent of Code 2025 puzzles.
//!
//! Every day lives in its own module and exposes the same [`Solver`]
//! signature, so the binary can dispatch through [`DAYS`] by day number.

pub mod day01;
pub mod day02;
pub mod day03;
pub mod day04;
pub mod day05;
pub mod day06;
pub mod day07;
pub mod day08;
pub mod day09;
pub mod day10;
pub mod day11;
pub mod day12;
mod error;

pub use error::PuzzleError;
pub(crate) use error::parse_num;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Part {One, Two}

impl TryFrom<u8> for Part {
    type Error = PuzzleError;

    fn try_from(part: u8) -> Result<Self, Self::Error> {
        match part {
            1 => Ok(Part::One),
            2 => Ok(Part::Two),
            _ => Err(PuzzleError::UnknownPart(part))
        }
    }
}

impl From<Part> for u8 {
    fn from(part: Part) -> u8 {
        match part {Part::One => 1, Part::Two => 2}
    }
}

/// Knobs that differ between a puzzle's worked example and the real input.
#[derive(Clone, Debug)]
pub struct Params {
    /// Closest pairs joined by day 8 part 1.
    pub connections: usize,
}

impl Default for Params {
    fn default() -> Self {
        Params {connections: 1000}
    }
}

pub type Solver = fn(Part, &str, &Params) -> Result<u64, PuzzleError>;

pub const DAYS: [Solver; 12] = [
    day01::solve, day02::solve, day03::solve, day04::solve, day05::solve, day06::solve,
    day07::solve, day08::solve, day09::solve, day10::solve, day11::solve, day12::solve
];

pub fn solve(day: usize, part: Part, input: &str, params: &Params) -> Result<u64, PuzzleError> {
    let solver = day.checked_sub(1).and_then(|ix| DAYS.get(ix)).ok_or(PuzzleError::UnknownDay(day))?;
    solver(part, input, params)
}
