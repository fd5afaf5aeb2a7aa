use std::num::ParseIntError;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PuzzleError {
    /// Input that does not have the shape the puzzle describes.
    #[error("cannot parse `{line}`: {reason}")]
    Malformed { line: String, reason: String },

    #[error("invalid number `{text}`")]
    Number {
        text: String,
        #[source]
        source: ParseIntError,
    },

    /// Well-formed input with no answer.
    #[error("no solution: {0}")]
    NoSolution(String),

    #[error("day {day} has no part {part}")]
    NoSuchPart { day: usize, part: u8 },

    #[error("there is no day {0}")]
    UnknownDay(usize),

    #[error("part must be 1 or 2, got {0}")]
    UnknownPart(u8),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PuzzleError {
    pub(crate) fn malformed(line: &str, reason: impl Into<String>) -> Self {
        PuzzleError::Malformed { line: line.to_owned(), reason: reason.into() }
    }
}

pub(crate) fn parse_num<T: FromStr<Err = ParseIntError>>(text: &str) -> Result<T, PuzzleError> {
    let text = text.trim();
    text.parse().map_err(|source| PuzzleError::Number { text: text.to_owned(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(parse_num::<u32>(" 42\t").unwrap(), 42);
        assert!(matches!(parse_num::<u32>("4x2"), Err(PuzzleError::Number {text, ..}) if text == "4x2"));
    }

    #[test]
    fn io_errors_convert() {
        let err = PuzzleError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "day3.in"));
        assert!(matches!(err, PuzzleError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: day3.in");
    }
}
