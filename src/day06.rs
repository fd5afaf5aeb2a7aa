//! Trash compactor: a cephalopod math worksheet laid out in columns.

use std::ops::Range;

use itertools::Itertools;

use crate::{parse_num, Params, Part, PuzzleError};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Op {Add, Mul}

impl Op {
    fn apply(self, numbers: impl IntoIterator<Item = u64>) -> u64 {
        match self {
            Op::Add => numbers.into_iter().sum(),
            Op::Mul => numbers.into_iter().product()
        }
    }
}

struct Worksheet {
    rows: Vec<Vec<u8>>,
    ops: Vec<u8>,
}

impl Worksheet {
    fn parse(input: &str) -> Result<Worksheet, PuzzleError> {
        let lines = input.lines().filter(|line| !line.trim().is_empty()).collect::<Vec<_>>();
        let Some((ops, rows)) = lines.split_last() else {
            return Err(PuzzleError::malformed(input, "empty worksheet"));
        };
        let width = lines.iter().map(|line| line.len()).max().unwrap_or(0);
        let pad = |line: &str| {
            let mut row = line.as_bytes().to_vec();
            row.resize(width, b' ');
            row
        };
        Ok(Worksheet {rows: rows.iter().map(|&row| pad(row)).collect(), ops: pad(*ops)})
    }

    fn is_gap(&self, col: usize) -> bool {
        self.ops[col] == b' ' && self.rows.iter().all(|row| row[col] == b' ')
    }

    fn problems(&self) -> Vec<Range<usize>> {
        let chunks = (0 .. self.ops.len()).chunk_by(|&col| self.is_gap(col));
        let spans = chunks.into_iter()
            .filter(|(gap, _)| !gap)
            .filter_map(|(_, cols)| cols.minmax().into_option().map(|(first, last)| first .. last + 1))
            .collect();
        spans
    }

    fn op(&self, cols: &Range<usize>) -> Result<Op, PuzzleError> {
        let symbols = self.ops[cols.clone()].iter().copied().filter(|&c| c != b' ').collect::<Vec<_>>();
        match symbols[..] {
            [b'+'] => Ok(Op::Add),
            [b'*'] => Ok(Op::Mul),
            _ => Err(PuzzleError::malformed(
                &String::from_utf8_lossy(&self.ops[cols.clone()]),
                "expected exactly one `+` or `*` per problem"
            ))
        }
    }

    /// Numbers written left to right, one per row.
    fn row_numbers(&self, cols: &Range<usize>) -> Result<Vec<u64>, PuzzleError> {
        self.rows.iter()
            .map(|row| String::from_utf8_lossy(&row[cols.clone()]).into_owned())
            .filter(|text| !text.trim().is_empty())
            .map(|text| parse_num(&text))
            .collect()
    }

    /// Numbers written top to bottom, one per column.
    fn column_numbers(&self, cols: &Range<usize>) -> Result<Vec<u64>, PuzzleError> {
        let mut numbers = vec![];
        for col in cols.clone() {
            let mut number = None;
            for row in &self.rows {
                match row[col] {
                    b' ' => (),
                    d @ b'0' ..= b'9' => number = Some(number.unwrap_or(0) * 10 + u64::from(d - b'0')),
                    c => return Err(PuzzleError::malformed(
                        &String::from_utf8_lossy(row),
                        format!("unexpected '{}' in column {}", c as char, col)
                    ))
                }
            }
            numbers.extend(number);
        }
        Ok(numbers)
    }
}

pub fn solve(part: Part, input: &str, _: &Params) -> Result<u64, PuzzleError> {
    let sheet = Worksheet::parse(input)?;
    sheet.problems().iter().map(|cols| -> Result<u64, PuzzleError> {
        let numbers = match part {
            Part::One => sheet.row_numbers(cols)?,
            Part::Two => sheet.column_numbers(cols)?
        };
        Ok(sheet.op(cols)?.apply(numbers))
    }).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = concat!(
        "123 328  51 64 \n",
        " 45 64  387 23 \n",
        "  6 98  215 314\n",
        "*   +   *   +  \n",
    );

    #[test]
    fn example() {
        let params = Params::default();
        assert_eq!(solve(Part::One, EXAMPLE, &params).unwrap(), 4277556);
        assert_eq!(solve(Part::Two, EXAMPLE, &params).unwrap(), 3263827);
    }

    #[test]
    fn trailing_spaces_may_be_stripped() {
        let stripped = EXAMPLE.lines().map(str::trim_end).join("\n");
        let params = Params::default();
        assert_eq!(solve(Part::One, &stripped, &params).unwrap(), 4277556);
        assert_eq!(solve(Part::Two, &stripped, &params).unwrap(), 3263827);
    }

    #[test]
    fn problems_are_split_on_blank_columns() {
        let sheet = Worksheet::parse(EXAMPLE).unwrap();
        assert_eq!(sheet.problems(), vec![0 .. 3, 4 .. 7, 8 .. 11, 12 .. 15]);
        assert_eq!(sheet.op(&(4 .. 7)).unwrap(), Op::Add);
        assert_eq!(sheet.column_numbers(&(12 .. 15)).unwrap(), vec![623, 431, 4]);
    }

    #[test]
    fn missing_operator_is_an_error() {
        assert!(solve(Part::One, "1 2\n3 4\n  +\n", &Params::default()).is_err());
    }
}
