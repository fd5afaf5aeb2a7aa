use tracing::debug;

use crate::{parse_num, Params, Part, PuzzleError};

fn digits(id: u64) -> u32 {
    id.checked_ilog10().map_or(1, |d| d + 1)
}

/// Multiplying a `block`-digit number by this writes it `repeats` times in a row.
fn repeater(block: u32, repeats: u32) -> u64 {
    (0 .. repeats).map(|i| 10u64.pow(block * i)).sum()
}

fn is_repeated(id: u64, part: Part) -> bool {
    let len = digits(id);
    (1 .. len)
        .filter(|&block| len % block == 0)
        .filter(|&block| part == Part::Two || 2 * block == len)
        .any(|block| id % repeater(block, len / block) == 0)
}

pub fn solve(part: Part, input: &str, _: &Params) -> Result<u64, PuzzleError> {
    let mut total = 0;
    for range in input.trim().split(',').map(str::trim).filter(|range| !range.is_empty()) {
        let Some((start, end)) = range.split_once('-') else {
            return Err(PuzzleError::malformed(range, "expected `start-end`"));
        };
        let (start, end) = (parse_num::<u64>(start)?, parse_num::<u64>(end)?);
        let found = (start ..= end).filter(|&id| is_repeated(id, part)).sum::<u64>();
        debug!(range, found, "scanned id range");
        total += found;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "11-22,95-115,998-1012,1188511880-1188511890,222220-222224,\
1698522-1698528,446443-446449,38593856-38593862,565653-565659,\
824824821-824824827,2121212118-2121212124";

    #[test]
    fn example() {
        let params = Params::default();
        assert_eq!(solve(Part::One, EXAMPLE, &params).unwrap(), 1227775554);
        assert_eq!(solve(Part::Two, EXAMPLE, &params).unwrap(), 4174379265);
    }

    #[test]
    fn repeated_ids() {
        assert!(is_repeated(1010, Part::One));
        assert!(!is_repeated(111, Part::One));
        assert!(is_repeated(111, Part::Two));
        assert!(is_repeated(12341234, Part::One));
        assert!(is_repeated(123123123, Part::Two));
        assert!(!is_repeated(123123124, Part::Two));
        assert!(!is_repeated(7, Part::Two));
        assert!(!is_repeated(101, Part::Two));
    }

    #[test]
    fn rejects_range_without_dash() {
        assert!(solve(Part::One, "11,22", &Params::default()).is_err());
    }
}
