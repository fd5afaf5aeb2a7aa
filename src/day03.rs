use crate::{Params, Part, PuzzleError};

fn max_joltage(bank: &str, batteries: usize) -> Result<u64, PuzzleError> {
    let digits = bank.as_bytes();
    if let Some(&bad) = digits.iter().find(|d| !d.is_ascii_digit()) {
        return Err(PuzzleError::malformed(bank, format!("unexpected battery '{}'", bad as char)));
    }
    if digits.len() < batteries {
        return Err(PuzzleError::malformed(bank, format!("fewer than {} batteries", batteries)));
    }

    let mut start = 0;
    let mut joltage = 0;
    for left_after in (0 .. batteries).rev() {
        // leftmost maximum within the window that still leaves room for the rest
        let window = &digits[start .. digits.len() - left_after];
        let Some((offset, &digit)) = window.iter().enumerate().rev().max_by_key(|&(_, d)| d) else {
            unreachable!("window always holds at least one battery")
        };
        joltage = joltage * 10 + u64::from(digit - b'0');
        start += offset + 1;
    }
    Ok(joltage)
}

pub fn solve(part: Part, input: &str, _: &Params) -> Result<u64, PuzzleError> {
    let batteries = match part {Part::One => 2, Part::Two => 12};
    input.lines().map(str::trim).filter(|line| !line.is_empty())
        .map(|bank| max_joltage(bank, batteries))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "987654321111111\n811111111111119\n234234234234278\n818181911112111\n";

    #[test]
    fn example() {
        let params = Params::default();
        assert_eq!(solve(Part::One, EXAMPLE, &params).unwrap(), 357);
        assert_eq!(solve(Part::Two, EXAMPLE, &params).unwrap(), 3121910778619);
    }

    #[test]
    fn single_banks() {
        assert_eq!(max_joltage("818181911112111", 2).unwrap(), 92);
        assert_eq!(max_joltage("234234234234278", 12).unwrap(), 434234234278);
        assert_eq!(max_joltage("12", 2).unwrap(), 12);
    }

    #[test]
    fn short_bank_is_an_error() {
        assert!(max_joltage("9", 2).is_err());
        assert!(max_joltage("9x9", 2).is_err());
    }
}
