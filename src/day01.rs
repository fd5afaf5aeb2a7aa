use crate::{parse_num, Params, Part, PuzzleError};

const DIAL_SIZE: i64 = 100;
const START: i64 = 50;

fn rotations(input: &str) -> impl Iterator<Item = Result<i64, PuzzleError>> + '_ {
    input.lines().map(str::trim).filter(|line| !line.is_empty()).map(|line| {
        let mut chars = line.chars();
        let dir = chars.next();
        let dist = i64::from(parse_num::<u32>(chars.as_str())?);
        match dir {
            Some('L') => Ok(-dist),
            Some('R') => Ok(dist),
            _ => Err(PuzzleError::malformed(line, "rotation must start with L or R"))
        }
    })
}

/// Times the dial shows 0 while turning `rotation` clicks away from `dial`.
fn zeros_passed(dial: i64, rotation: i64) -> u64 {
    let first_zero = match (dial, rotation.signum()) {
        (0, _) => DIAL_SIZE,
        (_, -1) => dial,
        _ => DIAL_SIZE - dial
    };
    let dist = rotation.abs();
    if dist < first_zero {0} else {(1 + (dist - first_zero) / DIAL_SIZE) as u64}
}

pub fn solve(part: Part, input: &str, _: &Params) -> Result<u64, PuzzleError> {
    let mut dial = START;
    let mut zeros = 0;
    for rotation in rotations(input) {
        let rotation = rotation?;
        let next = (dial + rotation).rem_euclid(DIAL_SIZE);
        zeros += match part {
            Part::One => u64::from(next == 0),
            Part::Two => zeros_passed(dial, rotation)
        };
        dial = next;
    }
    Ok(zeros)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "L68\nL30\nR48\nL5\nR60\nL55\nL1\nL99\nR14\nL82\n";

    #[test]
    fn example() {
        let params = Params::default();
        assert_eq!(solve(Part::One, EXAMPLE, &params).unwrap(), 3);
        assert_eq!(solve(Part::Two, EXAMPLE, &params).unwrap(), 6);
    }

    #[test]
    fn long_rotation_passes_zero_repeatedly() {
        assert_eq!(zeros_passed(50, 1000), 10);
        assert_eq!(zeros_passed(50, -1000), 10);
        assert_eq!(zeros_passed(0, -100), 1);
        assert_eq!(zeros_passed(0, 99), 0);
        assert_eq!(zeros_passed(1, -1), 1);
    }

    #[test]
    fn rejects_unknown_direction() {
        assert!(matches!(
            solve(Part::One, "U5", &Params::default()),
            Err(PuzzleError::Malformed {..})
        ));
    }
}
