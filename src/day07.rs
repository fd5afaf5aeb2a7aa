use crate::{Params, Part, PuzzleError};

struct Descent {
    /// Splitters hit, counting merged beams once.
    splits: u64,
    /// Timelines that reach the bottom row.
    timelines: u64,
}

fn descend(input: &str) -> Result<Descent, PuzzleError> {
    let rows = input.lines().map(|line| line.trim_end().as_bytes()).filter(|row| !row.is_empty()).collect::<Vec<_>>();
    let Some((start_ri, start_ci)) = rows.iter().enumerate().find_map(|(ri, row)|
        row.iter().position(|&cell| cell == b'S').map(|ci| (ri, ci))
    ) else {
        return Err(PuzzleError::malformed(input.lines().next().unwrap_or(""), "no beam entry point `S`"));
    };
    let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);

    let mut beams = vec![0u64; width];
    let mut next = vec![0u64; width];
    beams[start_ci] = 1;
    let mut splits = 0;
    for row in &rows[start_ri + 1 ..] {
        next.fill(0);
        for (ci, &count) in beams.iter().enumerate().filter(|&(_, &count)| count > 0) {
            match row.get(ci) {
                Some(b'^') => {
                    splits += 1;
                    if ci > 0 {next[ci - 1] += count}
                    if ci + 1 < width {next[ci + 1] += count}
                },
                Some(b'.') | None => next[ci] += count,
                Some(&cell) => return Err(PuzzleError::malformed(
                    &String::from_utf8_lossy(row),
                    format!("unexpected cell '{}'", cell as char)
                ))
            }
        }
        std::mem::swap(&mut beams, &mut next);
    }
    Ok(Descent {splits, timelines: beams.iter().sum()})
}

pub fn solve(part: Part, input: &str, _: &Params) -> Result<u64, PuzzleError> {
    let descent = descend(input)?;
    Ok(match part {Part::One => descent.splits, Part::Two => descent.timelines})
}
