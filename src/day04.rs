use bitvec::prelude::*;

use crate::{Params, Part, PuzzleError};

const CROWDED: usize = 4;

struct Floor {
    width: usize,
    height: usize,
    rolls: BitVec,
}

impl Floor {
    fn parse(input: &str) -> Result<Floor, PuzzleError> {
        let rows = input.lines().map(str::trim_end).filter(|line| !line.is_empty()).collect::<Vec<_>>();
        let width = rows.first().map_or(0, |row| row.len());
        let mut rolls = BitVec::with_capacity(width * rows.len());
        for row in &rows {
            if row.len() != width {
                return Err(PuzzleError::malformed(row, format!("expected {} cells", width)));
            }
            for cell in row.bytes() {
                match cell {
                    b'@' => rolls.push(true),
                    b'.' => rolls.push(false),
                    _ => return Err(PuzzleError::malformed(row, format!("unexpected cell '{}'", cell as char)))
                }
            }
        }
        Ok(Floor {width, height: rows.len(), rolls})
    }

    fn neighbours(&self, ix: usize) -> usize {
        let (ri, ci) = (ix / self.width, ix % self.width);
        (-1isize ..= 1).flat_map(|rd| (-1isize ..= 1).map(move |cd| (rd, cd)))
            .filter(|&delta| delta != (0, 0))
            .filter_map(|(rd, cd)| Some((ri.checked_add_signed(rd)?, ci.checked_add_signed(cd)?)))
            .filter(|&(rj, cj)| rj < self.height && cj < self.width && self.rolls[rj * self.width + cj])
            .count()
    }

    fn accessible(&self) -> Vec<usize> {
        self.rolls.iter_ones().filter(|&ix| self.neighbours(ix) < CROWDED).collect()
    }
}

pub fn solve(part: Part, input: &str, _: &Params) -> Result<u64, PuzzleError> {
    let mut floor = Floor::parse(input)?;
    if part == Part::One {
        return Ok(floor.accessible().len() as u64);
    }

    let mut removed = 0;
    loop {
        let reachable = floor.accessible();
        if reachable.is_empty() {break}
        removed += reachable.len() as u64;
        for ix in reachable {floor.rolls.set(ix, false)}
    }
    Ok(removed)
}
