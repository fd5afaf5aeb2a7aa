//! Christmas tree farm: decide which regions can hold their presents.
//!
//! Presents are polyominoes that may be rotated and flipped but not overlap;
//! cells may stay empty. Most regions are settled by area alone: too little
//! room, or so much that every present gets its own square tile. The rest go
//! through an exact search that walks the cells in row-major order and either
//! anchors a present on the first undecided cell or leaves it empty, as long
//! as the spare area allows.

use std::sync::LazyLock;

use arrayvec::ArrayVec;
use bitvec::prelude::*;
use regex::Regex;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::{parse_num, Params, Part, PuzzleError};

static REGION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)x(\d+):\s*([\d\s]*)$").expect("region pattern"));

type Cell = (i32, i32);

/// Cells of a present in row-major order, relative to the first one.
type Orientation = Vec<Cell>;

struct Shape {
    area: usize,
    /// Side of the smallest square that holds the present in any orientation.
    side: usize,
    orientations: ArrayVec<Orientation, 8>,
}

impl Shape {
    fn new(cells: &[Cell]) -> Option<Shape> {
        let rows = cells.iter().map(|c| c.0).max()? - cells.iter().map(|c| c.0).min()? + 1;
        let cols = cells.iter().map(|c| c.1).max()? - cells.iter().map(|c| c.1).min()? + 1;

        let mut orientations = (0 .. 8).map(|symmetry| {
            let mut oriented = cells.iter().map(|&(r, c)| {
                let (r, c) = if symmetry & 4 != 0 {(r, -c)} else {(r, c)};
                match symmetry & 3 {0 => (r, c), 1 => (c, -r), 2 => (-r, -c), _ => (-c, r)}
            }).collect::<Vec<_>>();
            oriented.sort_unstable();
            let anchor = oriented[0];
            for cell in &mut oriented {*cell = (cell.0 - anchor.0, cell.1 - anchor.1)}
            oriented
        }).collect::<Vec<_>>();
        orientations.sort();
        orientations.dedup();

        Some(Shape {area: cells.len(), side: rows.max(cols) as usize, orientations: orientations.into_iter().collect()})
    }
}

#[derive(Debug, PartialEq)]
struct Region {
    width: usize,
    height: usize,
    /// Presents wanted, indexed by shape.
    counts: Vec<usize>,
}

fn parse(input: &str) -> Result<(Vec<Shape>, Vec<Region>), PuzzleError> {
    let mut shapes = vec![];
    let mut regions = vec![];
    let mut lines = input.lines().map(str::trim);
    while let Some(line) = lines.next() {
        if line.is_empty() {continue}
        if let Some(caps) = REGION.captures(line) {
            let counts = caps[3].split_whitespace().map(parse_num).collect::<Result<Vec<usize>, _>>()?;
            regions.push(Region {width: parse_num(&caps[1])?, height: parse_num(&caps[2])?, counts});
        } else if let Some(id) = line.strip_suffix(':') {
            if parse_num::<usize>(id)? != shapes.len() {
                return Err(PuzzleError::malformed(line, "shapes must be numbered 0, 1, 2, ..."));
            }
            let mut cells = vec![];
            for (ri, row) in lines.by_ref().take_while(|row| !row.is_empty()).enumerate() {
                for (ci, cell) in row.bytes().enumerate() {
                    match cell {
                        b'#' => cells.push((ri as i32, ci as i32)),
                        b'.' => (),
                        _ => return Err(PuzzleError::malformed(row, format!("unexpected cell '{}'", cell as char)))
                    }
                }
            }
            let Some(shape) = Shape::new(&cells) else {
                return Err(PuzzleError::malformed(line, "shape without any cells"));
            };
            shapes.push(shape);
        } else {
            return Err(PuzzleError::malformed(line, "expected a shape header or a region"));
        }
    }

    if let Some(region) = regions.iter().find(|region| region.counts.len() > shapes.len()) {
        return Err(PuzzleError::malformed(
            &format!("{}x{}", region.width, region.height),
            format!("asks for {} shapes but only {} are known", region.counts.len(), shapes.len())
        ));
    }
    Ok((shapes, regions))
}

struct Packing<'a> {
    shapes: &'a [Shape],
    width: usize,
    height: usize,
    /// Cells already covered or deliberately left empty.
    decided: BitVec,
    remaining: Vec<usize>,
    presents_left: usize,
    /// Cells that may still be left empty.
    slack: usize,
    /// Rows a present can span, which bounds how far below the current row decided cells reach.
    reach: usize,
    /// States known to fail: first undecided cell, decisions from there on, presents left.
    dead_ends: FxHashSet<(usize, BitVec, Vec<usize>)>,
}

impl<'a> Packing<'a> {
    fn new(shapes: &'a [Shape], width: usize, height: usize, counts: &[usize]) -> Packing<'a> {
        let mut remaining = counts.to_vec();
        remaining.resize(shapes.len(), 0);
        let needed = remaining.iter().zip(shapes).map(|(&count, shape)| count * shape.area).sum::<usize>();
        Packing {
            shapes,
            width,
            height,
            decided: bitvec![0; width * height],
            presents_left: remaining.iter().sum(),
            remaining,
            slack: (width * height).saturating_sub(needed),
            reach: shapes.iter().map(|shape| shape.side).max().unwrap_or(1),
            dead_ends: FxHashSet::default(),
        }
    }

    /// Board cells covered by `orientation` anchored at `cell`, if they are all free.
    fn cover(&self, cell: usize, orientation: &Orientation) -> Option<Vec<usize>> {
        let (r, c) = ((cell / self.width) as i32, (cell % self.width) as i32);
        orientation.iter().map(|&(dr, dc)| {
            let (rr, cc) = (usize::try_from(r + dr).ok()?, usize::try_from(c + dc).ok()?);
            let ix = rr * self.width + cc;
            (rr < self.height && cc < self.width && !self.decided[ix]).then_some(ix)
        }).collect()
    }

    /// Undecided cells from `from` on that sit in gaps too small for every remaining present.
    fn stranded(&self, from: usize) -> usize {
        let smallest = self.shapes.iter().zip(&self.remaining)
            .filter(|&(_, &left)| left > 0)
            .map(|(shape, _)| shape.area)
            .min();
        let Some(smallest) = smallest else {return 0};

        let mut seen = self.decided.clone();
        let mut stranded = 0;
        for start in from .. seen.len() {
            if seen[start] {continue}
            seen.set(start, true);
            let mut stack = vec![start];
            let mut size = 0;
            while let Some(ix) = stack.pop() {
                size += 1;
                let (r, c) = (ix / self.width, ix % self.width);
                let next = [
                    (r > 0).then(|| ix - self.width), (r + 1 < self.height).then(|| ix + self.width),
                    (c > 0).then(|| ix - 1), (c + 1 < self.width).then(|| ix + 1)
                ];
                for jx in next.into_iter().flatten() {
                    if !seen[jx] {
                        seen.set(jx, true);
                        stack.push(jx);
                    }
                }
            }
            if size < smallest {stranded += size}
        }
        stranded
    }

    fn fill(&mut self, from: usize) -> bool {
        if self.presents_left == 0 {return true}
        let Some(cell) = self.decided[from ..].first_zero().map(|ix| from + ix) else {return false};
        // everything before `cell` is decided and nothing past the horizon is
        let horizon = ((cell / self.width + self.reach) * self.width).min(self.decided.len());
        let state = (cell, self.decided[cell .. horizon].to_bitvec(), self.remaining.clone());
        if self.dead_ends.contains(&state) || self.stranded(cell) > self.slack {return false}

        let shapes = self.shapes;
        for (si, shape) in shapes.iter().enumerate() {
            if self.remaining[si] == 0 {continue}
            for orientation in &shape.orientations {
                let Some(covered) = self.cover(cell, orientation) else {continue};
                for &ix in &covered {self.decided.set(ix, true)}
                self.remaining[si] -= 1;
                self.presents_left -= 1;
                if self.fill(cell + 1) {return true}
                self.remaining[si] += 1;
                self.presents_left += 1;
                for &ix in &covered {self.decided.set(ix, false)}
            }
        }

        if self.slack > 0 {
            self.slack -= 1;
            self.decided.set(cell, true);
            if self.fill(cell + 1) {return true}
            self.decided.set(cell, false);
            self.slack += 1;
        }
        self.dead_ends.insert(state);
        false
    }
}

fn fits(shapes: &[Shape], region: &Region) -> bool {
    let size = region.width * region.height;
    let needed = region.counts.iter().zip(shapes).map(|(&count, shape)| count * shape.area).sum::<usize>();
    if needed > size {return false}

    let presents = region.counts.iter().sum::<usize>();
    let Some(side) = region.counts.iter().zip(shapes).filter(|&(&count, _)| count > 0).map(|(_, shape)| shape.side).max() else {
        return true;
    };
    if (region.width / side) * (region.height / side) >= presents {return true}

    // orientations are closed under reflection, so scan along the longer side and keep the frontier narrow
    let (width, height) = (region.width.min(region.height), region.width.max(region.height));
    Packing::new(shapes, width, height, &region.counts).fill(0)
}

pub fn solve(part: Part, input: &str, _: &Params) -> Result<u64, PuzzleError> {
    if part == Part::Two {
        return Err(PuzzleError::NoSuchPart {day: 12, part: part.into()});
    }
    let (shapes, regions) = parse(input)?;
    Ok(regions.iter().filter(|&region| {
        let fits = fits(&shapes, region);
        debug!(width = region.width, height = region.height, fits, "checked region");
        fits
    }).count() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
0:
###
##.
##.

1:
###
##.
.##

2:
.##
###
##.

3:
##.
###
##.

4:
###
#..
###

5:
###
.#.
###

4x4: 0 0 0 0 2 0
12x5: 1 0 1 0 2 2
12x5: 1 0 1 0 3 2
";

    #[test]
    fn example() {
        assert_eq!(solve(Part::One, EXAMPLE, &Params::default()).unwrap(), 2);
    }

    #[test]
    fn example_regions_one_by_one() {
        let (shapes, regions) = parse(EXAMPLE).unwrap();
        assert_eq!(shapes.len(), 6);
        assert_eq!(regions[0], Region {width: 4, height: 4, counts: vec![0, 0, 0, 0, 2, 0]});
        let verdicts = regions.iter().map(|region| fits(&shapes, region)).collect::<Vec<_>>();
        assert_eq!(verdicts, vec![true, true, false]);
    }

    #[test]
    fn scan_direction_does_not_change_the_verdict() {
        let (shapes, regions) = parse(EXAMPLE).unwrap();
        let counts = &regions[1].counts;
        assert!(Packing::new(&shapes, 12, 5, counts).fill(0));
        assert!(Packing::new(&shapes, 5, 12, counts).fill(0));
    }

    #[test]
    fn small_gaps_are_stranded() {
        let (shapes, _) = parse(EXAMPLE).unwrap();
        let mut packing = Packing::new(&shapes, 5, 3, &[1]);
        for ix in [1, 6, 11] {packing.decided.set(ix, true)}
        // the first column is cut off, the 3x3 block beside it still holds a present
        assert_eq!(packing.stranded(0), 3);
        assert_eq!(Packing::new(&shapes, 5, 3, &[]).stranded(0), 0);
    }

    #[test]
    fn orientations_are_deduplicated() {
        let (shapes, _) = parse(EXAMPLE).unwrap();
        assert_eq!(shapes[4].orientations.len(), 4);
        assert_eq!(shapes[5].orientations.len(), 2);
        assert!(shapes.iter().all(|shape| shape.area == 7 && shape.side == 3));
    }

    #[test]
    fn area_decides_the_easy_cases() {
        let (shapes, _) = parse(EXAMPLE).unwrap();
        assert!(!fits(&shapes, &Region {width: 2, height: 2, counts: vec![1]}));
        assert!(fits(&shapes, &Region {width: 6, height: 6, counts: vec![4]}));
        assert!(fits(&shapes, &Region {width: 1, height: 1, counts: vec![]}));
    }

    #[test]
    fn has_no_second_part() {
        assert!(matches!(
            solve(Part::Two, EXAMPLE, &Params::default()),
            Err(PuzzleError::NoSuchPart {day: 12, part: 2})
        ));
    }

    #[test]
    fn region_asking_for_unknown_shape_is_rejected() {
        assert!(parse("0:\n#\n\n2x2: 1 1\n").is_err());
    }
}
