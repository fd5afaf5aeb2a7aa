//! Movie theater: the largest rectangle spanned by two red tiles.
//!
//! The red tiles are the corners of a rectilinear loop. Part two only accepts
//! rectangles made of red or green tiles, i.e. tiles on the loop or inside it.
//! The loop is compressed onto its distinct coordinates: each distinct x gets
//! an odd column and the open gap before it the even column below, likewise
//! for y. Every compressed cell is then uniformly inside or outside the loop,
//! so a flood fill from the border plus a prefix sum over outside tiles
//! answers each candidate rectangle in constant time. A gap between adjacent
//! coordinates holds no tiles and weighs nothing in the sum.

use bitvec::prelude::*;
use itertools::Itertools;
use tracing::debug;

use crate::{parse_num, Params, Part, PuzzleError};

type Tile = (i64, i64);

fn parse(input: &str) -> Result<Vec<Tile>, PuzzleError> {
    input.lines().map(str::trim).filter(|line| !line.is_empty()).map(|line| -> Result<Tile, PuzzleError> {
        let Some((x, y)) = line.split_once(',') else {
            return Err(PuzzleError::malformed(line, "expected `x,y`"));
        };
        Ok((parse_num(x)?, parse_num(y)?))
    }).collect()
}

fn area(a: Tile, b: Tile) -> u64 {
    (a.0.abs_diff(b.0) + 1) * (a.1.abs_diff(b.1) + 1)
}

/// One axis of the compressed grid.
struct Axis(Vec<i64>);

impl Axis {
    fn new(coords: impl Iterator<Item = i64>) -> Axis {
        Axis(coords.sorted_unstable().dedup().collect())
    }

    /// Compressed index of a coordinate taken from the loop itself.
    fn index(&self, coord: i64) -> usize {
        2 * self.0.partition_point(|&c| c < coord) + 1
    }

    /// Compressed cells, including a margin of one on either side.
    fn len(&self) -> usize {
        2 * self.0.len() + 1
    }

    /// Tiles that compressed cell `ix` stands for along this axis.
    fn width(&self, ix: usize) -> u64 {
        let gap = ix / 2;
        if ix % 2 == 1 || gap == 0 || gap == self.0.len() {return 1}
        (self.0[gap] - self.0[gap - 1] - 1) as u64
    }
}

struct Floor {
    xs: Axis,
    ys: Axis,
    /// Prefix sums of outside tiles over a `(cols + 1) x (rows + 1)` table, column-major.
    outside: Vec<u64>,
}

impl Floor {
    fn new(tiles: &[Tile]) -> Result<Floor, PuzzleError> {
        let xs = Axis::new(tiles.iter().map(|t| t.0));
        let ys = Axis::new(tiles.iter().map(|t| t.1));
        let (cols, rows) = (xs.len(), ys.len());

        let mut wall = bitvec![0; cols * rows];
        for (&a, &b) in tiles.iter().circular_tuple_windows() {
            if a.0 != b.0 && a.1 != b.1 {
                return Err(PuzzleError::malformed(
                    &format!("{},{} -> {},{}", a.0, a.1, b.0, b.1),
                    "consecutive red tiles must share a row or column"
                ));
            }
            let (ca, cb) = (xs.index(a.0), xs.index(b.0));
            let (ra, rb) = (ys.index(a.1), ys.index(b.1));
            for ci in ca.min(cb) ..= ca.max(cb) {
                for ri in ra.min(rb) ..= ra.max(rb) {wall.set(ci * rows + ri, true)}
            }
        }

        // the margin column 0 is never part of the loop
        let mut out = bitvec![0; cols * rows];
        let mut stack = vec![(0usize, 0usize)];
        out.set(0, true);
        while let Some((ci, ri)) = stack.pop() {
            let next = [
                ci.checked_sub(1).map(|c| (c, ri)), (ci + 1 < cols).then_some((ci + 1, ri)),
                ri.checked_sub(1).map(|r| (ci, r)), (ri + 1 < rows).then_some((ci, ri + 1))
            ];
            for (cj, rj) in next.into_iter().flatten() {
                let ix = cj * rows + rj;
                if !wall[ix] && !out[ix] {
                    out.set(ix, true);
                    stack.push((cj, rj));
                }
            }
        }

        let stride = rows + 1;
        let mut outside = vec![0u64; (cols + 1) * stride];
        for ci in 0 .. cols {
            for ri in 0 .. rows {
                let weight = if out[ci * rows + ri] {xs.width(ci) * ys.width(ri)} else {0};
                outside[(ci + 1) * stride + ri + 1] = weight
                    + outside[ci * stride + ri + 1]
                    + outside[(ci + 1) * stride + ri]
                    - outside[ci * stride + ri];
            }
        }
        debug!(cols, rows, "compressed the tile floor");
        Ok(Floor {xs, ys, outside})
    }

    /// Whether the rectangle with corners `a` and `b` avoids every outside tile.
    fn covers(&self, a: Tile, b: Tile) -> bool {
        let stride = self.ys.len() + 1;
        let (ca, cb) = (self.xs.index(a.0), self.xs.index(b.0));
        let (ra, rb) = (self.ys.index(a.1), self.ys.index(b.1));
        let (c0, c1) = (ca.min(cb), ca.max(cb) + 1);
        let (r0, r1) = (ra.min(rb), ra.max(rb) + 1);
        let sum = self.outside[c1 * stride + r1] + self.outside[c0 * stride + r0]
            - self.outside[c0 * stride + r1] - self.outside[c1 * stride + r0];
        sum == 0
    }
}

pub fn solve(part: Part, input: &str, _: &Params) -> Result<u64, PuzzleError> {
    let tiles = parse(input)?;
    let floor = match part {
        Part::One => None,
        Part::Two => Some(Floor::new(&tiles)?)
    };
    tiles.iter().tuple_combinations()
        .filter(|&(&a, &b)| floor.as_ref().map_or(true, |floor| floor.covers(a, b)))
        .map(|(&a, &b)| area(a, b))
        .max()
        .ok_or_else(|| PuzzleError::NoSolution("need at least two red tiles".to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "7,1\n11,1\n11,7\n9,7\n9,5\n2,5\n2,3\n7,3\n";

    #[test]
    fn example() {
        let params = Params::default();
        assert_eq!(solve(Part::One, EXAMPLE, &params).unwrap(), 50);
        assert_eq!(solve(Part::Two, EXAMPLE, &params).unwrap(), 24);
    }

    #[test]
    fn notch_is_not_covered() {
        // a U shape: the gap between the arms lies outside the loop
        let u = "0,0\n10,0\n10,10\n7,10\n7,3\n3,3\n3,10\n0,10\n";
        let params = Params::default();
        assert_eq!(solve(Part::One, u, &params).unwrap(), 121);
        assert_eq!(solve(Part::Two, u, &params).unwrap(), 44);
        let floor = Floor::new(&parse(u).unwrap()).unwrap();
        assert!(!floor.covers((3, 10), (7, 10)));
        assert!(floor.covers((0, 0), (10, 3)));
    }

    #[test]
    fn touching_arms_leave_no_gap() {
        // the notch between x=3 and x=4 is narrower than a tile
        let u = "0,0\n10,0\n10,10\n4,10\n4,3\n3,3\n3,10\n0,10\n";
        assert_eq!(solve(Part::Two, u, &Params::default()).unwrap(), 121);
        let floor = Floor::new(&parse(u).unwrap()).unwrap();
        assert_eq!(floor.xs.width(floor.xs.index(3) + 1), 0);
        assert!(floor.covers((3, 10), (4, 3)));
    }

    #[test]
    fn diagonal_edge_is_rejected() {
        assert!(solve(Part::Two, "0,0\n5,5\n0,5\n", &Params::default()).is_err());
    }
}
