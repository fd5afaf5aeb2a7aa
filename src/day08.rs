//! Playground: stringing junction boxes together into circuits.

use itertools::Itertools;
use tracing::debug;

use crate::{parse_num, Params, Part, PuzzleError};

type Point = (i64, i64, i64);

/// Union-find over junction boxes, union by size with path compression.
struct Circuits {
    parent: Vec<usize>,
    size: Vec<usize>,
    count: usize,
}

impl Circuits {
    fn new(boxes: usize) -> Circuits {
        Circuits {parent: (0 .. boxes).collect(), size: vec![1; boxes], count: boxes}
    }

    fn find(&mut self, mut ix: usize) -> usize {
        let mut root = ix;
        while self.parent[root] != root {root = self.parent[root]}
        while self.parent[ix] != root {
            let next = self.parent[ix];
            self.parent[ix] = root;
            ix = next;
        }
        root
    }

    /// Returns whether two distinct circuits got joined.
    fn join(&mut self, a: usize, b: usize) -> bool {
        let (mut a, mut b) = (self.find(a), self.find(b));
        if a == b {return false}
        if self.size[a] < self.size[b] {std::mem::swap(&mut a, &mut b)}
        self.parent[b] = a;
        self.size[a] += self.size[b];
        self.count -= 1;
        true
    }

    fn sizes(&mut self) -> Vec<usize> {
        let mut sizes = vec![];
        for ix in 0 .. self.parent.len() {
            if self.find(ix) == ix {sizes.push(self.size[ix])}
        }
        sizes
    }
}

fn parse(input: &str) -> Result<Vec<Point>, PuzzleError> {
    input.lines().map(str::trim).filter(|line| !line.is_empty()).map(|line| -> Result<Point, PuzzleError> {
        let Some((x, y, z)) = line.split(',').collect_tuple() else {
            return Err(PuzzleError::malformed(line, "expected `x,y,z`"));
        };
        Ok((parse_num(x)?, parse_num(y)?, parse_num(z)?))
    }).collect()
}

fn dist_sq(a: Point, b: Point) -> i64 {
    (a.0 - b.0).pow(2) + (a.1 - b.1).pow(2) + (a.2 - b.2).pow(2)
}

pub fn solve(part: Part, input: &str, params: &Params) -> Result<u64, PuzzleError> {
    let boxes = parse(input)?;
    if boxes.len() < 2 {
        return Err(PuzzleError::NoSolution("need at least two junction boxes".to_owned()));
    }
    // stable sort keeps input order among equally distant pairs
    let pairs = (0 .. boxes.len()).tuple_combinations()
        .sorted_by_key(|&(a, b): &(usize, usize)| dist_sq(boxes[a], boxes[b]))
        .collect::<Vec<_>>();
    let mut circuits = Circuits::new(boxes.len());

    match part {
        Part::One => {
            for &(a, b) in pairs.iter().take(params.connections) {circuits.join(a, b);}
            let sizes = circuits.sizes();
            debug!(circuits = sizes.len(), "connected closest pairs");
            Ok(sizes.into_iter().sorted_unstable_by(|a, b| b.cmp(a)).take(3).product::<usize>() as u64)
        },
        Part::Two => {
            for &(a, b) in &pairs {
                if circuits.join(a, b) && circuits.count == 1 {
                    return Ok((boxes[a].0 * boxes[b].0) as u64);
                }
            }
            unreachable!("joining every pair always leaves a single circuit")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
162,817,812
57,618,57
906,360,560
592,479,940
352,342,300
466,668,158
542,29,236
431,825,988
739,650,466
52,470,668
216,146,977
819,987,18
117,168,530
805,96,715
346,949,466
970,615,88
941,993,340
862,61,35
984,92,344
425,690,689
";

    #[test]
    fn example() {
        let params = Params {connections: 10};
        assert_eq!(solve(Part::One, EXAMPLE, &params).unwrap(), 40);
        assert_eq!(solve(Part::Two, EXAMPLE, &params).unwrap(), 25272);
    }

    #[test]
    fn circuits_track_sizes() {
        let mut circuits = Circuits::new(5);
        assert!(circuits.join(0, 1));
        assert!(circuits.join(1, 2));
        assert!(!circuits.join(0, 2));
        assert_eq!(circuits.count, 3);
        let mut sizes = circuits.sizes();
        sizes.sort();
        assert_eq!(sizes, vec![1, 1, 3]);
    }

    #[test]
    fn equal_distances_keep_input_order() {
        let params = Params::default();
        assert_eq!(solve(Part::Two, "1,0,0\n11,0,0\n21,0,0\n", &params).unwrap(), 231);
        assert_eq!(solve(Part::Two, "21,0,0\n1,0,0\n11,0,0\n", &params).unwrap(), 11);
    }

    #[test]
    fn fewer_than_three_circuits() {
        let boxes = "1,0,0\n11,0,0\n100,0,0\n";
        assert_eq!(solve(Part::One, boxes, &Params {connections: 1}).unwrap(), 2);
        assert_eq!(solve(Part::One, boxes, &Params {connections: 2}).unwrap(), 3);
    }

    #[test]
    fn lone_box_has_no_answer() {
        assert!(matches!(
            solve(Part::Two, "1,2,3\n", &Params::default()),
            Err(PuzzleError::NoSolution(_))
        ));
    }
}
