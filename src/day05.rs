use std::ops::RangeInclusive;

use itertools::Itertools;

use crate::{parse_num, Params, Part, PuzzleError};

fn merge(ranges: Vec<RangeInclusive<u64>>) -> Vec<RangeInclusive<u64>> {
    let mut merged: Vec<RangeInclusive<u64>> = Vec::with_capacity(ranges.len());
    for range in ranges.into_iter().sorted_unstable_by_key(|range| *range.start()) {
        match merged.last_mut() {
            Some(last) if *range.start() <= last.end().saturating_add(1) => {
                if range.end() > last.end() {*last = *last.start() ..= *range.end()}
            },
            _ => merged.push(range)
        }
    }
    merged
}

fn is_fresh(merged: &[RangeInclusive<u64>], id: u64) -> bool {
    let after = merged.partition_point(|range| *range.start() <= id);
    after > 0 && merged[after - 1].contains(&id)
}

pub fn solve(part: Part, input: &str, _: &Params) -> Result<u64, PuzzleError> {
    let mut lines = input.lines().map(str::trim);
    let mut ranges = vec![];
    for line in lines.by_ref().skip_while(|line| line.is_empty()).take_while(|line| !line.is_empty()) {
        let Some((start, end)) = line.split_once('-') else {
            return Err(PuzzleError::malformed(line, "expected a `start-end` range"));
        };
        ranges.push(parse_num(start)? ..= parse_num(end)?);
    }
    let merged = merge(ranges);

    match part {
        Part::One => lines.filter(|line| !line.is_empty())
            .map(parse_num::<u64>)
            .filter_ok(|&id| is_fresh(&merged, id))
            .fold_ok(0, |count, _| count + 1),
        Part::Two => Ok(merged.iter().map(|range| range.end() - range.start() + 1).sum())
    }
}
