//! Reactor: count the data paths through a network of devices.

use rustc_hash::FxHashMap;

use crate::{Params, Part, PuzzleError};

const OUT: &str = "out";

struct Reactor<'a> {
    outputs: FxHashMap<&'a str, Vec<&'a str>>,
}

impl<'a> Reactor<'a> {
    fn parse(input: &'a str) -> Result<Reactor<'a>, PuzzleError> {
        let mut outputs = FxHashMap::default();
        for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let Some((device, targets)) = line.split_once(':') else {
                return Err(PuzzleError::malformed(line, "expected `device: outputs...`"));
            };
            outputs.entry(device.trim()).or_insert_with(Vec::new).extend(targets.split_whitespace());
        }
        Ok(Reactor {outputs})
    }

    /// Number of distinct paths from `from` to `to`.
    fn paths(&self, from: &'a str, to: &'a str) -> Result<u64, PuzzleError> {
        self.count(from, to, &mut FxHashMap::default())
    }

    /// `memo` holds `None` for devices still on the current path. A device
    /// without an output line leads nowhere.
    fn count(&self, device: &'a str, to: &'a str, memo: &mut FxHashMap<&'a str, Option<u64>>) -> Result<u64, PuzzleError> {
        if device == to {return Ok(1)}
        match memo.get(device) {
            Some(&Some(paths)) => return Ok(paths),
            Some(None) => return Err(PuzzleError::malformed(device, "device feeds back into itself")),
            None => ()
        }
        memo.insert(device, None);
        let mut paths = 0;
        for &next in self.outputs.get(device).into_iter().flatten() {
            paths += self.count(next, to, memo)?;
        }
        memo.insert(device, Some(paths));
        Ok(paths)
    }

    /// Paths from `from` to `to` that visit `via` in the given order.
    fn paths_via(&self, from: &'a str, via: &[&'a str], to: &'a str) -> Result<u64, PuzzleError> {
        let mut stops = vec![from];
        stops.extend_from_slice(via);
        stops.push(to);
        stops.windows(2).map(|leg| self.paths(leg[0], leg[1])).product()
    }
}

pub fn solve(part: Part, input: &str, _: &Params) -> Result<u64, PuzzleError> {
    let reactor = Reactor::parse(input)?;
    let start = match part {Part::One => "you", Part::Two => "svr"};
    if !reactor.outputs.contains_key(start) {
        return Err(PuzzleError::NoSolution(format!("there is no device `{}`", start)));
    }
    match part {
        Part::One => reactor.paths(start, OUT),
        // in an acyclic network at most one of the two orders has any paths
        Part::Two => Ok(reactor.paths_via(start, &["dac", "fft"], OUT)? + reactor.paths_via(start, &["fft", "dac"], OUT)?)
    }
}
