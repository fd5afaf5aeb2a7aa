//! Factory: configure every machine with the fewest button presses.
//!
//! A machine line reads `[.##.] (3) (1,3) (2) {3,5,4,7}`: the indicator light
//! pattern, one parenthesised group per button listing the lights (or joltage
//! counters) it is wired to, and the joltage targets.
//!
//! Lights toggle, so part one is a parity problem over at most a few dozen
//! buttons and an exhaustive subset search settles it. Counters only ever
//! increase, so part two asks for the non-negative integer solution of
//! `A x = t` with the smallest `sum(x)`. Gauss-Jordan elimination over the
//! rationals leaves a handful of free variables; those are enumerated inside
//! intervals derived from the pivot rows while the pivots follow from them.

use std::sync::LazyLock;

use num_rational::Rational64;
use num_traits::{One, Signed, Zero};
use regex::Regex;
use tracing::debug;

use crate::{parse_num, Params, Part, PuzzleError};

/// Past this many buttons the subset search for the light pattern is hopeless.
const MAX_TOGGLE_BUTTONS: usize = 24;

static MACHINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([.#]*)\]((?:\s*\([\d,\s]*\))*)\s*\{([\d,\s]*)\}$").expect("machine pattern")
});
static BUTTON: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([\d,\s]*)\)").expect("button pattern"));

#[derive(Debug)]
struct Machine {
    lights: Vec<bool>,
    buttons: Vec<Vec<usize>>,
    joltages: Vec<u64>,
}

fn parse_list<T: std::str::FromStr<Err = std::num::ParseIntError>>(list: &str) -> Result<Vec<T>, PuzzleError> {
    list.split(',').map(str::trim).filter(|item| !item.is_empty()).map(parse_num).collect()
}

impl Machine {
    fn parse(line: &str) -> Result<Machine, PuzzleError> {
        let Some(caps) = MACHINE.captures(line) else {
            return Err(PuzzleError::malformed(line, "expected `[lights] (button)... {joltages}`"));
        };
        let lights = caps[1].bytes().map(|c| c == b'#').collect::<Vec<_>>();
        let buttons = BUTTON.captures_iter(&caps[2])
            .map(|button| parse_list(&button[1]))
            .collect::<Result<Vec<Vec<usize>>, _>>()?;
        let joltages = parse_list(&caps[3])?;

        if lights.len() > 64 {
            return Err(PuzzleError::malformed(line, "more than 64 lights"));
        }
        if joltages.len() != lights.len() {
            return Err(PuzzleError::malformed(line, "one joltage target per light expected"));
        }
        if buttons.iter().flatten().any(|&ix| ix >= lights.len()) {
            return Err(PuzzleError::malformed(line, "button wired to a missing light"));
        }
        Ok(Machine {lights, buttons, joltages})
    }

    /// Fewest presses that leave exactly the pattern's lights on.
    fn fewest_toggles(&self) -> Option<u64> {
        let target = self.lights.iter().enumerate().filter(|&(_, &on)| on).fold(0u64, |mask, (ix, _)| mask | 1 << ix);
        let masks = self.buttons.iter().map(|button| button.iter().fold(0u64, |mask, &ix| mask ^ 1 << ix)).collect::<Vec<_>>();
        (0u32 .. 1 << masks.len())
            .filter(|&subset| {
                (0 .. masks.len()).filter(|&bi| subset & 1 << bi != 0).fold(0, |lit, bi| lit ^ masks[bi]) == target
            })
            .map(|subset| u64::from(subset.count_ones()))
            .min()
    }

    /// Fewest presses that raise every counter to exactly its target.
    fn fewest_presses(&self) -> Option<u64> {
        let vars = self.buttons.len();
        // a counter never decreases, so no button can be pressed more often than its smallest target
        let bounds = self.buttons.iter()
            .map(|button| button.iter().map(|&ix| self.joltages[ix] as i64).min().unwrap_or(0))
            .collect::<Vec<_>>();

        let mut matrix = self.joltages.iter().map(|&target| {
            let mut row = vec![Rational64::zero(); vars + 1];
            row[vars] = Rational64::from_integer(target as i64);
            row
        }).collect::<Vec<_>>();
        for (col, button) in self.buttons.iter().enumerate() {
            for &ix in button {matrix[ix][col] += Rational64::one()}
        }

        let system = Reduced::eliminate(matrix, vars)?;
        let mut search = Search {system: &system, bounds: &bounds, values: vec![0; system.free.len()], best: None};
        search.run(0, 0);
        search.best.map(|best| best as u64)
    }
}

/// A linear system in reduced row echelon form.
struct Reduced {
    /// One row per pivot: a coefficient for every variable, then the right-hand side.
    rows: Vec<Vec<Rational64>>,
    /// Pivot variable of each row.
    pivots: Vec<usize>,
    free: Vec<usize>,
}

impl Reduced {
    /// Gauss-Jordan elimination; `None` if the system is inconsistent.
    fn eliminate(mut matrix: Vec<Vec<Rational64>>, vars: usize) -> Option<Reduced> {
        let mut pivots = vec![];
        for col in 0 .. vars {
            let row = pivots.len();
            if row == matrix.len() {break}
            let Some(sel) = (row .. matrix.len()).find(|&ri| !matrix[ri][col].is_zero()) else {continue};
            matrix.swap(row, sel);

            let pivot = matrix[row][col];
            for value in &mut matrix[row] {*value /= pivot}
            for other in 0 .. matrix.len() {
                let factor = matrix[other][col];
                if other == row || factor.is_zero() {continue}
                for j in 0 ..= vars {
                    let delta = factor * matrix[row][j];
                    matrix[other][j] -= delta;
                }
            }
            pivots.push(col);
        }

        if matrix[pivots.len() ..].iter().any(|row| !row[vars].is_zero()) {return None}
        matrix.truncate(pivots.len());
        let free = (0 .. vars).filter(|col| !pivots.contains(col)).collect();
        Some(Reduced {rows: matrix, pivots, free})
    }
}

/// Branch and bound over the free variables of a [`Reduced`] system.
struct Search<'a> {
    system: &'a Reduced,
    /// Upper bound on every variable.
    bounds: &'a [i64],
    /// Values of the free variables fixed so far.
    values: Vec<i64>,
    best: Option<i64>,
}

impl Search<'_> {
    /// Right-hand side of a pivot row after substituting the first `fixed` free variables.
    fn residual(&self, row: usize, fixed: usize) -> Rational64 {
        let coeffs = &self.system.rows[row];
        self.system.free[.. fixed].iter().zip(&self.values)
            .fold(coeffs[coeffs.len() - 1], |rest, (&var, &value)| rest - coeffs[var] * Rational64::from_integer(value))
    }

    /// Values free variable `k` may take without forcing some pivot out of its bounds.
    fn range(&self, k: usize) -> Option<(i64, i64)> {
        let var = self.system.free[k];
        let (mut lo, mut hi) = (0, self.bounds[var]);
        for (ri, coeffs) in self.system.rows.iter().enumerate() {
            let coeff = coeffs[var];
            if coeff.is_zero() {continue}

            // span of the terms still contributed by later free variables
            let (mut later_lo, mut later_hi) = (Rational64::zero(), Rational64::zero());
            for &later in &self.system.free[k + 1 ..] {
                let term = coeffs[later] * Rational64::from_integer(self.bounds[later]);
                if term.is_negative() {later_lo += term} else {later_hi += term}
            }

            // pivot = residual - coeff * x - later must land in [0, cap]
            let residual = self.residual(ri, k);
            let cap = Rational64::from_integer(self.bounds[self.system.pivots[ri]]);
            let (min_term, max_term) = (residual - later_hi - cap, residual - later_lo);
            let (from, to) = if coeff.is_positive() {
                (min_term / coeff, max_term / coeff)
            } else {
                (max_term / coeff, min_term / coeff)
            };
            lo = lo.max(from.ceil().to_integer());
            hi = hi.min(to.floor().to_integer());
        }
        (lo <= hi).then_some((lo, hi))
    }

    fn run(&mut self, k: usize, cost: i64) {
        if self.best.is_some_and(|best| cost >= best) {return}
        if k == self.system.free.len() {
            let mut total = cost;
            for ri in 0 .. self.system.rows.len() {
                let pivot = self.residual(ri, k);
                if !pivot.is_integer() || pivot.is_negative() {return}
                total += pivot.to_integer();
            }
            if self.best.map_or(true, |best| total < best) {self.best = Some(total)}
            return;
        }

        let Some((lo, hi)) = self.range(k) else {return};
        for value in lo ..= hi {
            if self.best.is_some_and(|best| cost + value >= best) {break}
            self.values[k] = value;
            self.run(k + 1, cost + value);
        }
    }
}

pub fn solve(part: Part, input: &str, _: &Params) -> Result<u64, PuzzleError> {
    input.lines().map(str::trim).filter(|line| !line.is_empty()).enumerate().map(|(ix, line)| -> Result<u64, PuzzleError> {
        let machine = Machine::parse(line)?;
        let presses = match part {
            Part::One if machine.buttons.len() > MAX_TOGGLE_BUTTONS => {
                return Err(PuzzleError::malformed(line, format!("more than {} buttons", MAX_TOGGLE_BUTTONS)));
            },
            Part::One => machine.fewest_toggles(),
            Part::Two => machine.fewest_presses()
        };
        let Some(presses) = presses else {
            return Err(PuzzleError::NoSolution(format!("machine {} cannot be configured", ix + 1)));
        };
        debug!(machine = ix + 1, presses, "configured machine");
        Ok(presses)
    }).sum()
}
