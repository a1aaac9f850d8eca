#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Random instance generation.
//!
//! Uniform random k-SAT in signed-literal convention: every clause draws
//! `width` distinct variables and gives each a random polarity. Output goes
//! straight into [`ClauseStore::new`](crate::clause_store::ClauseStore::new).
//! Generation is deterministic per seed, which the randomized tests and the
//! benches rely on to stay reproducible.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

fn signed(var: usize, positive: bool) -> i32 {
    let var = i32::try_from(var).expect("variable exceeds i32");
    if positive { var } else { -var }
}

/// Generates `num_clauses` random 3-SAT clauses over `1..=num_vars`, three
/// distinct variables each, polarity chosen fairly.
///
/// # Panics
///
/// If `num_vars < 3`.
#[must_use]
pub fn random_3sat(num_vars: usize, num_clauses: usize, seed: u64) -> Vec<[i32; 3]> {
    assert!(num_vars >= 3, "3-SAT clauses need at least 3 variables");

    let mut rng = fastrand::Rng::with_seed(seed);
    let mut clauses = Vec::with_capacity(num_clauses);

    for _ in 0..num_clauses {
        let a = rng.usize(1..=num_vars);
        let mut b = rng.usize(1..=num_vars);
        while b == a {
            b = rng.usize(1..=num_vars);
        }
        let mut c = rng.usize(1..=num_vars);
        while c == a || c == b {
            c = rng.usize(1..=num_vars);
        }

        clauses.push([
            signed(a, rng.bool()),
            signed(b, rng.bool()),
            signed(c, rng.bool()),
        ]);
    }

    clauses
}

/// Generates `num_clauses` random clauses of `width` distinct variables
/// over `1..=num_vars`, polarity chosen fairly. Wider clauses exercise the
/// replacement scan and watch moves far harder than 3-SAT does.
///
/// # Panics
///
/// If `width < 2` or `num_vars < width`.
#[must_use]
pub fn random_ksat(
    num_vars: usize,
    num_clauses: usize,
    width: usize,
    seed: u64,
) -> Vec<SmallVec<[i32; 8]>> {
    assert!(width >= 2, "clauses below width 2 are rejected by the store");
    assert!(num_vars >= width, "cannot draw {width} distinct variables from {num_vars}");

    let mut rng = fastrand::Rng::with_seed(seed);
    let mut seen = FxHashSet::default();
    let mut clauses = Vec::with_capacity(num_clauses);

    for _ in 0..num_clauses {
        seen.clear();
        let mut clause = SmallVec::new();

        while clause.len() < width {
            let var = rng.usize(1..=num_vars);
            if seen.insert(var) {
                clause.push(signed(var, rng.bool()));
            }
        }

        clauses.push(clause);
    }

    clauses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause_store::ClauseStore;
    use crate::literal::PackedLiteral;

    #[test]
    fn test_deterministic_per_seed() {
        assert_eq!(random_3sat(20, 50, 7), random_3sat(20, 50, 7));
        assert_ne!(random_3sat(20, 50, 7), random_3sat(20, 50, 8));
        assert_eq!(random_ksat(20, 30, 5, 3), random_ksat(20, 30, 5, 3));
    }

    #[test]
    fn test_clause_shape() {
        for clause in random_3sat(10, 100, 42) {
            let mut vars: Vec<u32> = clause.iter().map(|l| l.unsigned_abs()).collect();
            vars.sort_unstable();
            vars.dedup();
            assert_eq!(vars.len(), 3);
            assert!(vars.iter().all(|&v| (1..=10).contains(&v)));
        }

        for clause in random_ksat(12, 60, 6, 42) {
            assert_eq!(clause.len(), 6);
            let mut vars: Vec<u32> = clause.iter().map(|l| l.unsigned_abs()).collect();
            vars.sort_unstable();
            vars.dedup();
            assert_eq!(vars.len(), 6);
        }
    }

    #[test]
    fn test_output_feeds_the_store() {
        let clauses = random_ksat(15, 40, 4, 1);
        let store = ClauseStore::<PackedLiteral>::new(&clauses, 15).unwrap();
        assert_eq!(store.len(), 40);
        assert_eq!(store.num_lits(), 160);
    }
}
