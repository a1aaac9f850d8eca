#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Unit propagation.
//!
//! Propagation consumes the trail suffix the caller hands it: every
//! variable in `trail[trail_start..]` contributes its newly-false literal
//! to a FIFO queue, and each dequeued literal's watch list is walked. A
//! visited clause is skipped if its node is stale or its other watch is
//! already true, rewatched if a non-false replacement literal exists, and
//! otherwise resolved through its other watch: false means conflict,
//! unassigned means the literal is forced true, appended to the trail and
//! its complement enqueued.
//!
//! Processing order is fully deterministic: FIFO over trail order, then
//! newest-first per watch list, then storage order within a clause scan.
//! The same inputs always produce the same forced assignments in the same
//! order, which reproducible solving and the lockstep tests rely on.
//!
//! Three implementations of the same [`Propagator`] contract:
//! [`WatchedLiterals`] (lazy append-only watch index, the production
//! engine), [`EagerWatches`] (same algorithm over eagerly pruned watch
//! lists, matching `WatchedLiterals` force-for-force) and [`UnitSearch`]
//! (fixpoint scan of every clause, the semantic baseline).

use crate::assignment::Assignment;
use crate::clause_store::ClauseStore;
use crate::literal::{Literal, PackedLiteral};
use crate::trail::Trail;
use crate::watch::Watches;
use smallvec::SmallVec;
use std::collections::VecDeque;

/// Outcome of one propagation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Every consequence of the trail window was drawn without
    /// contradiction.
    Consistent,
    /// The contained clause has all literals false under the current
    /// assignment. Assignments forced earlier in the same call stay in
    /// place; recovery belongs to the caller's backtracking loop.
    Conflict(usize),
}

/// A unit propagation procedure over a clause store.
pub trait Propagator<L: Literal> {
    /// Builds the propagator's internal state for `store`.
    fn new(store: &ClauseStore<L>) -> Self;

    /// Draws every consequence of `trail[trail_start..]`, appending forced
    /// assignments to `assignment` and `trail` in place. Entries before
    /// `trail_start` must already be fully propagated; passing the trail
    /// length returned by the previous call keeps this true.
    ///
    /// Returns the status together with the new trail length, which is the
    /// `trail_start` for the caller's next invocation. A call at the
    /// resulting fixpoint, with `trail_start == trail.len()`, changes
    /// nothing and returns [`Status::Consistent`].
    ///
    /// # Panics
    ///
    /// If a variable in the window is not reflected in `assignment`.
    fn propagate<A: Assignment>(
        &mut self,
        store: &ClauseStore<L>,
        assignment: &mut A,
        trail: &mut Trail,
        trail_start: usize,
    ) -> (Status, usize);
}

/// Seeds the worklist with the literal falsified by each newly assigned
/// variable in the window.
fn enqueue_falsified<L: Literal, A: Assignment>(
    queue: &mut VecDeque<L>,
    assignment: &A,
    trail: &Trail,
    trail_start: usize,
) {
    debug_assert!(trail_start <= trail.len());

    queue.clear();
    for i in trail_start..trail.len() {
        let var = trail[i];
        let Some(value) = assignment.var_value(var) else {
            panic!("trail variable {var} is not reflected in the assignment");
        };
        queue.push_back(L::new(var, !value));
    }
}

/// First position in clause `c` holding a non-false literal, in storage
/// order, skipping the two watched positions.
fn find_replacement<L: Literal, A: Assignment>(
    store: &ClauseStore<L>,
    assignment: &A,
    c: usize,
    skip1: u32,
    skip2: u32,
) -> Option<u32> {
    let (start, end) = store.span(c);
    (start..end).filter(|&pos| pos != skip1 && pos != skip2).find(
        // SAFETY: pos ranges over clause c's span
        |&pos| assignment.literal_value(unsafe { store.lit_unchecked(pos) }) != Some(false),
    )
}

/// The production propagator: watch lists over an append-only node arena.
///
/// Watch moves never touch the old list, so a sweep may meet stale nodes;
/// they are recognized against the clause's current watched positions and
/// skipped. See [`Watches`] for the structure itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedLiterals<L: Literal = PackedLiteral> {
    watches: Watches<L>,
    queue: VecDeque<L>,
}

impl<L: Literal> WatchedLiterals<L> {
    /// Read access to the watch index, mainly for inspecting arena growth.
    #[must_use]
    pub const fn watches(&self) -> &Watches<L> {
        &self.watches
    }

    fn sweep<A: Assignment>(
        &mut self,
        f: L,
        store: &ClauseStore<L>,
        assignment: &mut A,
        trail: &mut Trail,
    ) -> Option<usize> {
        let mut cursor = self.watches.head(f);

        while let Some(id) = cursor {
            let (c, lit) = self.watches.node(id);
            cursor = self.watches.next(id);

            let (p1, p2) = self.watches.watched(c);
            let (w1, w2) = (store.lit(p1), store.lit(p2));

            // stale node: the clause no longer watches this literal
            if w1 != lit && w2 != lit {
                continue;
            }

            let (false_pos, other_pos) = if w1 == lit { (p1, p2) } else { (p2, p1) };
            let other = store.lit(other_pos);

            if assignment.is_true(other) {
                continue;
            }

            if let Some(to_pos) = find_replacement(store, assignment, c, false_pos, other_pos) {
                self.watches.move_watch(c, false_pos, to_pos, store.lit(to_pos));
                continue;
            }

            // no replacement: the clause is unit or false through `other`
            if assignment.is_false(other) {
                log::trace!(target: "propagation", "conflict at clause {c}");
                return Some(c);
            }

            log::trace!(
                target: "propagation",
                "clause {c} forces literal {}",
                other.to_i32()
            );
            assignment.assign(other);
            trail.push(other.variable());
            self.queue.push_back(other.negated());
        }

        None
    }
}

impl<L: Literal> Propagator<L> for WatchedLiterals<L> {
    fn new(store: &ClauseStore<L>) -> Self {
        Self {
            watches: Watches::new(store),
            queue: VecDeque::new(),
        }
    }

    fn propagate<A: Assignment>(
        &mut self,
        store: &ClauseStore<L>,
        assignment: &mut A,
        trail: &mut Trail,
        trail_start: usize,
    ) -> (Status, usize) {
        enqueue_falsified(&mut self.queue, assignment, trail, trail_start);

        while let Some(f) = self.queue.pop_front() {
            if let Some(c) = self.sweep(f, store, assignment, trail) {
                return (Status::Conflict(c), trail.len());
            }
        }

        (Status::Consistent, trail.len())
    }
}

/// Reference propagator with eagerly pruned watch lists.
///
/// Keeps one clause-id list per literal slot and removes an entry the
/// moment its watch moves, the classical scheme the arena replaces. Lists
/// are traversed newest-first, so the sweep visits live clauses in exactly
/// the order [`WatchedLiterals`] does and the two produce identical
/// assignments, trails and conflict clauses. The lockstep tests depend on
/// that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EagerWatches<L: Literal = PackedLiteral> {
    watched: Vec<(u32, u32)>,
    lists: Vec<SmallVec<[u32; 6]>>,
    queue: VecDeque<L>,
}

impl<L: Literal> EagerWatches<L> {
    fn sweep<A: Assignment>(
        &mut self,
        f: L,
        store: &ClauseStore<L>,
        assignment: &mut A,
        trail: &mut Trail,
    ) -> Option<usize> {
        let slot = f.slot();
        let mut i = self.lists[slot].len();

        while i > 0 {
            i -= 1;
            let c = self.lists[slot][i] as usize;

            let (p1, p2) = self.watched[c];
            let (w1, w2) = (store.lit(p1), store.lit(p2));
            if w1 != f && w2 != f {
                debug_assert!(false, "clause {c} listed under a literal it does not watch");
                continue;
            }

            let (false_pos, other_pos) = if w1 == f { (p1, p2) } else { (p2, p1) };
            let other = store.lit(other_pos);

            if assignment.is_true(other) {
                continue;
            }

            if let Some(to_pos) = find_replacement(store, assignment, c, false_pos, other_pos) {
                let pair = &mut self.watched[c];
                if pair.0 == false_pos {
                    pair.0 = to_pos;
                } else {
                    pair.1 = to_pos;
                }

                let entry = self.lists[slot].remove(i);
                self.lists[store.lit(to_pos).slot()].push(entry);
                continue;
            }

            if assignment.is_false(other) {
                return Some(c);
            }

            assignment.assign(other);
            trail.push(other.variable());
            self.queue.push_back(other.negated());
        }

        None
    }
}

impl<L: Literal> Propagator<L> for EagerWatches<L> {
    fn new(store: &ClauseStore<L>) -> Self {
        let mut watched = Vec::with_capacity(store.len());
        let mut lists = vec![SmallVec::new(); 2 * (store.num_vars() + 1)];

        for c in 0..store.len() {
            let (start, _) = store.span(c);
            watched.push((start, start + 1));

            let id = u32::try_from(c).expect("clause id exceeds u32");
            lists[store.lit(start).slot()].push(id);
            lists[store.lit(start + 1).slot()].push(id);
        }

        Self {
            watched,
            lists,
            queue: VecDeque::new(),
        }
    }

    fn propagate<A: Assignment>(
        &mut self,
        store: &ClauseStore<L>,
        assignment: &mut A,
        trail: &mut Trail,
        trail_start: usize,
    ) -> (Status, usize) {
        enqueue_falsified(&mut self.queue, assignment, trail, trail_start);

        while let Some(f) = self.queue.pop_front() {
            if let Some(c) = self.sweep(f, store, assignment, trail) {
                return (Status::Conflict(c), trail.len());
            }
        }

        (Status::Consistent, trail.len())
    }
}

/// Baseline propagator: rescans every clause until a fixpoint.
///
/// Ignores the trail window and derives everything from the assignment
/// alone, so it is quadratic where the watched variants are incremental.
/// Useful as a semantic oracle: the set of unit-implied literals has a
/// unique fixpoint, so on [`Status::Consistent`] the final assignment must
/// match the watched propagators exactly. On conflict only the outcome is
/// comparable, since a full scan may stop at a different falsified clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnitSearch;

impl<L: Literal> Propagator<L> for UnitSearch {
    fn new(_store: &ClauseStore<L>) -> Self {
        Self
    }

    fn propagate<A: Assignment>(
        &mut self,
        store: &ClauseStore<L>,
        assignment: &mut A,
        trail: &mut Trail,
        _trail_start: usize,
    ) -> (Status, usize) {
        loop {
            let mut changed = false;

            for c in 0..store.len() {
                let mut satisfied = false;
                let mut open = 0usize;
                let mut unit = None;

                for &l in store.clause(c) {
                    match assignment.literal_value(l) {
                        Some(true) => {
                            satisfied = true;
                            break;
                        }
                        None => {
                            open += 1;
                            if unit.is_none() {
                                unit = Some(l);
                            }
                        }
                        Some(false) => {}
                    }
                }

                if satisfied {
                    continue;
                }

                match (open, unit) {
                    (0, _) => return (Status::Conflict(c), trail.len()),
                    (1, Some(l)) => {
                        assignment.assign(l);
                        trail.push(l.variable());
                        changed = true;
                    }
                    _ => {}
                }
            }

            if !changed {
                return (Status::Consistent, trail.len());
            }
        }
    }
}
