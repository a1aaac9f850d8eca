#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Assignment history.

use crate::assignment::Assignment;
use crate::literal::Variable;
use std::ops::Index;

/// Append-only record of variables in assignment order.
///
/// A prefix of the trail is already propagated; the propagator consumes the
/// suffix the caller hands it and may append forced variables of its own.
/// The trail only ever shrinks through [`truncate`](Trail::truncate), which
/// the external backtracker drives.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trail {
    t: Vec<Variable>,
}

impl Trail {
    /// An empty trail with room for `num_vars` entries.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            t: Vec::with_capacity(num_vars),
        }
    }

    /// Appends an assigned variable.
    pub fn push(&mut self, var: Variable) {
        self.t.push(var);
    }

    /// Number of assignments recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.t.len()
    }

    /// `true` if nothing has been assigned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Iterates over recorded variables, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.t.iter()
    }

    /// Drops every entry at position `mark` or later, unassigning each
    /// popped variable. The propagator never calls this; it exists for the
    /// backtracking loop that owns this trail.
    pub fn truncate<A: Assignment>(&mut self, mark: usize, assignment: &mut A) {
        while self.t.len() > mark {
            if let Some(var) = self.t.pop() {
                assignment.unassign(var);
            }
        }
    }
}

impl Index<usize> for Trail {
    type Output = Variable;

    fn index(&self, index: usize) -> &Self::Output {
        &self.t[index]
    }
}
