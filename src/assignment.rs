#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Partial truth assignments.
//!
//! A variable is unassigned until the decision loop or the propagator sets
//! it, and it keeps that value until the external backtracker unassigns it;
//! nothing in between ever flips a value. Two backings implement the same
//! trait: [`VecAssignment`] stores one [`VarState`] per variable,
//! [`PackedAssignment`] packs the same information into two bit sets.

use crate::literal::{Literal, Variable};
use bit_vec::BitVec;
use std::fmt::Debug;

/// Truth state of a single variable.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Default, Hash, PartialOrd, Ord)]
pub enum VarState {
    /// Not yet assigned either way.
    #[default]
    Unassigned,
    /// Assigned the contained truth value.
    Assigned(bool),
}

impl VarState {
    /// `true` if the variable holds a value.
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        matches!(self, Self::Assigned(_))
    }

    /// `true` if the variable holds no value.
    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        !self.is_assigned()
    }

    /// `true` if the variable is assigned `true`.
    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::Assigned(true))
    }

    /// `true` if the variable is assigned `false`.
    #[must_use]
    pub const fn is_false(self) -> bool {
        matches!(self, Self::Assigned(false))
    }
}

/// A partial assignment over variables `1..=num_vars`.
///
/// Assignments are set-once: [`assign`](Assignment::assign) panics if the
/// variable already holds a value. The propagator checks before every
/// assignment it forces, so only a buggy caller can trigger the panic.
pub trait Assignment: Clone + Debug {
    /// An empty assignment over `num_vars` variables.
    fn new(num_vars: usize) -> Self;

    /// The state of `var`.
    fn value(&self, var: Variable) -> VarState;

    /// Makes `lit` true: assigns its variable the polarity of the literal.
    ///
    /// # Panics
    ///
    /// On double assignment, whatever the repeated value.
    fn assign<L: Literal>(&mut self, lit: L);

    /// Clears `var` back to unassigned. Driven by the external
    /// backtracker, never by propagation.
    fn unassign(&mut self, var: Variable);

    /// Number of variable states held, including the unused slot 0.
    fn len(&self) -> usize;

    /// `true` if no variables are tracked.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The truth value of `var`, if assigned.
    fn var_value(&self, var: Variable) -> Option<bool> {
        match self.value(var) {
            VarState::Assigned(b) => Some(b),
            VarState::Unassigned => None,
        }
    }

    /// The truth value of `lit` under the assignment, if its variable is
    /// assigned.
    fn literal_value<L: Literal>(&self, lit: L) -> Option<bool> {
        self.var_value(lit.variable()).map(|b| b == lit.polarity())
    }

    /// `true` if `lit` evaluates to true. Unassigned is not true.
    fn is_true<L: Literal>(&self, lit: L) -> bool {
        self.literal_value(lit) == Some(true)
    }

    /// `true` if `lit` evaluates to false. Unassigned is not false.
    fn is_false<L: Literal>(&self, lit: L) -> bool {
        self.literal_value(lit) == Some(false)
    }

    /// `true` if `var` holds a value.
    fn is_assigned(&self, var: Variable) -> bool {
        self.value(var).is_assigned()
    }

    /// `true` once every variable holds a value.
    fn all_assigned(&self) -> bool {
        (1..self.len()).all(|v| self.value(v as Variable).is_assigned())
    }
}

/// Assignment backed by one [`VarState`] per variable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VecAssignment(Vec<VarState>);

impl Assignment for VecAssignment {
    fn new(num_vars: usize) -> Self {
        Self(vec![VarState::Unassigned; num_vars + 1])
    }

    fn value(&self, var: Variable) -> VarState {
        self.0[var as usize]
    }

    fn assign<L: Literal>(&mut self, lit: L) {
        let var = lit.variable() as usize;
        assert!(
            self.0[var].is_unassigned(),
            "double assignment of variable {var}"
        );
        self.0[var] = VarState::Assigned(lit.polarity());
    }

    fn unassign(&mut self, var: Variable) {
        self.0[var as usize] = VarState::Unassigned;
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Assignment backed by two bit sets: an assigned mask and a polarity
/// mask. An eighth the size of [`VecAssignment`], at the price of two bit
/// lookups per query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackedAssignment {
    assigned: BitVec,
    polarity: BitVec,
}

impl Assignment for PackedAssignment {
    fn new(num_vars: usize) -> Self {
        Self {
            assigned: BitVec::from_elem(num_vars + 1, false),
            polarity: BitVec::from_elem(num_vars + 1, false),
        }
    }

    fn value(&self, var: Variable) -> VarState {
        if self.assigned.get(var as usize) == Some(true) {
            VarState::Assigned(self.polarity.get(var as usize) == Some(true))
        } else {
            VarState::Unassigned
        }
    }

    fn assign<L: Literal>(&mut self, lit: L) {
        let var = lit.variable() as usize;
        assert!(
            self.value(lit.variable()).is_unassigned(),
            "double assignment of variable {var}"
        );
        self.assigned.set(var, true);
        self.polarity.set(var, lit.polarity());
    }

    fn unassign(&mut self, var: Variable) {
        self.assigned.set(var as usize, false);
    }

    fn len(&self) -> usize {
        self.assigned.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::PackedLiteral;

    fn lit(value: i32) -> PackedLiteral {
        PackedLiteral::from_i32(value)
    }

    #[test]
    fn test_assign_and_query() {
        let mut a = VecAssignment::new(3);

        assert_eq!(a.value(2), VarState::Unassigned);
        assert!(!a.is_true(lit(2)));
        assert!(!a.is_false(lit(2)));

        a.assign(lit(-2));
        assert_eq!(a.value(2), VarState::Assigned(false));
        assert!(a.is_true(lit(-2)));
        assert!(a.is_false(lit(2)));
        assert_eq!(a.literal_value(lit(2)), Some(false));

        a.unassign(2);
        assert_eq!(a.value(2), VarState::Unassigned);
        assert_eq!(a.literal_value(lit(2)), None);
    }

    #[test]
    #[should_panic(expected = "double assignment of variable 1")]
    fn test_double_assignment_panics() {
        let mut a = VecAssignment::new(2);
        a.assign(lit(1));
        a.assign(lit(-1));
    }

    #[test]
    #[should_panic(expected = "double assignment of variable 1")]
    fn test_packed_double_assignment_panics() {
        let mut a = PackedAssignment::new(2);
        a.assign(lit(1));
        a.assign(lit(1));
    }

    #[test]
    fn test_all_assigned() {
        let mut a = PackedAssignment::new(2);
        assert!(!a.all_assigned());
        a.assign(lit(1));
        a.assign(lit(-2));
        assert!(a.all_assigned());
    }

    #[test]
    fn test_backings_agree() {
        let mut rng = fastrand::Rng::with_seed(11);
        let mut vec = VecAssignment::new(50);
        let mut packed = PackedAssignment::new(50);

        for _ in 0..200 {
            let var = rng.u32(1..=50);
            if vec.is_assigned(var) {
                vec.unassign(var);
                packed.unassign(var);
            } else {
                let l = PackedLiteral::new(var, rng.bool());
                vec.assign(l);
                packed.assign(l);
            }
        }

        for var in 1..=50 {
            assert_eq!(vec.value(var), packed.value(var));
        }
    }
}
