#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Literal representations.
//!
//! Every structure in the crate is generic over a [`Literal`] layout, so the
//! packed and signed representations can be swapped without touching the
//! propagation code. The default throughout is [`PackedLiteral`].

use core::ops::{Neg, Not};
use std::fmt::Debug;
use std::hash::Hash;

/// A propositional variable, numbered from 1.
pub type Variable = u32;

/// A variable together with a polarity.
pub trait Literal: Copy + Debug + Eq + Hash + Default {
    /// Creates a literal for `var` with the given polarity (`true` = positive).
    fn new(var: Variable, polarity: bool) -> Self;

    /// The variable this literal mentions.
    fn variable(self) -> Variable;

    /// `true` for a positive literal, `false` for a negated one.
    fn polarity(self) -> bool;

    /// The same variable with the opposite polarity.
    #[must_use]
    fn negated(self) -> Self;

    /// `true` if the literal is negated.
    fn is_negated(self) -> bool {
        !self.polarity()
    }

    /// `true` if the literal is positive.
    fn is_positive(self) -> bool {
        self.polarity()
    }

    /// Dense index for per-literal tables: positive literals map to even
    /// slots, negated ones to odd. A table indexed by slot needs
    /// `2 * (num_vars + 1)` entries for variables `1..=num_vars`.
    fn slot(self) -> usize {
        ((self.variable() as usize) << 1) | usize::from(!self.polarity())
    }

    /// Builds a literal from DIMACS convention: sign is polarity, magnitude
    /// is the variable. `value` must be nonzero.
    #[must_use]
    fn from_i32(value: i32) -> Self {
        let polarity = value.is_positive();
        let var = value.unsigned_abs();
        Self::new(var, polarity)
    }

    /// The literal in DIMACS convention.
    fn to_i32(self) -> i32 {
        let var = i32::try_from(self.variable()).expect("variable overflows i32");
        if self.polarity() { var } else { -var }
    }
}

/// Literal packed into a single `u32`: polarity in the top bit, variable in
/// the lower 31. The dense layout keeps clause scans cache-friendly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PackedLiteral(u32);

impl Literal for PackedLiteral {
    fn new(var: Variable, polarity: bool) -> Self {
        Self(var & 0x7FFF_FFFF | (u32::from(polarity) << 31))
    }

    fn variable(self) -> Variable {
        self.0 & 0x7FFF_FFFF
    }

    fn polarity(self) -> bool {
        (self.0 >> 31) != 0
    }

    fn negated(self) -> Self {
        Self(self.0 ^ (1 << 31))
    }
}

impl Neg for PackedLiteral {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for PackedLiteral {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

/// Literal stored as a signed `i32`, matching the DIMACS data model
/// directly. Mostly useful for debugging and for callers that already hold
/// signed clause data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DimacsLiteral(i32);

impl Literal for DimacsLiteral {
    fn new(var: Variable, polarity: bool) -> Self {
        let var = i32::try_from(var).expect("variable overflows the signed layout");

        if polarity { Self(var) } else { Self(-var) }
    }

    fn variable(self) -> Variable {
        self.0.unsigned_abs()
    }

    fn polarity(self) -> bool {
        self.0.is_positive()
    }

    fn negated(self) -> Self {
        Self(-self.0)
    }

    fn to_i32(self) -> i32 {
        self.0
    }
}

impl Neg for DimacsLiteral {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for DimacsLiteral {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}
