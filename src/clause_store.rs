#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Flat clause storage.
//!
//! All clause literals live in one contiguous buffer; an offsets table of
//! `m + 1` entries delimits the clauses, so clause `c` occupies
//! `lits[offsets[c]..offsets[c + 1]]` (CSR layout). The store is immutable
//! once built: clause addition, deletion and simplification all happen in
//! the loader that produces it, never here.

use crate::literal::Literal;
use itertools::Itertools;
use std::fmt;
use std::ops::Index;

/// Rejected input at store construction. Both variants point a loader bug
/// back at the offending clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// A clause with fewer than two literals. Unit and empty clauses must
    /// be resolved by the caller before the store is built.
    InvalidClause {
        /// Index of the offending clause in construction order.
        clause: usize,
        /// Number of literals it contained.
        len: usize,
    },
    /// A literal that is zero or mentions a variable above `num_vars`.
    OutOfRangeLiteral {
        /// Index of the offending clause in construction order.
        clause: usize,
        /// The literal as given, in signed convention.
        literal: i32,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidClause { clause, len } => {
                write!(f, "clause {clause} has {len} literals, need at least 2")
            }
            Self::OutOfRangeLiteral { clause, literal } => {
                write!(f, "clause {clause} holds out-of-range literal {literal}")
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Immutable flat storage for a clause set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseStore<L: Literal = crate::literal::PackedLiteral> {
    lits: Vec<L>,
    offsets: Vec<u32>,
    num_vars: usize,
}

// the offsets table always carries its leading 0, even when empty
impl<L: Literal> Default for ClauseStore<L> {
    fn default() -> Self {
        Self {
            lits: Vec::new(),
            offsets: vec![0],
            num_vars: 0,
        }
    }
}

impl<L: Literal> ClauseStore<L> {
    /// Builds the store from clauses in signed-literal convention over
    /// variables `1..=num_vars`.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidClause`] for a clause with fewer than two
    /// literals, [`StoreError::OutOfRangeLiteral`] for a zero literal or a
    /// variable above `num_vars`.
    pub fn new<C: AsRef<[i32]>>(clauses: &[C], num_vars: usize) -> Result<Self, StoreError> {
        let total: usize = clauses.iter().map(|c| c.as_ref().len()).sum();
        let mut lits = Vec::with_capacity(total);
        let mut offsets = Vec::with_capacity(clauses.len() + 1);
        offsets.push(0);

        for (idx, clause) in clauses.iter().enumerate() {
            let clause = clause.as_ref();
            if clause.len() < 2 {
                return Err(StoreError::InvalidClause {
                    clause: idx,
                    len: clause.len(),
                });
            }

            for &literal in clause {
                if literal == 0 || literal.unsigned_abs() as usize > num_vars {
                    return Err(StoreError::OutOfRangeLiteral {
                        clause: idx,
                        literal,
                    });
                }
                lits.push(L::from_i32(literal));
            }

            let end = u32::try_from(lits.len()).expect("literal buffer exceeds u32 offsets");
            offsets.push(end);
        }

        log::debug!(
            target: "store",
            "built clause store: {} clauses, {} literals, {} variables",
            clauses.len(),
            lits.len(),
            num_vars
        );

        Ok(Self {
            lits,
            offsets,
            num_vars,
        })
    }

    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// `true` if the store holds no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of variables the store was built over.
    #[must_use]
    pub const fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Total literal count across all clauses.
    #[must_use]
    pub fn num_lits(&self) -> usize {
        self.lits.len()
    }

    /// Half-open position range `[start, end)` of clause `c` in the literal
    /// buffer.
    #[must_use]
    pub fn span(&self, c: usize) -> (u32, u32) {
        (self.offsets[c], self.offsets[c + 1])
    }

    /// The literal at absolute position `pos` in the buffer.
    #[must_use]
    pub fn lit(&self, pos: u32) -> L {
        self.lits[pos as usize]
    }

    /// The literal at absolute position `pos`, without a bounds check.
    ///
    /// # Safety
    ///
    /// `pos` must lie inside the span of some clause.
    #[must_use]
    pub unsafe fn lit_unchecked(&self, pos: u32) -> L {
        debug_assert!((pos as usize) < self.lits.len());
        unsafe { *self.lits.get_unchecked(pos as usize) }
    }

    /// The literals of clause `c`.
    #[must_use]
    pub fn clause(&self, c: usize) -> &[L] {
        let (start, end) = self.span(c);
        &self.lits[start as usize..end as usize]
    }

    /// Iterates over clauses as literal slices, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &[L]> {
        self.offsets
            .iter()
            .tuple_windows()
            .map(|(&start, &end)| &self.lits[start as usize..end as usize])
    }
}

impl<L: Literal> Index<usize> for ClauseStore<L> {
    type Output = [L];

    fn index(&self, index: usize) -> &Self::Output {
        self.clause(index)
    }
}
