#![deny(missing_docs)]
//! This crate provides the unit-propagation core of a DPLL/CDCL SAT solver:
//! watched-literal propagation over immutable flat clause storage, with the
//! decision loop, clause learning and backtracking policy left to the
//! caller.

/// The `assignment` module implements partial truth assignments over the
/// problem variables, with vector and packed bit-set backings.
pub mod assignment;

/// The `clause_store` module implements immutable flat (CSR) storage for
/// the clause set.
pub mod clause_store;

/// The `generate` module implements seeded random k-SAT instance
/// generation for tests and benchmarks.
pub mod generate;

/// The `literal` module implements the literal layouts every structure is
/// generic over.
pub mod literal;

/// The `propagation` module implements the propagation algorithms: the
/// lazy watch-arena engine and two reference implementations.
pub mod propagation;

/// The `trail` module implements the append-only assignment history.
pub mod trail;

/// The `watch` module implements watched positions and the append-only
/// watch node arena.
pub mod watch;
