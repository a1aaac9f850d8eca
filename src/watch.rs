#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The watch index: which clauses are watching which literals.
//!
//! Each clause watches two of its literals, recorded as absolute positions
//! into the clause store's literal buffer. As long as neither watched
//! literal is false the clause cannot be unit or falsified, so propagation
//! only ever needs to visit the clauses watching a literal that just became
//! false.
//!
//! The per-literal lists are intrusive linked lists threaded through an
//! append-only node arena. `heads[slot]` holds the most recently appended
//! node for that literal; each node carries the clause it was appended for,
//! the literal it was watching at the time, and the previous head. Moving a
//! watch from literal A to literal B appends one node to B's list and
//! *leaves the A node in place*: removal would cost a list traversal, so
//! the stale node is instead detected on the next visit, when the clause's
//! recorded watch positions no longer name the node's literal. Arena growth
//! is bounded by two nodes per clause plus one per watch move.
//!
//! Nodes are never mutated after being appended, which keeps an in-progress
//! traversal of one literal's list valid while watch moves prepend to other
//! lists.

use crate::clause_store::ClauseStore;
use crate::literal::Literal;
use crate::literal::PackedLiteral;

/// Handle to a node in the watch arena.
pub type NodeId = u32;

const NONE: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WatchNode<L> {
    clause: u32,
    lit: L,
    next: u32,
}

/// Watched positions plus per-literal watch lists for one clause store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watches<L: Literal = PackedLiteral> {
    watched: Vec<(u32, u32)>,
    heads: Vec<u32>,
    nodes: Vec<WatchNode<L>>,
}

impl<L: Literal> Watches<L> {
    /// Builds the index for `store`, watching the first two literals of
    /// every clause.
    #[must_use]
    pub fn new(store: &ClauseStore<L>) -> Self {
        let mut watches = Self {
            watched: Vec::with_capacity(store.len()),
            heads: vec![NONE; 2 * (store.num_vars() + 1)],
            nodes: Vec::with_capacity(2 * store.len()),
        };

        for c in 0..store.len() {
            watches.initialize(store, c);
        }

        log::debug!(
            target: "watch",
            "initialized watch index: {} clauses, {} nodes",
            store.len(),
            watches.nodes.len()
        );

        watches
    }

    /// Registers clause `c`, watching its first two literals. Clauses must
    /// be registered once each, in id order.
    pub fn initialize(&mut self, store: &ClauseStore<L>, c: usize) {
        debug_assert_eq!(self.watched.len(), c);

        let (start, _) = store.span(c);
        self.watched.push((start, start + 1));
        self.push_node(store.lit(start), c);
        self.push_node(store.lit(start + 1), c);
    }

    /// The two watched positions of clause `c`, as absolute indices into
    /// the store's literal buffer.
    #[must_use]
    pub fn watched(&self, c: usize) -> (u32, u32) {
        self.watched[c]
    }

    /// The most recent node watching `lit`, if any clause does.
    #[must_use]
    pub fn head(&self, lit: L) -> Option<NodeId> {
        match self.heads[lit.slot()] {
            NONE => None,
            id => Some(id),
        }
    }

    /// The node appended before `node` for the same literal, if any.
    #[must_use]
    pub fn next(&self, node: NodeId) -> Option<NodeId> {
        match self.nodes[node as usize].next {
            NONE => None,
            id => Some(id),
        }
    }

    /// The clause id and recorded literal of `node`. The node is stale if
    /// neither of the clause's current watched positions holds the literal.
    #[must_use]
    pub fn node(&self, node: NodeId) -> (usize, L) {
        let n = &self.nodes[node as usize];
        (n.clause as usize, n.lit)
    }

    /// Rewatches clause `c` from position `from_pos` to position `to_pos`,
    /// which holds literal `to`. Constant time: the recorded position is
    /// overwritten and one node is appended to `to`'s list; the node on the
    /// old literal's list goes stale in place.
    pub fn move_watch(&mut self, c: usize, from_pos: u32, to_pos: u32, to: L) {
        let pair = &mut self.watched[c];
        if pair.0 == from_pos {
            pair.0 = to_pos;
        } else {
            debug_assert_eq!(pair.1, from_pos);
            pair.1 = to_pos;
        }
        debug_assert_ne!(pair.0, pair.1);

        self.push_node(to, c);
    }

    /// Total nodes appended so far: two per clause plus one per watch move.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn push_node(&mut self, lit: L, clause: usize) {
        let slot = lit.slot();
        let id = u32::try_from(self.nodes.len()).expect("watch arena exceeds u32 ids");
        let clause = u32::try_from(clause).expect("clause id exceeds u32");

        self.nodes.push(WatchNode {
            clause,
            lit,
            next: self.heads[slot],
        });
        self.heads[slot] = id;
    }
}
