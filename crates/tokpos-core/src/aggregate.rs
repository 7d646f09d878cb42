#![forbid(unsafe_code)]

//! Aggregation of several contextual values into one.
//!
//! [`AggregateContextual`] owns an ordered set of members and implements
//! [`Contextual`] by reducing over them. Composites embed one aggregate
//! instead of repeating the readiness, mutability and update logic for each
//! of their fields.
//!
//! # Design
//!
//! Members are stored in any container implementing [`ContextualMembers`]:
//! a `Vec<C>` built with [`add`](AggregateContextual::add), a fixed array, or
//! a 2-tuple of possibly different types. The aggregate reduces through the
//! trait, never through concrete member types.
//!
//! # Invariants
//!
//! 1. Members are visited in insertion order.
//! 2. `update_context` updates **every** member, even after one reported a
//!    change.
//! 3. `is_ready` / `is_mutable` are plain AND / OR folds over all members and
//!    are never cached.
//! 4. `tokens_used` concatenates member results without deduplication.
//! 5. An empty aggregate is ready, immutable and never changes.

use std::fmt;

use crate::context::Context;
use crate::contextual::Contextual;
use crate::state::ContextualState;

/// An ordered container of contextual members.
pub trait ContextualMembers {
    /// Number of members.
    fn count(&self) -> usize;

    /// Visit each member in order.
    fn for_each(&self, f: &mut dyn FnMut(&dyn Contextual));

    /// Visit each member mutably in order.
    fn for_each_mut(&mut self, f: &mut dyn FnMut(&mut dyn Contextual));
}

impl<C: Contextual> ContextualMembers for Vec<C> {
    fn count(&self) -> usize {
        self.len()
    }

    fn for_each(&self, f: &mut dyn FnMut(&dyn Contextual)) {
        for member in self {
            f(member);
        }
    }

    fn for_each_mut(&mut self, f: &mut dyn FnMut(&mut dyn Contextual)) {
        for member in self {
            f(member);
        }
    }
}

impl<C: Contextual, const N: usize> ContextualMembers for [C; N] {
    fn count(&self) -> usize {
        N
    }

    fn for_each(&self, f: &mut dyn FnMut(&dyn Contextual)) {
        for member in self {
            f(member);
        }
    }

    fn for_each_mut(&mut self, f: &mut dyn FnMut(&mut dyn Contextual)) {
        for member in self {
            f(member);
        }
    }
}

impl<A: Contextual, B: Contextual> ContextualMembers for (A, B) {
    fn count(&self) -> usize {
        2
    }

    fn for_each(&self, f: &mut dyn FnMut(&dyn Contextual)) {
        f(&self.0);
        f(&self.1);
    }

    fn for_each_mut(&mut self, f: &mut dyn FnMut(&mut dyn Contextual)) {
        f(&mut self.0);
        f(&mut self.1);
    }
}

/// Reduces the state of its members into one contextual value.
#[derive(Clone)]
pub struct AggregateContextual<M = Vec<Box<dyn Contextual>>> {
    members: M,
}

impl<C> AggregateContextual<Vec<C>> {
    /// Create an empty aggregate.
    #[must_use]
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Track another member. Builder-style.
    #[must_use]
    pub fn add(mut self, member: C) -> Self {
        self.members.push(member);
        self
    }
}

impl<C> Default for AggregateContextual<Vec<C>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> AggregateContextual<M> {
    /// Wrap an existing member container (array or tuple).
    #[must_use]
    pub const fn with_members(members: M) -> Self {
        Self { members }
    }

    /// Borrow the members.
    #[must_use]
    pub const fn members(&self) -> &M {
        &self.members
    }

    /// Unwrap the members.
    #[must_use]
    pub fn into_members(self) -> M {
        self.members
    }
}

impl<M: ContextualMembers> AggregateContextual<M> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.count() == 0
    }
}

impl<M: ContextualMembers> Contextual for AggregateContextual<M> {
    fn is_mutable(&self) -> bool {
        let mut mutable = false;
        self.members.for_each(&mut |m| mutable |= m.is_mutable());
        mutable
    }

    fn is_ready(&self) -> bool {
        let mut ready = true;
        self.members.for_each(&mut |m| ready &= m.is_ready());
        ready
    }

    fn update_context(&mut self, context: &dyn Context) -> bool {
        let mut changed = false;
        self.members
            .for_each_mut(&mut |m| changed |= m.update_context(context));
        tracing::trace!(
            message = "aggregate.update",
            members = self.members.count(),
            changed
        );
        changed
    }

    fn tokens_used(&self) -> Vec<String> {
        let mut tokens = Vec::new();
        self.members.for_each(&mut |m| tokens.extend(m.tokens_used()));
        tokens
    }

    fn diagnostic_state(&self) -> ContextualState {
        let mut state = ContextualState::new();
        self.members.for_each(&mut |m| {
            state.merge_from(&m.diagnostic_state());
        });
        state
    }
}

impl<M: ContextualMembers> fmt::Debug for AggregateContextual<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregateContextual")
            .field("members", &self.members.count())
            .field("mutable", &self.is_mutable())
            .field("ready", &self.is_ready())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
