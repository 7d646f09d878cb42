#![forbid(unsafe_code)]

//! The contextual capability shared by every reactive value.
//!
//! A contextual value is re-evaluated against a [`Context`] on demand and can
//! report whether that evaluation changed it. Everything that reacts to token
//! changes (token strings, aggregates, composites built from them) exposes the
//! same five operations, so containers can reduce over the trait without
//! knowing concrete member types.

use crate::context::Context;
use crate::state::ContextualState;

/// A value that re-resolves when the token context changes.
pub trait Contextual {
    /// Whether the value can ever differ between contexts.
    fn is_mutable(&self) -> bool;

    /// Whether the value is valid for the most recently applied context.
    fn is_ready(&self) -> bool;

    /// Re-evaluate against `context`. Returns whether anything observable
    /// changed.
    fn update_context(&mut self, context: &dyn Context) -> bool;

    /// Names of the tokens this value depends on.
    fn tokens_used(&self) -> Vec<String>;

    /// Diagnostic info for the most recently applied context.
    fn diagnostic_state(&self) -> ContextualState;
}

/// A contextual value that resolves to text.
pub trait ContextualText: Contextual {
    /// The text resolved for the most recently applied context. Empty while
    /// the value is not ready.
    fn resolved_text(&self) -> &str;
}

impl<T: Contextual + ?Sized> Contextual for Box<T> {
    fn is_mutable(&self) -> bool {
        (**self).is_mutable()
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn update_context(&mut self, context: &dyn Context) -> bool {
        (**self).update_context(context)
    }

    fn tokens_used(&self) -> Vec<String> {
        (**self).tokens_used()
    }

    fn diagnostic_state(&self) -> ContextualState {
        (**self).diagnostic_state()
    }
}
