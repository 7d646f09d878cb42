#![forbid(unsafe_code)]

//! Core: token contexts, the contextual capability, aggregation, diagnostics,
//! and the tile location type.

pub mod aggregate;
pub mod context;
pub mod contextual;
pub mod location;
pub mod state;

pub use aggregate::{AggregateContextual, ContextualMembers};
pub use context::{Context, TokenContext, TokenLookup};
pub use contextual::{Contextual, ContextualText};
pub use location::Location;
pub use state::ContextualState;
