#![forbid(unsafe_code)]

//! tokpos public facade.
//!
//! Tile positions whose X and Y are token strings, re-resolved whenever the
//! token context changes. See [`TokenPosition`].

pub mod error;
pub mod position;

pub use error::{Axis, ConstructionError, LocationError, PositionError};
pub use position::{PositionPhase, TokenPosition};
pub use tokpos_core::{
    AggregateContextual, Context, Contextual, ContextualMembers, ContextualState, ContextualText,
    Location, TokenContext, TokenLookup,
};
pub use tokpos_text::{TokenString, TokenStringError};

pub mod prelude {
    pub use tokpos_core as core;
    pub use tokpos_text as text;

    pub use crate::{Contextual, ContextualText, Location, TokenContext, TokenPosition};
}
