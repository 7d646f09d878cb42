#![forbid(unsafe_code)]

//! Token strings for tokpos.
//!
//! A [`TokenString`] wraps source text such as `"{{TileX}}"` or
//! `"1{{Offset: left}}"` and re-resolves it whenever the token context
//! changes. It is the reactive field that coordinate composites are built
//! from.

pub mod error;
pub mod parser;
pub mod token_string;

pub use error::{Result, TokenStringError};
pub use token_string::TokenString;
