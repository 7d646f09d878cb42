use std::fmt;

use thiserror::Error;
use tokpos_text::TokenStringError;

/// One coordinate of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Lowercase constructor parameter name (`"x"` / `"y"`).
    #[must_use]
    pub const fn param(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "X",
            Self::Y => "Y",
        })
    }
}

/// A required constructor argument was absent. This is a caller bug, not bad
/// data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("invalid argument: '{param}' is required")]
    InvalidArgument { param: &'static str },
}

impl ConstructionError {
    #[must_use]
    pub const fn missing(axis: Axis) -> Self {
        Self::InvalidArgument { param: axis.param() }
    }

    /// Name of the offending parameter.
    #[must_use]
    pub const fn param(&self) -> &'static str {
        match self {
            Self::InvalidArgument { param } => *param,
        }
    }
}

/// Why the current field values don't form a location. Recoverable: a later
/// context update may fix it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("{axis} is not ready")]
    NotReady { axis: Axis },

    #[error("{axis} value '{value}' can't be parsed as an integer")]
    NotInteger { axis: Axis, value: String },
}

impl LocationError {
    /// The axis that failed.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        match self {
            Self::NotReady { axis } | Self::NotInteger { axis, .. } => *axis,
        }
    }
}

/// Failure building a position from raw source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error("invalid token syntax in '{param}': {source}")]
    Syntax {
        param: &'static str,
        #[source]
        source: TokenStringError,
    },
}
