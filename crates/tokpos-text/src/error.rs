use thiserror::Error;

pub type Result<T> = std::result::Result<T, TokenStringError>;

/// Malformed placeholder syntax. Offsets are byte offsets into the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenStringError {
    #[error("unterminated token placeholder at byte {offset}")]
    Unterminated { offset: usize },

    #[error("empty token name at byte {offset}")]
    EmptyName { offset: usize },

    #[error("invalid token name '{name}' at byte {offset}")]
    InvalidName { name: String, offset: usize },

    #[error("nested token placeholder at byte {offset}")]
    Nested { offset: usize },
}

impl TokenStringError {
    /// Byte offset of the offending placeholder.
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            Self::Unterminated { offset }
            | Self::EmptyName { offset }
            | Self::InvalidName { offset, .. }
            | Self::Nested { offset } => *offset,
        }
    }
}
