#![forbid(unsafe_code)]

//! Diagnostic state reported by contextual values.
//!
//! A [`ContextualState`] explains *why* a value is not ready: which tokens it
//! references that the context doesn't know, which are known but unready,
//! and any free-form errors. Composites merge their members' states into one
//! record with [`ContextualState::merge_from`].
//!
//! # Invariants
//!
//! 1. Token sets are ordered and deduplicated (`BTreeSet`).
//! 2. Merging is associative and the empty state is its identity.
//! 3. Errors keep insertion order; merging appends.

use std::collections::BTreeSet;
use std::fmt;

/// Mergeable diagnostic record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContextualState {
    /// Tokens referenced but not present in the context.
    pub invalid_tokens: BTreeSet<String>,
    /// Tokens present in the context but without a current value.
    pub unready_tokens: BTreeSet<String>,
    /// Other errors, in the order they were reported.
    pub errors: Vec<String>,
}

impl ContextualState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether nothing is invalid (unready tokens are allowed).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.invalid_tokens.is_empty() && self.errors.is_empty()
    }

    /// Whether the state reports no problems at all.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.is_valid() && self.unready_tokens.is_empty()
    }

    pub fn add_invalid_token(&mut self, name: impl Into<String>) -> &mut Self {
        self.invalid_tokens.insert(name.into());
        self
    }

    pub fn add_unready_token(&mut self, name: impl Into<String>) -> &mut Self {
        self.unready_tokens.insert(name.into());
        self
    }

    pub fn add_error(&mut self, error: impl Into<String>) -> &mut Self {
        self.errors.push(error.into());
        self
    }

    /// Fold another state into this one.
    pub fn merge_from(&mut self, other: &ContextualState) -> &mut Self {
        self.invalid_tokens
            .extend(other.invalid_tokens.iter().cloned());
        self.unready_tokens
            .extend(other.unready_tokens.iter().cloned());
        self.errors.extend(other.errors.iter().cloned());
        self
    }
}

impl fmt::Display for ContextualState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ready() {
            return f.write_str("ready");
        }
        let mut parts = Vec::new();
        if !self.invalid_tokens.is_empty() {
            parts.push(format!(
                "invalid tokens: {}",
                self.invalid_tokens
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        if !self.unready_tokens.is_empty() {
            parts.push(format!(
                "unready tokens: {}",
                self.unready_tokens
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        if !self.errors.is_empty() {
            parts.push(format!("errors: {}", self.errors.join("; ")));
        }
        f.write_str(&parts.join("; "))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
