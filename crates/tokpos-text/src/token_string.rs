#![forbid(unsafe_code)]

//! Token strings: source text whose placeholders resolve against a context.
//!
//! # Design
//!
//! The source is parsed once into literal and token parts. Each
//! [`update_context`](Contextual::update_context) re-resolves every part and
//! replaces the cached resolution. The resolution is an `Option<String>`:
//! `None` while any placeholder lacks a value. "Changed" compares the whole
//! option, so a readiness flip always counts as a change.
//!
//! # Invariants
//!
//! 1. A string without placeholders is immutable, always ready, and resolves
//!    to its source text. Updates are no-ops returning `false`.
//! 2. A string with placeholders starts not ready until its first update.
//! 3. `tokens_used` lists each referenced token once, in first-occurrence
//!    order, compared ASCII case-insensitively, keeping the first spelling.
//! 4. Updating twice with an unchanged context returns `false` the second
//!    time.

use std::fmt;
use std::str::FromStr;

use tokpos_core::{Context, Contextual, ContextualState, ContextualText, TokenLookup};

use crate::error::{Result, TokenStringError};
use crate::parser::{self, Part};

/// A string value that may contain `{{Token}}` placeholders.
#[derive(Debug, Clone)]
pub struct TokenString {
    raw: String,
    parts: Vec<Part>,
    tokens: Vec<String>,
    value: Option<String>,
    state: ContextualState,
}

impl TokenString {
    /// Parse source text.
    pub fn parse(raw: &str) -> Result<Self> {
        let parts = parser::parse(raw)?;

        let mut tokens: Vec<String> = Vec::new();
        for part in &parts {
            let Part::Token(token) = part else {
                continue;
            };
            if !tokens.iter().any(|t| t.eq_ignore_ascii_case(&token.name)) {
                tokens.push(token.name.clone());
            }
        }

        let mut state = ContextualState::new();
        let value = if tokens.is_empty() {
            Some(raw.to_string())
        } else {
            for token in &tokens {
                state.add_unready_token(token.as_str());
            }
            None
        };

        Ok(Self {
            raw: raw.to_string(),
            parts,
            tokens,
            value,
            state,
        })
    }

    /// A string with no placeholders. `text` is taken verbatim.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        let raw = text.into();
        let parts = if raw.is_empty() {
            Vec::new()
        } else {
            vec![Part::Literal(raw.clone())]
        };
        Self {
            value: Some(raw.clone()),
            raw,
            parts,
            tokens: Vec::new(),
            state: ContextualState::new(),
        }
    }

    /// The unresolved source text.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The resolved value, if ready.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Whether the source contains at least one placeholder.
    #[must_use]
    pub fn has_tokens(&self) -> bool {
        !self.tokens.is_empty()
    }

    fn resolve(&self, context: &dyn Context) -> (Option<String>, ContextualState) {
        let mut state = ContextualState::new();
        let mut text = String::with_capacity(self.raw.len());
        let mut ready = true;

        for part in &self.parts {
            match part {
                Part::Literal(literal) => text.push_str(literal),
                Part::Token(token) => {
                    match context.lookup(&token.name, token.input.as_deref()) {
                        TokenLookup::Ready(value) => text.push_str(value),
                        TokenLookup::NotReady => {
                            ready = false;
                            state.add_unready_token(token.name.as_str());
                        }
                        TokenLookup::Missing => {
                            ready = false;
                            state.add_invalid_token(token.name.as_str());
                        }
                    }
                }
            }
        }

        (ready.then_some(text), state)
    }
}

impl Contextual for TokenString {
    fn is_mutable(&self) -> bool {
        !self.tokens.is_empty()
    }

    fn is_ready(&self) -> bool {
        self.value.is_some()
    }

    fn update_context(&mut self, context: &dyn Context) -> bool {
        if !self.is_mutable() {
            return false;
        }

        let (value, state) = self.resolve(context);
        let changed = value != self.value;
        self.value = value;
        self.state = state;

        tracing::trace!(
            message = "token_string.update",
            raw = %self.raw,
            changed,
            ready = self.value.is_some()
        );
        changed
    }

    fn tokens_used(&self) -> Vec<String> {
        self.tokens.clone()
    }

    fn diagnostic_state(&self) -> ContextualState {
        self.state.clone()
    }
}

impl ContextualText for TokenString {
    fn resolved_text(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

impl FromStr for TokenString {
    type Err = TokenStringError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TokenString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tokpos_core::TokenContext;
    use tracing_test::traced_test;

    #[test]
    fn literal_source_is_ready_and_immutable() {
        let mut s = TokenString::parse("12").unwrap();
        assert!(!s.is_mutable());
        assert!(s.is_ready());
        assert_eq!(s.resolved_text(), "12");
        assert!(!s.update_context(&TokenContext::new()));
        assert_eq!(s.value(), Some("12"));
    }

    #[test]
    fn literal_constructor_takes_text_verbatim() {
        let s = TokenString::literal("{{not a token}}");
        assert!(!s.is_mutable());
        assert_eq!(s.resolved_text(), "{{not a token}}");
        assert!(s.tokens_used().is_empty());
    }

    #[test]
    fn tokenized_source_starts_unready() {
        let s = TokenString::parse("{{TileX}}").unwrap();
        assert!(s.is_mutable());
        assert!(!s.is_ready());
        assert_eq!(s.resolved_text(), "");
        assert!(s.diagnostic_state().unready_tokens.contains("TileX"));
    }

    #[test]
    fn resolves_and_reports_change() {
        let mut s = TokenString::parse("1{{Digit}}").unwrap();
        let mut ctx = TokenContext::new();
        ctx.set("Digit", "5");

        assert!(s.update_context(&ctx));
        assert_eq!(s.resolved_text(), "15");
        assert!(s.diagnostic_state().is_ready());

        assert!(!s.update_context(&ctx));

        ctx.set("Digit", "7");
        assert!(s.update_context(&ctx));
        assert_eq!(s.resolved_text(), "17");
    }

    #[test]
    fn missing_token_is_invalid() {
        let mut s = TokenString::parse("{{Nope}}").unwrap();
        assert!(!s.update_context(&TokenContext::new()));
        assert!(!s.is_ready());
        let state = s.diagnostic_state();
        assert!(state.invalid_tokens.contains("Nope"));
        assert!(!state.is_valid());
    }

    #[test]
    fn losing_readiness_is_a_change() {
        let mut s = TokenString::parse("{{A}}").unwrap();
        let mut ctx = TokenContext::new();
        ctx.set("A", "1");
        assert!(s.update_context(&ctx));

        ctx.set_not_ready("A");
        assert!(s.update_context(&ctx));
        assert!(!s.is_ready());
        assert_eq!(s.value(), None);
        assert!(s.diagnostic_state().unready_tokens.contains("A"));
    }

    #[test]
    fn input_arguments_reach_the_context() {
        let mut s = TokenString::parse("{{Offset: left}}").unwrap();
        let mut ctx = TokenContext::new();
        ctx.set("Offset", "0").set_with_input("Offset", "left", "-4");
        s.update_context(&ctx);
        assert_eq!(s.resolved_text(), "-4");
    }

    #[test]
    fn tokens_used_deduplicates_case_insensitively() {
        let s = TokenString::parse("{{A}}{{b}}{{a:1}}{{B}}").unwrap();
        assert_eq!(s.tokens_used(), vec!["A".to_string(), "b".to_string()]);
    }

    #[test]
    fn syntax_errors_surface() {
        assert!(matches!(
            "{{A".parse::<TokenString>(),
            Err(TokenStringError::Unterminated { offset: 0 })
        ));
    }

    #[test]
    fn display_is_raw_source() {
        let s = TokenString::parse("{{A}}0").unwrap();
        assert_eq!(s.to_string(), "{{A}}0");
        assert_eq!(s.raw(), "{{A}}0");
        assert!(s.has_tokens());
    }

    #[test]
    #[traced_test]
    fn update_emits_trace_event() {
        let mut s = TokenString::parse("{{A}}").unwrap();
        let mut ctx = TokenContext::new();
        ctx.set("A", "1");
        s.update_context(&ctx);
        assert!(logs_contain("token_string.update"));
    }
}
