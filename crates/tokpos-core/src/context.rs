#![forbid(unsafe_code)]

//! Token contexts.
//!
//! A [`Context`] answers one question: what is the current value of token
//! `name` (optionally with an input argument)? Contextual values hold no
//! reference to the context between updates; it is passed to each
//! `update_context` call and read synchronously.
//!
//! [`TokenContext`] is a plain in-memory binding table. Token names are
//! matched ASCII case-insensitively.
//!
//! # Example
//!
//! ```
//! use tokpos_core::context::{Context, TokenContext, TokenLookup};
//!
//! let mut ctx = TokenContext::new();
//! ctx.set("Season", "spring");
//! ctx.set_not_ready("Weather");
//!
//! assert_eq!(ctx.lookup("season", None), TokenLookup::Ready("spring"));
//! assert_eq!(ctx.lookup("Weather", None), TokenLookup::NotReady);
//! assert_eq!(ctx.lookup("Day", None), TokenLookup::Missing);
//! ```

use ahash::AHashMap;

/// Result of looking up a token in a [`Context`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenLookup<'a> {
    /// The context has no token by that name.
    Missing,
    /// The token exists but has no value in the current context.
    NotReady,
    /// The token's current value.
    Ready(&'a str),
}

impl<'a> TokenLookup<'a> {
    /// The value, if ready.
    #[must_use]
    pub const fn value(self) -> Option<&'a str> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Supplies current token bindings.
pub trait Context {
    /// Look up a token, with the input argument if the placeholder had one.
    fn lookup(&self, name: &str, input: Option<&str>) -> TokenLookup<'_>;
}

impl<T: Context + ?Sized> Context for &T {
    fn lookup(&self, name: &str, input: Option<&str>) -> TokenLookup<'_> {
        (**self).lookup(name, input)
    }
}

// ─── TokenContext ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Binding {
    /// `None` marks a registered but unready token.
    value: Option<String>,
    /// Values for specific input arguments, keyed by the trimmed input.
    by_input: AHashMap<String, String>,
}

/// In-memory token bindings.
///
/// Lookups with an input argument first try the `(name, input)` binding and
/// fall back to the token's plain value.
#[derive(Debug, Clone, Default)]
pub struct TokenContext {
    bindings: AHashMap<String, Binding>,
}

fn key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

impl TokenContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, marking it ready.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.bindings.entry(key(name)).or_default().value = Some(value.into());
        self
    }

    /// Bind `name` with a specific `input` argument to `value`.
    pub fn set_with_input(
        &mut self,
        name: &str,
        input: &str,
        value: impl Into<String>,
    ) -> &mut Self {
        self.bindings
            .entry(key(name))
            .or_default()
            .by_input
            .insert(input.trim().to_string(), value.into());
        self
    }

    /// Register `name` without a value. Lookups report [`TokenLookup::NotReady`]
    /// unless an input-specific binding matches.
    pub fn set_not_ready(&mut self, name: &str) -> &mut Self {
        self.bindings.entry(key(name)).or_default().value = None;
        self
    }

    /// Remove every binding for `name`. Returns whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.bindings.remove(&key(name)).is_some()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(&key(name))
    }

    /// Number of registered token names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

impl Context for TokenContext {
    fn lookup(&self, name: &str, input: Option<&str>) -> TokenLookup<'_> {
        let Some(binding) = self.bindings.get(&key(name)) else {
            return TokenLookup::Missing;
        };
        if let Some(value) = input.and_then(|i| binding.by_input.get(i.trim())) {
            return TokenLookup::Ready(value);
        }
        match &binding.value {
            Some(value) => TokenLookup::Ready(value),
            None => TokenLookup::NotReady,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
